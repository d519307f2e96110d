use std::collections::HashMap;

use api_types::expense::Expense;
use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};

use crate::{
    EngineError, ExpenseField, MutationResult, ResultEngine, expense_groups, expenses,
    query::{
        FieldSpec, LinkBuilder, ListOptions, Page, RouteName, Shaped, SortSpec, paginate,
        shape_expense,
    },
};

use super::{Engine, list_context, with_tx};

impl Engine {
    /// Lists expenses, one page at a time.
    ///
    /// With `group_id` only the expenses of that group are listed and a
    /// missing group is reported as [`EngineError::KeyNotFound`].
    pub async fn list_expenses(
        &self,
        group_id: Option<i32>,
        options: &ListOptions,
        links: &dyn LinkBuilder,
    ) -> ResultEngine<Page<Shaped<Expense>>> {
        let fields = FieldSpec::parse(&options.fields);
        let sort = SortSpec::<ExpenseField>::parse(options.sort.as_deref())?;
        let request = options.page;

        with_tx!(self, |db_tx| {
            let mut query = expenses::Entity::find();
            let mut context = list_context(options);
            let route = match group_id {
                Some(group_id) => {
                    self.require_expense_group(&db_tx, group_id).await?;
                    query = query.filter(expenses::Column::ExpenseGroupId.eq(group_id));
                    context = context.with("groupId", group_id);
                    RouteName::ExpensesForGroup
                }
                None => RouteName::ExpenseList,
            };

            let total_count = query.clone().count(&db_tx).await?;
            let descriptor = paginate(total_count, request, route, &context, links);
            tracing::debug!(
                "listing expenses: page {} of {}, offset {}, limit {}",
                request.page(),
                descriptor.total_pages,
                request.offset(),
                request.limit()
            );

            let models = if request.is_past_end(total_count) {
                Vec::new()
            } else {
                sort.apply(query)
                    .offset(request.offset())
                    .limit(request.limit())
                    .all(&db_tx)
                    .await?
            };

            let items = models
                .into_iter()
                .map(|model| shape_expense(Expense::from(model), &fields))
                .collect();

            Ok(Page { items, descriptor })
        })
    }

    pub async fn expense(&self, id: i32) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("expense {id}")))?;
            Ok(Expense::from(model))
        })
    }

    /// Returns expense `id` only when it belongs to group `group_id`.
    pub async fn expense_in_group(&self, group_id: i32, id: i32) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(id)
                .filter(expenses::Column::ExpenseGroupId.eq(group_id))
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound(format!("expense {id} in expense group {group_id}"))
                })?;
            Ok(Expense::from(model))
        })
    }

    /// Inserts an expense. A group id with no matching group is rejected by
    /// the store and reported as an `Error` result.
    pub async fn insert_expense(&self, expense: &Expense) -> MutationResult<Expense> {
        MutationResult::settle(self.try_insert_expense(expense).await)
    }

    pub async fn update_expense(&self, id: i32, expense: &Expense) -> MutationResult<Expense> {
        MutationResult::settle(self.try_update_expense(id, expense).await)
    }

    pub async fn delete_expense(&self, id: i32) -> MutationResult<Expense> {
        MutationResult::settle(self.try_delete_expense(id).await)
    }

    async fn try_insert_expense(&self, expense: &Expense) -> Result<MutationResult<Expense>, DbErr> {
        with_tx!(self, |db_tx| {
            let model = expenses::ActiveModel::from(expense).insert(&db_tx).await?;
            Ok(MutationResult::created(Expense::from(model)))
        })
    }

    async fn try_update_expense(
        &self,
        id: i32,
        expense: &Expense,
    ) -> Result<MutationResult<Expense>, DbErr> {
        with_tx!(self, |db_tx| {
            let exists = expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_some();
            if !exists {
                return Ok(MutationResult::not_found());
            }

            let mut model = expenses::ActiveModel::from(expense);
            model.id = ActiveValue::Unchanged(id);
            let model = model.update(&db_tx).await?;
            Ok(MutationResult::updated(Expense::from(model)))
        })
    }

    async fn try_delete_expense(&self, id: i32) -> Result<MutationResult<Expense>, DbErr> {
        with_tx!(self, |db_tx| {
            let Some(model) = expenses::Entity::find_by_id(id).one(&db_tx).await? else {
                return Ok(MutationResult::not_found());
            };
            expenses::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(MutationResult::deleted(Expense::from(model)))
        })
    }

    async fn require_expense_group(
        &self,
        db_tx: &DatabaseTransaction,
        group_id: i32,
    ) -> ResultEngine<()> {
        expense_groups::Entity::find_by_id(group_id)
            .one(db_tx)
            .await?
            .map(|_| ())
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense group {group_id}")))
    }

    /// Expenses of the given groups in storage order, keyed by group id.
    pub(super) async fn expenses_by_group(
        &self,
        db_tx: &DatabaseTransaction,
        group_ids: Vec<i32>,
    ) -> Result<HashMap<i32, Vec<Expense>>, DbErr> {
        let mut grouped: HashMap<i32, Vec<Expense>> = HashMap::new();
        if group_ids.is_empty() {
            return Ok(grouped);
        }

        let models = expenses::Entity::find()
            .filter(expenses::Column::ExpenseGroupId.is_in(group_ids))
            .order_by_asc(expenses::Column::Id)
            .all(db_tx)
            .await?;
        for model in models {
            grouped
                .entry(model.expense_group_id)
                .or_default()
                .push(Expense::from(model));
        }
        Ok(grouped)
    }
}
