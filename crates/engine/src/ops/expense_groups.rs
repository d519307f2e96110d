use api_types::{expense::Expense, expense_group::ExpenseGroup};
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, ExpenseGroupField, ExpenseGroupStatusKind, MutationResult, ResultEngine,
    expense_groups, expenses,
    query::{
        FieldSpec, LinkBuilder, ListOptions, Page, RouteName, Shaped, SortSpec, paginate,
        shape_expense_group,
    },
};

use super::{Engine, list_context, with_tx};

/// Equality filters of the expense group list.
#[derive(Clone, Debug, Default)]
pub struct ExpenseGroupFilter {
    /// Status name such as `open`. Unrecognized names do not filter.
    pub status: Option<String>,
    pub user_id: Option<String>,
}

impl Engine {
    /// Lists expense groups, one page at a time.
    ///
    /// Expenses are loaded only when a requested field mentions them.
    pub async fn list_expense_groups(
        &self,
        filter: &ExpenseGroupFilter,
        options: &ListOptions,
        links: &dyn LinkBuilder,
    ) -> ResultEngine<Page<Shaped<ExpenseGroup>>> {
        let fields = FieldSpec::parse(&options.fields);
        let include_expenses = fields.mentions("expense");
        let sort = SortSpec::<ExpenseGroupField>::parse(options.sort.as_deref())?;
        let status = ExpenseGroupStatusKind::from_filter(filter.status.as_deref());
        let request = options.page;

        with_tx!(self, |db_tx| {
            let mut query = expense_groups::Entity::find();
            if let Some(status) = status {
                query = query.filter(expense_groups::Column::ExpenseGroupStatusId.eq(status.id()));
            }
            if let Some(user_id) = filter.user_id.as_deref() {
                query = query.filter(expense_groups::Column::UserId.eq(user_id));
            }

            let total_count = query.clone().count(&db_tx).await?;
            let context = list_context(options)
                .with_opt("status", filter.status.as_deref())
                .with_opt("userId", filter.user_id.as_deref());
            let descriptor = paginate(
                total_count,
                request,
                RouteName::ExpenseGroupsList,
                &context,
                links,
            );
            tracing::debug!(
                "listing expense groups: page {} of {}, offset {}, limit {}",
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

            let mut nested = if include_expenses {
                let ids = models.iter().map(|model| model.id).collect();
                self.expenses_by_group(&db_tx, ids).await?
            } else {
                Default::default()
            };

            let items = models
                .into_iter()
                .map(|model| {
                    let group_expenses = nested.remove(&model.id).unwrap_or_default();
                    shape_expense_group(model.into_dto(group_expenses), &fields)
                })
                .collect();

            Ok(Page { items, descriptor })
        })
    }

    /// Returns an expense group with all its expenses.
    pub async fn expense_group(&self, id: i32) -> ResultEngine<ExpenseGroup> {
        with_tx!(self, |db_tx| {
            let model = expense_groups::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("expense group {id}")))?;
            let group_expenses = self
                .expenses_by_group(&db_tx, vec![id])
                .await?
                .remove(&id)
                .unwrap_or_default();
            Ok(model.into_dto(group_expenses))
        })
    }

    /// Inserts a group and its embedded expenses in one transaction.
    ///
    /// Identifiers in the payload are ignored; the result carries the ones
    /// assigned by the store.
    pub async fn insert_expense_group(&self, group: &ExpenseGroup) -> MutationResult<ExpenseGroup> {
        MutationResult::settle(self.try_insert_expense_group(group).await)
    }

    /// Replaces the scalar fields of group `id`. Expenses are left untouched.
    pub async fn update_expense_group(
        &self,
        id: i32,
        group: &ExpenseGroup,
    ) -> MutationResult<ExpenseGroup> {
        MutationResult::settle(self.try_update_expense_group(id, group).await)
    }

    /// Deletes group `id` together with its expenses.
    pub async fn delete_expense_group(&self, id: i32) -> MutationResult<ExpenseGroup> {
        MutationResult::settle(self.try_delete_expense_group(id).await)
    }

    async fn try_insert_expense_group(
        &self,
        group: &ExpenseGroup,
    ) -> Result<MutationResult<ExpenseGroup>, DbErr> {
        with_tx!(self, |db_tx| {
            let model = expense_groups::ActiveModel::from(group)
                .insert(&db_tx)
                .await?;

            let mut created = Vec::with_capacity(group.expenses.len());
            for expense in &group.expenses {
                let mut expense_model = expenses::ActiveModel::from(expense);
                expense_model.expense_group_id = ActiveValue::Set(model.id);
                created.push(Expense::from(expense_model.insert(&db_tx).await?));
            }

            Ok(MutationResult::created(model.into_dto(created)))
        })
    }

    async fn try_update_expense_group(
        &self,
        id: i32,
        group: &ExpenseGroup,
    ) -> Result<MutationResult<ExpenseGroup>, DbErr> {
        with_tx!(self, |db_tx| {
            let exists = expense_groups::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_some();
            if !exists {
                return Ok(MutationResult::not_found());
            }

            let mut model = expense_groups::ActiveModel::from(group);
            model.id = ActiveValue::Unchanged(id);
            let model = model.update(&db_tx).await?;
            let group_expenses = self
                .expenses_by_group(&db_tx, vec![id])
                .await?
                .remove(&id)
                .unwrap_or_default();

            Ok(MutationResult::updated(model.into_dto(group_expenses)))
        })
    }

    async fn try_delete_expense_group(
        &self,
        id: i32,
    ) -> Result<MutationResult<ExpenseGroup>, DbErr> {
        with_tx!(self, |db_tx| {
            let Some(model) = expense_groups::Entity::find_by_id(id).one(&db_tx).await? else {
                return Ok(MutationResult::not_found());
            };
            let group_expenses = self
                .expenses_by_group(&db_tx, vec![id])
                .await?
                .remove(&id)
                .unwrap_or_default();

            expenses::Entity::delete_many()
                .filter(expenses::Column::ExpenseGroupId.eq(id))
                .exec(&db_tx)
                .await?;
            expense_groups::Entity::delete_by_id(id).exec(&db_tx).await?;

            Ok(MutationResult::deleted(model.into_dto(group_expenses)))
        })
    }
}
