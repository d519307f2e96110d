//! The module contains the `expense_groups` entity and its field table.

use api_types::{expense::Expense, expense_group::ExpenseGroup};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde_json::Value;

use crate::query::ResourceField;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub expense_group_status_id: i32,
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(
        belongs_to = "super::expense_group_statuses::Entity",
        from = "Column::ExpenseGroupStatusId",
        to = "super::expense_group_statuses::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Statuses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::expense_group_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statuses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub(crate) fn into_dto(self, expenses: Vec<Expense>) -> ExpenseGroup {
        ExpenseGroup {
            id: self.id,
            title: self.title,
            description: self.description,
            expense_group_status_id: self.expense_group_status_id,
            user_id: self.user_id,
            expenses,
        }
    }
}

/// The id is left to the store; nested expenses are written separately.
impl From<&ExpenseGroup> for ActiveModel {
    fn from(value: &ExpenseGroup) -> Self {
        Self {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(value.title.clone()),
            description: ActiveValue::Set(value.description.clone()),
            expense_group_status_id: ActiveValue::Set(value.expense_group_status_id),
            user_id: ActiveValue::Set(value.user_id.clone()),
        }
    }
}

/// Scalar fields of an expense group, usable in `sort` and `fields`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenseGroupField {
    Id,
    Title,
    Description,
    ExpenseGroupStatusId,
    UserId,
}

impl ResourceField for ExpenseGroupField {
    type Entity = Entity;
    type Dto = ExpenseGroup;

    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Title,
        Self::Description,
        Self::ExpenseGroupStatusId,
        Self::UserId,
    ];
    const ID: Self = Self::Id;

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::ExpenseGroupStatusId => "expenseGroupStatusId",
            Self::UserId => "userId",
        }
    }

    fn column(self) -> Column {
        match self {
            Self::Id => Column::Id,
            Self::Title => Column::Title,
            Self::Description => Column::Description,
            Self::ExpenseGroupStatusId => Column::ExpenseGroupStatusId,
            Self::UserId => Column::UserId,
        }
    }

    fn value(self, dto: &ExpenseGroup) -> Value {
        match self {
            Self::Id => Value::from(dto.id),
            Self::Title => Value::from(dto.title.as_str()),
            Self::Description => dto
                .description
                .as_deref()
                .map_or(Value::Null, Value::from),
            Self::ExpenseGroupStatusId => Value::from(dto.expense_group_status_id),
            Self::UserId => Value::from(dto.user_id.as_str()),
        }
    }
}
