//! The module contains the `expenses` entity and its field table.

use api_types::{Amount, expense::Expense};
use chrono::SecondsFormat;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde_json::Value;

use crate::query::ResourceField;

/// An expense row. The amount is kept in minor units.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount_minor: i64,
    pub date: DateTimeUtc,
    pub description: Option<String>,
    pub expense_group_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expense_groups::Entity",
        from = "Column::ExpenseGroupId",
        to = "super::expense_groups::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ExpenseGroups,
}

impl Related<super::expense_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount: Amount::from_minor(model.amount_minor),
            date: model.date,
            description: model.description,
            expense_group_id: model.expense_group_id,
        }
    }
}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::NotSet,
            amount_minor: ActiveValue::Set(value.amount.minor()),
            date: ActiveValue::Set(value.date),
            description: ActiveValue::Set(value.description.clone()),
            expense_group_id: ActiveValue::Set(value.expense_group_id),
        }
    }
}

/// Scalar fields of an expense, usable in `sort` and `fields`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenseField {
    Id,
    Amount,
    Date,
    Description,
    ExpenseGroupId,
}

impl ResourceField for ExpenseField {
    type Entity = Entity;
    type Dto = Expense;

    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Amount,
        Self::Date,
        Self::Description,
        Self::ExpenseGroupId,
    ];
    const ID: Self = Self::Id;

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Description => "description",
            Self::ExpenseGroupId => "expenseGroupId",
        }
    }

    fn column(self) -> Column {
        match self {
            Self::Id => Column::Id,
            Self::Amount => Column::AmountMinor,
            Self::Date => Column::Date,
            Self::Description => Column::Description,
            Self::ExpenseGroupId => Column::ExpenseGroupId,
        }
    }

    // Same representation as the serialized `Expense`.
    fn value(self, dto: &Expense) -> Value {
        match self {
            Self::Id => Value::from(dto.id),
            Self::Amount => Value::String(dto.amount.to_string()),
            Self::Date => Value::String(dto.date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Description => dto
                .description
                .as_deref()
                .map_or(Value::Null, Value::from),
            Self::ExpenseGroupId => Value::from(dto.expense_group_id),
        }
    }
}
