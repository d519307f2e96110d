//! Fixed lookup table of expense group statuses.

use api_types::status::ExpenseGroupStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_group_statuses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense_groups::Entity")]
    ExpenseGroups,
}

impl Related<super::expense_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseGroupStatus {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
        }
    }
}

/// The seeded statuses, by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenseGroupStatusKind {
    Open = 1,
    Confirmed = 2,
    Processed = 3,
}

impl ExpenseGroupStatusKind {
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Maps a `status` query value to a status.
    ///
    /// Matching ignores case. An absent or unrecognized value yields `None`,
    /// which callers treat as "no status filter".
    pub fn from_filter(value: Option<&str>) -> Option<Self> {
        match value?.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "confirmed" => Some(Self::Confirmed),
            "processed" => Some(Self::Processed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_values_ignore_case() {
        assert_eq!(
            ExpenseGroupStatusKind::from_filter(Some("Confirmed")),
            Some(ExpenseGroupStatusKind::Confirmed)
        );
        assert_eq!(ExpenseGroupStatusKind::from_filter(Some("PROCESSED")).map(|s| s.id()), Some(3));
    }

    #[test]
    fn unknown_filter_means_no_filter() {
        assert_eq!(ExpenseGroupStatusKind::from_filter(Some("closed")), None);
        assert_eq!(ExpenseGroupStatusKind::from_filter(Some("")), None);
        assert_eq!(ExpenseGroupStatusKind::from_filter(None), None);
    }
}
