//! Wire types of the expense tracker API.
//!
//! Every payload is camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use money::{Amount, AmountError};

mod money;

pub mod expense {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        /// Store-assigned identifier; ignored on insert.
        #[serde(default)]
        pub id: i32,
        pub amount: Amount,
        pub date: DateTime<Utc>,
        pub description: Option<String>,
        pub expense_group_id: i32,
    }
}

pub mod expense_group {
    use super::*;

    use crate::expense::Expense;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseGroup {
        /// Store-assigned identifier; ignored on insert.
        #[serde(default)]
        pub id: i32,
        pub title: String,
        pub description: Option<String>,
        pub expense_group_status_id: i32,
        pub user_id: String,
        /// Expenses of the group, in storage order.
        ///
        /// Lists only fill this in when a requested field mentions expenses.
        #[serde(default)]
        pub expenses: Vec<Expense>,
    }
}

pub mod status {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseGroupStatus {
        pub id: i32,
        pub description: String,
    }
}

pub mod query {
    use super::*;

    pub const DEFAULT_PAGE_SIZE: u64 = 5;

    fn default_page_size() -> u64 {
        DEFAULT_PAGE_SIZE
    }

    fn default_group_sort() -> String {
        "id".to_string()
    }

    fn default_expense_sort() -> String {
        "date".to_string()
    }

    /// Query string of `GET /api/expensegroups`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseGroupsParams {
        #[serde(default = "default_group_sort")]
        pub sort: String,
        /// Status name (`open`, `confirmed`, `processed`); anything else is no filter.
        pub status: Option<String>,
        pub user_id: Option<String>,
        #[serde(default)]
        pub fields: String,
        #[serde(default)]
        pub page: u64,
        #[serde(default = "default_page_size")]
        pub page_size: u64,
    }

    impl Default for ExpenseGroupsParams {
        fn default() -> Self {
            Self {
                sort: default_group_sort(),
                status: None,
                user_id: None,
                fields: String::new(),
                page: 0,
                page_size: DEFAULT_PAGE_SIZE,
            }
        }
    }

    /// Query string of the expense list endpoints.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpensesParams {
        #[serde(default = "default_expense_sort")]
        pub sort: String,
        #[serde(default)]
        pub fields: String,
        #[serde(default)]
        pub page: u64,
        #[serde(default = "default_page_size")]
        pub page_size: u64,
    }

    impl Default for ExpensesParams {
        fn default() -> Self {
            Self {
                sort: default_expense_sort(),
                fields: String::new(),
                page: 0,
                page_size: DEFAULT_PAGE_SIZE,
            }
        }
    }

    /// Query string of single-item reads.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct FieldsParams {
        #[serde(default)]
        pub fields: String,
    }
}

pub mod patch {
    use super::*;

    use serde_json::Value;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum PatchOp {
        Add,
        Replace,
        Remove,
    }

    /// One entry of a JSON-patch document.
    ///
    /// `path` names a top-level field, e.g. `/title`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PatchOperation {
        pub op: PatchOp,
        pub path: String,
        #[serde(default)]
        pub value: Value,
    }
}

#[cfg(test)]
mod tests {
    use super::{expense_group::ExpenseGroup, patch::PatchOperation, query::ExpenseGroupsParams};

    #[test]
    fn expense_group_uses_camel_case() {
        let group: ExpenseGroup = serde_json::from_str(
            r#"{"title":"Trip","description":null,"expenseGroupStatusId":1,"userId":"u1"}"#,
        )
        .unwrap();
        assert_eq!(group.id, 0);
        assert!(group.expenses.is_empty());

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["expenseGroupStatusId"], 1);
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn list_params_have_defaults() {
        let params: ExpenseGroupsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.sort, "id");
        assert_eq!(params.page, 0);
        assert_eq!(params.page_size, 5);
        assert!(params.fields.is_empty());
    }

    #[test]
    fn patch_operation_value_defaults_to_null() {
        let op: PatchOperation =
            serde_json::from_str(r#"{"op":"remove","path":"/description"}"#).unwrap();
        assert!(op.value.is_null());
    }
}
