//! Multi-key sort specs such as `-date,amount`.

use sea_orm::{Order, QueryOrder};

use crate::{EngineError, ResultEngine};

use super::ResourceField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub descending: bool,
}

impl<F> SortKey<F> {
    fn order(&self) -> Order {
        if self.descending {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}

/// A validated sort spec.
///
/// Keys apply left to right: the first key is the primary ordering and each
/// following key breaks ties of the previous ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec<F> {
    keys: Vec<SortKey<F>>,
}

impl<F: ResourceField> SortSpec<F> {
    /// Compiles a comma separated spec; a leading `-` marks a descending key.
    ///
    /// `None` and blank specs have no keys. Unknown field names are rejected
    /// here, before any query runs.
    pub fn parse(raw: Option<&str>) -> ResultEngine<Self> {
        let Some(raw) = raw else {
            return Ok(Self { keys: Vec::new() });
        };

        let mut keys = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (descending, name) = match token.strip_prefix('-') {
                Some(name) => (true, name.trim()),
                None => (false, token),
            };
            if name.is_empty() {
                return Err(EngineError::InvalidSort(format!(
                    "missing field name in '{token}'"
                )));
            }
            let field = F::resolve(name).ok_or_else(|| {
                EngineError::InvalidSort(format!("unknown sort field '{name}'"))
            })?;
            keys.push(SortKey { field, descending });
        }

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[SortKey<F>] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Appends the ordering to a query.
    ///
    /// The resource id is always the last key so that rows with equal sort
    /// values keep their storage order and page windows never overlap.
    pub fn apply<Q: QueryOrder>(&self, query: Q) -> Q {
        let query = self
            .keys
            .iter()
            .fold(query, |query, key| query.order_by(key.field.column(), key.order()));

        if self.keys.iter().any(|key| key.field == F::ID) {
            query
        } else {
            query.order_by(F::ID.column(), Order::Asc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExpenseField, ExpenseGroupField};

    #[test]
    fn parse_reads_direction_and_order() {
        let spec = SortSpec::<ExpenseField>::parse(Some("-date, Amount")).unwrap();
        assert_eq!(
            spec.keys(),
            [
                SortKey {
                    field: ExpenseField::Date,
                    descending: true
                },
                SortKey {
                    field: ExpenseField::Amount,
                    descending: false
                },
            ]
        );
    }

    #[test]
    fn absent_or_blank_spec_has_no_keys() {
        assert!(SortSpec::<ExpenseGroupField>::parse(None).unwrap().is_empty());
        assert!(SortSpec::<ExpenseGroupField>::parse(Some(" , ")).unwrap().is_empty());
    }

    #[test]
    fn field_names_are_case_insensitive() {
        let spec = SortSpec::<ExpenseGroupField>::parse(Some("expensegroupstatusid,-USERID")).unwrap();
        assert_eq!(spec.keys()[0].field, ExpenseGroupField::ExpenseGroupStatusId);
        assert_eq!(spec.keys()[1].field, ExpenseGroupField::UserId);
        assert!(spec.keys()[1].descending);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = SortSpec::<ExpenseGroupField>::parse(Some("title,colour")).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidSort("unknown sort field 'colour'".to_string())
        );
    }

    #[test]
    fn nested_collection_is_not_sortable() {
        assert!(SortSpec::<ExpenseGroupField>::parse(Some("expenses")).is_err());
    }

    #[test]
    fn bare_minus_is_rejected() {
        assert!(SortSpec::<ExpenseField>::parse(Some("-")).is_err());
    }
}
