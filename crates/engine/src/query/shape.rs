//! Output shaping of list items.

use api_types::{expense::Expense, expense_group::ExpenseGroup};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::{ExpenseField, ExpenseGroupField};

use super::{FieldSpec, ResourceField};

const EXPENSES: &str = "expenses";
const EXPENSES_PREFIX: &str = "expenses.";

/// An item as returned to the caller: whole, or reduced to the requested
/// fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Shaped<T> {
    Full(T),
    Partial(ShapedFields),
}

impl<T> Shaped<T> {
    pub fn as_full(&self) -> Option<&T> {
        match self {
            Self::Full(item) => Some(item),
            Self::Partial(_) => None,
        }
    }

    pub fn as_partial(&self) -> Option<&ShapedFields> {
        match self {
            Self::Full(_) => None,
            Self::Partial(fields) => Some(fields),
        }
    }
}

/// Ordered `name -> value` pairs, serialized as a JSON object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedFields(Vec<(&'static str, ShapedValue)>);

impl ShapedFields {
    pub fn push(&mut self, name: &'static str, value: ShapedValue) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&ShapedValue> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ShapedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapedValue {
    Scalar(Value),
    Nested(Vec<Shaped<Expense>>),
}

fn pick<F: ResourceField>(dto: &F::Dto, spec: &FieldSpec) -> ShapedFields {
    let mut fields = ShapedFields::default();
    for field in spec.iter().filter_map(F::resolve) {
        fields.push(field.name(), ShapedValue::Scalar(field.value(dto)));
    }
    fields
}

/// Reduces an expense to the requested scalar fields. Unknown names are
/// dropped; an empty spec keeps the whole expense.
pub fn shape_expense(expense: Expense, spec: &FieldSpec) -> Shaped<Expense> {
    if spec.is_empty() {
        return Shaped::Full(expense);
    }
    Shaped::Partial(pick::<ExpenseField>(&expense, spec))
}

/// Reduces an expense group to the requested fields.
///
/// `expenses` attaches the whole expense list; `expenses.<name>` tokens
/// attach every expense reduced to those names. The plain token wins when
/// both forms are requested. The nested list always comes last.
pub fn shape_expense_group(group: ExpenseGroup, spec: &FieldSpec) -> Shaped<ExpenseGroup> {
    if spec.is_empty() {
        return Shaped::Full(group);
    }

    let (nested, flat): (Vec<&str>, Vec<&str>) = spec
        .iter()
        .partition(|token| *token == EXPENSES || token.starts_with(EXPENSES_PREFIX));

    let mut fields = pick::<ExpenseGroupField>(&group, &FieldSpec::from_tokens(flat));
    if nested.is_empty() {
        return Shaped::Partial(fields);
    }

    let expenses = if nested.contains(&EXPENSES) {
        group.expenses.into_iter().map(Shaped::Full).collect()
    } else {
        let nested_spec = FieldSpec::from_tokens(
            nested
                .iter()
                .filter_map(|token| token.strip_prefix(EXPENSES_PREFIX)),
        );
        group
            .expenses
            .into_iter()
            .map(|expense| shape_expense(expense, &nested_spec))
            .collect()
    };
    fields.push(EXPENSES, ShapedValue::Nested(expenses));

    Shaped::Partial(fields)
}
