//! The list-query pipeline shared by every list endpoint.
//!
//! A list request goes through the same steps for every resource: the sort
//! spec is compiled against the resource's [`ResourceField`] table, filters
//! and ordering are pushed down to the database, the total is counted, the
//! [`PageDescriptor`](pagination::PageDescriptor) is computed, the page window
//! is fetched and finally each row is shaped.

use sea_orm::EntityTrait;
use serde_json::Value;

pub use fields::FieldSpec;
pub use pagination::{
    LinkBuilder, LinkParams, MAX_PAGE_SIZE, PageDescriptor, PageRequest, RouteName, paginate,
};
pub use shape::{Shaped, ShapedFields, ShapedValue, shape_expense, shape_expense_group};
pub use sort::{SortKey, SortSpec};

mod fields;
mod pagination;
mod shape;
mod sort;

/// Table of the scalar fields a resource exposes to sorting and shaping.
///
/// Field names are matched case-insensitively; [`ResourceField::name`] is the
/// canonical camelCase name used on the wire.
pub trait ResourceField: Copy + Eq + 'static {
    type Entity: EntityTrait;
    type Dto;

    const ALL: &'static [Self];
    /// Unique key, used to make every ordering total.
    const ID: Self;

    fn name(self) -> &'static str;
    fn column(self) -> <Self::Entity as EntityTrait>::Column;
    fn value(self, dto: &Self::Dto) -> Value;

    fn resolve(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }
}

/// Sort, shaping and paging options of a list request.
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    /// Raw sort spec, e.g. `-date,amount`. `None` keeps the storage order.
    pub sort: Option<String>,
    /// Raw field spec, e.g. `title,expenses.amount`. Empty returns full items.
    pub fields: String,
    pub page: PageRequest,
}

/// One page of shaped items and its pagination metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub descriptor: PageDescriptor,
}
