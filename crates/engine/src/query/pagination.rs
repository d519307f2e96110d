//! Page windows and navigation links.

use serde::Serialize;

/// Upper bound applied to every requested page size.
pub const MAX_PAGE_SIZE: u64 = 10;

/// A zero-based page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// The page size is capped at [`MAX_PAGE_SIZE`] and raised to at least 1.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(self) -> u64 {
        self.page
    }

    pub fn page_size(self) -> u64 {
        self.page_size
    }

    /// Rows skipped before the window, never beyond what storage can bind.
    pub fn offset(self) -> u64 {
        self.page
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    /// Whether the window starts after the last of `total_count` rows.
    pub fn is_past_end(self, total_count: u64) -> bool {
        self.offset() >= total_count
    }

    pub fn limit(self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, api_types::query::DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata of a list response. Links are empty when the adjacent
/// page does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub previous_page_link: String,
    pub next_page_link: String,
}

/// Named routes a [`LinkBuilder`] can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    ExpenseGroupsList,
    ExpenseGroup,
    ExpenseList,
    Expense,
    ExpensesForGroup,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpenseGroupsList => "ExpenseGroupsList",
            Self::ExpenseGroup => "ExpenseGroup",
            Self::ExpenseList => "ExpenseList",
            Self::Expense => "Expense",
            Self::ExpensesForGroup => "ExpensesForGroup",
        }
    }
}

/// Ordered route parameters. Absent and empty values are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkParams {
    pairs: Vec<(&'static str, String)>,
}

impl LinkParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    pub fn with_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Appends every pair of `other` after the current ones.
    pub fn extend(mut self, other: &LinkParams) -> Self {
        self.pairs.extend(other.pairs.iter().cloned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Resolves a named route and its parameters into a URL.
pub trait LinkBuilder: Send + Sync {
    fn link(&self, route: RouteName, params: &LinkParams) -> String;
}

/// Computes the descriptor of `request` over `total_count` rows.
///
/// Links go to `route` with `page`, `pageSize` and then the `context`
/// parameters, so that following a link repeats the current query.
pub fn paginate(
    total_count: u64,
    request: PageRequest,
    route: RouteName,
    context: &LinkParams,
    links: &dyn LinkBuilder,
) -> PageDescriptor {
    let total_pages = total_count.div_ceil(request.page_size());
    let link_to = |page: u64| {
        let params = LinkParams::new()
            .with("page", page)
            .with("pageSize", request.page_size())
            .extend(context);
        links.link(route, &params)
    };

    let previous_page_link = if request.page() > 0 {
        link_to(request.page() - 1)
    } else {
        String::new()
    };
    let next_page_link = if request.page().saturating_add(1) < total_pages {
        link_to(request.page() + 1)
    } else {
        String::new()
    };

    PageDescriptor {
        current_page: request.page(),
        page_size: request.page_size(),
        total_count,
        total_pages,
        previous_page_link,
        next_page_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct QueryStringLinks;

    impl LinkBuilder for QueryStringLinks {
        fn link(&self, route: RouteName, params: &LinkParams) -> String {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{}?{}", route.as_str(), query.join("&"))
        }
    }

    fn describe(total: u64, page: u64, page_size: u64) -> PageDescriptor {
        paginate(
            total,
            PageRequest::new(page, page_size),
            RouteName::ExpenseGroupsList,
            &LinkParams::new().with("sort", "id"),
            &QueryStringLinks,
        )
    }

    #[test]
    fn page_size_is_capped() {
        let descriptor = describe(23, 0, 50);
        assert_eq!(descriptor.page_size, 10);
        assert_eq!(descriptor.total_pages, 3);
    }

    #[test]
    fn first_page_links_forward_only() {
        let descriptor = describe(23, 0, 50);
        assert_eq!(descriptor.previous_page_link, "");
        assert_eq!(
            descriptor.next_page_link,
            "ExpenseGroupsList?page=1&pageSize=10&sort=id"
        );
    }

    #[test]
    fn last_page_links_backward_only() {
        let descriptor = describe(23, 2, 10);
        assert_eq!(descriptor.next_page_link, "");
        assert_eq!(
            descriptor.previous_page_link,
            "ExpenseGroupsList?page=1&pageSize=10&sort=id"
        );
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let descriptor = describe(0, 0, 5);
        assert_eq!(descriptor.total_pages, 0);
        assert_eq!(descriptor.next_page_link, "");
        assert_eq!(descriptor.previous_page_link, "");
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let request = PageRequest::new(3, 0);
        assert_eq!(request.page_size(), 1);
        assert_eq!(request.offset(), 3);
    }

    #[test]
    fn link_params_skip_empty_values() {
        let params = LinkParams::new()
            .with("fields", "")
            .with_opt("status", None)
            .with_opt("userId", Some("u1"));
        assert_eq!(params.iter().collect::<Vec<_>>(), [("userId", "u1")]);
        assert_eq!(params.get("userId"), Some("u1"));
    }

    #[test]
    fn offset_stays_bindable() {
        let request = PageRequest::new(u64::MAX / 2, 10);
        assert_eq!(request.offset(), i64::MAX as u64);
        assert!(request.is_past_end(1_000));
        assert!(!PageRequest::new(1, 5).is_past_end(6));
        assert!(PageRequest::new(1, 5).is_past_end(5));
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let json = serde_json::to_value(describe(3, 0, 5)).unwrap();
        assert_eq!(json["currentPage"], 0);
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["previousPageLink"], "");
    }
}
