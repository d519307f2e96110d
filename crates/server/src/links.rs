//! Named-route URL builder used for pagination and `Location` links.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{HeaderMapExt, Host};
use engine::query::{LinkBuilder, LinkParams, RouteName};
use url::form_urlencoded;

use crate::server::ServerState;

fn template(route: RouteName) -> &'static str {
    match route {
        RouteName::ExpenseGroupsList => "/api/expensegroups",
        RouteName::ExpenseGroup => "/api/expensegroups/{id}",
        RouteName::ExpenseList => "/api/expenses",
        RouteName::Expense => "/api/expenses/{id}",
        RouteName::ExpensesForGroup => "/api/expensegroups/{groupId}/expenses",
    }
}

/// Builds absolute links against the origin the request was made to.
///
/// Parameters named in the route template fill its placeholders; the rest
/// become the query string, in order.
#[derive(Clone, Debug)]
pub struct RouteLinks {
    origin: String,
}

impl RouteLinks {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// `public_url` wins over the `Host` header; without either the links
    /// point to `localhost`.
    fn resolve(public_url: Option<&str>, host: Option<Host>) -> Self {
        if let Some(public_url) = public_url {
            return Self::new(public_url);
        }
        match host {
            Some(host) => match host.port() {
                Some(port) => Self::new(format!("http://{}:{port}", host.hostname())),
                None => Self::new(format!("http://{}", host.hostname())),
            },
            None => Self::new("http://localhost"),
        }
    }
}

impl LinkBuilder for RouteLinks {
    fn link(&self, route: RouteName, params: &LinkParams) -> String {
        let mut path = template(route).to_string();
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;

        for (key, value) in params.iter() {
            let placeholder = format!("{{{key}}}");
            if path.contains(&placeholder) {
                let segment: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
                path = path.replace(&placeholder, &segment);
            } else {
                query.append_pair(key, value);
                has_query = true;
            }
        }

        if has_query {
            format!("{}{}?{}", self.origin, path, query.finish())
        } else {
            format!("{}{}", self.origin, path)
        }
    }
}

impl FromRequestParts<ServerState> for RouteLinks {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts.headers.typed_get::<Host>();
        Ok(Self::resolve(state.public_url.as_deref(), host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_filled_and_rest_is_query() {
        let links = RouteLinks::new("http://example.com/");
        let params = LinkParams::new()
            .with("page", 1)
            .with("groupId", 4)
            .with("fields", "title,expenses.amount");
        assert_eq!(
            links.link(RouteName::ExpensesForGroup, &params),
            "http://example.com/api/expensegroups/4/expenses?page=1&fields=title%2Cexpenses.amount"
        );
    }

    #[test]
    fn link_without_query_has_no_question_mark() {
        let links = RouteLinks::new("http://example.com");
        let params = LinkParams::new().with("id", 12);
        assert_eq!(
            links.link(RouteName::Expense, &params),
            "http://example.com/api/expenses/12"
        );
    }

    #[test]
    fn public_url_wins_over_host() {
        let host = Host::from(axum::http::uri::Authority::from_static("api.local:8080"));
        let links = RouteLinks::resolve(Some("https://expenses.example.org"), Some(host.clone()));
        assert_eq!(links.origin, "https://expenses.example.org");

        let links = RouteLinks::resolve(None, Some(host));
        assert_eq!(links.origin, "http://api.local:8080");

        let links = RouteLinks::resolve(None, None);
        assert_eq!(links.origin, "http://localhost");
    }
}
