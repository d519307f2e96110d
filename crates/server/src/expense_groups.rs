//! Expense groups API endpoints.

use api_types::{
    expense_group::ExpenseGroup,
    patch::PatchOperation,
    query::{ExpenseGroupsParams, FieldsParams},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Response,
};
use engine::{
    ExpenseGroupFilter, apply_patch,
    query::{
        FieldSpec, LinkBuilder, LinkParams, ListOptions, PageRequest, RouteName, Shaped,
        shape_expense_group,
    },
};

use crate::{
    ServerError, links::RouteLinks, mutation_response, no_location, paged_response,
    server::ServerState,
};

fn location(links: &RouteLinks, group: &ExpenseGroup) -> String {
    links.link(RouteName::ExpenseGroup, &LinkParams::new().with("id", group.id))
}

/// Handle requests for listing expense groups
pub async fn list(
    State(state): State<ServerState>,
    links: RouteLinks,
    query: Result<Query<ExpenseGroupsParams>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(params) = query?;
    let filter = ExpenseGroupFilter {
        status: params.status,
        user_id: params.user_id,
    };
    let options = ListOptions {
        sort: Some(params.sort),
        fields: params.fields,
        page: PageRequest::new(params.page, params.page_size),
    };

    let page = state
        .engine
        .list_expense_groups(&filter, &options, &links)
        .await?;
    paged_response(page.items, &page.descriptor)
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    query: Result<Query<FieldsParams>, QueryRejection>,
) -> Result<Json<Shaped<ExpenseGroup>>, ServerError> {
    let Query(params) = query?;
    let group = state.engine.expense_group(id).await?;
    Ok(Json(shape_expense_group(
        group,
        &FieldSpec::parse(&params.fields),
    )))
}

pub async fn create(
    State(state): State<ServerState>,
    links: RouteLinks,
    payload: Result<Json<ExpenseGroup>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(group) = payload?;
    let result = state.engine.insert_expense_group(&group).await;
    Ok(mutation_response(result, |created| location(&links, created)))
}

/// Replaces a group; the id in the path wins over the one in the body.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<ExpenseGroup>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(group) = payload?;
    let result = state.engine.update_expense_group(id, &group).await;
    Ok(mutation_response(result, no_location))
}

pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<Vec<PatchOperation>>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(operations) = payload?;
    let current = state.engine.expense_group(id).await?;
    let patched = apply_patch(&current, &operations)?;

    let result = state.engine.update_expense_group(id, &patched).await;
    Ok(mutation_response(result, no_location))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ServerError> {
    let result = state.engine.delete_expense_group(id).await;
    if let Some(deleted) = &result.entity {
        tracing::info!(
            "deleted expense group {id} with {} expenses",
            deleted.expenses.len()
        );
    }
    Ok(mutation_response(result, no_location))
}
