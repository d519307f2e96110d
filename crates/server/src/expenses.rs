//! Expenses API endpoints.

use api_types::{
    expense::Expense,
    patch::PatchOperation,
    query::{ExpensesParams, FieldsParams},
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
    apply_patch,
    query::{
        FieldSpec, LinkBuilder, LinkParams, ListOptions, PageRequest, RouteName, Shaped,
        shape_expense,
    },
};

use crate::{
    ServerError, links::RouteLinks, mutation_response, no_location, paged_response,
    server::ServerState,
};

fn list_options(params: ExpensesParams) -> ListOptions {
    ListOptions {
        sort: Some(params.sort),
        fields: params.fields,
        page: PageRequest::new(params.page, params.page_size),
    }
}

/// Handle requests for listing every expense
pub async fn list(
    State(state): State<ServerState>,
    links: RouteLinks,
    query: Result<Query<ExpensesParams>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(params) = query?;
    let page = state
        .engine
        .list_expenses(None, &list_options(params), &links)
        .await?;
    paged_response(page.items, &page.descriptor)
}

/// Handle requests for listing the expenses of one group
pub async fn list_for_group(
    State(state): State<ServerState>,
    links: RouteLinks,
    Path(group_id): Path<i32>,
    query: Result<Query<ExpensesParams>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(params) = query?;
    let page = state
        .engine
        .list_expenses(Some(group_id), &list_options(params), &links)
        .await?;
    paged_response(page.items, &page.descriptor)
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    query: Result<Query<FieldsParams>, QueryRejection>,
) -> Result<Json<Shaped<Expense>>, ServerError> {
    let Query(params) = query?;
    let expense = state.engine.expense(id).await?;
    Ok(Json(shape_expense(expense, &FieldSpec::parse(&params.fields))))
}

pub async fn get_in_group(
    State(state): State<ServerState>,
    Path((group_id, id)): Path<(i32, i32)>,
    query: Result<Query<FieldsParams>, QueryRejection>,
) -> Result<Json<Shaped<Expense>>, ServerError> {
    let Query(params) = query?;
    let expense = state.engine.expense_in_group(group_id, id).await?;
    Ok(Json(shape_expense(expense, &FieldSpec::parse(&params.fields))))
}

pub async fn create(
    State(state): State<ServerState>,
    links: RouteLinks,
    payload: Result<Json<Expense>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(expense) = payload?;
    let result = state.engine.insert_expense(&expense).await;
    Ok(mutation_response(result, |created| {
        links.link(RouteName::Expense, &LinkParams::new().with("id", created.id))
    }))
}

/// Replaces an expense; the id in the path wins over the one in the body.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<Expense>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(expense) = payload?;
    let result = state.engine.update_expense(id, &expense).await;
    Ok(mutation_response(result, no_location))
}

pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<Vec<PatchOperation>>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(operations) = payload?;
    let current = state.engine.expense(id).await?;
    let patched = apply_patch(&current, &operations)?;

    let result = state.engine.update_expense(id, &patched).await;
    Ok(mutation_response(result, no_location))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ServerError> {
    let result = state.engine.delete_expense(id).await;
    Ok(mutation_response(result, no_location))
}
