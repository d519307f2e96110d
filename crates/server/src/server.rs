use axum::{Router, routing::get};

use std::sync::Arc;

use crate::{expense_groups, expenses, statuses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Origin used for generated links instead of the request `Host`.
    pub public_url: Option<String>,
}

pub fn router(engine: Engine, public_url: Option<String>) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        public_url,
    };

    Router::new()
        .route(
            "/api/expensegroups",
            get(expense_groups::list).post(expense_groups::create),
        )
        .route(
            "/api/expensegroups/{id}",
            get(expense_groups::get)
                .put(expense_groups::update)
                .patch(expense_groups::patch)
                .delete(expense_groups::delete),
        )
        .route("/api/expensegroups/{id}/expenses", get(expenses::list_for_group))
        .route(
            "/api/expensegroups/{id}/expenses/{expense_id}",
            get(expenses::get_in_group),
        )
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .patch(expenses::patch)
                .delete(expenses::delete),
        )
        .route("/api/expensegroupstatuses", get(statuses::list))
        .route("/api/expensegroupstatuses/{id}", get(statuses::get))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    public_url: Option<String>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, public_url)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    public_url: Option<String>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, public_url, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
