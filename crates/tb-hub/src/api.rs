//! # API Handlers
//!
//! Axum handlers for the read-only ticket endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use tb_core::{HubStatus, TicketDetail, TicketPage, TicketStats};

use crate::error::{ApiError, TICKET_NOT_FOUND};
use crate::query::{executor, leading_int, TicketListParams, TicketQuery};
use crate::AppState;

/// A query string that cannot be read (e.g. a repeated key) is reported
/// as a server error with the usual JSON body.
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TicketListParams>, QueryRejection>,
) -> Result<Json<TicketPage>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Internal(e.body_text()))?;
    let query = TicketQuery::from_params(params, state.config.query.default_limit);
    let page = executor::list(&state.store, &query);
    tracing::debug!(
        total = page.pagination.total,
        page = query.page,
        limit = query.limit,
        "Listed tickets"
    );
    Ok(Json(page))
}

/// `id` is matched against `import_id` by its leading integer, so `501abc`
/// finds ticket 501. No leading integer means not found.
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TicketDetail>, ApiError> {
    let detail = leading_int(&id).and_then(|import_id| executor::detail(&state.store, import_id));

    match detail {
        Some(detail) => Ok(Json(detail)),
        None => {
            tracing::debug!(id = %id, "Ticket not found");
            Err(ApiError::NotFound(TICKET_NOT_FOUND))
        }
    }
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<TicketStats> {
    Json(executor::stats(&state.store))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<HubStatus> {
    Json(HubStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        tickets: state.store.tickets().len(),
        users: state.store.users().len(),
        data_path: state.data_path.display().to_string(),
    })
}
