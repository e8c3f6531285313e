//! Ticket CRUD and the active search term.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiJson, ApiPath, ApiQuery};
use super::auth::AuthUser;
use crate::state::AppState;
use crate::ticket::{Ticket, TicketDraft, TicketPatch};
use crate::views::TicketQuery;

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchTerm {
    #[serde(default)]
    pub term: String,
}

/// `GET /api/tickets?search=&filter=&sort=`
pub async fn list_tickets(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<TicketQuery>,
) -> Json<Vec<Ticket>> {
    let store = state.store.read().await;
    Json(store.list(&query).into_iter().cloned().collect())
}

/// `POST /api/tickets`
pub async fn create_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(draft): ApiJson<TicketDraft>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let ticket = state.store.write().await.add_ticket(draft)?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `GET /api/tickets/{id}`
pub async fn get_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Ticket>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_ticket(&id)?.clone()))
}

/// `PATCH /api/tickets/{id}`
pub async fn update_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<TicketPatch>,
) -> Result<Json<Ticket>, ApiError> {
    let ticket = state.store.write().await.update_ticket(&id, &patch)?;
    Ok(Json(ticket))
}

/// `DELETE /api/tickets/{id}`
pub async fn delete_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_ticket(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/tickets/{id}/close`
pub async fn close_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Ticket>, ApiError> {
    let ticket = state.store.write().await.close_ticket(&id)?;
    Ok(Json(ticket))
}

/// `GET /api/search`: the active search term.
pub async fn get_search(State(state): State<AppState>, _auth: AuthUser) -> Json<SearchTerm> {
    let term = state.store.read().await.search_term().to_owned();
    Json(SearchTerm { term })
}

/// `PUT /api/search`
pub async fn set_search(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(body): ApiJson<SearchTerm>,
) -> Json<SearchTerm> {
    state.store.write().await.set_search_term(body.term.clone());
    Json(body)
}

#[cfg(test)]
#[path = "tickets_test.rs"]
mod tests;
