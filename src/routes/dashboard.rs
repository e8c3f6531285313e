//! Dashboard routes: summary counts, recent tickets, category list.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use super::auth::AuthUser;
use crate::session::User;
use crate::state::AppState;
use crate::store::RECENT_LIMIT;
use crate::ticket::{CATEGORIES, Ticket};
use crate::views::TicketStats;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: User,
    pub stats: TicketStats,
    pub recent: Vec<Ticket>,
    pub notifications: u32,
    pub search_term: String,
}

/// `GET /api/dashboard`: everything the landing view renders in one read.
/// Stats cover the whole collection; `recent` honours the search term.
pub async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> Json<DashboardResponse> {
    let store = state.store.read().await;
    Json(DashboardResponse {
        user: auth.user,
        stats: store.stats(),
        recent: store.recent(RECENT_LIMIT).into_iter().cloned().collect(),
        notifications: store.notifications(),
        search_term: store.search_term().to_owned(),
    })
}

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>, _auth: AuthUser) -> Json<TicketStats> {
    Json(state.store.read().await.stats())
}

/// `GET /api/categories`: the fixed category choices for the ticket form.
pub async fn categories(_auth: AuthUser) -> Json<&'static [&'static str]> {
    Json(CATEGORIES.as_slice())
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
