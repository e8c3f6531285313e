//! Derived projections over the ticket collection.
//!
//! DESIGN
//! ======
//! Nothing here is cached or persisted. Every view is recomputed from the
//! store's current collection on each read: search narrows it, the list
//! filter narrows it further, then a stable sort orders what remains.
//! Stats always count the full, unfiltered collection.

use serde::{Deserialize, Serialize};

use crate::ticket::{Status, Ticket, parse_display_date};

// =============================================================================
// SEARCH
// =============================================================================

/// Case-insensitive substring match over title, customer, description, id.
#[must_use]
pub fn matches_search(ticket: &Ticket, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [&ticket.title, &ticket.customer, &ticket.description, &ticket.id]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

// =============================================================================
// FILTER / SORT
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketFilter {
    #[default]
    All,
    Open,
    Closed,
    /// HIGH or CRITICAL priority.
    High,
}

impl TicketFilter {
    #[must_use]
    pub fn matches(self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Open => ticket.status == Status::Open,
            Self::Closed => ticket.status == Status::Closed,
            Self::High => ticket.priority.is_high(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Priority,
}

/// Stable in-place sort. Undated tickets (unparseable `createdAt`) count as oldest.
pub fn sort_tickets(tickets: &mut [&Ticket], order: SortOrder) {
    match order {
        SortOrder::Newest => {
            tickets.sort_by_key(|t| std::cmp::Reverse(parse_display_date(&t.created_at)));
        }
        SortOrder::Oldest => tickets.sort_by_key(|t| parse_display_date(&t.created_at)),
        SortOrder::Priority => tickets.sort_by_key(|t| t.priority.urgency_rank()),
    }
}

/// Ticket list query. `search: None` defers to the store's active term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TicketQuery {
    pub search: Option<String>,
    pub filter: TicketFilter,
    pub sort: SortOrder,
}

/// Apply search, filter, then sort to `tickets`, preserving order on ties.
#[must_use]
pub fn query_tickets<'a>(tickets: &'a [Ticket], term: &str, filter: TicketFilter, sort: SortOrder) -> Vec<&'a Ticket> {
    let mut selected: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| matches_search(t, term) && filter.matches(t))
        .collect();
    sort_tickets(&mut selected, sort);
    selected
}

// =============================================================================
// STATS
// =============================================================================

/// Aggregate counts over the full collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub high_priority: usize,
}

impl TicketStats {
    #[must_use]
    pub fn from_tickets<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> Self {
        let mut stats = Self::default();
        for ticket in tickets {
            stats.total += 1;
            match ticket.status {
                Status::Open => stats.open += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Closed => stats.closed += 1,
            }
            if ticket.priority.is_high() {
                stats.high_priority += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
