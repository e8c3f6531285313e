//! Ticket store: the single owner of tickets and the session user.
//!
//! DESIGN
//! ======
//! The store keeps the authoritative collection in memory, most recent
//! first, and writes a full snapshot through to storage on every mutation.
//! A mutation builds the next collection, persists it, and only then swaps
//! it in, so a failed write leaves memory and storage in agreement.
//!
//! Ids come from a monotonic sequence seeded from the highest `T<n>` id on
//! open. Deleting tickets never frees an id for reuse, which is what keeps
//! ids unique across delete-then-add sequences.

use tracing::{debug, info};

use crate::error::{FieldErrors, StoreError};
use crate::session::{Registration, User};
use crate::storage::{self, Storage, TICKETS_KEY, USER_KEY};
use crate::ticket::{
    Status, Ticket, TicketDraft, TicketPatch, UNASSIGNED, format_ticket_id, parse_ticket_seq, seed_tickets,
};
use crate::views::{TicketQuery, TicketStats, matches_search, query_tickets};

/// Unread notification badge count shown on the dashboard.
pub const DEFAULT_NOTIFICATIONS: u32 = 3;
/// Number of tickets the dashboard lists as recent.
pub const RECENT_LIMIT: usize = 4;

pub struct TicketStore {
    storage: Box<dyn Storage>,
    tickets: Vec<Ticket>,
    user: Option<User>,
    search_term: String,
    /// `None` once the id after `T4294967295` would be needed.
    next_seq: Option<u32>,
    notifications: u32,
}

impl TicketStore {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Load the persisted snapshot, or start from the seed collection when
    /// storage holds none.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if either record cannot be read or decoded.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self, StoreError> {
        let tickets: Vec<Ticket> = match storage::load_json(storage.as_ref(), TICKETS_KEY)? {
            Some(tickets) => tickets,
            None => {
                info!("no ticket snapshot found; starting from seed data");
                seed_tickets()
            }
        };
        let user: Option<User> = storage::load_json(storage.as_ref(), USER_KEY)?;
        let next_seq = next_sequence(&tickets);

        info!(tickets = tickets.len(), ?next_seq, logged_in = user.is_some(), "ticket store opened");

        Ok(Self {
            storage,
            tickets,
            user,
            search_term: String::new(),
            next_seq,
            notifications: DEFAULT_NOTIFICATIONS,
        })
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Log in with any non-empty email. The password is not checked.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty email, `Storage` if the user
    /// cannot be persisted.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<User, StoreError> {
        if email.is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert("email", "Email is required");
            return Err(errors.into());
        }
        self.set_user(User::from_login(email))
    }

    /// # Errors
    ///
    /// Returns `Validation` with the form's field messages, or `Storage`.
    pub fn register(&mut self, registration: &Registration) -> Result<User, StoreError> {
        registration.validate()?;
        self.set_user(registration.to_user())
    }

    /// # Errors
    ///
    /// Returns `Storage` if the user cannot be persisted.
    pub fn demo_login(&mut self) -> Result<User, StoreError> {
        self.set_user(User::demo())
    }

    /// Clear the session user and its persisted copy.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the persisted copy cannot be removed.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.storage.remove(USER_KEY)?;
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "user logged out");
        }
        Ok(())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn set_user(&mut self, user: User) -> Result<User, StoreError> {
        storage::save_json(self.storage.as_ref(), USER_KEY, &user)?;
        info!(email = %user.email, name = %user.name, "user logged in");
        self.user = Some(user.clone());
        Ok(user)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create a ticket at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for blank required fields, `Storage` if the
    /// snapshot cannot be written.
    pub fn add_ticket(&mut self, draft: TicketDraft) -> Result<Ticket, StoreError> {
        draft.validate()?;

        let seq = self.next_seq.ok_or_else(|| StoreError::IdsExhausted { last: format_ticket_id(u32::MAX) })?;
        let id = format_ticket_id(seq);
        let default_agent = self.user.as_ref().map_or(UNASSIGNED, |u| u.name.as_str());
        let ticket = draft.into_ticket(id, default_agent);

        let mut next = Vec::with_capacity(self.tickets.len() + 1);
        next.push(ticket.clone());
        next.extend(self.tickets.iter().cloned());
        self.commit(next)?;
        self.next_seq = seq.checked_add(1);

        info!(id = %ticket.id, priority = ?ticket.priority, "ticket created");
        Ok(ticket)
    }

    /// Merge `patch` into the ticket with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `Validation` if the patch blanks
    /// a required field, `Storage` if the snapshot cannot be written.
    pub fn update_ticket(&mut self, id: &str, patch: &TicketPatch) -> Result<Ticket, StoreError> {
        patch.validate()?;
        let index = self.position(id)?;

        let mut next = self.tickets.clone();
        patch.apply(&mut next[index]);
        let updated = next[index].clone();
        self.commit(next)?;

        debug!(id, status = ?updated.status, "ticket updated");
        Ok(updated)
    }

    /// Remove the ticket with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `Storage` if the snapshot
    /// cannot be written.
    pub fn delete_ticket(&mut self, id: &str) -> Result<Ticket, StoreError> {
        let index = self.position(id)?;

        let mut next = self.tickets.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(id, "ticket deleted");
        Ok(removed)
    }

    /// Shorthand for an update that sets the status to `Closed`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_ticket`].
    pub fn close_ticket(&mut self, id: &str) -> Result<Ticket, StoreError> {
        self.update_ticket(id, &TicketPatch::status(Status::Closed))
    }

    /// Write `next` through to storage, then make it the live collection.
    fn commit(&mut self, next: Vec<Ticket>) -> Result<(), StoreError> {
        storage::save_json(self.storage.as_ref(), TICKETS_KEY, &next)?;
        self.tickets = next;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// The full collection, most recent first.
    #[cfg(test)]
    #[must_use]
    pub fn all_tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn get_ticket(&self, id: &str) -> Result<&Ticket, StoreError> {
        self.position(id).map(|i| &self.tickets[i])
    }

    /// Tickets matching the active search term, in collection order.
    #[must_use]
    pub fn filtered_tickets(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| matches_search(t, &self.search_term))
            .collect()
    }

    /// Search, filter, and sort in one pass. A query without its own search
    /// term uses the active one.
    #[must_use]
    pub fn list(&self, query: &TicketQuery) -> Vec<&Ticket> {
        let term = query.search.as_deref().unwrap_or(&self.search_term);
        query_tickets(&self.tickets, term, query.filter, query.sort)
    }

    /// The first `limit` tickets of the searched collection.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&Ticket> {
        let mut tickets = self.filtered_tickets();
        tickets.truncate(limit);
        tickets
    }

    #[must_use]
    pub fn stats(&self) -> TicketStats {
        TicketStats::from_tickets(&self.tickets)
    }

    #[must_use]
    pub fn notifications(&self) -> u32 {
        self.notifications
    }
}

/// First sequence number above every `T<n>` id in `tickets`, or `None`
/// when the highest id already uses the last number.
fn next_sequence(tickets: &[Ticket]) -> Option<u32> {
    tickets
        .iter()
        .filter_map(|t| parse_ticket_seq(&t.id))
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
