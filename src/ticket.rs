//! Ticket data model: records, enums, create/update inputs, and seed data.
//!
//! DESIGN
//! ======
//! `Ticket` serializes with camelCase keys (`createdAt`, `timeAgo`), the
//! layout existing `supportProTickets` snapshots already use. Priority and
//! status are closed enums with their display labels as wire values;
//! category stays an open string because older snapshots may carry
//! categories the create form no longer offers.

use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::error::FieldErrors;

/// Label stored in `time_ago` for freshly created tickets.
pub const JUST_NOW: &str = "Just now";
/// Agent shown when nobody is logged in at creation time.
pub const UNASSIGNED: &str = "Unassigned";
pub const DEFAULT_CATEGORY: &str = "General";

/// Categories offered by the create form.
pub const CATEGORIES: [&str; 9] = [
    "General",
    "Technical",
    "Billing",
    "Account",
    "Feature Request",
    "Bug Report",
    "Authentication",
    "Security",
    "Performance",
];

// =============================================================================
// PRIORITY / STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Sort key, most urgent first: CRITICAL=0, HIGH=1, MEDIUM=2, LOW=3.
    #[must_use]
    pub fn urgency_rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// HIGH and CRITICAL both count towards the high-priority stat.
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

// =============================================================================
// TICKET
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    pub agent: String,
    /// Display date captured at creation. Not a structured timestamp.
    pub created_at: String,
    /// Free-text age label. Set once at creation, never recomputed.
    pub time_ago: String,
}

/// Format a sequence number as a ticket id: `T` + at least three digits.
#[must_use]
pub fn format_ticket_id(seq: u32) -> String {
    format!("T{seq:03}")
}

/// Extract the sequence number from an id of the form `T<digits>`.
#[must_use]
pub fn parse_ticket_seq(id: &str) -> Option<u32> {
    let digits = id.strip_prefix('T')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Today's date in US short form (`3/5/2024`), local time when available.
#[must_use]
pub fn today_display() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_us_date(now.date())
}

#[must_use]
pub fn format_us_date(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}

/// Parse a `createdAt` label. Accepts `YYYY-MM-DD` and `M/D/YYYY`.
#[must_use]
pub fn parse_display_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let iso = time::macros::format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(raw, &iso) {
        return Some(date);
    }

    let mut parts = raw.split('/');
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

// =============================================================================
// CREATE INPUT
// =============================================================================

/// Caller-supplied fields for a new ticket. The id is always store-assigned.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketDraft {
    pub customer: String,
    pub email: String,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub agent: Option<String>,
    pub created_at: Option<String>,
    pub time_ago: Option<String>,
}

impl TicketDraft {
    /// Check the fields the create form marks as required.
    ///
    /// # Errors
    ///
    /// Returns one message per blank required field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "customer", &self.customer, "Customer name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "description", &self.description, "Description is required");
        errors.into_result()
    }

    /// Build the ticket, filling defaults for everything the caller left out.
    #[must_use]
    pub fn into_ticket(self, id: String, default_agent: &str) -> Ticket {
        Ticket {
            id,
            customer: self.customer,
            email: self.email,
            title: self.title,
            description: self.description,
            category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            agent: self.agent.unwrap_or_else(|| default_agent.to_owned()),
            created_at: self.created_at.unwrap_or_else(today_display),
            time_ago: self.time_ago.unwrap_or_else(|| JUST_NOW.to_owned()),
        }
    }
}

// =============================================================================
// UPDATE INPUT
// =============================================================================

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketPatch {
    pub customer: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub agent: Option<String>,
}

impl TicketPatch {
    #[must_use]
    pub fn status(status: Status) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    /// A patch may not blank out a required field.
    ///
    /// # Errors
    ///
    /// Returns one message per required field set to blank.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let checks = [
            ("title", &self.title, "Title is required"),
            ("customer", &self.customer, "Customer name is required"),
            ("email", &self.email, "Email is required"),
            ("description", &self.description, "Description is required"),
        ];
        for (field, value, message) in checks {
            if let Some(value) = value {
                require(&mut errors, field, value, message);
            }
        }
        errors.into_result()
    }

    /// Merge the patch into `ticket`. Any status may follow any other.
    pub fn apply(&self, ticket: &mut Ticket) {
        if let Some(v) = &self.customer {
            ticket.customer.clone_from(v);
        }
        if let Some(v) = &self.email {
            ticket.email.clone_from(v);
        }
        if let Some(v) = &self.title {
            ticket.title.clone_from(v);
        }
        if let Some(v) = &self.description {
            ticket.description.clone_from(v);
        }
        if let Some(v) = &self.category {
            ticket.category.clone_from(v);
        }
        if let Some(v) = self.priority {
            ticket.priority = v;
        }
        if let Some(v) = self.status {
            ticket.status = v;
        }
        if let Some(v) = &self.agent {
            ticket.agent.clone_from(v);
        }
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

// =============================================================================
// SEED DATA
// =============================================================================

/// The collection a fresh install starts with.
#[must_use]
pub fn seed_tickets() -> Vec<Ticket> {
    #[allow(clippy::too_many_arguments)]
    fn seed(
        id: &str,
        customer: &str,
        email: &str,
        title: &str,
        description: &str,
        category: &str,
        priority: Priority,
        status: Status,
        agent: &str,
        created_at: &str,
        time_ago: &str,
    ) -> Ticket {
        Ticket {
            id: id.into(),
            customer: customer.into(),
            email: email.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            priority,
            status,
            agent: agent.into(),
            created_at: created_at.into(),
            time_ago: time_ago.into(),
        }
    }

    vec![
        seed(
            "T001",
            "Anil Kumar",
            "anil.kumar@techcorp.com",
            "Login Authentication Failed",
            "Users are unable to login despite entering correct credentials. Error code 403 appears.",
            "Authentication",
            Priority::High,
            Status::Closed,
            "Sarah Chen",
            "2024-03-15",
            "2 hours ago",
        ),
        seed(
            "T002",
            "Sneha Patel",
            "sneha.patel@enterprise.com",
            "Password Reset Link Not Working",
            "Password reset link expires immediately after generation.",
            "Security",
            Priority::Critical,
            Status::InProgress,
            "Mike Johnson",
            "2024-03-15",
            "4 hours ago",
        ),
        seed(
            "T003",
            "Rahul Sharma",
            "rahul.sharma@business.com",
            "Dashboard Performance Issues",
            "Analytics dashboard takes over 15 seconds to load.",
            "Performance",
            Priority::Medium,
            Status::Open,
            "Alex Rivera",
            "2024-03-14",
            "1 day ago",
        ),
        seed(
            "T004",
            "Priya Nair",
            "priya.nair@finance.com",
            "Payment Gateway Integration Error",
            "International transactions failing with error 500.",
            "Billing",
            Priority::High,
            Status::Open,
            "David Kim",
            "2024-03-14",
            "1 day ago",
        ),
    ]
}

#[cfg(test)]
#[path = "ticket_test.rs"]
mod tests;
