use super::*;
use crate::ticket::{Priority, seed_tickets};

fn ids(tickets: &[&Ticket]) -> Vec<String> {
    tickets.iter().map(|t| t.id.clone()).collect()
}

fn with_priority(id: &str, priority: Priority) -> Ticket {
    let mut ticket = seed_tickets().remove(0);
    ticket.id = id.into();
    ticket.priority = priority;
    ticket
}

fn with_date(id: &str, created_at: &str) -> Ticket {
    let mut ticket = seed_tickets().remove(0);
    ticket.id = id.into();
    ticket.created_at = created_at.into();
    ticket
}

// =============================================================================
// search
// =============================================================================

#[test]
fn empty_term_matches_everything() {
    let seed = seed_tickets();
    assert!(seed.iter().all(|t| matches_search(t, "")));
}

#[test]
fn search_is_case_insensitive_over_each_field() {
    let seed = seed_tickets();
    let t002 = &seed[1];
    assert!(matches_search(t002, "PASSWORD"));
    assert!(matches_search(t002, "sneha"));
    assert!(matches_search(t002, "immediately after"));
    assert!(matches_search(t002, "t002"));
    assert!(!matches_search(t002, "gateway"));
}

#[test]
fn search_ignores_email_and_agent() {
    let seed = seed_tickets();
    assert!(!matches_search(&seed[0], "techcorp"));
    assert!(!matches_search(&seed[0], "Sarah"));
}

#[test]
fn query_results_are_subset_containing_term() {
    let seed = seed_tickets();
    for term in ["", "login", "error", "T00", "zzz", "Dashboard"] {
        let found = query_tickets(&seed, term, TicketFilter::All, SortOrder::Newest);
        assert!(found.len() <= seed.len());
        for t in &found {
            assert!(seed.iter().any(|s| s.id == t.id));
            assert!(matches_search(t, term));
        }
    }
    assert_eq!(query_tickets(&seed, "", TicketFilter::All, SortOrder::Newest).len(), seed.len());
}

// =============================================================================
// filter
// =============================================================================

#[test]
fn filter_by_status_and_priority() {
    let seed = seed_tickets();
    let open = query_tickets(&seed, "", TicketFilter::Open, SortOrder::Oldest);
    assert_eq!(ids(&open), ["T003", "T004"]);

    let closed = query_tickets(&seed, "", TicketFilter::Closed, SortOrder::Oldest);
    assert_eq!(ids(&closed), ["T001"]);

    let high = query_tickets(&seed, "", TicketFilter::High, SortOrder::Priority);
    assert_eq!(ids(&high), ["T002", "T001", "T004"]);
}

#[test]
fn filter_combines_with_search() {
    let seed = seed_tickets();
    let found = query_tickets(&seed, "error", TicketFilter::High, SortOrder::Newest);
    assert_eq!(ids(&found), ["T001", "T004"]);
}

#[test]
fn filter_parses_lowercase_names() {
    let f: TicketFilter = serde_json::from_str("\"high\"").unwrap();
    assert_eq!(f, TicketFilter::High);
    let s: SortOrder = serde_json::from_str("\"priority\"").unwrap();
    assert_eq!(s, SortOrder::Priority);
}

// =============================================================================
// sort
// =============================================================================

#[test]
fn priority_sort_orders_by_urgency() {
    let tickets = vec![
        with_priority("A", Priority::Low),
        with_priority("B", Priority::Medium),
        with_priority("C", Priority::High),
        with_priority("D", Priority::Critical),
    ];
    let sorted = query_tickets(&tickets, "", TicketFilter::All, SortOrder::Priority);
    let priorities: Vec<Priority> = sorted.iter().map(|t| t.priority).collect();
    assert_eq!(priorities, [Priority::Critical, Priority::High, Priority::Medium, Priority::Low]);
}

#[test]
fn priority_sort_is_stable() {
    let tickets = vec![
        with_priority("first", Priority::High),
        with_priority("second", Priority::Critical),
        with_priority("third", Priority::High),
    ];
    let sorted = query_tickets(&tickets, "", TicketFilter::All, SortOrder::Priority);
    assert_eq!(ids(&sorted), ["second", "first", "third"]);
}

#[test]
fn date_sorts_mix_display_formats() {
    let tickets = vec![
        with_date("mid", "2024-03-14"),
        with_date("new", "4/1/2024"),
        with_date("old", "1/9/2024"),
    ];
    let newest = query_tickets(&tickets, "", TicketFilter::All, SortOrder::Newest);
    assert_eq!(ids(&newest), ["new", "mid", "old"]);

    let oldest = query_tickets(&tickets, "", TicketFilter::All, SortOrder::Oldest);
    assert_eq!(ids(&oldest), ["old", "mid", "new"]);
}

#[test]
fn undated_tickets_sort_as_oldest() {
    let tickets = vec![with_date("junk", "sometime"), with_date("dated", "2024-03-14")];
    let newest = query_tickets(&tickets, "", TicketFilter::All, SortOrder::Newest);
    assert_eq!(ids(&newest), ["dated", "junk"]);
    let oldest = query_tickets(&tickets, "", TicketFilter::All, SortOrder::Oldest);
    assert_eq!(ids(&oldest), ["junk", "dated"]);
}

#[test]
fn newest_keeps_collection_order_for_same_day() {
    let seed = seed_tickets();
    let newest = query_tickets(&seed, "", TicketFilter::All, SortOrder::Newest);
    assert_eq!(ids(&newest), ["T001", "T002", "T003", "T004"]);
}

// =============================================================================
// stats
// =============================================================================

#[test]
fn seed_stats() {
    let stats = TicketStats::from_tickets(&seed_tickets());
    assert_eq!(stats, TicketStats { total: 4, open: 2, in_progress: 1, closed: 1, high_priority: 3 });
}

#[test]
fn stats_status_counts_sum_to_total() {
    let mut tickets = seed_tickets();
    tickets.push(with_priority("T010", Priority::Low));
    let stats = TicketStats::from_tickets(&tickets);
    assert_eq!(stats.total, tickets.len());
    assert_eq!(stats.open + stats.in_progress + stats.closed, stats.total);
}

#[test]
fn stats_of_empty_collection() {
    assert_eq!(TicketStats::from_tickets(&[]), TicketStats::default());
}

#[test]
fn stats_serialize_camel_case() {
    let value = serde_json::to_value(TicketStats::from_tickets(&seed_tickets())).unwrap();
    assert_eq!(value["inProgress"], 1);
    assert_eq!(value["highPriority"], 3);
}
