//! # Query Executor
//!
//! Evaluates [`TicketQuery`] requests against the [`TicketStore`].
//! Every call is a pure read: filter, sort and slice a borrowed view of the
//! store, then clone only the tickets that land on the page.

use std::cmp::Reverse;

use tb_core::{Pagination, StatusBucket, Ticket, TicketDetail, TicketPage, TicketStats};
use tb_store::TicketStore;

use super::{enrich, TicketQuery};

/// Filter, sort, paginate and enrich.
pub fn list(store: &TicketStore, query: &TicketQuery) -> TicketPage {
    let search = query.search.as_deref().map(Search::new);

    let mut matched: Vec<&Ticket> = store
        .tickets()
        .iter()
        .filter(|t| search.as_ref().map_or(true, |s| s.matches(t)))
        .filter(|t| {
            query
                .status
                .as_deref()
                .map_or(true, |status| t.status.as_deref() == Some(status))
        })
        .filter(|t| query.created.contains(t.created_at.as_deref()))
        .collect();

    // Stable, so equal numbers keep export order.
    matched.sort_by_key(|t| Reverse(t.sort_key()));

    let total = matched.len();
    let tickets = matched
        .into_iter()
        .skip(query.offset())
        .take(query.limit)
        .map(|t| enrich::summarize(store, t))
        .collect();

    TicketPage {
        tickets,
        pagination: Pagination::new(total, query.page, query.limit),
    }
}

/// Lookup by `import_id` over the whole collection.
pub fn detail(store: &TicketStore, import_id: i64) -> Option<TicketDetail> {
    store
        .ticket(import_id)
        .map(|ticket| enrich::detail(store, ticket))
}

pub fn stats(store: &TicketStore) -> TicketStats {
    store
        .tickets()
        .iter()
        .fold(TicketStats::default(), |mut stats, ticket| {
            stats.total += 1;
            match StatusBucket::classify(ticket.status.as_deref()) {
                StatusBucket::Open => stats.open += 1,
                StatusBucket::Closed => stats.closed += 1,
                StatusBucket::Pending => stats.pending += 1,
                StatusBucket::Other => {}
            }
            stats
        })
}

/// Free-text match: case-insensitive on summary and description, literal
/// substring on the ticket number. Ticket number 0 counts as unset.
struct Search<'a> {
    raw: &'a str,
    lowered: String,
}

impl<'a> Search<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lowered: raw.to_lowercase(),
        }
    }

    fn matches(&self, ticket: &Ticket) -> bool {
        let in_text = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&self.lowered))
        };
        in_text(&ticket.summary)
            || in_text(&ticket.description)
            || ticket
                .ticket_number
                .filter(|n| *n != 0)
                .is_some_and(|n| n.to_string().contains(self.raw))
    }
}
