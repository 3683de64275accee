//! Name resolution for tickets and comments.

use tb_core::{Comment, Ticket, TicketDetail, TicketSummary, UNASSIGNED, UNKNOWN_USER};
use tb_store::TicketStore;

pub fn assigned_user(store: &TicketStore, ticket: &Ticket) -> String {
    store
        .display_name(ticket.assigned_to)
        .unwrap_or_else(|| UNASSIGNED.to_string())
}

pub fn created_user(store: &TicketStore, ticket: &Ticket) -> String {
    store
        .display_name(ticket.created_by)
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

pub fn comment_author(store: &TicketStore, comment: &Comment) -> String {
    store
        .display_name(comment.created_by)
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

/// List-entry view. Raw comments ride along untouched.
pub fn summarize(store: &TicketStore, ticket: &Ticket) -> TicketSummary {
    TicketSummary::new(
        ticket.clone(),
        assigned_user(store, ticket),
        created_user(store, ticket),
        ticket.comment_count(),
    )
}

/// Detail view with every comment attributed.
pub fn detail(store: &TicketStore, ticket: &Ticket) -> TicketDetail {
    TicketDetail::new(
        ticket.clone(),
        assigned_user(store, ticket),
        created_user(store, ticket),
        |comment| comment_author(store, comment),
    )
}
