//! # Views
//!
//! Response shapes computed per request. None of these are stored: they
//! are ephemeral copies of a record with human-readable fields overlaid.

use serde::{Deserialize, Serialize};

use crate::model::{Comment, Ticket};

/// Display name used when a ticket has no resolvable assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Display name used when a creator or comment author cannot be resolved.
pub const UNKNOWN_USER: &str = "Unknown";

/// A list entry: the ticket as exported plus resolved names and a count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSummary {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub assigned_user: String,
    pub created_user: String,
    pub comment_count: usize,
}

impl TicketSummary {
    pub fn new(
        mut ticket: Ticket,
        assigned_user: String,
        created_user: String,
        comment_count: usize,
    ) -> Self {
        for key in ["assigned_user", "created_user", "comment_count"] {
            ticket.extra.remove(key);
        }
        Self {
            ticket,
            assigned_user,
            created_user,
            comment_count,
        }
    }
}

/// The detail view. Every comment carries its author's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetail {
    /// Always has `comments == None`; the enriched list below replaces it.
    #[serde(flatten)]
    pub ticket: Ticket,
    pub assigned_user: String,
    pub created_user: String,
    #[serde(rename = "Comments", default)]
    pub comments: Vec<CommentView>,
}

impl TicketDetail {
    /// Split the raw comments off `ticket` and pair each with a resolved name.
    pub fn new(
        mut ticket: Ticket,
        assigned_user: String,
        created_user: String,
        mut user_name: impl FnMut(&Comment) -> String,
    ) -> Self {
        for key in ["assigned_user", "created_user"] {
            ticket.extra.remove(key);
        }
        let comments = ticket
            .comments
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|mut comment| {
                comment.extra.remove("user_name");
                CommentView {
                    user_name: user_name(&comment),
                    comment,
                }
            })
            .collect();
        Self {
            ticket,
            assigned_user,
            created_user,
            comments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Matches after filtering, before slicing.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPage {
    pub tickets: Vec<TicketSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub tickets: usize,
    pub users: usize,
    pub data_path: String,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
