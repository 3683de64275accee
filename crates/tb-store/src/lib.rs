//! # tb-store
//!
//! The data store behind the hub. A ticket export is read once at startup
//! and held in memory, unchanged, for the life of the process:
//!
//! - tickets stay in export order, with an id index for detail lookups;
//! - users are indexed by `import_id` for name resolution.
//!
//! Loading is all-or-nothing. There is no partial or degraded store.

pub mod error;

use std::collections::HashMap;
use std::path::Path;

use tb_core::{Dataset, Ticket, User};

pub use error::StoreError;

/// Immutable, indexed view over a loaded [`Dataset`].
#[derive(Debug)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    users: Vec<User>,
    /// `import_id` -> position in `tickets`.
    ticket_index: HashMap<i64, usize>,
    /// `import_id` -> position in `users`. First occurrence wins.
    user_index: HashMap<i64, usize>,
}

impl TicketStore {
    /// Read and index the export at `path`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::from_dataset(dataset)?;
        tracing::info!(
            path = %path.display(),
            tickets = store.tickets.len(),
            users = store.users.len(),
            "Ticket data loaded"
        );
        Ok(store)
    }

    /// Index an already-parsed dataset.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        let Dataset { tickets, users } = dataset;

        let mut ticket_index = HashMap::with_capacity(tickets.len());
        for (pos, ticket) in tickets.iter().enumerate() {
            if ticket_index.insert(ticket.import_id, pos).is_some() {
                return Err(StoreError::DuplicateTicket(ticket.import_id));
            }
        }

        let mut user_index = HashMap::with_capacity(users.len());
        for (pos, user) in users.iter().enumerate() {
            if user_index.contains_key(&user.import_id) {
                tracing::warn!(user_id = user.import_id, "Duplicate user id, keeping first");
                continue;
            }
            user_index.insert(user.import_id, pos);
        }

        Ok(Self {
            tickets,
            users,
            ticket_index,
            user_index,
        })
    }

    /// All tickets, in export order.
    #[inline]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    #[inline]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn ticket(&self, import_id: i64) -> Option<&Ticket> {
        self.ticket_index
            .get(&import_id)
            .map(|&pos| &self.tickets[pos])
    }

    pub fn user(&self, import_id: i64) -> Option<&User> {
        self.user_index.get(&import_id).map(|&pos| &self.users[pos])
    }

    /// Display name for an optional user reference. `None` when the id is
    /// absent or does not resolve; callers pick the fallback text.
    pub fn display_name(&self, user_id: Option<i64>) -> Option<String> {
        user_id
            .and_then(|id| self.user(id))
            .map(User::display_name)
    }
}
