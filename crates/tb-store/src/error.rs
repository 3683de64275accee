//! Errors raised while loading an export. Every variant is fatal at startup.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read ticket export {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ticket export {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `import_id` must be unique across tickets.
    #[error("duplicate ticket import_id {0}")]
    DuplicateTicket(i64),
}
