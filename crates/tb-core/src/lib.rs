//! # tb-core
//!
//! Record types for a static ticket export, the derived views the hub
//! returns, and the small enumerations shared by the hub and its clients.
//!
//! Records are deserialized leniently: every field the export may omit is
//! an `Option`, and fields this crate does not name are kept in a flattened
//! map so a record serializes back with all of its original fields.

pub mod model;
pub mod priority;
pub mod status;
pub mod time;
pub mod view;

pub use model::{Comment, Dataset, Ticket, User};
pub use priority::Priority;
pub use status::StatusBucket;
pub use view::{
    CommentView, ErrorBody, HubStatus, Pagination, TicketDetail, TicketPage, TicketStats,
    TicketSummary, UNASSIGNED, UNKNOWN_USER,
};
