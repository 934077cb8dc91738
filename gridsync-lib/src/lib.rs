//! Shared table synchronization engine
//!
//! A live, multi-user-editable table over a remote document store: sorted
//! typed views derived from pushed snapshots, mutations issued as atomic
//! batches, and per-session transient state (selection, pagination, cell
//! editing) reconciled against every delivered snapshot.

pub mod auth;
pub mod error;
pub mod model;
pub mod ops;
pub mod session;
pub mod store;
pub mod view;

mod engine;

pub use engine::*;
pub use view::TableView;
