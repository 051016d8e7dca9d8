//! Local record store.
//!
//! One module per entity, each offering an existence check by natural key
//! and an insert on the bulk-import write path: schema-level constraints
//! apply, but none of the lifecycle hooks of interactive creation
//! (notifications, workflow side effects) ever fire. The importer is the
//! single writer of historical data.

mod errors;

pub mod issues;
pub mod labels;
pub mod merge_requests;
pub mod milestones;
pub mod notes;
pub mod releases;
pub mod users;

pub use errors::{Result, StoreError};
