//! SeaORM entity definitions for the forgeport database schema.

pub mod identity;
pub mod issue;
pub mod issue_label;
pub mod label;
pub mod merge_request;
pub mod merge_request_diff;
pub mod merge_request_label;
pub mod milestone;
pub mod milestone_state;
pub mod note;
pub mod project;
pub mod record_state;
pub mod release;
pub mod user;
pub mod user_email;
pub mod prelude;
