//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod repo;

pub use common::{NO_DESCRIPTION, description_or_placeholder, truncate_string};
pub use repo::RepoDisplay;
