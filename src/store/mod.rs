//! Profile storage for watchpost.
//!
//! Profiles live in a single JSON file under the user's config directory.

mod models;
mod store;

pub use models::*;
pub use store::*;
