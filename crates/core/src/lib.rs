//! nvl_core - types and pure rendering for the nvl user administration CLI.

pub mod display;
pub mod prompt;
pub mod serde;
pub mod user;

pub use user::{User, UserDraft, UserField};
