//! Output formatting functions.

use nvl_core::display::{render_user, render_user_table};
use nvl_core::User;

use crate::cli::OutputFormat;

/// Format a single user record for output.
pub fn format_user(user: &User, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(user),
        OutputFormat::Pretty => render_user(user),
    }
}

/// Format a user listing for output.
pub fn format_users(users: &[User], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&users),
        OutputFormat::Pretty => render_user_table(users),
    }
}

/// Pretty-printed JSON with the API's own keys.
fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
