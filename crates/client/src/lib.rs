//! nvl_client - command-line administration of users on an identity provider.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod issuers;
pub mod output;
pub mod prompt;

pub use client::IssuerClient;
pub use error::{ClientError, Result};
