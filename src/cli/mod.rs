//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod secret;

pub use secret::{handle_secret_command, SecretCommands, PASSPHRASE_ENV};
