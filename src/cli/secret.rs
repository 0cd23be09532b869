//! Secret CLI commands
//!
//! Implements listing, revealing, storing and deleting stored mnemonics.

use std::io::{BufRead, Write};

use clap::Subcommand;

use crate::crypto::SecureString;
use crate::display::{format_entry_table, format_identifier_list};
use crate::error::{SeedVaultError, SeedVaultResult};
use crate::models::Location;
use crate::services::SecretStore;

/// Environment variable supplying the passphrase non-interactively
pub const PASSPHRASE_ENV: &str = "SEEDVAULT_PASSPHRASE";

/// Secret subcommands
#[derive(Subcommand)]
pub enum SecretCommands {
    /// List stored secrets
    #[command(alias = "ls")]
    List {
        /// Use the removable media collection
        #[arg(short, long)]
        removable: bool,
        /// Show cipher mode and iteration count
        #[arg(short, long)]
        verbose: bool,
    },
    /// Decrypt and print a stored secret
    Show {
        /// Identifier of the secret
        identifier: String,
        /// Use the removable media collection
        #[arg(short, long)]
        removable: bool,
    },
    /// Encrypt and store a secret
    Store {
        /// Identifier of the secret (also used as key derivation salt)
        identifier: String,
        /// Use the removable media collection
        #[arg(short, long)]
        removable: bool,
        /// Read the secret from the first line of stdin
        #[arg(long)]
        stdin: bool,
    },
    /// Delete a stored secret
    #[command(alias = "rm")]
    Delete {
        /// Identifier of the secret
        identifier: String,
        /// Use the removable media collection
        #[arg(short, long)]
        removable: bool,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Handle a secret command
pub fn handle_secret_command(store: &SecretStore, cmd: SecretCommands) -> SeedVaultResult<()> {
    match cmd {
        SecretCommands::List { removable, verbose } => {
            list_secrets(store, Location::from_flag(removable), verbose)
        }
        SecretCommands::Show {
            identifier,
            removable,
        } => show_secret(store, &identifier, Location::from_flag(removable)),
        SecretCommands::Store {
            identifier,
            removable,
            stdin,
        } => store_secret(store, &identifier, Location::from_flag(removable), stdin),
        SecretCommands::Delete {
            identifier,
            removable,
            yes,
        } => delete_secret(store, &identifier, Location::from_flag(removable), yes),
    }
}

fn list_secrets(store: &SecretStore, location: Location, verbose: bool) -> SeedVaultResult<()> {
    if location == Location::Removable && !store.removable_available() {
        println!("Removable media not detected.");
        return Ok(());
    }

    let identifiers = store.list_entries(location);

    if verbose {
        let entries: Vec<_> = identifiers
            .into_iter()
            .filter_map(|id| store.entry(location, &id).map(|entry| (id, entry)))
            .collect();
        print!("{}", format_entry_table(location, &entries));
    } else {
        print!("{}", format_identifier_list(location, &identifiers));
    }

    Ok(())
}

fn show_secret(store: &SecretStore, identifier: &str, location: Location) -> SeedVaultResult<()> {
    let passphrase = read_passphrase("Enter passphrase: ")?;

    match store.reveal(&passphrase, identifier, location) {
        Ok(secret) => {
            println!("{}", secret.as_str());
            Ok(())
        }
        // Wrong passphrase, corrupt entry and missing entry all look the same
        Err(_) => Err(SeedVaultError::Encryption(format!(
            "Could not decrypt '{}'",
            identifier
        ))),
    }
}

fn store_secret(
    store: &SecretStore,
    identifier: &str,
    location: Location,
    from_stdin: bool,
) -> SeedVaultResult<()> {
    if identifier.trim().is_empty() {
        return Err(SeedVaultError::Validation(
            "Identifier cannot be empty".to_string(),
        ));
    }

    let secret = if from_stdin {
        read_secret_line()?
    } else {
        prompt_hidden("Enter secret: ")?
    };
    if secret.trim().is_empty() {
        return Err(SeedVaultError::Validation("Secret cannot be empty".to_string()));
    }

    let passphrase = read_new_passphrase()?;

    if store.entry(location, identifier).is_some() {
        println!("Overwriting existing secret '{}'.", identifier);
    }

    store.try_persist(&passphrase, identifier, &secret, location)?;
    println!("Stored '{}' on {} storage.", identifier, location);
    Ok(())
}

fn delete_secret(
    store: &SecretStore,
    identifier: &str,
    location: Location,
    skip_confirm: bool,
) -> SeedVaultResult<()> {
    if store.entry(location, identifier).is_none() {
        return Err(SeedVaultError::secret_not_found(identifier));
    }

    if !skip_confirm {
        print!("Delete '{}' from {} storage? (yes/no): ", identifier, location);
        std::io::stdout().flush()?;

        let mut confirm = String::new();
        std::io::stdin().read_line(&mut confirm)?;

        if confirm.trim().to_lowercase() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.erase(identifier, location)?;
    println!("Deleted '{}' from {} storage.", identifier, location);
    Ok(())
}

/// Passphrase from the environment, or prompted with hidden input
fn read_passphrase(prompt: &str) -> SeedVaultResult<SecureString> {
    if let Ok(passphrase) = std::env::var(PASSPHRASE_ENV) {
        return Ok(SecureString::new(passphrase));
    }
    prompt_hidden(prompt)
}

/// New passphrase with confirmation, unless supplied by the environment
fn read_new_passphrase() -> SeedVaultResult<SecureString> {
    if let Ok(passphrase) = std::env::var(PASSPHRASE_ENV) {
        return Ok(SecureString::new(passphrase));
    }

    loop {
        let pass1 = prompt_hidden("Enter passphrase: ")?;

        if pass1.is_empty() {
            println!("Passphrase cannot be empty. Please try again.");
            continue;
        }

        let pass2 = prompt_hidden("Confirm passphrase: ")?;

        if pass1 != pass2 {
            println!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

fn prompt_hidden(prompt: &str) -> SeedVaultResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| SeedVaultError::Io(format!("Failed to read input: {}", e)))
}

/// First line of stdin, without its line terminator
fn read_secret_line() -> SeedVaultResult<SecureString> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(SecureString::new(strip_line_ending(&line)))
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
