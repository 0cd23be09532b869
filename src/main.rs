use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seedvault::cli::{handle_secret_command, SecretCommands};
use seedvault::config::{SeedVaultPaths, Settings};
use seedvault::services::SecretStore;

#[derive(Parser)]
#[command(
    name = "seedvault",
    author = "Kaylee Beyene",
    version,
    about = "Passphrase-encrypted mnemonic storage",
    long_about = "SeedVault stores recovery mnemonics encrypted with a key derived \
                  from your passphrase, on internal storage or on removable media."
)]
struct Cli {
    /// Mount point of removable media
    #[arg(long, global = true, env = "SEEDVAULT_MEDIA_DIR")]
    media: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Secret(SecretCommands),

    /// Write default settings
    Init {
        /// PBKDF2 iterations for new secrets
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Show current configuration and paths
    Config,
}

/// Initialize logging on stderr; secrets go to stdout
fn init_logging() {
    let filter = EnvFilter::try_from_env("SEEDVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = SeedVaultPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Secret(cmd)) => {
            let store = SecretStore::open(&paths, &settings, cli.media);
            handle_secret_command(&store, cmd)?;
        }
        Some(Commands::Init { iterations }) => {
            if let Some(iterations) = iterations {
                settings.key_iterations = iterations;
            }
            settings.save(&paths)?;
            println!("Initialized SeedVault at: {}", paths.base_dir().display());
            println!("New secrets use {} key iterations.", settings.key_iterations);
        }
        Some(Commands::Config) => {
            let media_dir = settings.media_dir(cli.media.clone());
            let store = SecretStore::open(&paths, &settings, cli.media);

            println!("SeedVault Configuration");
            println!("=======================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!("Secrets file:    {}", paths.secrets_file().display());
            match media_dir {
                Some(dir) => println!("Removable media: {}", dir.display()),
                None => println!("Removable media: not configured"),
            }
            println!();
            println!("Settings:");
            println!("  Key iterations: {}", settings.key_iterations);
            println!(
                "  Media present:  {}",
                if store.removable_available() { "yes" } else { "no" }
            );
        }
        None => {
            println!("SeedVault - passphrase-encrypted mnemonic storage");
            println!();
            println!("Run 'seedvault --help' for usage information.");
        }
    }

    Ok(())
}
