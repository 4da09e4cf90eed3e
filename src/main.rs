//! casket CLI - serve the blob store over HTTP or poke it from the shell

use anyhow::Context;
use casket::{ContentStore, Key, ServerConfig};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "casket")]
#[command(about = "A minimal content-addressed blob store")]
#[command(version)]
struct Cli {
    /// Directory blobs are stored under
    #[arg(short, long, default_value = "/tmp/media")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the store over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },

    /// Store one or more files, printing one key per file
    Add {
        /// Files to store
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Write a blob's bytes to stdout
    Cat {
        /// The blob key (64 hex chars)
        key: String,
    },

    /// Delete a blob
    Rm {
        /// The blob key (64 hex chars)
        key: String,
    },

    /// Check whether a blob is stored (exit code 0 if present, 1 if not)
    Has {
        /// The blob key (64 hex chars)
        key: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let config = ServerConfig {
                bind_addr: bind,
                root: cli.root,
            };
            tokio::runtime::Runtime::new()?.block_on(casket::serve(config))?;
            Ok(())
        }
        Commands::Add { files } => {
            let store = open_store(&cli.root)?;
            for path in files {
                let mut file = std::fs::File::open(&path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                let key = store.put(&mut file)?;
                println!("{key}");
            }
            Ok(())
        }
        Commands::Cat { key } => {
            let store = open_store(&cli.root)?;
            let key: Key = key.parse()?;
            let bytes = store
                .get_bytes(&key)?
                .with_context(|| format!("blob not found: {key}"))?;
            std::io::stdout().write_all(&bytes)?;
            Ok(())
        }
        Commands::Rm { key } => {
            let store = open_store(&cli.root)?;
            let key: Key = key.parse()?;
            store.delete(&key)?;
            Ok(())
        }
        Commands::Has { key } => {
            let store = open_store(&cli.root)?;
            let key: Key = key.parse()?;
            if store.contains(&key)? {
                println!("{key}");
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn open_store(root: &Path) -> anyhow::Result<ContentStore> {
    ContentStore::open(root)
        .with_context(|| format!("failed to open store at {}", root.display()))
}
