use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{load_settings, prepare_database_url};
use shared::domain::{PartitionKey, UserIdentity};
use storage::{decode_items, FeedbackStore, Storage};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every stored partition with its item count.
    Partitions,
    /// Print a partition's raw value and how it decodes.
    Dump {
        #[command(flatten)]
        target: Target,
    },
    /// Delete a partition from the store.
    Clear {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    anonymous: bool,
    #[arg(long)]
    key: Option<String>,
}

impl Target {
    fn partition_key(&self) -> PartitionKey {
        if let Some(key) = &self.key {
            PartitionKey::from_raw(key.clone())
        } else if let Some(email) = &self.email {
            PartitionKey::for_identity(Some(&UserIdentity::new(email.clone())))
        } else {
            PartitionKey::anonymous()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, settings_warnings) = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    for warning in &settings_warnings {
        tracing::warn!("{warning}");
    }
    let cli = Cli::parse();

    let database_url =
        prepare_database_url(cli.database_url.as_deref().unwrap_or(&settings.database_url))?;
    let storage = Storage::new(&database_url).await?;

    match cli.command {
        Command::Partitions => {
            let partitions = storage.list_partitions().await?;
            if partitions.is_empty() {
                println!("no stored partitions");
            }
            for partition in partitions {
                println!(
                    "{}\t{} items\tupdated {}",
                    partition.key,
                    partition.item_count,
                    partition.updated_at.to_rfc3339()
                );
            }
        }
        Command::Dump { target } => {
            let key = target.partition_key();
            match storage.load_raw(&key).await? {
                Some(raw) => {
                    println!("raw: {raw}");
                    let items = decode_items(&key, &raw);
                    println!("decoded: {}", serde_json::to_string_pretty(&items)?);
                }
                None => println!("partition {key} is empty"),
            }
        }
        Command::Clear { target } => {
            let key = target.partition_key();
            if storage.clear(&key).await? {
                println!("cleared partition {key}");
            } else {
                println!("partition {key} was already empty");
            }
        }
    }

    Ok(())
}
