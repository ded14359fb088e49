use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, prepare_database_url, FeedbackSession};
use shared::view::{PageView, SortOrder};
use storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "feedback", about = "Submit and browse feedback from the terminal")]
struct Args {
    /// Overrides the database from feedback.toml / FEEDBACK_DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
    /// Sign in with the demo authenticator; omitted means the anonymous partition.
    #[arg(long)]
    email: Option<String>,
    #[arg(long, requires = "email")]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Submit {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    List {
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(long, default_value_t = SortOrder::Newest)]
        sort: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, settings_warnings) = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    for warning in &settings_warnings {
        tracing::warn!("{warning}");
    }
    let args = Args::parse();

    let database_url =
        prepare_database_url(args.database_url.as_deref().unwrap_or(&settings.database_url))?;
    let store = Arc::new(Storage::new(&database_url).await?);
    let mut session = FeedbackSession::new(store, settings.page_size);

    match args.email.as_deref() {
        Some(email) => {
            let identity = session
                .sign_in(email, args.password.as_deref().unwrap_or_default())
                .await?;
            tracing::info!(email = %identity.email, "signed in");
        }
        None => session.open(None).await,
    }

    match args.command {
        Command::Submit { text } => {
            let text = text.join(" ");
            if let Err(err) = session.submit(&text) {
                bail!("{}: {err}", err.title());
            }
            session.flush().await;
            println!(
                "Feedback submitted successfully! ({} total)",
                session.board().len()
            );
        }
        Command::List {
            filter,
            sort,
            page,
            json,
        } => {
            session.set_filter(filter);
            session.set_sort(sort);
            session.set_page(page);
            let view = session.render();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", format_page(&view, session.board().view().filter()));
            }
        }
    }

    Ok(())
}

fn format_page(view: &PageView, filter: &str) -> String {
    if view.is_collection_empty() {
        return "No feedback submitted yet\n".to_string();
    }
    if view.is_empty() {
        return format!("No feedback matches '{filter}'\n");
    }

    let mut out = String::new();
    for entry in &view.entries {
        out.push_str(&format!("#{} {}\n", entry.position, entry.item));
    }
    if view.show_pagination() {
        out.push_str(&format!(
            "-- page {} of {} ({} items) --\n",
            view.page, view.total_pages, view.filtered_count
        ));
    }
    out
}
