use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, prepare_database_url, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use controller::events::UiEvent;
use ui::FeedbackApp;

#[derive(Parser, Debug)]
#[command(name = "feedback-gui", about = "Desktop feedback collector")]
struct Args {
    /// Overrides the database from feedback.toml / FEEDBACK_DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

/// Without an explicit setting the database lives in the per-user data directory.
fn resolve_database_url(explicit: Option<&str>, settings: &Settings) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }
    if settings.database_url != Settings::default().database_url {
        return settings.database_url.clone();
    }
    match dirs::data_dir() {
        Some(dir) => default_gui_database_path(dir).to_string_lossy().into_owned(),
        None => settings.database_url.clone(),
    }
}

fn default_gui_database_path(data_dir: PathBuf) -> PathBuf {
    data_dir.join("feedback_collector").join("feedback.db")
}

fn main() -> anyhow::Result<()> {
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

    let database_url = prepare_database_url(&resolve_database_url(
        args.database_url.as_deref(),
        &settings,
    ))?;
    tracing::info!(database_url = %database_url, "starting feedback gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let worker = spawn_backend_thread(database_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Feedback")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    let app_tx = cmd_tx.clone();
    let page_size = settings.page_size;
    let result = eframe::run_native(
        "Feedback",
        options,
        Box::new(move |_cc| Ok(Box::new(FeedbackApp::new(app_tx, ui_rx, page_size)))),
    );

    if cmd_tx.send(BackendCommand::Shutdown).is_err() {
        tracing::warn!("backend worker already stopped; pending saves may be lost");
    }
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }

    result.map_err(|err| anyhow::anyhow!("gui event loop failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url_wins() {
        let settings = Settings::default();
        assert_eq!(
            resolve_database_url(Some("sqlite::memory:"), &settings),
            "sqlite::memory:"
        );
    }

    #[test]
    fn configured_url_is_kept() {
        let settings = Settings {
            database_url: "sqlite://./custom.db".to_string(),
            ..Settings::default()
        };
        assert_eq!(resolve_database_url(None, &settings), "sqlite://./custom.db");
    }

    #[test]
    fn default_path_sits_under_app_directory() {
        let path = default_gui_database_path(PathBuf::from("/home/u/.local/share"));
        assert_eq!(
            path,
            PathBuf::from("/home/u/.local/share/feedback_collector/feedback.db")
        );
    }

    #[test]
    fn parses_database_override() {
        let args = Args::try_parse_from(["feedback-gui", "--database-url", "sqlite://x.db"])
            .expect("args");
        assert_eq!(args.database_url.as_deref(), Some("sqlite://x.db"));
    }
}
