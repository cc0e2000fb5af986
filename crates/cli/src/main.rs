//! noveltrack CLI - serialized-fiction reading tracker.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use noveltrack_core::input::{parse_chapter, parse_check_time, parse_increment};
use noveltrack_core::{NewNovel, NovelId, NovelStatus, Settings, Snapshot};
use noveltrack_progress::{view, Confirmation, NovelStore, StatusFilter};
use noveltrack_storage::{JsonFileStorage, SnapshotStorage, DEFAULT_EXPORT_FILE};

#[derive(Parser)]
#[command(name = "noveltrack")]
#[command(about = "Track reading progress and milestones for serialized fiction", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CliConfig,

    #[command(subcommand)]
    command: Commands,
}

/// Runtime configuration, from flags or the environment.
#[derive(Args, Debug)]
struct CliConfig {
    /// Directory holding the tracker state
    #[arg(long, global = true, env = "NOVELTRACK_DATA_DIR", default_value = ".noveltrack")]
    data_dir: PathBuf,

    /// Start from the sample data when no state exists yet
    #[arg(long, global = true, env = "NOVELTRACK_SEED_IF_EMPTY")]
    seed_if_empty: bool,

    /// Print views as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new novel
    Add {
        /// Novel title
        title: String,
        /// Where the novel is published
        #[arg(long)]
        url: String,
        /// Latest chapter available
        #[arg(long, value_parser = parse_chapter)]
        current: u32,
        /// Chapters read so far
        #[arg(long, value_parser = parse_chapter)]
        progress: u32,
        /// Milestone step
        #[arg(long, value_parser = parse_increment)]
        increment: u32,
    },
    /// Show the dashboard
    List {
        /// Case-insensitive title search
        #[arg(long, default_value = "")]
        search: String,
        /// all, active, completed or milestone-reached
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show novel details
    Show {
        /// Novel ID
        id: NovelId,
    },
    /// Record reading progress
    Progress {
        /// Novel ID
        id: NovelId,
        /// Chapters read
        #[arg(long, value_parser = parse_chapter)]
        read: u32,
        /// Latest chapter available
        #[arg(long, value_parser = parse_chapter)]
        latest: u32,
    },
    /// Change the milestone step
    Milestone {
        /// Novel ID
        id: NovelId,
        /// New milestone step
        #[arg(long, value_parser = parse_increment)]
        increment: u32,
    },
    /// Mark a novel active or completed
    Status {
        /// Novel ID
        id: NovelId,
        /// active or completed
        status: NovelStatus,
    },
    /// Delete a novel
    Delete {
        /// Novel ID
        id: NovelId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show dashboard statistics
    Stats,
    /// List, mark or clear notifications
    Notifications {
        /// Mark all as read
        #[arg(long, conflicts_with = "clear")]
        mark_read: bool,
        /// Clear all
        #[arg(long)]
        clear: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show or change settings
    Settings {
        /// Address for update mails
        #[arg(long)]
        email: Option<String>,
        /// Daily check time, HH:MM
        #[arg(long, value_parser = parse_check_time)]
        check_time: Option<String>,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Export all data to a JSON file
    Export {
        /// Target file or directory
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        path: PathBuf,
    },
    /// Import data from a JSON export
    Import {
        /// Export file to read
        path: PathBuf,
    },
    /// Load the sample novels
    Seed {
        /// Replace existing data
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    debug!(?config, "configuration resolved");

    // Open storage
    let mut storage = JsonFileStorage::new(&config.data_dir).await?;
    let mut store = match storage.load().await? {
        Some(bytes) => {
            let snapshot = Snapshot::decode(&bytes).with_context(|| {
                format!("saved state in {} is unreadable", config.data_dir.display())
            })?;
            NovelStore::from_snapshot(snapshot)
        }
        None if config.seed_if_empty => NovelStore::with_sample_data(),
        None => NovelStore::new(),
    };

    let mutated = run(cli.command, &mut store, &storage, config.json).await?;
    if mutated {
        storage.save(&store.export_snapshot()).await?;
    }
    Ok(())
}

/// Execute one command. Returns whether the store changed.
async fn run(
    command: Commands,
    store: &mut NovelStore,
    storage: &JsonFileStorage,
    json: bool,
) -> Result<bool> {
    match command {
        Commands::Add { title, url, current, progress, increment } => {
            let novel = store.add_novel(NewNovel {
                title,
                url,
                current_chapter: current,
                user_progress: progress,
                milestone_increment: increment,
            })?;
            println!("Added novel: {} - {} (milestone at {})", novel.id, novel.title, novel.milestone_target);
            Ok(true)
        }
        Commands::List { search, status } => {
            let dashboard = view::dashboard(store, &search, status);
            if json {
                return print_json(&dashboard).map(|_| false);
            }
            print_stats(&dashboard.stats);
            if dashboard.cards.is_empty() {
                println!("No novels found. Add your first novel to get started!");
            }
            for card in dashboard.cards {
                println!(
                    "  {} | {} | read {}/{} | milestone {} | {:.1}% | {}",
                    card.id,
                    card.title,
                    card.user_progress,
                    card.current_chapter,
                    card.milestone_target,
                    card.progress_percent,
                    card.badge,
                );
            }
            Ok(false)
        }
        Commands::Show { id } => {
            let detail = view::novel_detail(store, id)?;
            if json {
                return print_json(&detail).map(|_| false);
            }
            println!("Novel: {}", detail.card.id);
            println!("  Title: {}", detail.card.title);
            println!("  URL: {}", detail.url);
            println!("  Latest chapter: {}", detail.card.current_chapter);
            println!("  Read: {} ({:.1}%)", detail.card.user_progress, detail.card.progress_percent);
            println!("  Milestone: {} (every {})", detail.card.milestone_target, detail.milestone_increment);
            println!("  Status: {}", detail.card.badge);
            println!("  Last checked: {}", detail.last_checked);
            Ok(false)
        }
        Commands::Progress { id, read, latest } => {
            let before = store.compute_stats().milestones_achieved;
            let novel = store.update_progress(id, read, latest)?;
            println!("Progress updated: {} read {}/{}", novel.title, novel.user_progress, novel.current_chapter);
            if store.compute_stats().milestones_achieved > before {
                if let Some(note) = store.notifications().first() {
                    println!("{}", note.message);
                }
            }
            Ok(true)
        }
        Commands::Milestone { id, increment } => {
            let novel = store.update_milestone_increment(id, increment)?;
            println!("Milestone updated: {} next at {}", novel.title, novel.milestone_target);
            Ok(true)
        }
        Commands::Status { id, status } => {
            let novel = store.set_status(id, status)?;
            println!("{} is now {}", novel.title, novel.status);
            Ok(true)
        }
        Commands::Delete { id, yes } => {
            let prompt = store.request_delete(id)?;
            if yes || ask(&prompt)? {
                store.confirm_pending()?;
                println!("Deleted novel {}", id);
                Ok(true)
            } else {
                store.cancel_pending();
                println!("Cancelled");
                Ok(false)
            }
        }
        Commands::Stats => {
            let stats = store.compute_stats();
            if json {
                return print_json(&stats).map(|_| false);
            }
            print_stats(&stats);
            Ok(false)
        }
        Commands::Notifications { mark_read, clear, yes } => {
            if clear {
                let prompt = store.request_clear_notifications();
                if yes || ask(&prompt)? {
                    store.confirm_pending()?;
                    println!("All notifications cleared");
                    return Ok(true);
                }
                store.cancel_pending();
                println!("Cancelled");
                return Ok(false);
            }
            if mark_read {
                let changed = store.mark_all_notifications_read();
                println!("All notifications marked as read ({})", changed);
                return Ok(changed > 0);
            }
            let items = view::notification_items(store);
            if json {
                return print_json(&items).map(|_| false);
            }
            if items.is_empty() {
                println!("No notifications yet.");
            }
            for item in items {
                let marker = if item.unread { "*" } else { " " };
                println!("{} [{}] {} {}", marker, item.kind, item.timestamp.format("%Y-%m-%d %H:%M"), item.message);
            }
            Ok(false)
        }
        Commands::Settings { email, check_time, notifications } => {
            if email.is_none() && check_time.is_none() && notifications.is_none() {
                let settings = store.settings();
                if json {
                    return print_json(settings).map(|_| false);
                }
                println!("Email: {}", settings.email);
                println!("Daily check time: {}", settings.daily_check_time);
                println!("Notifications: {}", if settings.notifications_enabled { "on" } else { "off" });
                return Ok(false);
            }
            let current = store.settings().clone();
            store.save_settings(Settings {
                email: email.unwrap_or(current.email),
                daily_check_time: check_time.unwrap_or(current.daily_check_time),
                notifications_enabled: notifications.unwrap_or(current.notifications_enabled),
            })?;
            println!("Settings saved successfully");
            Ok(true)
        }
        Commands::Export { path } => {
            let written = storage.export_to(&path, &store.export_snapshot()).await?;
            println!("Data exported to {}", written.display());
            Ok(false)
        }
        Commands::Import { path } => {
            let bytes = storage.read_import(&path).await?;
            let report = store.import_snapshot(&bytes)?;
            if report.is_empty() {
                println!("Nothing to import from {}", path.display());
                return Ok(false);
            }
            info!(path = %path.display(), "import applied");
            println!(
                "Data imported: novels {}, settings fields {}, notifications {}",
                describe(report.novels),
                report.settings_fields,
                describe(report.notifications),
            );
            Ok(true)
        }
        Commands::Seed { force } => {
            if !store.novels().is_empty() && !force {
                bail!("store already has {} novels; pass --force to replace them", store.novels().len());
            }
            *store = NovelStore::with_sample_data();
            println!("Loaded {} sample novels", store.novels().len());
            Ok(true)
        }
    }
}

fn print_stats(stats: &noveltrack_progress::Stats) {
    println!("Novels: {}", stats.total_novels);
    println!("Chapters read: {}", stats.total_chapters_read);
    println!("Milestones achieved: {}", stats.milestones_achieved);
    println!("Pending milestones: {}", stats.pending_milestones);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(count: Option<usize>) -> String {
    count.map_or_else(|| "unchanged".to_string(), |n| n.to_string())
}

/// Show a confirmation prompt and read y/N from stdin.
fn ask(prompt: &Confirmation) -> Result<bool> {
    println!("{}", prompt.title);
    print!("{} [y/N] ", prompt.message);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_conflicts_with_clear() {
        let err = Cli::try_parse_from(["noveltrack", "notifications", "--mark-read", "--clear"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_notification_flags_parse_alone() {
        let cli = Cli::try_parse_from(["noveltrack", "notifications", "--clear", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Notifications { mark_read: false, clear: true, yes: true }
        ));
    }
}
