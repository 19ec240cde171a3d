//! Minder - local-first personal assistant
//!
//! CLI surface over the assistant core: an interactive chat REPL plus
//! task, memory, and stats subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use minder::{
    chat::{typing_delay, Assistant, GREETING},
    classifier::Classifier,
    config::MinderConfig,
    memory::{MemoryStore, MemoryType, TypeFilter},
    stats::StatsAggregator,
    storage::{FileStorage, Storage},
    tasks::TaskStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "minder")]
#[command(version)]
#[command(about = "Local-first personal assistant with tasks, memory, and chat")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Manage memories
    Memory {
        #[command(subcommand)]
        command: MemoryCommands,
    },

    /// Show aggregated stats
    Stats {
        /// Keep polling and reprinting until interrupted
        #[arg(long)]
        watch: bool,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task (priority is classified from the text)
    Add {
        /// Task text
        text: String,
    },
    /// List tasks
    List {
        /// Show only completed tasks
        #[arg(long)]
        completed: bool,
    },
    /// Toggle a task's completion state
    Done {
        /// Task ID
        id: Uuid,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum MemoryCommands {
    /// Add a note
    Add {
        /// Note content
        text: String,
    },
    /// List memories, optionally filtered
    List {
        /// Filter by type (note, conversation, preference, fact)
        #[arg(short = 't', long = "type")]
        kind: Option<MemoryType>,

        /// Case-insensitive content search
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Delete a memory
    Delete {
        /// Memory ID
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("minder={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        MinderConfig::from_file(config_path)?
    } else {
        MinderConfig::default()
    };

    match cli.command {
        Commands::Chat => run_chat(config).await?,
        Commands::Task { command } => run_task(config, command).await?,
        Commands::Memory { command } => run_memory(config, command).await?,
        Commands::Stats { watch } => run_stats(config, watch).await?,
        Commands::Config { default } => {
            let config = if default {
                MinderConfig::default()
            } else {
                config
            };
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Open the storage backend, classifier, and both stores from the configuration.
async fn open_stores(
    config: &MinderConfig,
) -> Result<(Arc<Classifier>, Arc<TaskStore>, Arc<MemoryStore>)> {
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.storage.base_dir));
    let classifier = Arc::new(Classifier::new(&config.classifier)?);
    let tasks = Arc::new(TaskStore::open(storage.clone(), classifier.clone()).await?);
    let memories = Arc::new(MemoryStore::open(storage).await?);
    Ok((classifier, tasks, memories))
}

async fn run_chat(config: MinderConfig) -> Result<()> {
    let (classifier, tasks, memories) = open_stores(&config).await?;
    let assistant = Assistant::new(classifier, tasks, memories);

    println!("assistant> {}", GREETING);
    println!("(type 'exit' to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        let Some(exchange) = assistant.handle_message(input).await? else {
            continue;
        };

        // Simulated typing delay before the reply appears
        tokio::time::sleep(typing_delay(&config.chat)).await;

        println!("assistant> {}", exchange.reply);
        if let Some(task) = exchange.extracted_task {
            println!("           [added task with {} priority: {}]", task.priority, task.text);
        }
    }

    println!("assistant> Bye!");
    Ok(())
}

async fn run_task(config: MinderConfig, command: TaskCommands) -> Result<()> {
    let (_, tasks, _) = open_stores(&config).await?;

    match command {
        TaskCommands::Add { text } => match tasks.add(&text).await? {
            Some(task) => println!("Added \"{}\" with {} priority ({})", task.text, task.priority, task.id),
            None => println!("Nothing to add"),
        },
        TaskCommands::List { completed } => {
            let list = if completed {
                tasks.completed().await
            } else {
                tasks.pending().await
            };
            let label = if completed { "Completed" } else { "Pending" };
            println!("{} tasks ({}):", label, list.len());
            for task in list {
                println!(
                    "  [{}] {:<8} {}  ({})",
                    if task.completed { "x" } else { " " },
                    task.priority,
                    task.text,
                    task.id
                );
            }
        }
        TaskCommands::Done { id } => {
            if tasks.toggle(id).await? {
                println!("Toggled {}", id);
            } else {
                println!("No task with ID {}", id);
            }
        }
        TaskCommands::Delete { id } => {
            if tasks.delete(id).await? {
                println!("Deleted {}", id);
            } else {
                println!("No task with ID {}", id);
            }
        }
    }

    Ok(())
}

async fn run_memory(config: MinderConfig, command: MemoryCommands) -> Result<()> {
    let (_, _, memories) = open_stores(&config).await?;

    match command {
        MemoryCommands::Add { text } => match memories.add_note(&text).await? {
            Some(item) => println!("Saved note {}", item.id),
            None => println!("Nothing to save"),
        },
        MemoryCommands::List { kind, search } => {
            let filter = match kind {
                Some(kind) => TypeFilter::Only(kind),
                None => TypeFilter::All,
            };
            let items = memories.search(&search, filter).await;
            println!("{} memories:", items.len());
            for item in items {
                println!(
                    "  {:<12} {}  {}  ({})",
                    item.kind.to_string(),
                    item.timestamp.format("%Y-%m-%d"),
                    item.content,
                    item.id
                );
            }
        }
        MemoryCommands::Delete { id } => {
            if memories.delete(id).await? {
                println!("Deleted {}", id);
            } else {
                println!("No memory with ID {}", id);
            }
        }
    }

    Ok(())
}

async fn run_stats(config: MinderConfig, watch: bool) -> Result<()> {
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.storage.base_dir));
    let stats = Arc::new(StatsAggregator::new(storage));

    if !watch {
        print_snapshot(&stats.snapshot().await?);
        return Ok(());
    }

    let interval = Duration::from_secs(config.stats.refresh_interval_secs);
    let mut rx = stats.subscribe(interval).await?;
    print_snapshot(&rx.borrow());

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                print_snapshot(&rx.borrow());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &minder::stats::StatsSnapshot) {
    println!(
        "Tasks: {}/{} completed ({}%)  Memories: {}  Conversations: {}",
        snapshot.completed_tasks,
        snapshot.total_tasks,
        snapshot.completion_rate,
        snapshot.total_memories,
        snapshot.conversation_count
    );
}
