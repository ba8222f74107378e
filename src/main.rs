//! Studydash CLI
//!
//! Terminal front end for the study dashboard:
//! - Show the dashboard
//! - Read and change settings
//! - Run voice transcripts through the command router
//! - Ask the AI assistant
//! - Interactive mode driven by the event queue

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use studydash::app::{event_queue, run, AppEvent, Dashboard, UiUpdate};
use studydash::config::{generate_default_config, Config};
use studydash::connectivity::{ConnectivityMonitor, ConnectivityProbe, HttpProbe, ManualProbe};
use studydash::store::{FileStore, KeyValueStore, MemoryStore, SettingKey, SettingsStore};
use studydash::{logging, AiClient};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "studydash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal study dashboard with voice commands and an AI assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// AI backend URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Treat the dashboard as offline without probing
    #[arg(long, global = true)]
    pub offline: bool,

    /// Keep all data in memory for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard
    Dashboard,

    /// Show one setting, or all of them
    Get {
        /// theme, aiModel, fontSize or user
        setting: Option<String>,
    },

    /// Change a setting
    Set {
        /// theme, aiModel, fontSize or user
        setting: String,
        value: String,
    },

    /// Run a voice transcript through the command router
    Voice {
        transcript: Vec<String>,
    },

    /// Ask the AI assistant
    Chat {
        prompt: Vec<String>,
    },

    /// Ask the study helper to explain a topic
    Explain {
        topic: Vec<String>,
    },

    /// Delete all settings, tasks and notes
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Read events from stdin until EOF or /quit
    Interactive,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    logging::init(&config.logging);
    tracing::debug!("Studydash v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }

        Commands::Get { setting } => {
            let settings = SettingsStore::load(open_store(&cli, &config)?)?;
            match setting {
                Some(name) => {
                    let key: SettingKey = name.parse()?;
                    println!("{}", settings.get(key));
                }
                None if cli.format == OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(settings.settings())?);
                }
                None => {
                    for key in SettingKey::all() {
                        println!("{:<10} {}", key.as_str(), settings.get(*key));
                    }
                }
            }
            Ok(())
        }

        Commands::Dashboard => run_once(&cli, &config, AppEvent::Refresh).await,

        Commands::Set { setting, value } => {
            let event = AppEvent::UpdateSetting {
                name: setting.clone(),
                value: value.clone(),
            };
            run_once(&cli, &config, event).await
        }

        Commands::Voice { transcript } => {
            let event = AppEvent::VoiceTranscript(transcript.join(" "));
            run_once(&cli, &config, event).await
        }

        Commands::Chat { prompt } => run_once(&cli, &config, AppEvent::Chat(prompt.join(" "))).await,

        Commands::Explain { topic } => {
            run_once(&cli, &config, AppEvent::Explain(topic.join(" "))).await
        }

        Commands::Reset { yes } => {
            if !*yes && !confirm("Are you sure you want to reset all data? This cannot be undone.")? {
                println!("Cancelled");
                return Ok(());
            }
            run_once(&cli, &config, AppEvent::ResetAll).await
        }

        Commands::Interactive => {
            let dashboard = build_dashboard(&cli, &config).await?;
            interactive(dashboard, cli.format).await
        }
    }
}

/// Handle a single event and print what it produced
async fn run_once(cli: &Cli, config: &Config, event: AppEvent) -> anyhow::Result<()> {
    let is_voice = matches!(event, AppEvent::VoiceTranscript(_));
    let mut dashboard = build_dashboard(cli, config).await?;
    let updates = dashboard.handle(event).await;

    if is_voice && updates.is_empty() && cli.format == OutputFormat::Text {
        println!("No command recognized");
    }
    finish(updates, cli.format)
}

fn open_store(cli: &Cli, config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if cli.ephemeral {
        return Ok(Arc::new(MemoryStore::new()));
    }

    let dir = config.storage.data_path();
    let store = FileStore::open(&dir).with_context(|| format!("opening data directory {dir:?}"))?;
    tracing::debug!(path = ?store.path(), "Using storage file");
    Ok(Arc::new(store))
}

async fn build_dashboard(cli: &Cli, config: &Config) -> anyhow::Result<Dashboard> {
    let settings = SettingsStore::load(open_store(cli, config)?)?;

    let probe: Arc<dyn ConnectivityProbe> = if cli.offline {
        Arc::new(ManualProbe::new(false))
    } else {
        Arc::new(HttpProbe::new(
            config.probe_url(),
            Duration::from_millis(config.connectivity.probe_timeout_ms),
        )?)
    };
    let monitor = ConnectivityMonitor::start(probe).await;

    let ai = AiClient::new(config.api.client_config(), monitor.handle())?;
    Ok(Dashboard::new(settings, monitor, ai))
}

/// Print updates; fail if any of them is an error
fn finish(updates: Vec<UiUpdate>, format: OutputFormat) -> anyhow::Result<()> {
    let mut failed = false;
    for update in &updates {
        failed |= matches!(update, UiUpdate::Error { .. });
        print_update(update, format)?;
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn interactive(dashboard: Dashboard, format: OutputFormat) -> anyhow::Result<()> {
    let (tx, rx) = event_queue();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    let event_loop = tokio::spawn(run(dashboard, rx, update_tx));
    let printer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            if let Err(e) = print_update(&update, format) {
                tracing::error!(error = %e, "Failed to print update");
            }
        }
    });

    if format == OutputFormat::Text {
        eprintln!("Speak (type) a command, or use /set, /chat, /explain, /online, /refresh, /reset, /quit");
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(event) = parse_line(&line) else {
            continue;
        };
        let stop = event == AppEvent::Shutdown;
        if tx.send(event).is_err() || stop {
            break;
        }
    }

    drop(tx);
    event_loop.await?;
    printer.await?;
    Ok(())
}

/// Map one line of interactive input to an event
fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Some(AppEvent::VoiceTranscript(line.to_string()));
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let rest = rest.trim();

    match name {
        "set" => {
            let (setting, value) = rest.split_once(' ').unwrap_or((rest, ""));
            Some(AppEvent::UpdateSetting {
                name: setting.to_string(),
                value: value.trim().to_string(),
            })
        }
        "chat" => Some(AppEvent::Chat(rest.to_string())),
        "explain" => Some(AppEvent::Explain(rest.to_string())),
        "online" | "offline" => Some(AppEvent::ConnectivityChanged),
        "refresh" => Some(AppEvent::Refresh),
        "reset" => Some(AppEvent::ResetAll),
        "quit" | "exit" => Some(AppEvent::Shutdown),
        other => {
            eprintln!("Unknown command: /{}", other);
            None
        }
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    eprint!("{} [y/N] ", question);
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_update(update: &UiUpdate, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string(update)?);
        return Ok(());
    }

    match update {
        UiUpdate::Dashboard(view) => println!("{}", view),
        UiUpdate::ThemeApplied { theme } => println!("Theme: {}", theme),
        UiUpdate::FontSizeApplied { size, px } => println!("Font size: {} ({}px)", size, px),
        UiUpdate::SettingSaved { setting, value } => println!("Saved {} = {:?}", setting, value),
        UiUpdate::Connectivity { state, controls } => {
            println!("Status: {}", state);
            for control in controls.iter().filter(|c| !c.enabled) {
                println!("  {} disabled: {}", control.id, control.tooltip);
            }
        }
        UiUpdate::NoteAdded { text } => println!("Note added: {}", text),
        UiUpdate::Plan { tasks } => {
            if tasks.is_empty() {
                println!("Nothing planned - all tasks are done!");
            } else {
                println!("Today's plan:");
                for task in tasks {
                    println!("  - {}", task);
                }
            }
        }
        UiUpdate::Quote { text } => println!("\"{}\"", text),
        UiUpdate::AiReply { reply } => println!("{}", reply),
        UiUpdate::Explanation { topic, text } => {
            println!("{}", topic);
            println!("{}", "-".repeat(topic.chars().count()));
            println!("{}", text);
        }
        UiUpdate::Summary { text } => println!("Summary:\n{}", text),
        UiUpdate::DataReset => println!("All data has been reset."),
        UiUpdate::Error { message } => eprintln!("Error: {}", message),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(
            parse_line("add note revise"),
            Some(AppEvent::VoiceTranscript("add note revise".into()))
        );
        assert_eq!(
            parse_line("/set fontSize large"),
            Some(AppEvent::UpdateSetting {
                name: "fontSize".into(),
                value: "large".into()
            })
        );
        assert_eq!(
            parse_line("/set user Ada Lovelace"),
            Some(AppEvent::UpdateSetting {
                name: "user".into(),
                value: "Ada Lovelace".into()
            })
        );
        assert_eq!(
            parse_line("/explain photosynthesis"),
            Some(AppEvent::Explain("photosynthesis".into()))
        );
        assert_eq!(parse_line("/quit"), Some(AppEvent::Shutdown));
        assert_eq!(parse_line("/bogus"), None);
    }
}
