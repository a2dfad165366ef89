//! TalentScout command-line entry point.
//!
//! `talentscout` (or `talentscout chat`) runs an interactive interview in the
//! terminal. `models`, `check` and `init` are one-shot helpers.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use talentscout::config::{config_dir, Config, DEFAULT_CONFIG_TOML};
use talentscout::intake::{
    delete_session_data, end_interview, reset_session, CompletionGateway, DisplayRole,
    SessionState, TurnOrchestrator,
};
use talentscout::logging;
use talentscout::providers::models::SupportedModel;
use talentscout::providers::openai::OpenAiCompatProvider;
use talentscout::terminal::commands::handle_help;
use talentscout::terminal::{parse_input, read_input_line, ui, Command, InputLine};

#[derive(Parser)]
#[command(
    name = "talentscout",
    version,
    about = "Conversational hiring assistant for tech recruitment"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive candidate interview (the default).
    Chat(ChatArgs),
    /// List the supported models.
    Models,
    /// Check that the model backend is reachable.
    Check(BackendArgs),
    /// Write a default config file to ~/.talentscout/config.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Default)]
struct BackendArgs {
    /// Config file path (defaults to $TALENTSCOUT_CONFIG or ~/.talentscout/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// OpenAI-compatible API base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Model to use.
    #[arg(long)]
    model: Option<SupportedModel>,
}

#[derive(Args, Default)]
struct ChatArgs {
    #[command(flatten)]
    backend: BackendArgs,
    /// Always ask the backend, never reuse a cached reply.
    #[arg(long)]
    no_cache: bool,
    /// Text file shown as the banner at startup.
    #[arg(long)]
    banner: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat(ChatArgs::default())) {
        Commands::Chat(args) => run_chat(args).await,
        Commands::Models => {
            for model in SupportedModel::ALL {
                if model == SupportedModel::default() {
                    println!("{model} (default)");
                } else {
                    println!("{model}");
                }
            }
            Ok(())
        }
        Commands::Check(args) => run_check(args).await,
        Commands::Init { force } => run_init(force),
    }
}

/// Load config and apply CLI overrides on top of env and file values.
fn resolve_config(args: &BackendArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = &args.base_url {
        config.backend.base_url = url.clone();
    }
    if let Some(model) = args.model {
        config.backend.model = model;
    }
    config.validate()?;
    Ok(config)
}

fn build_provider(config: &Config) -> Result<OpenAiCompatProvider> {
    let api_key = config.backend.api_key(|key| std::env::var(key).ok());
    OpenAiCompatProvider::new(
        &config.backend.base_url,
        config.backend.model.as_str(),
        api_key,
        config.backend.request_timeout(),
    )
    .context("failed to build HTTP client")
}

async fn run_check(args: BackendArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    logging::init_cli(&config.logging.level);

    let provider = build_provider(&config)?;
    if provider.is_available().await {
        println!("✅ Backend reachable at {}", config.backend.base_url);
        Ok(())
    } else {
        anyhow::bail!(
            "backend not reachable at {}; check the base URL and that the server is running",
            config.backend.base_url
        )
    }
}

fn run_init(force: bool) -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join("config.toml");
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    std::fs::write(&path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

async fn run_chat(args: ChatArgs) -> Result<()> {
    let config = resolve_config(&args.backend)?;

    let _guard = logging::init(&config.logging, &config_dir()?.join("logs"))?;

    let provider = build_provider(&config)?;
    info!(
        base_url = %config.backend.base_url,
        model = %config.backend.model,
        "starting interview session"
    );

    let orchestrator = TurnOrchestrator::new(CompletionGateway::new(Arc::new(provider)))
        .with_cache(config.interview.use_cache && !args.no_cache)
        .with_max_input_chars(config.interview.max_input_chars);

    let mut state = SessionState::with_cache(
        config.interview.cache_capacity,
        config.interview.cache_context_messages,
    );

    println!("{}", ui::format_header(&ui::load_banner(args.banner.as_deref())));
    println!("{}\n", ui::status_badge(&state));

    let mut shown = 0;
    greet(&orchestrator, &mut state, &mut shown).await;

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        if state.is_ended() {
            eprint!("(ended) > ");
        } else {
            eprint!("> ");
        }

        let Some(line) = read_input_line(&mut stdin, &mut buf).await? else {
            break;
        };

        match parse_input(&line) {
            InputLine::Command(Command::Quit) => break,
            InputLine::Command(Command::Reset) => {
                reset_session(&mut state);
                shown = 0;
                println!("🔄 Starting a new interview.\n{}\n", ui::status_badge(&state));
                greet(&orchestrator, &mut state, &mut shown).await;
            }
            InputLine::Command(Command::End) => {
                end_interview(&mut state);
                println!("{}\n{}", ui::status_badge(&state), ui::ENDED_NOTICE);
            }
            InputLine::Command(Command::Delete) => {
                state = delete_session_data(state);
                shown = 0;
                println!("🧽 All data from this session has been deleted.\n");
                greet(&orchestrator, &mut state, &mut shown).await;
            }
            InputLine::Command(Command::Progress) => {
                println!("{}", ui::format_progress(&state.progress));
            }
            InputLine::Command(Command::Status) => {
                println!(
                    "{}",
                    ui::format_status(
                        &state,
                        config.backend.model.as_str(),
                        &config.backend.base_url
                    )
                );
            }
            InputLine::Command(Command::Privacy) => println!("{}", ui::privacy_notice()),
            InputLine::Command(Command::Help) => println!("{}", handle_help()),
            InputLine::Unknown(name) => {
                println!("Unknown command {name}. Type /help for the list.");
            }
            InputLine::Chat(text) => {
                if state.is_ended() {
                    println!("{}", ui::ENDED_NOTICE);
                    continue;
                }
                if !state.is_initialized() {
                    greet(&orchestrator, &mut state, &mut shown).await;
                    if !state.is_initialized() {
                        continue;
                    }
                }

                eprintln!("Thinking...");
                let result = orchestrator.submit(&mut state, &text).await;
                shown = render_new(&state, shown);
                if let Err(e) = result {
                    println!("{}\n", ui::format_turn_error(&e));
                }
                if state.is_ended() {
                    println!("{}\n{}", ui::status_badge(&state), ui::ENDED_NOTICE);
                }
            }
        }
    }

    info!(session_id = %state.session_id(), "leaving interview");
    Ok(())
}

/// Deliver the greeting; on failure the next chat line retries.
async fn greet(orchestrator: &TurnOrchestrator, state: &mut SessionState, shown: &mut usize) {
    eprintln!("TalentScout is preparing...");
    match orchestrator.initialize(state).await {
        Ok(()) => *shown = render_new(state, *shown),
        Err(e) => println!("{}\n", ui::format_connection_error(&e)),
    }
}

/// Print assistant lines added since `shown`; the candidate's own lines are
/// already on screen. Returns the new watermark.
fn render_new(state: &SessionState, shown: usize) -> usize {
    for message in state
        .display()
        .iter()
        .skip(shown)
        .filter(|m| m.role == DisplayRole::Assistant)
    {
        println!("{}\n", ui::format_message(message));
    }
    state.display().len()
}
