use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialer_core::{BulkDispatchOutcome, DispatchMode};
use dispatcher::Dispatcher;
use gateway::config::{API_KEY_VAR, PHONE_NUMBER_ID_VAR};
use gateway::{CallGateway, GatewaySettings};
use server::config::{DialerConfig, CONFIG_FILE};
use server::{create_router, state::AppState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_APP_DIR: &str = "web";

#[derive(Parser)]
#[command(name = "dialer")]
#[command(about = "Trigger outbound voice-AI calls, one at a time or in bulk", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default dialer.toml into the current directory
    Init,
    /// Start the dashboard and API server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with the dashboard's static files
        #[arg(long)]
        app_dir: Option<PathBuf>,

        #[arg(long)]
        gateway_url: Option<String>,

        /// Open the dashboard in a browser once listening
        #[arg(long)]
        open: bool,
    },
    /// List assistants configured on the gateway
    Assistants {
        #[arg(long)]
        gateway_url: Option<String>,
    },
    /// Place calls from the terminal
    Call {
        #[arg(short, long)]
        assistant: String,

        /// Destination number; repeat for several
        #[arg(short = 'n', long = "number")]
        numbers: Vec<String>,

        /// File with one destination number per line
        #[arg(long)]
        numbers_file: Option<PathBuf>,

        /// Milliseconds between calls, or between scheduled slots
        #[arg(long)]
        delay: Option<u64>,

        /// Let the gateway originate calls at staggered times instead of waiting locally
        #[arg(long)]
        schedule: bool,

        /// ISO-8601 time of the first scheduled slot (default: now)
        #[arg(long, requires = "schedule")]
        schedule_from: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        #[arg(long)]
        gateway_url: Option<String>,
    },
    /// Show which settings are in effect
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    let cwd = std::env::current_dir()?;

    match cli.command {
        Some(Commands::Init) => init_config(&cwd).await,
        Some(Commands::Serve {
            port,
            app_dir,
            gateway_url,
            open,
        }) => serve(&cwd, port, app_dir, gateway_url, open).await,
        Some(Commands::Assistants { gateway_url }) => list_assistants(&cwd, gateway_url).await,
        Some(Commands::Call {
            assistant,
            numbers,
            numbers_file,
            delay,
            schedule,
            schedule_from,
            json,
            gateway_url,
        }) => {
            init_tracing();
            let numbers = collect_numbers(numbers, numbers_file.as_deref()).await?;
            let config = DialerConfig::read(&cwd).await;
            let mode = DispatchMode::from_options(
                Some(delay.unwrap_or(config.gateway.default_delay_ms)),
                schedule,
                schedule_from.as_deref(),
            )?;
            place_calls(&config, gateway_url, &assistant, &numbers, mode, json).await
        }
        Some(Commands::Status) => status(&cwd).await,
        None => serve(&cwd, None, None, None, false).await,
    }
}

async fn init_config(cwd: &Path) -> Result<()> {
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    DialerConfig::default()
        .write(cwd)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!();
    println!("Set credentials in the environment (or a .env file):");
    println!("  {}=<your private API key>", API_KEY_VAR);
    println!("  {}=<id of the number to call from>", PHONE_NUMBER_ID_VAR);

    Ok(())
}

async fn serve(
    cwd: &Path,
    port: Option<u16>,
    app_dir: Option<PathBuf>,
    gateway_url: Option<String>,
    open_browser: bool,
) -> Result<()> {
    init_tracing();

    let config = DialerConfig::read(cwd).await;
    let settings = gateway_settings(&config, gateway_url);
    let port = port.unwrap_or(config.server.port);

    let app_dir = app_dir.or(config.server.app_dir.clone()).or_else(|| {
        let default_dir = cwd.join(DEFAULT_APP_DIR);
        default_dir.join("index.html").exists().then_some(default_dir)
    });

    tracing::info!("Gateway URL: {}", settings.base_url);
    if settings.phone_number_id.is_none() {
        tracing::warn!(
            "{} not set, call requests will be refused",
            PHONE_NUMBER_ID_VAR
        );
    }

    let mut state = AppState::new(&settings).with_default_delay(config.gateway.default_delay_ms);
    if let Some(app_dir) = &app_dir {
        tracing::info!("Serving dashboard from {}", app_dir.display());
        state = state.with_app_dir(app_dir.clone());
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    let url = format!("http://localhost:{}", port);
    println!();
    println!("Dialer");
    println!("════════════════════════════════════════");
    println!();
    if app_dir.is_some() {
        println!("  Dashboard:   {}", url);
    }
    println!("  API Server:  {}/api", url);
    println!("  Swagger UI:  {}/swagger-ui", url);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    if open_browser {
        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        });
    }

    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_assistants(cwd: &Path, gateway_url: Option<String>) -> Result<()> {
    init_tracing();

    let config = DialerConfig::read(cwd).await;
    let client = gateway_settings(&config, gateway_url).client();

    let assistants = client
        .list_assistants()
        .await
        .context("Failed to fetch assistants")?;

    if assistants.is_empty() {
        println!("No assistants configured.");
        return Ok(());
    }

    println!("Assistants ({}):", assistants.len());
    for assistant in &assistants {
        println!("  {}  {}", assistant.id.dimmed(), assistant.display_label());
    }

    Ok(())
}

async fn place_calls(
    config: &DialerConfig,
    gateway_url: Option<String>,
    assistant_id: &str,
    numbers: &[String],
    mode: DispatchMode,
    as_json: bool,
) -> Result<()> {
    let settings = gateway_settings(config, gateway_url);
    let dispatcher = Dispatcher::new(
        Arc::new(settings.client()),
        settings.phone_number_id.clone(),
    );

    let outcome = dispatcher.dispatch(assistant_id, numbers, mode).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_outcome(outcome: &BulkDispatchOutcome) {
    println!();
    for result in &outcome.results {
        match (&result.call_id, &result.error_message) {
            (Some(call_id), _) => {
                let status = result.status.map(|s| s.as_str()).unwrap_or("unknown");
                let when = result
                    .scheduled_for
                    .map(|at| format!(" at {}", at.to_rfc3339()))
                    .unwrap_or_default();
                println!(
                    "  {} {}  {} ({}{})",
                    "✓".green(),
                    result.destination_number,
                    call_id,
                    status,
                    when
                );
            }
            (None, error) => {
                println!(
                    "  {} {}  {}",
                    "✗".red(),
                    result.destination_number,
                    error.as_deref().unwrap_or("unknown error").red()
                );
            }
        }
    }

    println!();
    print!(
        "Total: {}, Success: {}, Failed: {}",
        outcome.total_calls,
        outcome.successful_calls.to_string().green(),
        outcome.failed_calls.to_string().red()
    );
    if let Some(scheduled) = outcome.scheduled_calls {
        print!(", Scheduled: {}", scheduled);
    }
    println!();
}

async fn status(cwd: &Path) -> Result<()> {
    let config_path = cwd.join(CONFIG_FILE);
    let config = DialerConfig::read(cwd).await;
    let settings = gateway_settings(&config, None);

    let flag = |set: bool| if set { "set".green() } else { "missing".red() };

    println!();
    if config_path.exists() {
        println!("Config:       {}", config_path.display());
    } else {
        println!("Config:       defaults (no {})", CONFIG_FILE);
    }
    println!("Port:         {}", config.server.port);
    println!("Delay:        {}ms", config.gateway.default_delay_ms);
    println!("Gateway:      {}", settings.base_url);
    println!("{:<13} {}", format!("{}:", API_KEY_VAR), flag(settings.api_key.is_some()));
    println!(
        "{:<13} {}",
        format!("{}:", PHONE_NUMBER_ID_VAR),
        flag(settings.phone_number_id.is_some())
    );
    println!();

    Ok(())
}

/// Environment credentials, with the gateway URL taken from (in order) the
/// command line, `VAPI_BASE_URL`, then `dialer.toml`.
fn gateway_settings(config: &DialerConfig, gateway_url: Option<String>) -> GatewaySettings {
    let mut settings = GatewaySettings::from_env_or(config.gateway.base_url.as_deref());

    if let Some(base_url) = gateway_url {
        settings = settings.with_base_url(base_url);
    }

    settings
}

async fn collect_numbers(
    mut numbers: Vec<String>,
    numbers_file: Option<&Path>,
) -> Result<Vec<String>> {
    if let Some(path) = numbers_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        numbers.extend(content.lines().map(str::to_string));
    }

    if numbers.iter().all(|n| n.trim().is_empty()) {
        bail!("Please enter at least one phone number (--number or --numbers-file)");
    }

    Ok(numbers)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dialer=info,server=info,dispatcher=info,gateway=info,tower_http=info".into()
            }),
        )
        .init();
}
