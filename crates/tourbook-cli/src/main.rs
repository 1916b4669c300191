//! `tourbook` command line client
//!
//! Browses destinations, submits booking requests and contact messages, and
//! drives the operator dashboard of a running booking backend.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

mod output;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use output::Output;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::signal;
use tourbook_client::dashboard::LOGIN_FAILED;
use tourbook_client::{
    AdminDashboard, AdminSession, ApiClient, BookingFormController, CancellationToken,
    ContactFormController, DashboardError, DashboardSettings, DestinationCatalog, PublicApi,
};
use tourbook_core::Config;
use tourbook_protocol::{BookingForm, ContactForm, DestinationOption};
use tourbook_types::{BookingId, Credentials, StatusAction, StatusFilter};
use tracing::{debug, info, warn};

/// Command line interface for the tour booking backend
#[derive(Parser)]
#[command(
    name = "tourbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse tours, request bookings and manage them as an operator"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. `http://localhost:5000/api`
    #[arg(long, env = "TOURBOOK_API_URL", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// List destinations
    Destinations {
        /// Only featured destinations
        #[arg(long)]
        featured: bool,
    },

    /// Show one destination
    Destination {
        /// Destination slug
        #[arg(value_name = "SLUG")]
        slug: String,
    },

    /// Request a booking
    Book {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Destination slug
        #[arg(long, default_value = "")]
        destination: String,

        /// Preferred date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        date: String,

        /// Number of guests
        #[arg(long, default_value = "1")]
        guests: String,

        /// Message for the operator
        #[arg(long, default_value = "")]
        message: String,
    },

    /// Send a message to the operator
    Contact {
        /// Your name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Subject line
        #[arg(long, default_value = "")]
        subject: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Check backend health
    Health,

    /// Sign in as an operator
    Login {
        /// Operator username
        #[arg(short, long)]
        username: String,

        /// Password; prompted for when omitted
        #[arg(long, env = "TOURBOOK_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// List bookings
    Bookings {
        /// Status filter (all, pending, confirmed, completed, cancelled)
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show one booking
    Show {
        /// Booking id
        #[arg(value_name = "ID")]
        id: BookingId,
    },

    /// Change a booking's status
    Update {
        /// Booking id
        #[arg(value_name = "ID")]
        id: BookingId,

        /// Action to apply (confirm, complete, cancel)
        #[arg(short, long)]
        action: StatusAction,

        /// Quote to attach
        #[arg(long, value_name = "AMOUNT")]
        estimated_cost: Option<f64>,
    },

    /// Show dashboard statistics
    Stats,

    /// Validate configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let dotenv = dotenvy::dotenv();
    let config = load_config(&cli)?;

    if let Err(err) = tourbook_core::init_logging(&config.logging) {
        eprintln!("Note: logging not initialized: {err}");
    }
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, ".env not loaded"),
    }

    let output = Output::new(cli.json);
    if let Commands::Config { show } = cli.command {
        return show_config(&config, show, output);
    }

    let client = ApiClient::from_config(&config.api)?.with_cancellation(interrupt_token());
    info!(base_url = client.base_url(), "using backend");

    match cli.command {
        Commands::Destinations { featured } => list_destinations(client, featured, output).await,
        Commands::Destination { slug } => show_destination(client, &slug, output).await,
        Commands::Book {
            name,
            email,
            phone,
            destination,
            date,
            guests,
            message,
        } => {
            let form = BookingForm {
                name,
                email,
                phone,
                destination,
                date,
                guests,
                message,
            };
            submit_booking(client, form, output).await
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            submit_contact(client, form, output).await
        }
        Commands::Health => check_health(&client, output).await,
        Commands::Login { username, password } => {
            login(dashboard(client, &config), username, password, output).await
        }
        Commands::Logout => {
            dashboard(client, &config).logout();
            output.message("Signed out")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Bookings { status, page } => {
            list_bookings(dashboard(client, &config), status, page, output).await
        }
        Commands::Show { id } => show_booking(dashboard(client, &config), id, output).await,
        Commands::Update {
            id,
            action,
            estimated_cost,
        } => {
            update_booking(dashboard(client, &config), id, action, estimated_cost, output).await
        }
        Commands::Stats => show_stats(dashboard(client, &config), output).await,
        Commands::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// Load configuration and apply command line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    config.validate()?;
    Ok(config)
}

/// Token cancelled by Ctrl+C so an in-flight request stops promptly
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling request");
            on_interrupt.cancel();
        }
    });
    token
}

fn dashboard(client: ApiClient, config: &Config) -> AdminDashboard<ApiClient> {
    AdminDashboard::new(
        client,
        AdminSession::from_config(&config.session),
        DashboardSettings::from_config(config),
    )
}

/// Prefer the dashboard banner over the raw error
fn dashboard_failure(dashboard: &AdminDashboard<ApiClient>, err: DashboardError) -> anyhow::Error {
    dashboard
        .error()
        .map_or_else(|| err.into(), |banner| anyhow!("{banner}"))
}

fn require_signed_in(dashboard: &AdminDashboard<ApiClient>) -> Result<()> {
    if !dashboard.is_authenticated() {
        bail!("Not signed in. Run `tourbook login` first.");
    }
    Ok(())
}

fn show_config(config: &Config, show: bool, output: Output) -> Result<ExitCode> {
    if show {
        let rendered =
            toml::to_string_pretty(config).context("failed to serialize configuration")?;
        println!("{rendered}");
    } else {
        output.message("Configuration OK")?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn list_destinations(client: ApiClient, featured: bool, output: Output) -> Result<ExitCode> {
    let mut catalog = DestinationCatalog::new(client);
    catalog.load(featured).await;
    if let Some(notice) = catalog.notice() {
        eprintln!("{notice}");
    }
    output.destinations(catalog.destinations())?;
    Ok(ExitCode::SUCCESS)
}

async fn show_destination(client: ApiClient, slug: &str, output: Output) -> Result<ExitCode> {
    let catalog = DestinationCatalog::new(client);
    let destination = catalog.find(slug).await?;
    output.destination(&destination)?;
    Ok(ExitCode::SUCCESS)
}

async fn submit_booking(client: ApiClient, form: BookingForm, output: Output) -> Result<ExitCode> {
    let destination = form.destination.trim();
    if !destination.is_empty() && DestinationOption::find(destination).is_none() {
        warn!(destination, "destination is not one of the listed trips");
    }

    let mut controller = BookingFormController::new(client);
    controller.fill(form);
    let submitted = controller.submit(Local::now().date_naive()).await;
    output.form_result(
        controller.notice(),
        controller.errors(),
        controller.general_errors(),
    )?;

    Ok(if submitted.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn submit_contact(client: ApiClient, form: ContactForm, output: Output) -> Result<ExitCode> {
    let mut controller = ContactFormController::new(client);
    controller.fill(form);
    let sent = controller.submit().await;
    output.form_result(
        controller.notice(),
        controller.errors(),
        controller.general_errors(),
    )?;

    Ok(if sent.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn check_health(client: &ApiClient, output: Output) -> Result<ExitCode> {
    let health = client.health().await.map_err(|err| {
        if err.is_network() {
            anyhow!("Cannot connect to backend server. Please ensure it is running. ({err})")
        } else {
            err.into()
        }
    })?;
    output.health(&health)?;
    Ok(if health.is_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn login(
    mut dashboard: AdminDashboard<ApiClient>,
    username: String,
    password: Option<String>,
    output: Output,
) -> Result<ExitCode> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let credentials = Credentials::new(username, password);
    if dashboard.login(&credentials).await.is_err() {
        eprintln!("{}", dashboard.login_error().unwrap_or(LOGIN_FAILED));
        return Ok(ExitCode::FAILURE);
    }

    output.message(&format!("Signed in as {}", credentials.username))?;
    if let Some(banner) = dashboard.error() {
        eprintln!("{banner}");
    }
    Ok(ExitCode::SUCCESS)
}

async fn list_bookings(
    mut dashboard: AdminDashboard<ApiClient>,
    filter: StatusFilter,
    page: u32,
    output: Output,
) -> Result<ExitCode> {
    require_signed_in(&dashboard)?;
    let loaded = dashboard.open(filter, page).await;
    if let Err(err) = loaded {
        return Err(dashboard_failure(&dashboard, err));
    }
    output.bookings(dashboard.bookings(), dashboard.pagination())?;
    Ok(ExitCode::SUCCESS)
}

async fn show_booking(
    mut dashboard: AdminDashboard<ApiClient>,
    id: BookingId,
    output: Output,
) -> Result<ExitCode> {
    require_signed_in(&dashboard)?;
    let located = dashboard.locate(id).await.cloned();
    let booking = located.map_err(|err| dashboard_failure(&dashboard, err))?;
    output.booking(&booking)?;
    Ok(ExitCode::SUCCESS)
}

async fn update_booking(
    mut dashboard: AdminDashboard<ApiClient>,
    id: BookingId,
    action: StatusAction,
    estimated_cost: Option<f64>,
    output: Output,
) -> Result<ExitCode> {
    if estimated_cost.is_some_and(|cost| cost < 0.0) {
        bail!("Estimated cost cannot be negative");
    }
    require_signed_in(&dashboard)?;

    let located = dashboard.locate(id).await.map(|_| ());
    located.map_err(|err| dashboard_failure(&dashboard, err))?;

    let updated = dashboard.apply_action(id, action, estimated_cost).await;
    let booking = updated.map_err(|err| dashboard_failure(&dashboard, err))?;
    info!(id, status = %booking.status, "booking updated");
    output.booking(&booking)?;
    Ok(ExitCode::SUCCESS)
}

async fn show_stats(mut dashboard: AdminDashboard<ApiClient>, output: Output) -> Result<ExitCode> {
    require_signed_in(&dashboard)?;
    let loaded = dashboard.refresh().await;
    if let Err(err) = loaded {
        return Err(dashboard_failure(&dashboard, err));
    }
    let stats = dashboard
        .stats()
        .ok_or_else(|| anyhow!("Dashboard statistics are unavailable"))?;
    output.stats(stats)?;
    Ok(ExitCode::SUCCESS)
}
