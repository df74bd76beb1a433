use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nexa_application::{NexaApp, SharedRandom};
use nexa_core::matching::RngSource;
use nexa_infrastructure::{ConfigService, NexaPaths};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;

#[derive(Parser)]
#[command(name = "nexa")]
#[command(about = "Nexa CLI - browse, match and chat on a local-first profile deck", long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep config and state under this directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for reproducible demo matches
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file if none exists
    Init,
    /// Show account, deck and match summary
    Status {
        /// Print the whole state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current candidate
    Next,
    /// Decide on the current candidate
    Decide {
        decision: DecisionArg,
        /// Decide on this profile instead of the current candidate
        #[arg(long)]
        profile: Option<String>,
    },
    /// List profiles passing the filters, decided ones included
    Explore,
    /// Manage deck filters
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },
    /// List conversations, most recent first
    Matches,
    /// Select a conversation
    Select { match_id: String },
    /// Send a message to the selected match
    Send {
        text: String,
        /// Send to this match instead of the selected one
        #[arg(long)]
        to: Option<String>,
    },
    /// Show a conversation thread
    Thread {
        /// Defaults to the selected match
        match_id: Option<String>,
    },
    /// View or edit your own profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Apply a sign-in result from an identity provider
    SignIn {
        identity: String,
        #[arg(long, default_value = "email")]
        provider: String,
    },
    /// Sign out and return to pending
    SignOut,
    /// Approve the application
    Approve,
    /// Set the application status explicitly
    SetStatus { status: StatusArg },
    /// Switch demo mode on or off
    Demo { mode: Toggle },
    /// Restart the demo with fresh data
    Seed,
    /// Reset part or all of the state
    Reset { target: ResetTarget },
}

#[derive(Subcommand)]
enum FilterAction {
    /// Filter one axis by value ("All" clears it)
    Set { axis: AxisArg, value: String },
    /// Clear both filters
    Clear,
    /// List the values available for an axis
    Options { axis: AxisArg },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show your profile
    Show,
    /// Replace profile fields
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        headline: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        sector: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    AddTag { tag: String },
    RemoveTag { tag: String },
    AddPhoto { url: String },
    /// Remove the photo at a zero-based position
    RemovePhoto { index: usize },
    /// Update visibility switches
    Privacy {
        #[arg(long)]
        public: Option<bool>,
        #[arg(long)]
        visible_by_city: Option<bool>,
        #[arg(long)]
        visible_by_sector: Option<bool>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DecisionArg {
    Pass,
    Like,
    Superlike,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    City,
    Sector,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Approved,
    Denied,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResetTarget {
    Deck,
    Matches,
    Factory,
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = NexaPaths::new(cli.data_dir.clone());
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => paths.config_file()?,
    };
    let config_service = ConfigService::new(config_path);
    let mut config = config_service.get_config();
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    init_tracing(&config.logging.level);
    tracing::debug!("[Main] Config file: {:?}", config_service.path());

    if let Commands::Init = cli.command {
        return commands::settings::init(&config_service);
    }

    let rng: SharedRandom = match cli.seed {
        Some(seed) => Arc::new(Mutex::new(RngSource::seeded(seed))),
        None => Arc::new(Mutex::new(RngSource::from_entropy())),
    };
    let app = NexaApp::bootstrap_with(&config, &paths, rng).context("failed to open state")?;

    let result = run(&app, cli.command).await;
    app.shutdown().await.context("failed to save state")?;
    result
}

async fn run(app: &NexaApp, command: Commands) -> Result<()> {
    use commands::{account, chat, deck, profile, settings};
    use nexa_core::deck::FilterAxis;
    use nexa_core::matching::Decision;
    use nexa_core::state::UserStatus;

    let axis = |arg: AxisArg| match arg {
        AxisArg::City => FilterAxis::City,
        AxisArg::Sector => FilterAxis::Sector,
    };

    match command {
        // Handled before the state is opened
        Commands::Init => {}
        Commands::Status { json } => settings::status(app, json)?,
        Commands::Next => deck::next(app),
        Commands::Decide { decision, profile } => {
            let decision = match decision {
                DecisionArg::Pass => Decision::Pass,
                DecisionArg::Like => Decision::Like,
                DecisionArg::Superlike => Decision::Superlike,
            };
            deck::decide(app, decision, profile.as_deref())?
        }
        Commands::Explore => deck::explore(app),
        Commands::Filter { action } => match action {
            FilterAction::Set { axis: a, value } => deck::set_filter(app, axis(a), &value)?,
            FilterAction::Clear => deck::clear_filters(app),
            FilterAction::Options { axis: a } => deck::filter_options(app, axis(a)),
        },
        Commands::Matches => chat::matches(app),
        Commands::Select { match_id } => chat::select(app, &match_id)?,
        Commands::Send { text, to } => chat::send(app, &text, to.as_deref())?,
        Commands::Thread { match_id } => chat::thread(app, match_id.as_deref())?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => profile::show(app),
            ProfileAction::Edit {
                name,
                headline,
                city,
                sector,
                bio,
            } => profile::edit(
                app,
                profile::FieldEdits {
                    name,
                    headline,
                    city,
                    sector,
                    bio,
                },
            )?,
            ProfileAction::AddTag { tag } => profile::add_tag(app, &tag)?,
            ProfileAction::RemoveTag { tag } => profile::remove_tag(app, &tag),
            ProfileAction::AddPhoto { url } => profile::add_photo(app, &url)?,
            ProfileAction::RemovePhoto { index } => profile::remove_photo(app, index)?,
            ProfileAction::Privacy {
                public,
                visible_by_city,
                visible_by_sector,
            } => profile::privacy(app, public, visible_by_city, visible_by_sector),
        },
        Commands::SignIn { identity, provider } => account::sign_in(app, &provider, &identity),
        Commands::SignOut => account::sign_out(app),
        Commands::Approve => account::set_status(app, UserStatus::Approved),
        Commands::SetStatus { status } => account::set_status(
            app,
            match status {
                StatusArg::Pending => UserStatus::Pending,
                StatusArg::Approved => UserStatus::Approved,
                StatusArg::Denied => UserStatus::Denied,
            },
        ),
        Commands::Demo { mode } => settings::demo(app, matches!(mode, Toggle::On)),
        Commands::Seed => settings::seed(app),
        Commands::Reset { target } => match target {
            ResetTarget::Deck => settings::reset_deck(app),
            ResetTarget::Matches => settings::reset_matches(app),
            ResetTarget::Factory => settings::factory_reset(app).await?,
        },
    }

    Ok(())
}
