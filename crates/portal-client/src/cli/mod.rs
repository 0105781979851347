// crates/portal-client/src/cli/mod.rs
// CLI module for portal commands

use crate::client::ResourceClient;
use crate::config::{BackendFlavor, EnvConfig, Overrides, PortalConfig, Settings};
use crate::error::PortalError;
use crate::http::create_shared_client;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

pub mod admin;
pub mod browse;
pub mod haiku;
pub mod setup;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Browse the language portal and haiku service from the terminal")]
#[command(version)]
pub struct Cli {
    /// Portal API base URL (overrides PORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Haiku service base URL (overrides HAIKU_API_URL)
    #[arg(long, global = true)]
    pub haiku_url: Option<String>,

    /// Bearer token (overrides PORTAL_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Backend flavour: python or aws (overrides PORTAL_BACKEND)
    #[arg(long, global = true)]
    pub backend: Option<BackendFlavor>,

    /// Config file (default: ~/.portal/config.toml)
    #[arg(long, global = true, env = "PORTAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Vocabulary words
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },

    /// Word groups
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },

    /// Study sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },

    /// Study activities
    Activities {
        #[command(subcommand)]
        action: ActivitiesAction,
    },

    /// Quick stats, progress and the last study session
    Dashboard,

    /// Settings-page admin actions
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Haiku generator
    Haiku {
        #[command(subcommand)]
        action: HaikuAction,
    },

    /// Configuration status
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum WordsAction {
    /// List one page of words
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one word with its stats and groups
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum GroupsAction {
    /// List one page of groups
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show a group with its words and study sessions
    Show {
        id: i64,
        #[arg(long, default_value_t = 1)]
        words_page: u32,
        #[arg(long, default_value_t = 1)]
        sessions_page: u32,
    },
}

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List one page of study sessions
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show a study session and the words reviewed in it
    Show {
        id: i64,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Record a review for one word
    #[command(group(ArgGroup::new("answer").required(true).args(["correct", "wrong"])))]
    Review {
        session: i64,
        word: i64,
        #[arg(long)]
        correct: bool,
        #[arg(long)]
        wrong: bool,
    },
}

#[derive(Subcommand)]
pub enum ActivitiesAction {
    /// Activities and the most recent sessions
    List,
    /// Start a study session for a group
    Launch {
        activity: i64,
        #[arg(short, long)]
        group: i64,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Endpoints offered by the configured backend
    Endpoints,
    /// Call a reset/seed endpoint; destructive ones need --yes
    Reset {
        /// e.g. reset_history, full_reset, load_initial_data
        endpoint: String,
        /// Confirm a destructive action
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HaikuAction {
    /// List all haikus
    List,
    /// Show a haiku with its chat transcript
    Show { id: String },
    /// Allocate an id for a new haiku
    New,
    /// Send a chat message about a haiku
    Chat { id: String, message: String },
    /// Generate images and audio for a haiku
    Media { id: String },
    /// Delete a haiku and its chat history
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the resolved configuration and print a report
    Check,
}

/// Resolved settings plus one client per backend, sharing a connection pool
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    pub portal: ResourceClient,
    pub haiku: ResourceClient,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        let http = create_shared_client();
        Self {
            portal: settings.portal_client(http.clone()),
            haiku: settings.haiku_client(http),
            settings,
        }
    }

    /// CLI flags over environment over config file
    pub fn from_cli(cli: &Cli) -> Self {
        let overrides = Overrides {
            api_url: cli.api_url.clone(),
            haiku_url: cli.haiku_url.clone(),
            token: cli.token.clone(),
            backend: cli.backend,
        };
        let env = EnvConfig::load();
        let file = match &cli.config {
            Some(path) => PortalConfig::load_from(path),
            None => PortalConfig::load(),
        };
        Self::new(Settings::resolve(&overrides, &env, &file))
    }
}

/// Run a parsed command and return what it prints
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let ctx = Context::from_cli(&cli);
    match cli.command {
        Commands::Words { action } => match action {
            WordsAction::List { page } => browse::words_list(&ctx, page).await,
            WordsAction::Show { id } => browse::word_show(&ctx, id).await,
        },
        Commands::Groups { action } => match action {
            GroupsAction::List { page } => browse::groups_list(&ctx, page).await,
            GroupsAction::Show {
                id,
                words_page,
                sessions_page,
            } => browse::group_show(&ctx, id, words_page, sessions_page).await,
        },
        Commands::Sessions { action } => match action {
            SessionsAction::List { page } => browse::sessions_list(&ctx, page).await,
            SessionsAction::Show { id, page } => browse::session_show(&ctx, id, page).await,
            SessionsAction::Review {
                session,
                word,
                correct,
                wrong: _,
            } => browse::session_review(&ctx, session, word, correct).await,
        },
        Commands::Activities { action } => match action {
            ActivitiesAction::List => browse::activities_list(&ctx).await,
            ActivitiesAction::Launch { activity, group } => {
                browse::activity_launch(&ctx, activity, group).await
            }
        },
        Commands::Dashboard => browse::dashboard(&ctx).await,
        Commands::Admin { action } => match action {
            AdminAction::Endpoints => Ok(admin::endpoints(&ctx)),
            AdminAction::Reset { endpoint, yes } => admin::reset(&ctx, &endpoint, yes).await,
        },
        Commands::Haiku { action } => match action {
            HaikuAction::List => haiku::list(&ctx).await,
            HaikuAction::Show { id } => haiku::show(&ctx, &id).await,
            HaikuAction::New => Ok(haiku::new()),
            HaikuAction::Chat { id, message } => haiku::chat(&ctx, &id, &message).await,
            HaikuAction::Media { id } => haiku::media(&ctx, &id).await,
            HaikuAction::Delete { id } => haiku::delete(&ctx, &id).await,
        },
        Commands::Config { action } => match action {
            ConfigAction::Check => Ok(setup::check(&ctx, &cli.config)),
        },
    }
}

const AUTH_HINT: &str =
    "The backend rejected the request. Sign in again and update PORTAL_TOKEN (or --token).";

/// Hint printed when a command failed because the backend refused the token
pub fn auth_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<PortalError>()
        .is_some_and(PortalError::is_auth)
        .then_some(AUTH_HINT)
}
