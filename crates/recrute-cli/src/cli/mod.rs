//! CLI entry and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use recrute_core::api::ApiClient;
use recrute_core::config;
use recrute_core::storage::FileStore;
use recrute_core::types::{
    CandidateFilter, CandidateProfileUpdate, CandidatureStatus, OfferStatus, Role,
};
use recrute_core::SessionManager;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "RECRUTE_LOG";

#[derive(Parser)]
#[command(name = "recrute")]
#[command(version)]
#[command(about = "Terminal client for the AI recruitment platform")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RECRUTE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account, then log in with it
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RECRUTE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Account role (candidat or recruteur)
        #[arg(long)]
        role: Role,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the current session
    Whoami,

    /// Browse and publish job offers
    Offers {
        #[command(subcommand)]
        command: OfferCommands,
    },
    /// Manage your CVs (candidates)
    Cvs {
        #[command(subcommand)]
        command: CvCommands,
    },
    /// Apply to an offer with one of your CVs
    Apply {
        #[arg(long, value_name = "OFFER_ID")]
        offer: String,
        #[arg(long, value_name = "CV_ID")]
        cv: String,
    },
    /// Follow applications
    Candidatures {
        #[command(subcommand)]
        command: CandidatureCommands,
    },
    /// Score CVs against offers
    Matching {
        #[command(subcommand)]
        command: MatchingCommands,
    },
    /// Read notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Show or edit your candidate profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Recruiter dashboard: statistics, top candidates, latest applications
    Dashboard {
        #[command(subcommand)]
        command: Option<DashboardCommands>,

        /// Rows shown in the top and latest lists
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum OfferCommands {
    /// Lists offers
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Offers per page (default: offers.page_size from config)
        #[arg(long)]
        limit: Option<u32>,
        /// ouverte or fermee
        #[arg(long)]
        status: Option<OfferStatus>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Lists offers you published (recruiters)
    Mine {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Shows one offer
    Show {
        #[arg(value_name = "OFFER_ID")]
        id: String,
    },
    /// Publishes an offer (recruiters)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "contract")]
        contract_type: Option<String>,
        #[arg(long)]
        salary_min: Option<f64>,
        #[arg(long)]
        salary_max: Option<f64>,
        /// Years of experience required
        #[arg(long)]
        experience: Option<u32>,
        /// Comma-separated required skills
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
enum CvCommands {
    /// Lists your CVs
    List,
    /// Uploads a PDF CV
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Shows one CV with its extracted structure
    Show {
        #[arg(value_name = "CV_ID")]
        id: String,
    },
    /// Deletes a CV
    Delete {
        #[arg(value_name = "CV_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum CandidatureCommands {
    /// Lists applications (yours, or those received for an offer)
    List {
        #[arg(long, value_name = "OFFER_ID")]
        offer: Option<String>,
    },
    /// Shows one application
    Show {
        #[arg(value_name = "CANDIDATURE_ID")]
        id: String,
    },
    /// Updates the status of an application (recruiters)
    Status {
        #[arg(value_name = "CANDIDATURE_ID")]
        id: String,
        /// pending, interview, accepted or rejected
        #[arg(value_name = "STATUS")]
        status: CandidatureStatus,
    },
}

#[derive(clap::Subcommand)]
enum MatchingCommands {
    /// Scores one CV against one offer
    Score {
        #[arg(long)]
        cv: String,
        #[arg(long)]
        offer: String,
        /// Ask for a written explanation
        #[arg(long)]
        explain: bool,
    },
    /// Best offers for one of your CVs (candidates)
    Offers {
        #[arg(long)]
        cv: String,
        #[arg(long, default_value_t = 10)]
        top: u32,
    },
    /// Best candidates for one of your offers (recruiters)
    Candidates {
        #[arg(long)]
        offer: String,
        #[arg(long, default_value_t = 10)]
        top: u32,
    },
}

#[derive(clap::Subcommand)]
enum NotificationCommands {
    /// Lists notifications
    List,
    /// Marks a notification as read
    Read {
        #[arg(value_name = "NOTIFICATION_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ProfileCommands {
    /// Shows your profile
    Show,
    /// Updates the given fields only
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum DashboardCommands {
    /// Lists every application received, with optional filters
    Candidates {
        #[arg(long, value_name = "OFFER_ID")]
        offer: Option<String>,
        /// pending, interview, accepted or rejected
        #[arg(long)]
        status: Option<CandidatureStatus>,
        #[arg(long)]
        min_score: Option<f64>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open_session(config: &config::Config) -> Result<SessionManager> {
    let api = ApiClient::with_timeout(config.effective_api_url()?, config.request_timeout())
        .context("build HTTP client")?;
    let store = FileStore::open_default();
    debug!(api = %api.base_url(), session = %store.path().display(), "opening session");
    Ok(SessionManager::new(api, Arc::new(store)))
}

async fn dispatch(cli: Cli) -> Result<()> {
    // config commands must work even with a broken config file
    let command = match cli.command {
        Commands::Config { command } => return run_config(command),
        other => other,
    };

    let config = config::Config::load().context("load config")?;
    let session = open_session(&config)?;
    let page_size = config.offers.page_size;

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&session, &email, &password).await
        }
        Commands::Register {
            email,
            password,
            role,
            name,
        } => commands::auth::register(&session, email, password, role, name).await,
        Commands::Logout => commands::auth::logout(&session),
        Commands::Whoami => commands::auth::whoami(&session).await,

        Commands::Offers { command } => match command {
            OfferCommands::List {
                page,
                limit,
                status,
                location,
            } => {
                let limit = limit.unwrap_or(page_size);
                commands::offers::list(&session, page, limit, status, location).await
            }
            OfferCommands::Mine { page, limit } => {
                commands::offers::mine(&session, page, limit.unwrap_or(page_size)).await
            }
            OfferCommands::Show { id } => commands::offers::show(&session, &id).await,
            OfferCommands::Create {
                title,
                description,
                location,
                contract_type,
                salary_min,
                salary_max,
                experience,
                skills,
            } => {
                let offer = recrute_core::types::NewJobOffer {
                    title,
                    description,
                    location,
                    contract_type,
                    salary_min,
                    salary_max,
                    experience_required: experience,
                    required_skills: skills,
                };
                commands::offers::create(&session, &offer).await
            }
        },

        Commands::Cvs { command } => match command {
            CvCommands::List => commands::cvs::list(&session).await,
            CvCommands::Upload { file } => commands::cvs::upload(&session, &file).await,
            CvCommands::Show { id } => commands::cvs::show(&session, &id).await,
            CvCommands::Delete { id } => commands::cvs::delete(&session, &id).await,
        },

        Commands::Apply { offer, cv } => commands::candidatures::apply(&session, &offer, &cv).await,

        Commands::Candidatures { command } => match command {
            CandidatureCommands::List { offer } => {
                commands::candidatures::list(&session, offer.as_deref()).await
            }
            CandidatureCommands::Show { id } => commands::candidatures::show(&session, &id).await,
            CandidatureCommands::Status { id, status } => {
                commands::candidatures::set_status(&session, &id, status).await
            }
        },

        Commands::Matching { command } => match command {
            MatchingCommands::Score { cv, offer, explain } => {
                commands::matching::score(&session, &cv, &offer, explain).await
            }
            MatchingCommands::Offers { cv, top } => {
                commands::matching::offers(&session, &cv, top).await
            }
            MatchingCommands::Candidates { offer, top } => {
                commands::matching::candidates(&session, &offer, top).await
            }
        },

        Commands::Notifications { command } => match command {
            NotificationCommands::List => commands::notifications::list(&session).await,
            NotificationCommands::Read { id } => commands::notifications::read(&session, &id).await,
        },

        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::profile::show(&session).await,
            ProfileCommands::Update {
                name,
                phone,
                location,
            } => {
                let update = CandidateProfileUpdate {
                    name,
                    phone,
                    location,
                };
                commands::profile::update(&session, &update).await
            }
        },

        Commands::Dashboard { command, limit } => match command {
            None => commands::dashboard::overview(&session, limit).await,
            Some(DashboardCommands::Candidates {
                offer,
                status,
                min_score,
            }) => {
                let filter = CandidateFilter {
                    offer_id: offer,
                    status,
                    min_score,
                };
                commands::dashboard::candidates(&session, &filter).await
            }
        },

        Commands::Config { command } => run_config(command),
    }
}

fn run_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
    }
}
