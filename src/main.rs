//! AgentDesk CLI
//!
//! Terminal front end for the back-office API:
//! - Sign in and out (agent and admin)
//! - List, inspect and add customers and investments
//! - Bulk upload spreadsheets
//! - Show dashboard stats

use agentdesk::config::{generate_default_config, LoggingConfig};
use agentdesk::maturity::format_date;
use agentdesk::screens::customers::{load_customer_detail, load_customers, CustomerForm, EMPTY_PORTFOLIO};
use agentdesk::screens::dashboard::{agent_cards, load_dashboard, StatCard};
use agentdesk::screens::investments::{investment_rows, load_investment_list, InvestmentForm, InvestmentRow};
use agentdesk::screens::upload::{missing_columns, submit_upload, success_message};
use agentdesk::screens::{admin, auth, format_rupees};
use agentdesk::{
    resolve, Config, DeskApi, FailureAction, HttpClient, Identity, Loadable, Navigation, Route,
    SchemeType, SessionFile, SessionStore, UploadFile,
};
use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::cookie::Jar;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "agentdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Back-office client for financial agents")]
#[command(long_about = "AgentDesk manages customers and fixed-term investments (NSC, MIS, FD, KVP).\nSign in once with `agentdesk login`; the session is kept between commands.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in as an agent
    Login {
        /// Registered mobile number
        mobile: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in agent
    Whoami,

    /// Register a new agent
    Signup {
        /// Full name
        name: String,
        /// Mobile number
        mobile: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Verify the signup OTP (signs you in)
    Verify {
        mobile: String,
        otp: String,
    },

    /// Send the signup OTP again
    ResendOtp {
        mobile: Option<String>,
    },

    /// Show your dashboard
    Dashboard,

    /// Manage customers
    Customers {
        #[command(subcommand)]
        command: CustomerCommands,
    },

    /// Manage investments
    Investments {
        #[command(subcommand)]
        command: InvestmentCommands,
    },

    /// Bulk upload customers and investments from a spreadsheet
    Upload {
        /// Path to a .csv or .xlsx file
        file: PathBuf,
        /// Only check the CSV header, don't upload
        #[arg(long)]
        dry_run: bool,
    },

    /// Super-admin commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List your customers
    List,
    /// Show one customer and their investments
    Show { customer_id: String },
    /// Add a customer
    Add {
        /// Full name
        name: String,
        /// Mobile number
        mobile: String,
    },
}

#[derive(Subcommand)]
pub enum InvestmentCommands {
    /// List investments
    List {
        /// Only this customer's investments
        #[arg(long)]
        customer: Option<String>,
    },
    /// Record an investment
    Add {
        /// Customer id
        customer_id: String,
        /// Principal amount in rupees
        principal: String,
        /// Scheme: NSC, MIS, FD or KVP
        #[arg(short, long, default_value = "KVP")]
        scheme: SchemeType,
        /// Start date, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<String>,
        /// Maturity date, YYYY-MM-DD (default: derived from the scheme)
        #[arg(long)]
        maturity: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Sign in with the admin secret key
    Login {
        /// Secret key (prompted when omitted)
        #[arg(short, long)]
        secret: Option<String>,
    },
    /// Show system-wide stats
    Stats,
}

type Session = SessionStore<HttpClient>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;
    init_logging(&config.logging);

    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());
    let session_file = SessionFile::new(&config.session.cookie_file);

    let jar = Arc::new(Jar::default());
    if let Err(e) = session_file.restore(&jar, &base_url) {
        tracing::warn!("Ignoring saved session: {}", e);
    }
    let client = HttpClient::with_jar(base_url.as_str(), jar)?;
    let session = SessionStore::new(client);

    let logging_out = matches!(cli.command, Commands::Logout);
    let uses_session = !matches!(cli.command, Commands::Config { .. });
    let result = run(cli.command, &session, cli.format).await;
    let expired = matches!(&result, Err(e) if e.is::<SessionExpired>());

    let persisted = if logging_out || expired {
        session_file.clear()
    } else if uses_session {
        session_file.save(session.api().jar(), &base_url)
    } else {
        Ok(())
    };
    if let Err(e) = persisted {
        tracing::warn!("Failed to update session file: {}", e);
    }
    result
}

/// The server rejected the saved session
#[derive(Debug, thiserror::Error)]
#[error("Session expired. Run `{hint}` to sign in again.")]
struct SessionExpired {
    hint: &'static str,
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agentdesk={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(
    command: Commands,
    session: &Session,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::Login { mobile, password } => {
            let password = secret_or_prompt(password, "Password")?;
            let outcome = session.login(&mobile, &password).await;
            if !outcome.success {
                bail!(outcome.message.unwrap_or_default());
            }
            let name = session.user().map(|u| u.name().to_string()).unwrap_or_default();
            println!("Logged in as {}", name);
        }

        Commands::Logout => {
            session.logout().await;
            println!("Logged out");
        }

        Commands::Whoami => {
            let user = require_session(session, Route::Dashboard).await?;
            match format {
                OutputFormat::Json => print_json(&user.profile())?,
                OutputFormat::Table => print_identity(&user),
            }
        }

        Commands::Signup {
            name,
            mobile,
            password,
        } => {
            let password = secret_or_prompt(password, "Password")?;
            let outcome = session.signup(&name, &mobile, &password).await;
            if !outcome.success {
                bail!(auth::outcome_error(outcome));
            }
            if let Some(message) = outcome.message {
                println!("{}", message);
            }
            let next = auth::next_route(&Route::Signup, &mobile);
            println!("Next: agentdesk verify {} <otp>  ({})", mobile, next.path());
        }

        Commands::Verify { mobile, otp } => {
            let outcome = session.verify(&mobile, &otp).await;
            if !outcome.success {
                bail!(auth::outcome_error(outcome));
            }
            println!(
                "{}",
                outcome.message.as_deref().unwrap_or("Verification successful.")
            );
            if let Some(user) = session.user() {
                println!("Logged in as {}", user.name());
            }
        }

        Commands::ResendOtp { mobile } => {
            let mobile = mobile.unwrap_or_default();
            match auth::resend(session, &mobile).await {
                Ok(status) => println!("{}", status.label()),
                Err((status, err)) => {
                    if !status.label().is_empty() {
                        eprintln!("{}", status.label());
                    }
                    bail!(err);
                }
            }
        }

        Commands::Dashboard => {
            let user = require_session(session, Route::Dashboard).await?;
            let stats = load_dashboard(session.api()).await;
            let stats = match stats {
                Ok(stats) => Some(stats),
                Err(action) => {
                    handle_failure(action)?;
                    None
                }
            };
            match format {
                OutputFormat::Json => print_json(&stats)?,
                OutputFormat::Table => {
                    print_identity(&user);
                    println!();
                    print_cards(&agent_cards(stats.as_ref()));
                }
            }
        }

        Commands::Customers { command } => {
            run_customers(command, session, format).await?;
        }

        Commands::Investments { command } => {
            run_investments(command, session, format).await?;
        }

        Commands::Upload { file, dry_run } => {
            if dry_run {
                return check_upload_header(&file);
            }
            require_session(session, Route::Upload).await?;

            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("File not found: {:?}", file))?;
            let upload = UploadFile::new(file_name(&file), bytes);
            let summary = submit_upload(session.api(), Some(upload)).await?;
            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Table => println!("{}", success_message(&summary)),
            }
        }

        Commands::Admin { command } => match command {
            AdminCommands::Login { secret } => {
                let secret = secret_or_prompt(secret, "Secret key")?;
                let outcome = session.admin_login(&secret).await;
                if !outcome.success {
                    bail!(outcome.message.unwrap_or_default());
                }
                println!("Admin session verified");
            }
            AdminCommands::Stats => {
                // Admin identity is not saved locally; the server decides
                match admin::load_admin_stats(session.api()).await {
                    Ok(stats) => match format {
                        OutputFormat::Json => print_json(&stats)?,
                        OutputFormat::Table => print_cards(&admin::admin_items(Some(&stats))),
                    },
                    Err(action) => handle_failure(action)?,
                }
            }
        },

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

async fn run_customers(
    command: CustomerCommands,
    session: &Session,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        CustomerCommands::List => {
            require_session(session, Route::Customers).await?;
            let customers = into_result(load_customers(session.api()).await)?;
            match format {
                OutputFormat::Json => print_json(&customers)?,
                OutputFormat::Table if customers.is_empty() => {
                    println!("No customers yet.");
                    println!();
                    println!("Add your first customer with:");
                    println!("  agentdesk customers add \"Full Name\" 9000000000");
                }
                OutputFormat::Table => {
                    println!("{:<38} {:<24} {:<14} {}", "ID", "Name", "Mobile", "Consent");
                    println!("{}", "-".repeat(92));
                    for c in customers {
                        println!(
                            "{:<38} {:<24} {:<14} {}",
                            c.customer_id,
                            c.full_name,
                            c.mobile,
                            c.consent_label()
                        );
                    }
                }
            }
        }

        CustomerCommands::Show { customer_id } => {
            require_session(session, Route::CustomerDetail(customer_id.clone())).await?;
            let detail = into_result(load_customer_detail(session.api(), &customer_id).await)?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "customer": detail.customer,
                    "investments": detail.investments,
                }))?,
                OutputFormat::Table => {
                    let c = &detail.customer;
                    println!("{}", c.full_name);
                    println!("  Mobile:  {}", c.mobile);
                    println!("  Consent: {}", c.consent_label());
                    println!();
                    println!("Investment Portfolio");
                    if detail.investments.is_empty() {
                        println!("  {}", EMPTY_PORTFOLIO);
                    } else {
                        println!(
                            "{:<12} {:<6} {:>16} {:<11} {:<11} {}",
                            "ID", "Scheme", "Principal", "Start", "Maturity", "Status"
                        );
                        println!("{}", "-".repeat(72));
                        for inv in &detail.investments {
                            println!(
                                "{:<12} {:<6} {:>16} {:<11} {:<11} {}",
                                inv.short_id(),
                                inv.scheme_type,
                                format_rupees(inv.principal),
                                format_date(inv.start_date),
                                format_date(inv.maturity_date),
                                inv.status
                            );
                        }
                    }
                }
            }
        }

        CustomerCommands::Add { name, mobile } => {
            require_session(session, Route::AddCustomer).await?;
            let created = CustomerForm::new(name, mobile).submit(session.api()).await?;
            match format {
                OutputFormat::Json => print_json(&created)?,
                OutputFormat::Table => {
                    println!("Created customer {} ({})", created.full_name, created.customer_id)
                }
            }
        }
    }
    Ok(())
}

async fn run_investments(
    command: InvestmentCommands,
    session: &Session,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        InvestmentCommands::List { customer } => {
            require_session(session, Route::Investments).await?;
            let rows = match customer {
                None => into_result(load_investment_list(session.api()).await)?,
                Some(id) => {
                    let api = session.api();
                    let (investments, customers) =
                        futures_util::try_join!(api.list_investments(Some(id.as_str())), api.list_customers())
                            .map_err(|e| anyhow!(e.user_message("Failed to load investments")))?;
                    investment_rows(investments, &customers)
                }
            };
            match format {
                OutputFormat::Json => {
                    let investments: Vec<_> = rows.iter().map(|r| &r.investment).collect();
                    print_json(&investments)?
                }
                OutputFormat::Table if rows.is_empty() => println!("No investments found."),
                OutputFormat::Table => print_investment_rows(&rows),
            }
        }

        InvestmentCommands::Add {
            customer_id,
            principal,
            scheme,
            start,
            maturity,
        } => {
            require_session(session, Route::AddInvestment).await?;

            let mut form = InvestmentForm {
                customer_id,
                principal,
                ..InvestmentForm::default()
            };
            form.set_scheme(scheme);
            let start = start.unwrap_or_else(|| format_date(chrono::Local::now().date_naive()));
            form.set_start_date(start);
            if let Some(maturity) = maturity {
                form.set_maturity_date(maturity);
            }

            let created = form.submit(session.api()).await?;
            match format {
                OutputFormat::Json => print_json(&created)?,
                OutputFormat::Table => println!(
                    "Created {} investment of {} maturing {} ({})",
                    created.scheme_type,
                    format_rupees(created.principal),
                    format_date(created.maturity_date),
                    created.investment_id
                ),
            }
        }
    }
    Ok(())
}

/// Run the first profile check and apply the route guard
async fn require_session(session: &Session, route: Route) -> anyhow::Result<Identity> {
    session.init().await;
    match resolve(route, &session.snapshot()) {
        Navigation::Render(_) => session.user().ok_or_else(|| anyhow!("Not logged in")),
        Navigation::Redirect(to) if to == Route::Login => {
            bail!("Not logged in. Run `agentdesk login <mobile>` first.")
        }
        Navigation::Redirect(to) => bail!("Redirected to {}", to.path()),
        Navigation::Placeholder => bail!("Session check did not complete"),
    }
}

/// Apply a dashboard failure; an expired session ends the command
fn handle_failure(action: FailureAction) -> anyhow::Result<()> {
    match action {
        FailureAction::ForceLogout { redirect } => {
            let hint = if redirect == Route::AdminLogin {
                "agentdesk admin login"
            } else {
                "agentdesk login <mobile>"
            };
            Err(SessionExpired { hint }.into())
        }
        FailureAction::Show(message) => {
            eprintln!("{}", message);
            Ok(())
        }
    }
}

fn into_result<T>(loaded: Loadable<T>) -> anyhow::Result<T> {
    match loaded {
        Loadable::Ready(value) => Ok(value),
        Loadable::Failed(message) => Err(anyhow!(message)),
        Loadable::Loading => Err(anyhow!("Request did not complete")),
    }
}

fn check_upload_header(path: &Path) -> anyhow::Result<()> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        println!("Header check skipped: only CSV files can be checked locally.");
        return Ok(());
    }

    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("File not found: {:?}", path))?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader.records().count();

    let missing = missing_columns(&headers);
    if missing.is_empty() {
        println!("{} rows, all expected columns present.", rows);
        Ok(())
    } else {
        bail!("Missing columns: {}", missing.join(", "))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.csv".to_string())
}

fn secret_or_prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    eprint!("{}: ", label);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_identity(user: &Identity) {
    println!("Welcome, {}", user.name());
    if let Some(agent_id) = user.agent_id() {
        println!("  Agent ID: {}", agent_id);
    }
    if let Some(mobile) = user.mobile() {
        println!("  Mobile:   {}", mobile);
    }
}

fn print_cards(cards: &[StatCard]) {
    for card in cards {
        println!("{:<24} {}", card.label, card.value);
    }
}

fn print_investment_rows(rows: &[InvestmentRow]) {
    println!(
        "{:<24} {:<6} {:>16} {:<11} {}",
        "Customer", "Scheme", "Principal", "Maturity", "Status"
    );
    println!("{}", "-".repeat(70));
    for row in rows {
        println!(
            "{:<24} {:<6} {:>16} {:<11} {}",
            row.customer_name,
            row.investment.scheme_type,
            row.principal_display(),
            format_date(row.investment.maturity_date),
            row.investment.status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agentdesk.toml");
        let cli = Cli::try_parse_from(["agentdesk", "config", "-o", path.to_str().unwrap()]).unwrap();
        let session = SessionStore::new(HttpClient::new("http://127.0.0.1:9/api/v1").unwrap());

        run(cli.command, &session, cli.format).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[api]"));
        assert!(written.contains("base_url"));
    }
}
