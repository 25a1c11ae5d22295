#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use profiteer::forms::login::{LoginForm, LoginOutcome, submit_login};
use profiteer::forms::profile::{ProfileForm, ProfileOutcome, check_image, save_profile};
use profiteer::forms::register::{RegisterErrors, RegisterField, RegisterForm, RegisterOutcome, submit_registration};
use profiteer::http::{ReqwestTransport, TransportError};
use profiteer::session::WatchStore;
use profiteer::types::{ImageUpload, User};
use profiteer::{Api, ApiConfig, ApiError, ConfigError, Session};
use tracing_subscriber::EnvFilter;

type CliSession = Session<ReqwestTransport, WatchStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("registration rejected: {0}")]
    Rejected(String),
    #[error("invalid registration: {0}")]
    Invalid(String),
    #[error("cannot read {path}: {source}")]
    ReadImage { path: PathBuf, source: std::io::Error },
    #[error("{0}")]
    ImageRejected(String),
    #[error("profile update failed: {0}")]
    ProfileFailed(String),
    #[error("not signed in")]
    NotSignedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "profiteer-cli", about = "Swine Profiteer account API CLI")]
struct Cli {
    /// API base URL; relative URLs are useless here, so set this.
    #[arg(long, env = "PROFITEER_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct Credentials {
    #[arg(long, env = "PROFITEER_USERNAME")]
    username: String,

    #[arg(long, env = "PROFITEER_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Sign in and print the current user.
    Login {
        #[command(flatten)]
        credentials: Credentials,

        /// End the session again before exiting.
        #[arg(long, default_value_t = false)]
        logout: bool,
    },
    /// Sign in and update profile fields and/or the profile image.
    Profile(ProfileArgs),
    /// Print the URL of a stored profile image (no network).
    ImageUrl { filename: String },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    fname: String,
    #[arg(long)]
    lname: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long, env = "PROFITEER_PASSWORD", hide_env_values = true)]
    password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[command(flatten)]
    credentials: Credentials,
    #[arg(long)]
    fname: Option<String>,
    #[arg(long)]
    lname: Option<String>,
    #[arg(long)]
    new_username: Option<String>,
    /// Image file to upload as the profile picture.
    #[arg(long)]
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::new(cli.api_url.as_deref())?;
    if let Command::ImageUrl { filename } = &cli.command {
        println!("{}", config.profile_image_url(filename));
        return Ok(());
    }

    let api = Api::new(config, ReqwestTransport::new()?);
    let session = Session::new(api.auth.clone(), WatchStore::new());

    match cli.command {
        Command::Register(args) => run_register(&api, args).await,
        Command::Login { credentials, logout } => run_login(&api, &session, &credentials, logout).await,
        Command::Profile(args) => run_profile(&api, &session, args).await,
        Command::ImageUrl { .. } => Ok(()),
    }
}

async fn run_register(api: &Api<ReqwestTransport>, args: RegisterArgs) -> Result<(), CliError> {
    let confirm_password = args.confirm_password.unwrap_or_else(|| args.password.clone());
    let form = RegisterForm {
        fname: args.fname,
        lname: args.lname,
        email: args.email,
        username: args.username,
        password: args.password,
        confirm_password,
    };
    match submit_registration(&api.auth, &form).await {
        RegisterOutcome::Registered { message, verification_sent } => {
            println!("{message}");
            if verification_sent {
                println!("A verification email was sent.");
            }
            Ok(())
        }
        RegisterOutcome::Invalid(errors) => Err(CliError::Invalid(describe_register_errors(&errors))),
        RegisterOutcome::Rejected { errors, notice } => {
            let detail = describe_register_errors(&errors);
            Err(CliError::Rejected(if detail.is_empty() { notice } else { format!("{notice} ({detail})") }))
        }
    }
}

fn describe_register_errors(errors: &RegisterErrors) -> String {
    RegisterField::ALL
        .into_iter()
        .filter_map(|field| errors.get(field).map(|message| format!("{}: {message}", field.wire_name())))
        .collect::<Vec<_>>()
        .join("; ")
}

async fn sign_in(api: &Api<ReqwestTransport>, session: &CliSession, credentials: &Credentials) -> Result<User, CliError> {
    let form = LoginForm { username: credentials.username.clone(), password: credentials.password.clone() };
    match submit_login(&api.auth, &form).await {
        LoginOutcome::LoggedIn { .. } => {}
        LoginOutcome::Failed(message) => return Err(CliError::LoginFailed(message)),
        LoginOutcome::Incomplete => return Err(CliError::LoginFailed("username and password are required".to_owned())),
    }
    session.refresh().await;
    let state = session.state();
    match (state.user, state.error) {
        (Some(user), _) => Ok(user),
        (None, Some(error)) => Err(CliError::LoginFailed(error)),
        (None, None) => Err(CliError::NotSignedIn),
    }
}

async fn run_login(
    api: &Api<ReqwestTransport>,
    session: &CliSession,
    credentials: &Credentials,
    logout: bool,
) -> Result<(), CliError> {
    let user = sign_in(api, session, credentials).await?;
    print_json(&serde_json::to_value(&user)?)?;
    if logout {
        session.logout().await;
        eprintln!("logged out");
    }
    Ok(())
}

async fn run_profile(api: &Api<ReqwestTransport>, session: &CliSession, args: ProfileArgs) -> Result<(), CliError> {
    let user = sign_in(api, session, &args.credentials).await?;
    let form = profile_form(&user, args.fname, args.lname, args.new_username);
    let image = match &args.image {
        Some(path) => Some(load_image(path)?),
        None => None,
    };

    match save_profile(&api.users, session, &form, image).await {
        ProfileOutcome::Unchanged => eprintln!("no changes to save"),
        ProfileOutcome::Saved { message } => eprintln!("{message}"),
        ProfileOutcome::Failed(message) => return Err(CliError::ProfileFailed(message)),
    }
    let current = session.state().user.ok_or(CliError::NotSignedIn)?;
    print_json(&serde_json::to_value(&current)?)
}

/// Current values with any overrides applied.
fn profile_form(user: &User, fname: Option<String>, lname: Option<String>, username: Option<String>) -> ProfileForm {
    let current = ProfileForm::from_user(user);
    ProfileForm {
        fname: fname.unwrap_or(current.fname),
        lname: lname.unwrap_or(current.lname),
        username: username.unwrap_or(current.username),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn load_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadImage { path: path.to_path_buf(), source })?;
    let content_type = content_type_for(path);
    check_image(content_type, bytes.len() as u64)
        .map_err(|r| CliError::ImageRejected(format!("{}: {}", r.title(), r.description())))?;
    let filename = path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(ImageUpload { filename, content_type: content_type.to_owned(), bytes })
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
