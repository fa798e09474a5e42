use std::borrow::Cow;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{bank_links::PlaidEnvironment, database::DatabaseOptions, server};

mod migrate;

#[derive(Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// DSN to tell Sentry where to send events.
    ///
    /// If provided, errors will be sent to Sentry.
    #[clap(long = "sentry-dsn", env = "SENTRY_DSN")]
    sentry_dsn: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    Migrate(MigrateOpts),
    Serve(ServeOpts),
}

#[derive(Args, Clone)]
struct DatabaseArgs {
    /// Host running the application database.
    #[clap(long = "database-host", env = "PG_HOST", default_value = "localhost")]
    database_host: String,

    #[clap(long = "database-port", env = "PG_PORT", default_value = "5432")]
    database_port: u16,

    #[clap(long = "database-user", env = "PG_USER")]
    database_user: String,

    #[clap(long = "database-password", env = "PG_PASS")]
    database_password: String,

    /// Name of the application database.
    #[clap(long = "database-name", env = "PG_DB")]
    database_name: String,
}

impl From<DatabaseArgs> for DatabaseOptions {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.database_host,
            port: args.database_port,
            user: args.database_user,
            password: args.database_password,
            name: args.database_name,
        }
    }
}

#[derive(Args)]
struct MigrateOpts {
    #[clap(flatten)]
    database: DatabaseArgs,
}

impl From<MigrateOpts> for migrate::MigrationOpts {
    fn from(opts: MigrateOpts) -> Self {
        Self {
            database: opts.database.into(),
        }
    }
}

#[derive(Args)]
struct ServeOpts {
    #[clap(flatten)]
    database: DatabaseArgs,

    /// The number of connections to use for the database pool.
    #[clap(long = "database-pool-size", default_value = "16")]
    database_pool_size: u32,

    /// The number of seconds before a database call times out.
    #[clap(long = "database-timeout", default_value = "5")]
    database_timeout: u8,

    /// Port to listen on.
    #[clap(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// The number of seconds a request may run before it is aborted.
    #[clap(long = "request-timeout", default_value = "30")]
    request_timeout: u64,

    /// Comma separated origins allowed to make cross-origin requests.
    ///
    /// If not set, any origin is allowed.
    #[clap(
        long = "cors-allowed-origins",
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    cors_allowed_origins: Vec<String>,

    #[clap(long = "plaid-client-id", env = "PLAID_CLIENT_ID")]
    plaid_client_id: String,

    #[clap(long = "plaid-secret", env = "PLAID_SECRET")]
    plaid_secret: String,

    #[clap(
        long = "plaid-env",
        env = "PLAID_ENV",
        value_enum,
        default_value = "sandbox"
    )]
    plaid_env: PlaidEnvironment,

    /// Secret key for signing session tokens and encrypting cookies.
    ///
    /// If this is changed, existing sessions will become invalid.
    /// Generate with: openssl rand -base64 32
    #[clap(long = "secret-key", env = "SECRET_KEY")]
    secret_key: String,

    /// The number of days a session lasts.
    #[clap(long = "session-lifetime-days", default_value = "7")]
    session_lifetime_days: u16,
}

impl From<ServeOpts> for server::Options {
    fn from(opts: ServeOpts) -> Self {
        Self {
            database: opts.database.into(),
            database_pool_size: opts.database_pool_size,
            database_timeout_seconds: opts.database_timeout,
            port: opts.port,
            request_timeout_seconds: opts.request_timeout,
            cors_allowed_origins: opts
                .cors_allowed_origins
                .into_iter()
                .filter(|origin| !origin.trim().is_empty())
                .collect(),
            plaid_client_id: opts.plaid_client_id,
            plaid_environment: opts.plaid_env,
            plaid_secret: opts.plaid_secret,
            secret_key: opts.secret_key,
            session_lifetime_days: opts.session_lifetime_days,
        }
    }
}

pub async fn run_with_sys_args() -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;

    let cli = Cli::parse();

    let sentry_config = cli.sentry_dsn.map(|dsn| {
        debug!("Enabled sentry.");

        let release_name = option_env!("GIT_SHA")
            .map(Cow::from)
            .or_else(|| sentry::release_name!());

        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: release_name,
                ..Default::default()
            },
        ))
    });

    let sentry_tracing_layer = if sentry_config.is_some() {
        Some(sentry_tracing::layer())
    } else {
        None
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(sentry_tracing_layer)
        .init();

    match cli.command {
        Commands::Migrate(opts) => migrate::run_migrations(opts.into()).await,
        Commands::Serve(opts) => {
            let migrate_opts = MigrateOpts {
                database: opts.database.clone(),
            };

            migrate::run_migrations(migrate_opts.into()).await?;

            server::serve(opts.into()).await
        }
    }
}
