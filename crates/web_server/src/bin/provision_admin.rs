//! Creates the admin account used by the dashboard and the recovery flow.

use std::sync::Arc;

use admin_services::{AdminService, AdminSettings, PgAdminStore};
use anyhow::Context;
use clap::Parser;
use notification_services::LogEmailService;
use postgres::database::{create_connection_pool, ensure_schema};

#[derive(Parser, Debug)]
#[command(name = "provision_admin")]
#[command(about = "Create the lodge admin account", long_about = None)]
struct Cli {
    /// Login name for the new admin
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    username: String,

    /// Password for the new admin
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://localhost/lodge")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    if cli.password.trim().is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let pool = create_connection_pool(&cli.database_url)
        .await
        .context("failed to connect to the database")?;
    ensure_schema(&pool)
        .await
        .context("failed to prepare the database schema")?;

    // Provisioning never sends mail; the operator address is unused here.
    let service = AdminService::new(
        Arc::new(PgAdminStore::new(pool)),
        Arc::new(LogEmailService),
        AdminSettings::new(&cli.username, ""),
    );

    let admin = service
        .provision(&cli.username, &cli.password)
        .await
        .with_context(|| format!("could not create admin {}", cli.username))?;

    log::info!("✅ Admin {} created with id {}", admin.username, admin.id);
    Ok(())
}
