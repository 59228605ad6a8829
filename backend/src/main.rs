//! Backend entry-point: loads settings, migrates the schema, and serves the
//! dashboard API.

mod server;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::inbound::http::session_config::fingerprint::key_fingerprint;
use dashboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use dashboard::outbound::persistence::{DbPool, PoolConfig, migrate};

use server::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    if session.ephemeral {
        warn!("using temporary session key (dev only)");
    }
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let database_url = settings.database_url(&env)?;
    migrate(database_url.clone())
        .await
        .wrap_err("failed to apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build connection pool")?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
        pool,
        settings.base_url()?,
    )
    .with_bcrypt_cost(settings.bcrypt_cost());
    info!(bind_addr = %config.bind_addr(), "starting server");

    create_server(config)?.await?;
    Ok(())
}
