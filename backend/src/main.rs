//! Backend entry-point: reads settings, wires the intake API, and serves the frontend.

use mockable::DefaultEnv;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use goloyal::server::{ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::from_env(&DefaultEnv::new()).map_err(|err| {
        error!(error = %err, "invalid server settings");
        std::io::Error::other(err)
    })?;

    let (server, _addr) = create_server(&settings)?;
    server.await
}
