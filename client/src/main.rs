//! Headless marketplace client: validates the session, then warms the
//! product and booking stores.

use std::ffi::OsString;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use client::config::ClientSettings;
use client::domain::ports::ListQuery;
use client::domain::{AppState, Render, SessionContext, SessionGate};
use client::outbound::http::{HttpEntityApi, HttpSessionCheck};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    run(std::env::args_os()).await
}

async fn run(args: impl IntoIterator<Item = OsString>) -> Result<()> {
    let settings = ClientSettings::load_from_iter(args)
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let base = settings.api_base_url()?;
    let session = SessionContext::new(settings.session_token());

    let checker = HttpSessionCheck::new(
        base.clone(),
        settings.whoami_path(),
        settings.request_timeout(),
        session.clone(),
    )
    .wrap_err("failed to build session check client")?;
    let gate = SessionGate::new(Arc::new(checker), session.clone(), settings.gate_settings());

    let mounted = gate.mount();
    mounted.settled().await;
    match mounted.render() {
        Render::Children => {}
        Render::Redirect { location } => {
            info!(%location, "session rejected; sign in required");
            return Ok(());
        }
        Render::Loading => return Err(eyre!("session check did not settle")),
    }

    let api = HttpEntityApi::new(base, settings.request_timeout(), session.clone())
        .wrap_err("failed to build marketplace API client")?;
    let state = AppState::new(Arc::new(api), session);
    if let Some(identity) = state.session.identity() {
        info!(user = %identity.id, name = %identity.name, "signed in");
    }

    let products = state.products.fetch_all(&ListQuery::new()).await?;
    let bookings = state.bookings.fetch_all(&ListQuery::new()).await?;
    info!(products, bookings, "stores loaded");
    Ok(())
}
