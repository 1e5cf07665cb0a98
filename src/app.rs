/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Apply middleware (http / CORS / identity / anti-forgery)
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::antiforgery::build_antiforgery_gate;
use crate::services::identity::{ExtensionIdentityProvider, SchemeIdentityResolver};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins; e.g. RUST_LOG=info,antiforgery_gate=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    let state = build_state(&config)?;

    let policy = state.antiforgery.config();
    tracing::info!(
        exclude = ?policy.exclude_auth_types().map(|l| l.as_slice()),
        include = ?policy.include_auth_types().map(|l| l.as_slice()),
        require_authentication = policy.require_authentication(),
        cookie = %config.antiforgery.cookie_name,
        "anti-forgery policy loaded"
    );
    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let antiforgery = build_antiforgery_gate(config)?;
    let resolver = SchemeIdentityResolver::new(config.session_cookie_name.clone());

    Ok(AppState::new(
        antiforgery,
        Arc::new(ExtensionIdentityProvider),
        Arc::new(resolver),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    // identity must wrap the gate, which lives inside v1::routes
    let v1 = api::v1::routes(state.clone());
    let v1 = middleware::auth::identity::apply(v1, state.clone());

    let router = Router::new().nest("/api/v1", v1).with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
