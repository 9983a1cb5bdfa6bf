use std::{env, net::SocketAddr};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use finboard::{
    ACCESS_URL_VAR, API_URL_VAR, AppState, BackendApi, Config, DataSource, HttpBackendApi,
    SimplefinBackend, SourceKind, build_router, graceful_shutdown, logging_middleware,
    spawn_background_refresh,
};

/// The web dashboard for your bank and credit-card accounts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Where account data comes from.
    #[arg(long, value_enum, default_value = "api")]
    source: SourceKind,

    /// Silently re-fetch account data every five minutes.
    #[arg(long)]
    refresh: bool,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let source = DataSource::resolve(
        args.source,
        env::var(API_URL_VAR).ok(),
        env::var(ACCESS_URL_VAR).ok(),
    )
    .unwrap_or_else(|error| {
        eprintln!("Configuration error: {error}");
        std::process::exit(1);
    });

    let config = Config {
        port: args.port,
        source,
        background_refresh: args.refresh,
        local_timezone: args.timezone,
    };

    match config.source.clone() {
        DataSource::Api { base_url } => {
            tracing::info!("reading account data from the backend API at {base_url}");
            let state = AppState::new(HttpBackendApi::new(&base_url), &config.local_timezone);
            serve(state, &config).await;
        }
        DataSource::Simplefin { access_url } => {
            let backend = SimplefinBackend::new(&access_url).unwrap_or_else(|error| {
                eprintln!("Configuration error: {error}");
                std::process::exit(1);
            });
            tracing::info!("reading account data directly from SimpleFin");
            let state = AppState::new(backend, &config.local_timezone);
            serve(state, &config).await;
        }
    }
}

async fn serve<A: BackendApi>(state: AppState<A>, config: &Config) {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    // Start the initial load in the background so the server answers
    // immediately with the loading placeholder.
    let provider = state.provider.clone();
    tokio::spawn(async move { provider.load().await });

    let refresh_task = config
        .background_refresh
        .then(|| spawn_background_refresh(state.provider.clone()));

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();

    if let Some(refresh_task) = refresh_task {
        refresh_task.abort();
    }
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_filter(env_filter))
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
