use axum::{
    http::{header, HeaderValue},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use color_eyre::eyre::Context;
use hyper::Method;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    utils::state::AppState,
    web::{
        auth::auth,
        handlers::{
            admin::{login, logout, verify},
            news::{create_news, delete_news, list_news, update_news},
            stoerer::{clear_stoerer, get_stoerer, update_stoerer},
        },
    },
};

async fn welcome() -> impl IntoResponse {
    "News Ticker Server"
}

async fn health_check() -> impl IntoResponse {
    "OK"
}

pub struct HttpServer {
    listener: TcpListener,
    router: Router,
}

impl HttpServer {
    pub async fn new(config: &Config, state: AppState) -> color_eyre::Result<Self> {
        let router = build_router(state, &config.server.client_url)?;

        let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))
            .await
            .wrap_err_with(|| format!("Failed to bind to port {}", config.server.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> color_eyre::Result<()> {
        tracing::info!("listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .wrap_err("Failed to start HTTP server")?;
        Ok(())
    }
}

/// Builds the full application router.
///
/// Credentialed CORS requires an explicit origin, so `client_url` must be a
/// valid header value.
pub fn build_router(state: AppState, client_url: &str) -> color_eyre::Result<Router> {
    let origin = HeaderValue::from_str(client_url.trim_end_matches('/'))
        .wrap_err_with(|| format!("Invalid client url: {client_url}"))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE]);

    let router = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .nest("/api", api_routes(state.clone()))
        .merge(news_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .with_state(state);

    Ok(router)
}

fn api_routes(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .route("/admin/verify", get(verify))
        .route("/admin/stoerer", put(update_stoerer).delete(clear_stoerer))
        .route_layer(from_fn_with_state(state, auth));

    Router::new()
        .merge(protected_routes)
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/stoerer", get(get_stoerer))
}

fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news).post(create_news))
        .route("/news/{id}", put(update_news).delete(delete_news))
}
