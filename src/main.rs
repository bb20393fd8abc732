use dotenvy::dotenv;
use news_ticker_server::{
    auth::ensure_bootstrap_admin,
    config::Config,
    startup::HttpServer,
    utils::state::setup,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    config_tracing();

    let config = Config::load()?;
    let state = setup(&config)?;

    // A store outage must not keep the server from starting
    if let Err(e) = ensure_bootstrap_admin(
        &state.admin_repo,
        &config.auth.bootstrap_username,
        &config.auth.bootstrap_password,
    )
    .await
    {
        tracing::error!("Failed to ensure bootstrap admin: {e:?}");
    }

    HttpServer::new(&config, state).await?.run().await
}

fn config_tracing() {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }

    use tracing::Level;
    use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

    let tracing_layer = tracing_subscriber::fmt::layer();
    let filter = filter::Targets::new()
        .with_target("hyper::proto", Level::INFO)
        .with_target("tower_http::trace", Level::DEBUG)
        .with_target("sqlx::query", Level::WARN)
        .with_default(Level::DEBUG);

    tracing_subscriber::registry()
        .with(tracing_layer)
        .with(filter)
        .init();
}
