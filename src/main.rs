use docfill::server::{config::Config, error::Error, model::app::AppState, router, startup};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let http_client = startup::build_http_client(&config)?;
    let db = startup::connect_to_database(&config).await?;
    let session = startup::session_layer();

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Starting server on {}", config.bind_address);

    let app = router::routes()
        .with_state(AppState::new(db, http_client, config))
        .layer(session);

    axum::serve(listener, app).await?;

    Ok(())
}
