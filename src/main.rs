use poker::{
    blinds::TerminalSink,
    league::{FileSystemPlayerStore, PostgresPlayerStore},
    websockets, AppConfig, AppError, AppState, BlindAlerter, Cli, PlayerStore, StoreError,
    TokioBlindAlerter,
};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout belongs to the game itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Poker exited with an error");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let player_store = open_player_store(&config).await?;
    let blind_alerter: Arc<dyn BlindAlerter> = Arc::new(TokioBlindAlerter::new());
    let app_state = AppState::new(player_store, blind_alerter, config.blinds.clone());

    match std::env::args().nth(1).as_deref() {
        None | Some("play") => play(app_state).await,
        Some("serve") => serve(app_state, &config.bind_addr).await,
        Some(other) => Err(AppError::UnknownCommand(other.to_string())),
    }
}

async fn open_player_store(config: &AppConfig) -> Result<Arc<dyn PlayerStore>, AppError> {
    match &config.database_url {
        Some(database_url) => {
            info!("Using PostgreSQL player store");
            let pool = sqlx::PgPool::connect(database_url)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
            let store = PostgresPlayerStore::new(pool);
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => {
            info!(path = %config.league_path.display(), "Using league file");
            Ok(Arc::new(
                FileSystemPlayerStore::open(&config.league_path).await?,
            ))
        }
    }
}

/// Plays a single game at the terminal
async fn play(app_state: AppState) -> Result<(), AppError> {
    println!("Let's play poker");
    println!("Type {{Name}} wins to record a win");

    let mut cli = Cli::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        app_state.new_game(),
        Arc::new(TerminalSink::stdout()),
    );
    cli.play_poker().await
}

/// Serves one game per WebSocket connection
async fn serve(app_state: AppState, bind_addr: &str) -> Result<(), AppError> {
    let app = websockets::router(app_state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(address = %bind_addr, "Game server listening on ws://{}/ws", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
