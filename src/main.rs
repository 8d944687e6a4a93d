use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use imgdrop::web::pages::load_index_page;
use imgdrop::web::shutdown_signal;
use imgdrop::{AppState, Config, Database, FileStorage, ImageService, ImgdropError, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration; a missing file means defaults, a broken one is fatal
    let (mut config, load_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(ImgdropError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            (Config::default(), Some(e))
        }
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = imgdrop::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        imgdrop::logging::init_console_only(&config.logging.level);
    }

    if let Some(e) = load_error {
        warn!("{} not found ({}); using default configuration", config_path, e);
    }

    config.apply_env_overrides();
    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("imgdrop - image upload service");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> imgdrop::Result<()> {
    let storage = FileStorage::new(&config.files.storage_path).await?;
    info!("File storage initialized at: {}", config.files.storage_path);

    // The server does not start without a reachable metadata store
    let db = Database::from_config(&config.database).await?;
    let repository = Arc::new(db.images(&config.database.collection));

    let images = ImageService::new(storage, repository, config.server.public_base())
        .with_max_upload_size(config.files.max_upload_bytes());
    let index_html = load_index_page(&config.templates.index).await;
    let state = AppState::new(images).with_index_html(index_html);

    let result = match WebServer::new(&config.server, state) {
        Ok(server) => server.run(shutdown_signal()).await,
        Err(e) => Err(e),
    };

    db.shutdown().await;
    result
}
