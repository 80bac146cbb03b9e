use std::io::BufRead;
use std::net::SocketAddr;
use std::sync::Arc;

use gallery_core::object_store::LocalObjectStore;
use gallery_db::store::{FixtureItemStore, ItemStore, PgItemStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_api::auth::password::hash_password;
use gallery_api::config::{DataSource, ServerConfig};
use gallery_api::router::build_app_router;
use gallery_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gallery_api=debug,gallery_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `gallery-api hash-password` reads a password from stdin and prints the
    // PHC string to put in ADMIN_PASSWORD_HASH.
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        print_password_hash();
        return;
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Item store ---
    let items = build_item_store(&config.data_source).await;
    tracing::info!(data_source = items.name(), "Item store ready");

    // --- Object storage ---
    tokio::fs::create_dir_all(&config.storage.root)
        .await
        .expect("Failed to create storage root");
    let objects = Arc::new(LocalObjectStore::new(
        config.storage.root.clone(),
        config.storage.public_base_url.clone(),
    ));
    tracing::info!(root = %objects.root().display(), "Object storage ready");

    // --- App state ---
    let state = AppState {
        items,
        objects,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect the configured catalog source.
///
/// Panics when the source is unusable; the server should not start without
/// a catalog.
async fn build_item_store(source: &DataSource) -> Arc<dyn ItemStore> {
    match source {
        DataSource::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = gallery_db::create_pool(database_url, *max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            gallery_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            gallery_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgItemStore::new(pool))
        }
        DataSource::Fixture { path, read_only } => {
            let store = match path {
                Some(path) => {
                    let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
                        panic!("Failed to read fixture file {}: {e}", path.display())
                    });
                    FixtureItemStore::from_json(&json).unwrap_or_else(|e| {
                        panic!("Invalid fixture file {}: {e}", path.display())
                    })
                }
                None => {
                    tracing::warn!("FIXTURE_PATH not set, serving the built-in demo catalog");
                    FixtureItemStore::demo()
                }
            };
            let store = if *read_only { store.read_only() } else { store };
            tracing::info!(read_only = store.is_read_only(), "Fixture catalog loaded");
            Arc::new(store)
        }
    }
}

fn print_password_hash() {
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .expect("Failed to read password from stdin");
    let password = password.trim_end_matches(['\r', '\n']);
    assert!(!password.is_empty(), "Password must not be empty");

    let hash = hash_password(password).expect("Failed to hash password");
    println!("{hash}");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
