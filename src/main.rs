use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reviewer::{config, content, handlers, paths, state::AppState, storage};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reviewer=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db = storage::init_db(Path::new(&paths::db_path())).expect("Failed to initialize store");
  let catalog = content::load_catalog(Path::new(&paths::catalog_path()));
  tracing::info!(
    "catalog '{}': {} topics, {} cards",
    catalog.title,
    catalog.topics.len(),
    catalog.total_cards()
  );

  let state = AppState::initialize(catalog, db);
  let app = handlers::router(state);

  let bind_addr = config::server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config::server_port());

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
