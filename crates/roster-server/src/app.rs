//! Startup wiring: open the roster, build the engine, install it.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use roster_core::SearchEngine;
use roster_sqlite::SqliteRows;

use crate::config::Config;
use crate::error::ServerResult;
use crate::logging::prefix;
use crate::service::SearchService;

/// Open the configured database and return a ready service.
///
/// Any storage or engine failure aborts startup.
pub fn build_service(config: &Config) -> ServerResult<Arc<SearchService>> {
    let start = Instant::now();
    let engine_config = config.engine_config();

    let source = SqliteRows::open(&config.db, config.table.as_deref(), engine_config.normalizer)?;
    info!(
        "{} Roster opened: {} (table {})",
        prefix::DB,
        config.db.display(),
        source.table()
    );

    let engine = SearchEngine::initialize(Arc::new(source), engine_config)?;
    info!(
        rows = engine.row_count(),
        name_column = %engine.name_column(),
        strategy = %engine.strategy(),
        index_hash = %engine.index_hash(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "{} Search engine ready",
        prefix::OPEN
    );

    let service = SearchService::new(config.service_config());
    service.install(Arc::new(engine));
    Ok(Arc::new(service))
}
