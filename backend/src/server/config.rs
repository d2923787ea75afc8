//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use rsboard::inbound::http::state::BoardTuning;
use rsboard::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) tuning: BoardTuning,
}

impl ServerConfig {
    /// Configuration serving the in-memory store with default tuning.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            tuning: BoardTuning::default(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, every board port is served by its PostgreSQL adapter
    /// instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: BoardTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
