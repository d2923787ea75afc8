//! Port abstraction for ranked event persistence.
use async_trait::async_trait;

use crate::domain::{EventId, RankedEvent};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by event repository adapters.
    pub enum EventRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "event repository query failed: {message}",
    }
}

/// Read and write access to nominated events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<RankedEvent>, EventRepositoryError>;

    /// All events in nomination order.
    ///
    /// Organic ranking ties keep this order, so adapters must return it
    /// deterministically.
    async fn find_all(&self) -> Result<Vec<RankedEvent>, EventRepositoryError>;

    /// Insert or update an event.
    async fn save(&self, event: &RankedEvent) -> Result<(), EventRepositoryError>;
}
