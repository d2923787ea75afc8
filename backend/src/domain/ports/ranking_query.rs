//! Driving port for reading the composed ranking.

use async_trait::async_trait;

use crate::domain::{Error, RankedEvent};

/// Optional 1-based inclusive window over the composed ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl ListEventsRequest {
    /// Request covering the whole ranking.
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub const fn window(start: u32, end: u32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Read side of the board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingQuery: Send + Sync {
    /// Composed, name-deduplicated ranking, cut to the requested window.
    ///
    /// A window with a zero bound, `start > end`, or `end` past the ranking
    /// length is rejected with `request_not_valid`.
    async fn list_events(&self, request: ListEventsRequest) -> Result<Vec<RankedEvent>, Error>;

    /// Event at 1-based `index` of the composed ranking.
    async fn event_at(&self, index: u32) -> Result<RankedEvent, Error>;
}
