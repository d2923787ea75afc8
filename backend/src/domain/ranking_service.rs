//! Ranking read service.
//!
//! Loads one consistent board snapshot per call and runs the pure composer
//! from [`crate::domain::ranking`] over it. Window validation happens here,
//! before and after composition, so the composer never sees a bad range.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    BoardSnapshotRepository, BoardSnapshotRepositoryError, ListEventsRequest, RankingQuery,
};
use crate::domain::{
    Error, RankWindow, RankedEvent, RankingSnapshot, SlotOverlay, WindowError, compose_ranking,
};

fn map_snapshot_error(error: BoardSnapshotRepositoryError) -> Error {
    error!(%error, "board snapshot read failed");
    match error {
        BoardSnapshotRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("board store unavailable: {message}"))
        }
        BoardSnapshotRepositoryError::Query { message } => {
            Error::internal(format!("board store error: {message}"))
        }
    }
}

fn window_error(error: WindowError) -> Error {
    let (field, value) = match error {
        WindowError::NonPositiveBound { field } => (field, 0),
        WindowError::Inverted { start, .. } => ("start", start),
        WindowError::BeyondRanking { end, .. } => ("end", end),
    };
    debug!(%error, "rejected ranking window");
    Error::request_not_valid(error.to_string()).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_window",
    }))
}

fn index_error(index: u32, length: usize) -> Error {
    debug!(index, length, "rejected ranking index");
    Error::request_not_valid(format!(
        "index {index} is outside the ranking of {length} events"
    ))
    .with_details(json!({
        "field": "index",
        "value": index,
        "code": "index_out_of_range",
    }))
}

/// Ranking service implementing the [`RankingQuery`] driving port.
#[derive(Clone)]
pub struct RankingService<S> {
    snapshot_repo: Arc<S>,
    overlay: SlotOverlay,
}

impl<S> RankingService<S> {
    /// Create a ranking service overlaying slots with `overlay`.
    pub fn new(snapshot_repo: Arc<S>, overlay: SlotOverlay) -> Self {
        Self {
            snapshot_repo,
            overlay,
        }
    }
}

impl<S> RankingService<S>
where
    S: BoardSnapshotRepository,
{
    async fn snapshot(&self) -> Result<RankingSnapshot, Error> {
        self.snapshot_repo
            .load_snapshot()
            .await
            .map_err(map_snapshot_error)
    }
}

#[async_trait]
impl<S> RankingQuery for RankingService<S>
where
    S: BoardSnapshotRepository,
{
    async fn list_events(&self, request: ListEventsRequest) -> Result<Vec<RankedEvent>, Error> {
        let window = RankWindow::new(request.start, request.end).map_err(window_error)?;
        let snapshot = self.snapshot().await?;
        let composed = compose_ranking(&snapshot, &window, self.overlay);
        window.select(composed).map_err(window_error)
    }

    async fn event_at(&self, index: u32) -> Result<RankedEvent, Error> {
        let snapshot = self.snapshot().await?;
        let composed = compose_ranking(&snapshot, &RankWindow::unbounded(), self.overlay);
        let length = composed.len();
        index
            .checked_sub(1)
            .and_then(|position| usize::try_from(position).ok())
            .and_then(|position| composed.into_iter().nth(position))
            .ok_or_else(|| index_error(index, length))
    }
}

#[cfg(test)]
#[path = "ranking_service_tests.rs"]
mod tests;
