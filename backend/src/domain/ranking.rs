//! Ranking composition.
//!
//! Builds the externally visible ordering of events from one consistent
//! [`RankingSnapshot`]:
//!
//! 1. organic ranking: events stably sorted by vote tally, highest first;
//! 2. overlay: live slots, in ascending rank order, are inserted one by one
//!    at their position, each insertion seeing the effect of earlier ones;
//! 3. dedup: entries sharing a display name collapse to the first one;
//! 4. window: an optional 1-based inclusive `[start, end]` range.
//!
//! A slot position always overrides the organic position of the event it
//! backs: the organic copy of an event is withdrawn before its slot entry is
//! inserted, so the dedup pass never has to decide between them.
//!
//! The functions here are pure and never validate the window against the
//! composed length; [`RankWindow::select`] does that for callers.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use tracing::warn;

use crate::domain::{EventId, RankedEvent, SlotBid};

/// Errors raised when a window does not fit the request or the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("{field} must be at least 1")]
    NonPositiveBound { field: &'static str },
    #[error("start {start} must not exceed end {end}")]
    Inverted { start: u32, end: u32 },
    #[error("end {end} exceeds ranking length {length}")]
    BeyondRanking { end: u32, length: usize },
}

/// Optional 1-based inclusive range over the composed ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankWindow {
    start: Option<u32>,
    end: Option<u32>,
}

impl RankWindow {
    /// Window covering the whole ranking.
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Validate request bounds: each present bound is at least 1 and
    /// `start <= end` when both are present.
    ///
    /// # Examples
    /// ```
    /// use rsboard::domain::RankWindow;
    ///
    /// assert!(RankWindow::new(Some(1), Some(2)).is_ok());
    /// assert!(RankWindow::new(Some(3), Some(2)).is_err());
    /// assert!(RankWindow::new(Some(0), None).is_err());
    /// ```
    pub fn new(start: Option<u32>, end: Option<u32>) -> Result<Self, WindowError> {
        if start == Some(0) {
            return Err(WindowError::NonPositiveBound { field: "start" });
        }
        if end == Some(0) {
            return Err(WindowError::NonPositiveBound { field: "end" });
        }
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(WindowError::Inverted { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> Option<u32> {
        self.start
    }

    pub const fn end(&self) -> Option<u32> {
        self.end
    }

    /// Whether a slot at `rank` takes part in a window-relative overlay.
    pub fn admits_slot(&self, rank: u32) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => rank > start && rank <= end,
            (Some(start), None) => rank > start,
            (None, Some(end)) => rank > 0 && rank <= end,
            (None, None) => true,
        }
    }

    /// Window-relative insertion index for a slot at `rank`.
    pub fn insertion_index(&self, rank: u32) -> usize {
        let base = rank.saturating_sub(1);
        let shift = self.start.map_or(0, |start| start.saturating_sub(1));
        usize::try_from(base.saturating_add(shift)).unwrap_or(usize::MAX)
    }

    /// Apply the window to a composed ranking.
    ///
    /// The range is only cut when both bounds are present; a lone bound
    /// returns the ranking unchanged.
    pub fn select(&self, ranking: Vec<RankedEvent>) -> Result<Vec<RankedEvent>, WindowError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(ranking);
        };
        let length = ranking.len();
        let end_index = usize::try_from(end).unwrap_or(usize::MAX);
        if end_index > length {
            return Err(WindowError::BeyondRanking { end, length });
        }
        let start_index = usize::try_from(start - 1).unwrap_or(usize::MAX);
        Ok(ranking
            .into_iter()
            .skip(start_index)
            .take(end_index - start_index)
            .collect())
    }
}

/// How purchased slots are overlaid when a window is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotOverlay {
    /// Every slot lands at its absolute rank; the window is cut afterwards,
    /// so a windowed list is always a sub-range of the full list.
    #[default]
    Absolute,
    /// Only slots admitted by [`RankWindow::admits_slot`] are overlaid, at
    /// [`RankWindow::insertion_index`].
    WindowRelative,
}

/// Unknown overlay policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown slot overlay policy: {0}")]
pub struct UnknownSlotOverlay(String);

impl FromStr for SlotOverlay {
    type Err = UnknownSlotOverlay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" => Ok(Self::Absolute),
            "window-relative" | "window_relative" => Ok(Self::WindowRelative),
            other => Err(UnknownSlotOverlay(other.to_owned())),
        }
    }
}

/// Events and live slots read together from one consistent store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingSnapshot {
    /// Events in store encounter order.
    pub events: Vec<RankedEvent>,
    pub slots: Vec<SlotBid>,
}

/// Events stably sorted by vote tally, highest first.
pub fn organic_ranking(events: &[RankedEvent]) -> Vec<RankedEvent> {
    let mut ranking = events.to_vec();
    ranking.sort_by(|left, right| right.vote_tally().cmp(&left.vote_tally()));
    ranking
}

/// Insert `event` at `index`, appending when the index is past the end.
pub fn insert_at(ranking: &mut Vec<RankedEvent>, index: usize, event: RankedEvent) {
    let index = index.min(ranking.len());
    ranking.insert(index, event);
}

/// Keep the first entry for every display name.
pub fn dedup_by_name(ranking: Vec<RankedEvent>) -> Vec<RankedEvent> {
    let mut seen = HashSet::with_capacity(ranking.len());
    ranking
        .into_iter()
        .filter(|event| seen.insert(event.name().to_owned()))
        .collect()
}

/// Compose the deduplicated ranking. The window only steers the overlay
/// here; use [`RankWindow::select`] to cut the range.
///
/// Each slot places the event that bought it. Purchased events are not
/// re-sorted by tally and dealt out across the slot ranks in order.
pub fn compose_ranking(
    snapshot: &RankingSnapshot,
    window: &RankWindow,
    overlay: SlotOverlay,
) -> Vec<RankedEvent> {
    let overlay_window = match overlay {
        SlotOverlay::Absolute => RankWindow::unbounded(),
        SlotOverlay::WindowRelative => *window,
    };

    let purchased = purchased_entries(snapshot, &overlay_window);
    let pinned: HashSet<EventId> = purchased.iter().map(|(_, event)| event.id()).collect();

    let mut ranking: Vec<RankedEvent> = organic_ranking(&snapshot.events)
        .into_iter()
        .filter(|event| !pinned.contains(&event.id()))
        .collect();

    for (rank, event) in purchased {
        insert_at(&mut ranking, overlay_window.insertion_index(rank), event);
    }

    dedup_by_name(ranking)
}

/// Admitted slots in ascending rank order, each joined to the event it backs.
fn purchased_entries(snapshot: &RankingSnapshot, window: &RankWindow) -> Vec<(u32, RankedEvent)> {
    let events: HashMap<EventId, &RankedEvent> = snapshot
        .events
        .iter()
        .map(|event| (event.id(), event))
        .collect();

    let mut slots: Vec<&SlotBid> = snapshot
        .slots
        .iter()
        .filter(|slot| window.admits_slot(slot.rank.get()))
        .collect();
    slots.sort_by_key(|slot| slot.rank);

    slots
        .into_iter()
        .filter_map(|slot| match events.get(&slot.event_id) {
            Some(event) => Some((slot.rank.get(), (*event).clone())),
            None => {
                warn!(
                    rank = slot.rank.get(),
                    event_id = %slot.event_id,
                    "slot backs an event missing from the snapshot; skipping"
                );
                None
            }
        })
        .collect()
}
