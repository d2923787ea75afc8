//! Correlation identifier carried by every board request.
//!
//! The [`crate::middleware::Trace`] layer puts one in scope per request and
//! [`crate::domain::Error::new`] copies it into failure payloads, so a
//! rejected vote or purchase can be matched with its log lines.
//!
//! Task-local values do not follow `tokio::spawn` or `spawn_blocking`; wrap
//! moved work in [`TraceId::scope`] to keep the identifier.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request.
///
/// ```
/// use rsboard::domain::TraceId;
///
/// let id = TraceId::from_header(" 6f1c2b9e-8d4a-4c1e-9a57-0c3b7d5e2f10 ").expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2b9e-8d4a-4c1e-9a57-0c3b7d5e2f10");
/// assert!(TraceId::from_header("00000000-0000-0000-0000-000000000000").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier supplied by a caller in the `trace-id` header.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a UUID, and
    /// the nil UUID, yields `None` so a fresh identifier is generated.
    pub fn from_header(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<Self>()
            .ok()
            .filter(|id| !id.0.is_nil())
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
