//! Correlation identifier for a single HTTP exchange.
//!
//! The trace middleware mints one identifier per request and runs the handler
//! inside [`TraceId::scope`]. Anything on that task, including
//! [`Error`](crate::domain::Error) constructors, can read it back with
//! [`TraceId::current`]. Task-locals do not follow `tokio::spawn` or
//! `web::block`, so wrap such work in `scope` when the id matters there.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Random v4 UUID naming one request.
///
/// ```
/// use goloyal::domain::TraceId;
///
/// let id: TraceId = "6f1c2a9e-4d3b-4a57-9c1e-2b8f0d7a5e31".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2a9e-4d3b-4a57-9c1e-2b8f0d7a5e31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Identifier of the request being served on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `trace_id` visible through [`TraceId::current`].
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl From<Uuid> for TraceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
