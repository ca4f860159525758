#![forbid(unsafe_code)]

use crate::{DownloadProgress, StatusEvent, WorkerEvent};

/// Everything emitted on the [`EventBus`](crate::EventBus).
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Message destined for the host as-is.
    Worker(WorkerEvent),
    /// Structured download progress; reaches the host as a `loading` message.
    Download(DownloadProgress),
}

impl Event {
    /// The host-facing form of this event.
    #[must_use]
    pub fn to_worker_event(&self) -> WorkerEvent {
        match self {
            Self::Worker(event) => event.clone(),
            Self::Download(progress) => WorkerEvent::loading(progress.message()),
        }
    }
}

impl From<WorkerEvent> for Event {
    fn from(e: WorkerEvent) -> Self {
        Self::Worker(e)
    }
}

impl From<StatusEvent> for Event {
    fn from(e: StatusEvent) -> Self {
        Self::Worker(e.into())
    }
}

impl From<DownloadProgress> for Event {
    fn from(p: DownloadProgress) -> Self {
        Self::Download(p)
    }
}
