#![forbid(unsafe_code)]

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Progress and terminal states reported to the host, tagged by `status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusEvent {
    /// Setup phase description or a download progress report.
    Loading { message: String },
    /// One token was generated.
    #[serde(rename_all = "camelCase")]
    Generating {
        message: String,
        token: String,
        sentence: String,
        /// Milliseconds since generation started.
        total_time: f64,
        tokens_sec: f64,
        prompt: String,
    },
    /// Generation ended on end-of-sequence or budget exhaustion.
    Complete { message: String, output: String },
    /// Generation was cancelled by the host.
    Aborted { message: String, output: String },
}

/// Everything the worker sends to the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerEvent {
    Status(StatusEvent),
    /// Unrecoverable failure of a `start` request.
    Error { error: String },
}

impl WorkerEvent {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::Status(StatusEvent::Loading {
            message: message.into(),
        })
    }

    pub fn complete(output: impl Into<String>) -> Self {
        Self::Status(StatusEvent::Complete {
            message: "complete".to_owned(),
            output: output.into(),
        })
    }

    pub fn aborted(output: impl Into<String>) -> Self {
        Self::Status(StatusEvent::Aborted {
            message: "Aborted".to_owned(),
            output: output.into(),
        })
    }

    pub fn error(err: &impl Display) -> Self {
        Self::Error {
            error: err.to_string(),
        }
    }

    /// `complete`, `aborted` and `error` end a request; nothing follows them.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Error { .. }
                | Self::Status(StatusEvent::Complete { .. } | StatusEvent::Aborted { .. })
        )
    }

    /// # Errors
    ///
    /// Only fails if serialization itself fails, which plain data cannot.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<StatusEvent> for WorkerEvent {
    fn from(status: StatusEvent) -> Self {
        Self::Status(status)
    }
}
