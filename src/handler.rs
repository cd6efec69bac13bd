//! Toast lifecycle callbacks.
//!
//! The notification service raises these on its own threads, so handlers must
//! be `Send + Sync`. [`ChannelHandler`] moves them onto a tokio channel for
//! callers that would rather `await` them.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifier assigned to each posted toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a toast left the screen without being activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalReason {
    UserCanceled,
    ApplicationHidden,
    TimedOut,
    /// A value newer than the three documented reasons
    Other(i32),
}

impl DismissalReason {
    /// Map a raw `ToastDismissalReason` value
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::UserCanceled,
            1 => Self::ApplicationHidden,
            2 => Self::TimedOut,
            other => Self::Other(other),
        }
    }
}

impl std::fmt::Display for DismissalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserCanceled => write!(f, "user canceled"),
            Self::ApplicationHidden => write!(f, "application hidden"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Other(raw) => write!(f, "reason {}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToastEvent {
    Activated { id: ToastId },
    Dismissed { id: ToastId, reason: DismissalReason },
    Failed { id: ToastId, error: String },
}

impl ToastEvent {
    pub fn id(&self) -> ToastId {
        match self {
            Self::Activated { id } | Self::Dismissed { id, .. } | Self::Failed { id, .. } => *id,
        }
    }
}

/// Receives the lifecycle of posted toasts
pub trait ToastHandler: Send + Sync {
    fn activated(&self, id: ToastId);
    fn dismissed(&self, id: ToastId, reason: DismissalReason);
    fn failed(&self, id: ToastId, error: &str);
}

impl<F> ToastHandler for F
where
    F: Fn(ToastEvent) + Send + Sync,
{
    fn activated(&self, id: ToastId) {
        self(ToastEvent::Activated { id })
    }

    fn dismissed(&self, id: ToastId, reason: DismissalReason) {
        self(ToastEvent::Dismissed { id, reason })
    }

    fn failed(&self, id: ToastId, error: &str) {
        self(ToastEvent::Failed {
            id,
            error: error.to_string(),
        })
    }
}

/// Forwards callbacks into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelHandler {
    tx: mpsc::UnboundedSender<ToastEvent>,
}

impl ChannelHandler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ToastEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: ToastEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Toast event receiver dropped");
        }
    }
}

impl ToastHandler for ChannelHandler {
    fn activated(&self, id: ToastId) {
        self.forward(ToastEvent::Activated { id });
    }

    fn dismissed(&self, id: ToastId, reason: DismissalReason) {
        self.forward(ToastEvent::Dismissed { id, reason });
    }

    fn failed(&self, id: ToastId, error: &str) {
        self.forward(ToastEvent::Failed {
            id,
            error: error.to_string(),
        });
    }
}
