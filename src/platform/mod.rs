//! Platform binding behind a narrow interface.
//!
//! A [`Platform`] binds the process to an application identity and opens a
//! [`Session`]; a session hands out template documents and posts them. The
//! WinRT binding is the native implementation; [`RecordingPlatform`] stands in
//! for it in tests and on hosts without a notification service.

pub mod entry_points;
mod recording;
#[cfg(not(windows))]
mod unsupported;
#[cfg(windows)]
mod winrt;

pub use entry_points::EntryPoints;
pub use recording::{FailurePoint, PostedToast, RecordingPlatform, RecordingSession};
#[cfg(not(windows))]
pub use unsupported::{UnsupportedPlatform, UnsupportedSession};
#[cfg(windows)]
pub use winrt::{WinRtDocument, WinRtPlatform, WinRtSession};

use crate::error::Result;
use crate::handler::{ToastHandler, ToastId};
use crate::payload::PayloadDocument;
use crate::template::TemplateType;
use std::sync::Arc;

/// Native platform for this target
#[cfg(windows)]
pub type SystemPlatform = WinRtPlatform;
#[cfg(not(windows))]
pub type SystemPlatform = UnsupportedPlatform;

pub trait Platform {
    type Session: Session;

    /// Required OS entry points that could not be resolved
    fn missing_entry_points(&self) -> Vec<String>;

    fn is_compatible(&self) -> bool {
        self.missing_entry_points().is_empty()
    }

    /// Associate the current process with `aumi`
    fn set_process_app_id(&self, aumi: &str) -> Result<()>;

    /// Acquire the notification manager, notifier and notification factory
    fn open(&self, aumi: &str) -> Result<Self::Session>;
}

pub trait Session {
    type Document: PayloadDocument;

    /// Skeleton document for `template`
    fn template_content(&self, template: TemplateType) -> Result<Self::Document>;

    /// Create a notification from `document`, register the activated, dismissed
    /// and failed handlers in that order, then post it
    fn show(&self, document: Self::Document, id: ToastId, handler: Arc<dyn ToastHandler>) -> Result<()>;
}
