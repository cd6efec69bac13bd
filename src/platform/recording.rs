//! In-memory platform.
//! Records what would have been posted and lets the caller raise the toast
//! lifecycle events by hand.

use super::{Platform, Session};
use crate::error::{Result, ToastError};
use crate::handler::{DismissalReason, ToastHandler, ToastId};
use crate::payload::{PayloadDocument, ToastMarkup};
use crate::template::TemplateType;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Step at which the recording platform reports a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    SetAppId,
    Open,
    TemplateContent,
    Show,
}

/// A toast as the recording platform saw it
#[derive(Clone)]
pub struct PostedToast {
    pub id: ToastId,
    pub app_user_model_id: String,
    pub xml: String,
    pub posted_at: DateTime<Utc>,
    handler: Arc<dyn ToastHandler>,
}

impl std::fmt::Debug for PostedToast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostedToast")
            .field("id", &self.id)
            .field("app_user_model_id", &self.app_user_model_id)
            .field("xml", &self.xml)
            .field("posted_at", &self.posted_at)
            .finish()
    }
}

struct RecordingState {
    compatible: bool,
    failure: Option<FailurePoint>,
    process_app_id: Option<String>,
    sessions_opened: usize,
    posted: Vec<PostedToast>,
}

#[derive(Clone)]
pub struct RecordingPlatform {
    state: Arc<Mutex<RecordingState>>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RecordingState {
                compatible: true,
                failure: None,
                process_app_id: None,
                sessions_opened: 0,
                posted: Vec::new(),
            })),
        }
    }

    /// Platform that reports missing entry points
    pub fn incompatible() -> Self {
        let platform = Self::new();
        platform.state.lock().compatible = false;
        platform
    }

    pub fn fail_at(&self, point: FailurePoint) {
        self.state.lock().failure = Some(point);
    }

    pub fn clear_failure(&self) {
        self.state.lock().failure = None;
    }

    pub fn process_app_id(&self) -> Option<String> {
        self.state.lock().process_app_id.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.lock().sessions_opened
    }

    pub fn posted(&self) -> Vec<PostedToast> {
        self.state.lock().posted.clone()
    }

    pub fn activate(&self, id: ToastId) -> Result<()> {
        self.handler_for(id)?.activated(id);
        Ok(())
    }

    pub fn dismiss(&self, id: ToastId, reason: DismissalReason) -> Result<()> {
        self.handler_for(id)?.dismissed(id, reason);
        Ok(())
    }

    pub fn fail(&self, id: ToastId, error: &str) -> Result<()> {
        self.handler_for(id)?.failed(id, error);
        Ok(())
    }

    // Handlers run outside the lock so they may call back into the platform
    fn handler_for(&self, id: ToastId) -> Result<Arc<dyn ToastHandler>> {
        self.state
            .lock()
            .posted
            .iter()
            .find(|toast| toast.id == id)
            .map(|toast| toast.handler.clone())
            .ok_or_else(|| ToastError::InvalidArgument(format!("no posted toast {}", id)))
    }

    fn check(state: &RecordingState, point: FailurePoint) -> Result<()> {
        if state.failure == Some(point) {
            return Err(ToastError::Platform(format!("injected failure at {:?}", point)));
        }
        Ok(())
    }
}

impl Platform for RecordingPlatform {
    type Session = RecordingSession;

    fn missing_entry_points(&self) -> Vec<String> {
        if self.state.lock().compatible {
            Vec::new()
        } else {
            vec!["RoGetActivationFactory".to_string()]
        }
    }

    fn set_process_app_id(&self, aumi: &str) -> Result<()> {
        let mut state = self.state.lock();
        Self::check(&state, FailurePoint::SetAppId)?;
        state.process_app_id = Some(aumi.to_string());
        Ok(())
    }

    fn open(&self, aumi: &str) -> Result<RecordingSession> {
        let mut state = self.state.lock();
        Self::check(&state, FailurePoint::Open)?;
        state.sessions_opened += 1;
        Ok(RecordingSession {
            app_user_model_id: aumi.to_string(),
            state: self.state.clone(),
        })
    }
}

pub struct RecordingSession {
    app_user_model_id: String,
    state: Arc<Mutex<RecordingState>>,
}

impl Session for RecordingSession {
    type Document = ToastMarkup;

    fn template_content(&self, template: TemplateType) -> Result<ToastMarkup> {
        RecordingPlatform::check(&self.state.lock(), FailurePoint::TemplateContent)?;
        Ok(ToastMarkup::for_template(template))
    }

    fn show(&self, document: ToastMarkup, id: ToastId, handler: Arc<dyn ToastHandler>) -> Result<()> {
        let xml = document.to_xml()?;
        let mut state = self.state.lock();
        RecordingPlatform::check(&state, FailurePoint::Show)?;
        state.posted.push(PostedToast {
            id,
            app_user_model_id: self.app_user_model_id.clone(),
            xml,
            posted_at: Utc::now(),
            handler,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ToastEvent;

    #[test]
    fn test_records_posted_toast() {
        let platform = RecordingPlatform::new();
        let session = platform.open("Example.App").unwrap();
        let id = ToastId::new();
        let doc = session.template_content(TemplateType::Text01).unwrap();
        session.show(doc, id, Arc::new(|_: ToastEvent| {})).unwrap();

        let posted = platform.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].id, id);
        assert_eq!(posted[0].app_user_model_id, "Example.App");
        assert!(posted[0].xml.contains("ToastText01"));
    }

    #[test]
    fn test_events_for_unknown_toast() {
        let platform = RecordingPlatform::new();
        assert!(platform.activate(ToastId::new()).is_err());
    }

    #[test]
    fn test_injected_failures() {
        let platform = RecordingPlatform::new();
        platform.fail_at(FailurePoint::Open);
        assert!(platform.open("Example.App").is_err());
        assert_eq!(platform.sessions_opened(), 0);

        platform.clear_failure();
        assert!(platform.open("Example.App").is_ok());
        assert_eq!(platform.sessions_opened(), 1);
    }
}
