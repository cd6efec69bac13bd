//! Native platform stand-in for hosts without the WinRT notification service.

use super::{EntryPoints, Platform, Session};
use crate::error::{Result, ToastError};
use crate::handler::{ToastHandler, ToastId};
use crate::payload::ToastMarkup;
use crate::template::TemplateType;
use std::sync::Arc;

#[derive(Debug)]
pub struct UnsupportedPlatform {
    entry_points: EntryPoints,
}

impl UnsupportedPlatform {
    pub fn new() -> Self {
        Self {
            entry_points: EntryPoints::load(),
        }
    }
}

impl Default for UnsupportedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for UnsupportedPlatform {
    type Session = UnsupportedSession;

    fn missing_entry_points(&self) -> Vec<String> {
        self.entry_points.missing().to_vec()
    }

    fn set_process_app_id(&self, aumi: &str) -> Result<()> {
        self.entry_points.set_current_process_app_id(aumi)
    }

    fn open(&self, _aumi: &str) -> Result<UnsupportedSession> {
        Err(ToastError::Incompatible(self.entry_points.missing().to_vec()))
    }
}

/// Never constructed
pub enum UnsupportedSession {}

impl Session for UnsupportedSession {
    type Document = ToastMarkup;

    fn template_content(&self, _template: TemplateType) -> Result<ToastMarkup> {
        match *self {}
    }

    fn show(&self, _document: ToastMarkup, _id: ToastId, _handler: Arc<dyn ToastHandler>) -> Result<()> {
        match *self {}
    }
}
