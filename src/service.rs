//! Toast service.
//!
//! Holds the application identity and, once initialized, an open platform
//! session. Every step of initialization and posting is checked; the first
//! failure is returned and nothing after it runs.

use crate::error::{Result, ToastError};
use crate::handler::{ToastHandler, ToastId};
use crate::payload;
use crate::platform::{Platform, Session, SystemPlatform};
use crate::template::ToastTemplate;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

pub struct ToastService<P: Platform> {
    platform: P,
    app_name: String,
    app_user_model_id: String,
    session: Option<P::Session>,
}

impl<P: Platform> ToastService<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            app_name: String::new(),
            app_user_model_id: String::new(),
            session: None,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn set_app_name(&mut self, app_name: impl Into<String>) {
        self.app_name = app_name.into();
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn set_app_user_model_id(&mut self, aumi: impl Into<String>) {
        self.app_user_model_id = aumi.into();
    }

    pub fn app_user_model_id(&self) -> &str {
        &self.app_user_model_id
    }

    pub fn is_compatible(&self) -> bool {
        self.platform.is_compatible()
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Bind the process to the configured identity and open a session.
    /// On failure the service is left uninitialized.
    pub fn initialize(&mut self) -> Result<()> {
        self.session = None;

        if self.app_name.is_empty() || self.app_user_model_id.is_empty() {
            tracing::warn!("Toast initialization skipped: app name or AUMI not set");
            return Err(ToastError::MissingAppIdentity);
        }

        let missing = self.platform.missing_entry_points();
        if !missing.is_empty() {
            tracing::warn!("Toast platform is not compatible, missing {:?}", missing);
            return Err(ToastError::Incompatible(missing));
        }

        self.platform.set_process_app_id(&self.app_user_model_id)?;
        let session = self.platform.open(&self.app_user_model_id)?;
        self.session = Some(session);

        tracing::info!(
            "Toast service initialized for {} ({})",
            self.app_name,
            self.app_user_model_id
        );
        Ok(())
    }

    /// Build the payload for `template` and post it
    pub fn show_toast(&self, template: &ToastTemplate, handler: Arc<dyn ToastHandler>) -> Result<ToastId> {
        let session = self.session.as_ref().ok_or(ToastError::NotInitialized)?;

        let mut document = session.template_content(template.template_type())?;
        payload::compose(&mut document, template)?;

        let id = ToastId::new();
        session.show(document, id, handler)?;

        tracing::info!("Posted toast {} ({})", id, template.template_type());
        Ok(id)
    }
}

impl ToastService<SystemPlatform> {
    /// Process-wide service over the native platform, created on first use
    pub fn shared() -> &'static Mutex<ToastService<SystemPlatform>> {
        static SHARED: OnceLock<Mutex<ToastService<SystemPlatform>>> = OnceLock::new();
        SHARED.get_or_init(|| {
            tracing::debug!("Creating shared toast service");
            Mutex::new(ToastService::new(SystemPlatform::new()))
        })
    }
}
