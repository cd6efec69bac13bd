//! Native Windows toast notifications.
//!
//! ```ignore
//! use std::sync::Arc;
//! use wintoast::{ChannelHandler, TemplateType, TextField, ToastService, ToastTemplate};
//!
//! let mut service = ToastService::shared().lock();
//! service.set_app_name("Example");
//! service.set_app_user_model_id("Example.App");
//! service.initialize()?;
//!
//! let mut template = ToastTemplate::new(TemplateType::Text02);
//! template.set_text_field("Build finished", TextField::FirstLine)?;
//! template.set_text_field("3 warnings", TextField::SecondLine)?;
//!
//! let (handler, mut events) = ChannelHandler::new();
//! service.show_toast(&template, Arc::new(handler))?;
//! ```

pub mod aumid;
pub mod config;
pub mod error;
pub mod handler;
pub mod payload;
pub mod platform;
pub mod service;
pub mod shortcut;
pub mod template;

pub use config::ToastConfig;
pub use error::{Result, ToastError};
pub use handler::{ChannelHandler, DismissalReason, ToastEvent, ToastHandler, ToastId};
pub use payload::{PayloadDocument, ToastMarkup};
pub use platform::{Platform, RecordingPlatform, Session, SystemPlatform};
pub use service::ToastService;
pub use template::{TemplateType, TextField, ToastTemplate};
