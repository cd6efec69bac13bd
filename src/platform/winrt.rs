//! WinRT notification binding.
//! - Windows.UI.Notifications for the manager, notifier and toast objects
//! - Windows.Data.Xml.Dom for the payload document

use super::{EntryPoints, Platform, Session};
use crate::error::{Result, ToastError};
use crate::handler::{DismissalReason, ToastHandler, ToastId};
use crate::payload::PayloadDocument;
use crate::template::TemplateType;
use std::sync::Arc;
use windows::{
    core::{AgileReference, IInspectable, Interface, HSTRING},
    Data::Xml::Dom::{IXmlNode, XmlDocument, XmlElement},
    Foundation::TypedEventHandler,
    UI::Notifications::{
        IToastNotificationFactory, ToastDismissedEventArgs, ToastFailedEventArgs,
        ToastNotification, ToastNotificationManager, ToastNotifier, ToastTemplateType,
    },
};

#[derive(Debug)]
pub struct WinRtPlatform {
    entry_points: EntryPoints,
}

impl WinRtPlatform {
    pub fn new() -> Self {
        Self {
            entry_points: EntryPoints::load(),
        }
    }
}

impl Default for WinRtPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WinRtPlatform {
    type Session = WinRtSession;

    fn missing_entry_points(&self) -> Vec<String> {
        self.entry_points.missing().to_vec()
    }

    fn set_process_app_id(&self, aumi: &str) -> Result<()> {
        self.entry_points.set_current_process_app_id(aumi)
    }

    fn open(&self, aumi: &str) -> Result<WinRtSession> {
        let notifier = ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(aumi))
            .map_err(|e| ToastError::Platform(format!("Failed to create toast notifier: {}", e)))?;
        tracing::debug!("Created toast notifier for {}", aumi);

        let factory = windows::core::imp::factory::<ToastNotification, IToastNotificationFactory>()
            .and_then(|factory| AgileReference::new(&factory))
            .map_err(|e| ToastError::Platform(format!("Failed to get toast notification factory: {}", e)))?;

        Ok(WinRtSession { notifier, factory })
    }
}

pub struct WinRtSession {
    notifier: ToastNotifier,
    factory: AgileReference<IToastNotificationFactory>,
}

impl Session for WinRtSession {
    type Document = WinRtDocument;

    fn template_content(&self, template: TemplateType) -> Result<WinRtDocument> {
        let document = ToastNotificationManager::GetTemplateContent(ToastTemplateType(template.raw()))
            .map_err(|e| ToastError::Platform(format!("Failed to get {} content: {}", template, e)))?;
        Ok(WinRtDocument { document })
    }

    fn show(&self, document: WinRtDocument, id: ToastId, handler: Arc<dyn ToastHandler>) -> Result<()> {
        let toast = self
            .factory
            .resolve()
            .and_then(|factory| factory.CreateToastNotification(&document.document))
            .map_err(|e| ToastError::Platform(format!("Failed to create toast: {}", e)))?;

        register_handlers(&toast, id, handler)?;

        self.notifier
            .Show(&toast)
            .map_err(|e| ToastError::Platform(format!("Failed to show toast: {}", e)))?;
        Ok(())
    }
}

fn register_handlers(toast: &ToastNotification, id: ToastId, handler: Arc<dyn ToastHandler>) -> Result<()> {
    let on_activated = handler.clone();
    toast.Activated(&TypedEventHandler::<ToastNotification, IInspectable>::new(
        move |_, _| {
            on_activated.activated(id);
            Ok(())
        },
    ))?;

    let on_dismissed = handler.clone();
    toast.Dismissed(&TypedEventHandler::<ToastNotification, ToastDismissedEventArgs>::new(
        move |_, args: &Option<ToastDismissedEventArgs>| {
            let Some(args) = args else {
                return Ok(());
            };
            match args.Reason() {
                Ok(reason) => on_dismissed.dismissed(id, DismissalReason::from_raw(reason.0)),
                Err(e) => tracing::warn!("Toast {} dismissal reason unavailable: {}", id, e),
            }
            Ok(())
        },
    ))?;

    let on_failed = handler;
    toast.Failed(&TypedEventHandler::<ToastNotification, ToastFailedEventArgs>::new(
        move |_, args: &Option<ToastFailedEventArgs>| {
            let error = args
                .as_ref()
                .and_then(|args| args.ErrorCode().ok())
                .map(|code| code.message())
                .unwrap_or_else(|| "unknown error".to_string());
            on_failed.failed(id, &error);
            Ok(())
        },
    ))?;

    Ok(())
}

/// Payload document backed by the OS XML DOM
pub struct WinRtDocument {
    document: XmlDocument,
}

impl WinRtDocument {
    fn element(&self, tag: &str, index: usize) -> Result<IXmlNode> {
        let nodes = self.document.GetElementsByTagName(&HSTRING::from(tag))?;
        let count = nodes.Length()? as usize;
        if index >= count {
            return Err(ToastError::Payload(format!(
                "<{}> element {} not found ({} present)",
                tag, index, count
            )));
        }
        Ok(nodes.Item(index as u32)?)
    }
}

impl PayloadDocument for WinRtDocument {
    fn set_text(&mut self, position: usize, text: &str) -> Result<()> {
        let node = self.element("text", position)?;
        let text_node = self.document.CreateTextNode(&HSTRING::from(text))?;
        node.AppendChild(&text_node.cast::<IXmlNode>()?)?;
        Ok(())
    }

    fn make_silent(&mut self) -> Result<()> {
        let root = self.element("toast", 0)?;
        let audio = self.document.CreateElement(&HSTRING::from("audio"))?;
        audio.SetAttribute(&HSTRING::from("silent"), &HSTRING::from("true"))?;
        root.AppendChild(&audio.cast::<IXmlNode>()?)?;
        Ok(())
    }

    fn set_image_src(&mut self, uri: &str) -> Result<()> {
        let image = self.element("image", 0)?.cast::<XmlElement>()?;
        let name = HSTRING::from("src");
        let current = image.GetAttribute(&name)?.to_string();
        image.SetAttribute(&name, &HSTRING::from(format!("{}{}", current, uri)))?;
        Ok(())
    }

    fn to_xml(&self) -> Result<String> {
        Ok(self.document.GetXml()?.to_string())
    }
}
