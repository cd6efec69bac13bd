//! Toast payload construction.
//!
//! The platform hands out a skeleton XML document per template type; the
//! template's content is written into it one guarded step at a time. The first
//! failing step aborts the rest.

mod markup;

pub use markup::ToastMarkup;

use crate::error::{Result, ToastError};
use crate::template::ToastTemplate;
use std::path::Path;

/// Longest path the platform accepts, terminator included
pub const MAX_PATH: usize = 260;

const FILE_URI_PREFIX: &str = "file:///";

/// XML document backing a single toast
pub trait PayloadDocument {
    /// Append `text` to the `position`-th `<text>` element
    fn set_text(&mut self, position: usize, text: &str) -> Result<()>;

    /// Append `<audio silent="true"/>` to the `<toast>` root
    fn make_silent(&mut self) -> Result<()>;

    /// Append `uri` to the `src` attribute of the first `<image>` element
    fn set_image_src(&mut self, uri: &str) -> Result<()>;

    fn to_xml(&self) -> Result<String>;
}

/// Write the template's content into `document`
pub fn compose<D: PayloadDocument + ?Sized>(document: &mut D, template: &ToastTemplate) -> Result<()> {
    for (position, text) in template.text_fields().iter().enumerate() {
        tracing::debug!("Setting text field {}", position);
        document.set_text(position, text)?;
    }

    if template.is_silent() {
        tracing::debug!("Marking toast silent");
        document.make_silent()?;
    }

    if template.has_image() {
        if let Some(path) = template.image_path() {
            let uri = image_uri(path)?;
            tracing::debug!("Setting image source: {}", uri);
            document.set_image_src(&uri)?;
        }
    }

    Ok(())
}

/// `file:///` URI for a local image, bounded by [`MAX_PATH`]
pub fn image_uri(path: &Path) -> Result<String> {
    let uri = format!("{}{}", FILE_URI_PREFIX, path.display());
    let units = uri.encode_utf16().count() + 1;
    if units > MAX_PATH {
        return Err(ToastError::PathTooLong(units));
    }
    Ok(uri)
}
