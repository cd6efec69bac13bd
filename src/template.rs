//! Toast content templates.
//! Mirrors the eight legacy `ToastTemplateType` layouts the notification manager
//! hands out: four with an image slot, four text-only.

use crate::error::{Result, ToastError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Text slots per template, indexed by the raw template value
const TEXT_FIELDS_COUNT: [usize; 8] = [1, 2, 2, 3, 1, 2, 2, 3];

/// Legacy toast layouts, in platform order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateType {
    ImageAndText01,
    ImageAndText02,
    ImageAndText03,
    ImageAndText04,
    Text01,
    Text02,
    Text03,
    Text04,
}

impl TemplateType {
    pub const ALL: [TemplateType; 8] = [
        Self::ImageAndText01,
        Self::ImageAndText02,
        Self::ImageAndText03,
        Self::ImageAndText04,
        Self::Text01,
        Self::Text02,
        Self::Text03,
        Self::Text04,
    ];

    /// Raw `ToastTemplateType` value
    pub fn raw(self) -> i32 {
        self as i32
    }

    pub fn text_fields_count(self) -> usize {
        TEXT_FIELDS_COUNT[self as usize]
    }

    /// Image layouts are ordered before the first text-only one
    pub fn has_image(self) -> bool {
        self.raw() < Self::Text01.raw()
    }

    /// Name used in the `template` attribute of the payload's `<binding>`
    pub fn binding_name(self) -> &'static str {
        match self {
            Self::ImageAndText01 => "ToastImageAndText01",
            Self::ImageAndText02 => "ToastImageAndText02",
            Self::ImageAndText03 => "ToastImageAndText03",
            Self::ImageAndText04 => "ToastImageAndText04",
            Self::Text01 => "ToastText01",
            Self::Text02 => "ToastText02",
            Self::Text03 => "ToastText03",
            Self::Text04 => "ToastText04",
        }
    }

    /// Pick the smallest layout that fits `lines` of text.
    /// Three lines need the `04` layouts; `03` wraps its first line instead.
    pub fn for_content(lines: usize, with_image: bool) -> Result<Self> {
        let template = match (lines, with_image) {
            (1, true) => Self::ImageAndText01,
            (2, true) => Self::ImageAndText02,
            (3, true) => Self::ImageAndText04,
            (1, false) => Self::Text01,
            (2, false) => Self::Text02,
            (3, false) => Self::Text04,
            _ => {
                return Err(ToastError::InvalidTemplate(format!(
                    "no layout holds {} lines of text",
                    lines
                )))
            }
        };
        Ok(template)
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binding_name())
    }
}

/// Text slot within a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextField {
    FirstLine,
    SecondLine,
    ThirdLine,
}

impl TextField {
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn from_position(pos: usize) -> Option<Self> {
        match pos {
            0 => Some(Self::FirstLine),
            1 => Some(Self::SecondLine),
            2 => Some(Self::ThirdLine),
            _ => None,
        }
    }
}

/// Content of a single toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateSpec")]
pub struct ToastTemplate {
    template_type: TemplateType,
    text_fields: Vec<String>,
    image_path: Option<PathBuf>,
    silent: bool,
}

impl ToastTemplate {
    pub fn new(template_type: TemplateType) -> Self {
        Self {
            template_type,
            text_fields: vec![String::new(); template_type.text_fields_count()],
            image_path: None,
            silent: false,
        }
    }

    pub fn set_text_field(&mut self, text: impl Into<String>, field: TextField) -> Result<()> {
        let count = self.text_fields.len();
        let template_type = self.template_type;
        let slot = self.text_fields.get_mut(field.position()).ok_or_else(|| {
            ToastError::InvalidTemplate(format!(
                "{} has {} text field(s), cannot set {:?}",
                template_type, count, field
            ))
        })?;
        *slot = text.into();
        Ok(())
    }

    /// No-op for text-only layouts
    pub fn set_image_path(&mut self, path: impl Into<PathBuf>) {
        if !self.has_image() {
            tracing::debug!("Ignoring image path for {}", self.template_type);
            return;
        }
        self.image_path = Some(path.into());
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn template_type(&self) -> TemplateType {
        self.template_type
    }

    pub fn text_fields_count(&self) -> usize {
        self.text_fields.len()
    }

    pub fn text_field(&self, field: TextField) -> Option<&str> {
        self.text_fields.get(field.position()).map(String::as_str)
    }

    pub fn text_fields(&self) -> &[String] {
        &self.text_fields
    }

    pub fn has_image(&self) -> bool {
        self.template_type.has_image()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }
}

/// Deserialization shape; validated into a [`ToastTemplate`]
#[derive(Deserialize)]
struct TemplateSpec {
    template_type: TemplateType,
    #[serde(default)]
    text_fields: Vec<String>,
    #[serde(default)]
    image_path: Option<PathBuf>,
    #[serde(default)]
    silent: bool,
}

impl TryFrom<TemplateSpec> for ToastTemplate {
    type Error = ToastError;

    fn try_from(spec: TemplateSpec) -> Result<Self> {
        let mut template = ToastTemplate::new(spec.template_type);
        for (pos, text) in spec.text_fields.into_iter().enumerate() {
            let field = TextField::from_position(pos).ok_or_else(|| {
                ToastError::InvalidTemplate(format!("text field {} is out of range", pos))
            })?;
            template.set_text_field(text, field)?;
        }
        if let Some(path) = spec.image_path {
            template.set_image_path(path);
        }
        template.set_silent(spec.silent);
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_counts() {
        let counts: Vec<usize> = TemplateType::ALL.iter().map(|t| t.text_fields_count()).collect();
        assert_eq!(counts, vec![1, 2, 2, 3, 1, 2, 2, 3]);
    }

    #[test]
    fn test_image_layouts() {
        assert!(TemplateType::ImageAndText01.has_image());
        assert!(TemplateType::ImageAndText04.has_image());
        assert!(!TemplateType::Text01.has_image());
        assert!(!TemplateType::Text04.has_image());
    }

    #[test]
    fn test_raw_values_follow_layout_order() {
        assert_eq!(TemplateType::Text02.raw(), 5);
        for (index, template) in TemplateType::ALL.iter().enumerate() {
            assert_eq!(template.raw(), index as i32);
        }
    }

    #[test]
    fn test_new_template_has_empty_fields() {
        let template = ToastTemplate::new(TemplateType::Text04);
        assert_eq!(template.text_fields(), &["", "", ""]);
        assert!(!template.is_silent());
        assert!(template.image_path().is_none());
    }

    #[test]
    fn test_set_text_field_out_of_range() {
        let mut template = ToastTemplate::new(TemplateType::Text01);
        template.set_text_field("Hello", TextField::FirstLine).unwrap();
        assert!(matches!(
            template.set_text_field("World", TextField::SecondLine),
            Err(ToastError::InvalidTemplate(_))
        ));
        assert_eq!(template.text_field(TextField::FirstLine), Some("Hello"));
    }

    #[test]
    fn test_image_path_ignored_without_image_slot() {
        let mut text_only = ToastTemplate::new(TemplateType::Text02);
        text_only.set_image_path(r"C:\icons\app.png");
        assert!(text_only.image_path().is_none());

        let mut with_image = ToastTemplate::new(TemplateType::ImageAndText02);
        with_image.set_image_path(r"C:\icons\app.png");
        assert_eq!(with_image.image_path(), Some(Path::new(r"C:\icons\app.png")));
    }

    #[test]
    fn test_for_content() {
        assert_eq!(TemplateType::for_content(1, false).unwrap(), TemplateType::Text01);
        assert_eq!(TemplateType::for_content(3, false).unwrap(), TemplateType::Text04);
        assert_eq!(TemplateType::for_content(2, true).unwrap(), TemplateType::ImageAndText02);
        assert!(TemplateType::for_content(0, false).is_err());
        assert!(TemplateType::for_content(4, true).is_err());
    }

    #[test]
    fn test_deserialize_validates_fields() {
        let template: ToastTemplate = serde_json::from_str(
            r#"{"template_type":"Text02","text_fields":["Build finished"],"silent":true}"#,
        )
        .unwrap();
        assert_eq!(template.text_fields(), &["Build finished", ""]);
        assert!(template.is_silent());

        let too_many = serde_json::from_str::<ToastTemplate>(
            r#"{"template_type":"Text01","text_fields":["a","b"]}"#,
        );
        assert!(too_many.is_err());
    }
}
