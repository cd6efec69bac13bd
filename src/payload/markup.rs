//! Portable toast document.
//! Holds the same skeleton the notification manager returns for each legacy
//! template and applies the same mutations, without touching the OS XML DOM.

use super::PayloadDocument;
use crate::error::{Result, ToastError};
use crate::template::TemplateType;
use quick_xml::escape::escape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMarkup {
    template_type: TemplateType,
    /// `src` of the single `<image>` element, present only for image layouts
    image_src: Option<String>,
    texts: Vec<String>,
    silent: bool,
}

impl ToastMarkup {
    /// Skeleton document for `template_type`
    pub fn for_template(template_type: TemplateType) -> Self {
        Self {
            template_type,
            image_src: template_type.has_image().then(String::new),
            texts: vec![String::new(); template_type.text_fields_count()],
            silent: false,
        }
    }

    pub fn template_type(&self) -> TemplateType {
        self.template_type
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    fn render(&self) -> String {
        let mut xml = String::from("<toast><visual>");
        xml.push_str(&format!(
            "<binding template=\"{}\">",
            self.template_type.binding_name()
        ));
        if let Some(src) = &self.image_src {
            xml.push_str(&format!("<image id=\"1\" src=\"{}\"/>", escape(src.as_str())));
        }
        for (i, text) in self.texts.iter().enumerate() {
            xml.push_str(&format!("<text id=\"{}\">{}</text>", i + 1, escape(text.as_str())));
        }
        xml.push_str("</binding></visual>");
        if self.silent {
            xml.push_str("<audio silent=\"true\"/>");
        }
        xml.push_str("</toast>");
        xml
    }
}

impl PayloadDocument for ToastMarkup {
    fn set_text(&mut self, position: usize, text: &str) -> Result<()> {
        let count = self.texts.len();
        let node = self.texts.get_mut(position).ok_or_else(|| {
            ToastError::Payload(format!(
                "<text> element {} not found ({} present)",
                position, count
            ))
        })?;
        node.push_str(text);
        Ok(())
    }

    fn make_silent(&mut self) -> Result<()> {
        self.silent = true;
        Ok(())
    }

    fn set_image_src(&mut self, uri: &str) -> Result<()> {
        let template_type = self.template_type;
        let src = self.image_src.as_mut().ok_or_else(|| {
            ToastError::Payload(format!("{} has no <image> element", template_type))
        })?;
        src.push_str(uri);
        Ok(())
    }

    fn to_xml(&self) -> Result<String> {
        Ok(self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_skeleton() {
        let markup = ToastMarkup::for_template(TemplateType::Text02);
        assert_eq!(
            markup.to_xml().unwrap(),
            "<toast><visual><binding template=\"ToastText02\">\
             <text id=\"1\"></text><text id=\"2\"></text>\
             </binding></visual></toast>"
        );
    }

    #[test]
    fn test_image_skeleton() {
        let markup = ToastMarkup::for_template(TemplateType::ImageAndText01);
        assert_eq!(
            markup.to_xml().unwrap(),
            "<toast><visual><binding template=\"ToastImageAndText01\">\
             <image id=\"1\" src=\"\"/><text id=\"1\"></text>\
             </binding></visual></toast>"
        );
    }

    #[test]
    fn test_mutations_are_escaped() {
        let mut markup = ToastMarkup::for_template(TemplateType::ImageAndText01);
        markup.set_text(0, "Tom & Jerry <3").unwrap();
        markup.set_image_src("file:///C:/a\"b.png").unwrap();
        markup.make_silent().unwrap();

        let xml = markup.to_xml().unwrap();
        assert!(xml.contains("<text id=\"1\">Tom &amp; Jerry &lt;3</text>"));
        assert!(xml.contains("src=\"file:///C:/a&quot;b.png\""));
        assert!(xml.ends_with("</visual><audio silent=\"true\"/></toast>"));
    }

    #[test]
    fn test_text_appends() {
        let mut markup = ToastMarkup::for_template(TemplateType::Text01);
        markup.set_text(0, "Hello, ").unwrap();
        markup.set_text(0, "world").unwrap();
        assert_eq!(markup.texts(), &["Hello, world"]);
    }

    #[test]
    fn test_missing_elements() {
        let mut markup = ToastMarkup::for_template(TemplateType::Text01);
        assert!(markup.set_text(1, "nope").is_err());
        assert!(markup.set_image_src("file:///x.png").is_err());
    }
}
