//! Wrap captioned images in `<figure>`.
//!
//! ```html
//! <img src="a.jpg" alt="Sunset">
//! <!-- becomes -->
//! <figure class="image-caption"><img src="a.jpg" alt="Sunset"><figcaption>Sunset</figcaption></figure>
//! ```
//!
//! Matching is a single regex pass, not an HTML parse. The original tag is
//! copied byte-for-byte and the alt text is reused as-is, since it is
//! already escaped in rendered HTML.

use std::borrow::Cow;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::{ContentFilter, Document};
use crate::config::ImageCaptionConfig;
use crate::utils::html::escape_attr;

/// Layouts whose content is rewritten.
pub const CAPTION_LAYOUTS: [&str; 3] = ["post", "page", "about"];

/// `<img ... alt="..." ...>` with a non-empty alt.
static IMG_WITH_ALT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img([^>]*?)\salt="([^"]+)"([^>]*)>"#).unwrap());

pub struct ImageCaption {
    enable: bool,
    open: String,
}

impl ImageCaption {
    pub fn new(enable: bool, class_name: &str) -> Self {
        Self {
            enable,
            open: format!(r#"<figure class="{}">"#, escape_attr(class_name)),
        }
    }

    pub fn from_config(config: &ImageCaptionConfig) -> Self {
        Self::new(config.enable, &config.class_name)
    }

    /// Whether documents with `layout` are rewritten.
    pub fn applies_to(&self, layout: &str) -> bool {
        self.enable && CAPTION_LAYOUTS.contains(&layout)
    }

    /// Wrap every captioned `<img>` in `content`.
    ///
    /// Borrows when nothing matched. Tags already wrapped by this filter
    /// are left alone.
    pub fn wrap_captions<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let mut result: Option<String> = None;
        let mut last = 0;

        for caps in IMG_WITH_ALT.captures_iter(content) {
            let Some(tag) = caps.get(0) else { continue };
            let alt = caps.get(2).map_or("", |m| m.as_str());

            if self.is_wrapped(content, tag.start(), tag.end()) {
                continue;
            }

            let out = result.get_or_insert_with(|| String::with_capacity(content.len() + 128));
            out.push_str(&content[last..tag.start()]);
            out.push_str(&self.open);
            out.push_str(tag.as_str());
            out.push_str("<figcaption>");
            out.push_str(alt);
            out.push_str("</figcaption></figure>");
            last = tag.end();
        }

        match result {
            Some(mut out) => {
                out.push_str(&content[last..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(content),
        }
    }

    fn is_wrapped(&self, content: &str, start: usize, end: usize) -> bool {
        content[..start].ends_with(self.open.as_str())
            && content[end..].starts_with("<figcaption>")
    }
}

impl ContentFilter for ImageCaption {
    fn name(&self) -> &'static str {
        "caption"
    }

    fn after_render(&self, mut doc: Document) -> Result<Document> {
        if !self.applies_to(&doc.layout) {
            return Ok(doc);
        }
        if let Cow::Owned(rewritten) = self.wrap_captions(&doc.content) {
            doc.content = rewritten;
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption() -> ImageCaption {
        ImageCaption::from_config(&ImageCaptionConfig::default())
    }

    #[test]
    fn test_wraps_img_with_alt() {
        let doc = Document::new(r#"<p><img src="a.jpg" alt="Sunset"></p>"#, "post");

        let out = caption().after_render(doc).unwrap();

        assert_eq!(
            out.content,
            r#"<p><figure class="image-caption"><img src="a.jpg" alt="Sunset"><figcaption>Sunset</figcaption></figure></p>"#
        );
    }

    #[test]
    fn test_keeps_attributes_after_alt() {
        let input = r#"<img class="x" alt="A cat" width="10" />"#;
        assert_eq!(
            caption().wrap_captions(input),
            r#"<figure class="image-caption"><img class="x" alt="A cat" width="10" /><figcaption>A cat</figcaption></figure>"#
        );
    }

    #[test]
    fn test_multiple_images() {
        let input = r#"<img alt="one"> text <img src="b" alt="two">"#;
        let out = caption().wrap_captions(input);
        assert_eq!(out.matches("<figcaption>").count(), 2);
        assert!(out.contains("<figcaption>one</figcaption>"));
        assert!(out.contains("<figcaption>two</figcaption>"));
    }

    #[test]
    fn test_missing_or_empty_alt_untouched() {
        let input = r#"<img src="a.jpg"><img src="b.jpg" alt="">"#;
        assert!(matches!(caption().wrap_captions(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_data_alt_not_matched() {
        // `alt` must be preceded by whitespace
        let input = r#"<img src="a.jpg" data-alt="nope">"#;
        assert_eq!(caption().wrap_captions(input), input);
    }

    #[test]
    fn test_other_layouts_untouched() {
        let html = r#"<img src="a.jpg" alt="Sunset">"#;
        let out = caption().after_render(Document::new(html, "index")).unwrap();
        assert_eq!(out.content, html);

        for layout in CAPTION_LAYOUTS {
            let out = caption().after_render(Document::new(html, layout)).unwrap();
            assert!(out.content.contains("<figcaption>"), "layout {layout}");
        }
    }

    #[test]
    fn test_disabled_flag() {
        let filter = ImageCaption::new(false, "image-caption");
        let html = r#"<img src="a.jpg" alt="Sunset">"#;
        let out = filter.after_render(Document::new(html, "post")).unwrap();
        assert_eq!(out.content, html);
    }

    #[test]
    fn test_idempotent() {
        let filter = caption();
        let once = filter.wrap_captions(r#"<img src="a.jpg" alt="Sunset">"#).into_owned();
        let twice = filter.wrap_captions(&once);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_custom_class_is_escaped() {
        let filter = ImageCaption::new(true, r#"fig" onload="x"#);
        let out = filter.wrap_captions(r#"<img alt="a">"#);
        assert!(out.starts_with(r#"<figure class="fig&quot; onload=&quot;x">"#));
    }

    #[test]
    fn test_output_is_superset_of_input() {
        let input = r#"<h1>T</h1><img src="a.png" alt="x &amp; y"><p>after</p>"#;
        let out = caption().wrap_captions(input);
        let stripped = out
            .replace(r#"<figure class="image-caption">"#, "")
            .replace("<figcaption>x &amp; y</figcaption></figure>", "");
        assert_eq!(stripped, input);
    }
}
