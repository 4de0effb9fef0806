//! Markup emission.
//!
//! Generators describe an element as a [`Markup`] value; rendering it is the
//! only place text and attribute values are escaped.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Elements that never take content or a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "input", "hr", "br", "source", "meta"];

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Derived element description of a building block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    pub tag: String,
    /// Literal text content, escaped on render
    pub text: String,
    pub classes: Vec<String>,
    pub styles: IndexMap<String, String>,
    /// HTML attributes other than class/style; an empty value renders as a bare flag
    pub attributes: IndexMap<String, String>,
    /// Nested elements rendered after the text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Markup>,
}

impl Markup {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add class tokens, keeping first-seen order and skipping duplicates.
    pub fn add_class(&mut self, classes: &str) {
        for token in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == token) {
                self.classes.push(token.to_string());
            }
        }
    }

    pub fn child(&mut self, child: Markup) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn remove_class(&mut self, token: &str) {
        self.classes.retain(|c| c != token);
    }

    pub fn style(&mut self, property: &str, value: impl Into<String>) -> &mut Self {
        self.styles.insert(property.to_string(), value.into());
        self
    }

    /// Set `property` only when `value` is present.
    pub fn style_opt(&mut self, property: &str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(v) = value {
            self.styles.insert(property.to_string(), v.into());
        }
        self
    }

    pub fn attr(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Boolean attribute such as `controls` or `checked`.
    pub fn flag(&mut self, name: &str, on: bool) -> &mut Self {
        if on {
            self.attributes.insert(name.to_string(), String::new());
        } else {
            self.attributes.shift_remove(name);
        }
        self
    }

    /// Inline style string, e.g. `display: flex; gap: 8px;`
    pub fn style_string(&self) -> String {
        self.styles
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// Opening tag with all attributes.
    pub fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            if value.is_empty() {
                out.push_str(&format!(" {}", name));
            } else {
                out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        }
        if !self.styles.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape_html(&self.style_string())));
        }
        if self.is_void() {
            out.push_str(" />");
        } else {
            out.push('>');
        }
        out
    }

    /// Render the element with its escaped text.
    pub fn render(&self) -> String {
        self.render_with_inner("")
    }

    /// Render the element with its escaped text, its children, then trusted
    /// `inner` markup.
    pub fn render_with_inner(&self, inner: &str) -> String {
        if self.is_void() {
            return self.open_tag();
        }
        let children: String = self.children.iter().map(Markup::render).collect();
        format!(
            "{}{}{}{}</{}>",
            self.open_tag(),
            escape_html(&self.text),
            children,
            inner,
            self.tag
        )
    }
}
