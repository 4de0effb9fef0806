use std::sync::OnceLock;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::state::format_number;
use crate::style::{px, FontFamily, FontWeight, TextAlign};

/// Paragraph of free text.
pub struct Text;

impl GeneratesMarkup for Text {
    fn type_id(&self) -> &'static str {
        "text"
    }

    fn label(&self) -> &'static str {
        "Text"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Text Content", "Start writing your content here.")
                })
                .group("typography", "Typography", |g| {
                    g.number("Font Size", 16.0, 8.0, 96.0)
                        .select("Font Weight", "Normal", FontWeight::CHOICES)
                        .select("Font Family", "Sans", FontFamily::CHOICES)
                        .select("Text Align", "Left", TextAlign::CHOICES)
                        .number("Line Height", 1.6, 1.0, 3.0)
                        .color("Text Color", "#111827")
                })
                .group("style", "Styling", |g| g.number("Margin Bottom", 16.0, 0.0, 128.0))
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("p").with_text(state.text("content", "Text Content"));
        m.add_class("pb-text");
        m.style("margin", format!("0 0 {}", px(state.number("style", "Margin Bottom"))))
            .style("font-size", px(state.number("typography", "Font Size")))
            .style(
                "font-weight",
                FontWeight::from_choice(&state.choice("typography", "Font Weight")).css(),
            )
            .style(
                "font-family",
                FontFamily::from_choice(&state.choice("typography", "Font Family")).css(),
            )
            .style(
                "text-align",
                TextAlign::from_choice(&state.choice("typography", "Text Align")).css(),
            )
            .style("line-height", format_number(state.number("typography", "Line Height")))
            .style("color", state.text("typography", "Text Color"))
            .style("white-space", "pre-wrap");
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        match key {
            "content-Text Content" => {
                markup.text = state.text("content", "Text Content");
                true
            }
            "typography-Text Color" => {
                markup.style("color", state.text("typography", "Text Color"));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, Component};
    use crate::state::{state_from, StateValue};

    fn text() -> Component {
        let kind: &'static dyn GeneratesMarkup = &Text;
        Block::new(kind, "text1")
    }

    #[test]
    fn text_content_is_escaped() {
        let mut t = text();
        t.apply_state(state_from([("content-Text Content", StateValue::from("<b>"))]));
        assert!(t.code().contains("&lt;b&gt;"));
        assert!(!t.code().contains("<b>"));
    }

    #[test]
    fn typography_maps_to_css() {
        let mut t = text();
        t.apply_state(state_from([
            ("typography-Font Weight", StateValue::from("Bold")),
            ("typography-Text Align", StateValue::from("Center")),
            ("typography-Font Size", StateValue::Number(20.0)),
        ]));
        assert_eq!(t.styles()["font-weight"], "700");
        assert_eq!(t.styles()["text-align"], "center");
        assert_eq!(t.styles()["font-size"], "20px");
        assert_eq!(t.styles()["line-height"], "1.6");
    }
}
