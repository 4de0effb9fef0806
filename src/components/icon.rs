use std::sync::OnceLock;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::px;

/// Icon names offered by the form, with the glyph each renders as.
const GLYPHS: &[(&str, &str)] = &[
    ("star", "\u{2605}"),
    ("heart", "\u{2665}"),
    ("check", "\u{2713}"),
    ("arrow-right", "\u{2192}"),
    ("mail", "\u{2709}"),
    ("phone", "\u{260E}"),
    ("user", "\u{1F464}"),
    ("search", "\u{1F50D}"),
];

pub struct Icon;

impl Icon {
    fn glyph(name: &str) -> &'static str {
        GLYPHS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, g)| *g)
            .unwrap_or(GLYPHS[0].1)
    }
}

impl GeneratesMarkup for Icon {
    fn type_id(&self) -> &'static str {
        "icon"
    }

    fn label(&self) -> &'static str {
        "Icon"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let names: Vec<&str> = GLYPHS.iter().map(|(n, _)| *n).collect();
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.select("Icon", "star", &names)
                        .text("Accessible Label", "Star icon")
                })
                .group("style", "Styling", |g| {
                    g.number("Size", 24.0, 8.0, 128.0)
                        .color("Icon Color", "#111827")
                        .color("Background Color", "transparent")
                        .number("Padding", 0.0, 0.0, 64.0)
                        .select("Shape", "Square", &["Square", "Rounded", "Circle"])
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let name = state.choice("content", "Icon");
        let mut m = Markup::new("span").with_text(Icon::glyph(&name));
        m.attr("role", "img")
            .attr("aria-label", state.text("content", "Accessible Label"));
        m.add_class("pb-icon");
        m.add_class(&format!("pb-icon-{}", name));

        let size = state.number("style", "Size");
        let padding = state.number("style", "Padding");
        m.style("display", "inline-flex")
            .style("align-items", "center")
            .style("justify-content", "center")
            .style("width", px(size + padding * 2.0))
            .style("height", px(size + padding * 2.0))
            .style("font-size", px(size))
            .style("line-height", "1")
            .style("color", state.text("style", "Icon Color"))
            .style("background-color", state.text("style", "Background Color"));
        let radius = match state.choice("style", "Shape").as_str() {
            "Circle" => "50%".to_string(),
            "Rounded" => px((size / 4.0).round()),
            _ => "0".to_string(),
        };
        m.style("border-radius", radius);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, Component};
    use crate::state::{state_from, StateValue};

    fn icon() -> Component {
        let kind: &'static dyn GeneratesMarkup = &Icon;
        Block::new(kind, "icon1")
    }

    #[test]
    fn renders_glyph_and_class() {
        let mut i = icon();
        i.apply_state(state_from([("content-Icon", StateValue::from("check"))]));
        assert_eq!(i.text(), "\u{2713}");
        assert!(i.classes().contains(&"pb-icon-check".to_string()));
    }

    #[test]
    fn unknown_icon_uses_first_glyph() {
        let mut i = icon();
        i.apply_state(state_from([("content-Icon", StateValue::from("rocket"))]));
        assert_eq!(i.text(), "\u{2605}");
    }

    #[test]
    fn circle_with_padding() {
        let mut i = icon();
        i.apply_state(state_from([
            ("style-Shape", StateValue::from("Circle")),
            ("style-Padding", StateValue::Number(8.0)),
        ]));
        assert_eq!(i.styles()["border-radius"], "50%");
        assert_eq!(i.styles()["width"], "40px");
    }
}
