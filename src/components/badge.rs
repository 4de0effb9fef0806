use std::sync::OnceLock;

use super::YES_NO;
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::{is_yes, px, rgba_from_hex, SizeTier};

/// Short status label.
pub struct Badge;

impl GeneratesMarkup for Badge {
    fn type_id(&self) -> &'static str {
        "badge"
    }

    fn label(&self) -> &'static str {
        "Badge"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| g.text("Badge Text", "New"))
                .group("style", "Styling", |g| {
                    g.select("Variant", "Filled", &["Filled", "Soft", "Outline"])
                        .color("Badge Color", "#2563eb")
                        .color("Text Color", "#ffffff")
                        .select("Size", "Small", SizeTier::CHOICES)
                        .select("Pill", "Yes", YES_NO)
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let color = state.text("style", "Badge Color");
        let (pad_y, pad_x, font) = SizeTier::from_choice(&state.choice("style", "Size")).metrics();

        let mut m = Markup::new("span").with_text(state.text("content", "Badge Text"));
        m.add_class("pb-badge");
        m.style("display", "inline-block")
            .style("padding", format!("{} {}", px((pad_y / 2.0).round()), px(pad_x / 2.0 + 2.0)))
            .style("font-size", px(font - 2.0))
            .style("font-weight", "600")
            .style("line-height", "1.4");
        match state.choice("style", "Variant").as_str() {
            "Soft" => {
                m.style("background-color", rgba_from_hex(&color, 0.12))
                    .style("color", color.as_str())
                    .style("border", "1px solid transparent");
            }
            "Outline" => {
                m.style("background-color", "transparent")
                    .style("color", color.as_str())
                    .style("border", format!("1px solid {}", color));
            }
            _ => {
                m.style("background-color", color.as_str())
                    .style("color", state.text("style", "Text Color"))
                    .style("border", "1px solid transparent");
            }
        }
        let radius = if is_yes(&state.choice("style", "Pill")) {
            "9999px".to_string()
        } else {
            px(4.0)
        };
        m.style("border-radius", radius);
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        if key == "content-Badge Text" {
            markup.text = state.text("content", "Badge Text");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, Component};
    use crate::state::{state_from, StateValue};

    fn badge() -> Component {
        let kind: &'static dyn GeneratesMarkup = &Badge;
        Block::new(kind, "badge1")
    }

    #[test]
    fn soft_variant_tints_background() {
        let mut b = badge();
        b.apply_state(state_from([("style-Variant", StateValue::from("Soft"))]));
        assert_eq!(b.styles()["background-color"], "rgba(37, 99, 235, 0.12)");
        assert_eq!(b.styles()["color"], "#2563eb");
    }

    #[test]
    fn soft_variant_with_non_hex_color_falls_back() {
        let mut b = badge();
        b.apply_state(state_from([
            ("style-Variant", StateValue::from("Soft")),
            ("style-Badge Color", StateValue::from("#a\u{e9}bcd")),
        ]));
        assert_eq!(b.styles()["background-color"], "rgba(0, 0, 0, 0.12)");
        assert_eq!(b.styles()["color"], "#a\u{e9}bcd");
    }

    #[test]
    fn pill_toggle() {
        let mut b = badge();
        assert_eq!(b.styles()["border-radius"], "9999px");
        b.apply_state(state_from([("style-Pill", StateValue::from("No"))]));
        assert_eq!(b.styles()["border-radius"], "4px");
    }
}
