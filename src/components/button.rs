use std::sync::OnceLock;

use super::{apply_link_target, apply_shadow, YES_NO};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::{is_yes, px, SizeTier, ShadowPreset};

/// Call-to-action rendered as an anchor.
pub struct Button;

impl GeneratesMarkup for Button {
    fn type_id(&self) -> &'static str {
        "button"
    }

    fn label(&self) -> &'static str {
        "Button"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Button Text", "Click Me")
                        .text("Link URL", "#")
                        .select("Open In New Tab", "No", YES_NO)
                })
                .group("style", "Styling", |g| {
                    g.select("Button Style", "Solid", &["Solid", "Outline", "Ghost"])
                        .color("Button Color", "#2563eb")
                        .color("Text Color", "#ffffff")
                        .select("Size", "Medium", SizeTier::CHOICES)
                        .number("Border Radius", 6.0, 0.0, 50.0)
                        .select("Full Width", "No", YES_NO)
                        .select("Shadow", "None", &["None", "Small", "Medium", "Large"])
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("a").with_text(state.text("content", "Button Text"));
        m.attr("href", state.text("content", "Link URL"));
        apply_link_target(&mut m, state);
        m.add_class("pb-button");

        let (pad_y, pad_x, font_size) = SizeTier::from_choice(&state.choice("style", "Size")).metrics();
        m.style("display", "inline-block")
            .style("padding", format!("{} {}", px(pad_y), px(pad_x)))
            .style("font-size", px(font_size))
            .style("font-weight", "600")
            .style("line-height", "1.2")
            .style("border-radius", px(state.number("style", "Border Radius")))
            .style("text-decoration", "none")
            .style("text-align", "center")
            .style("cursor", "pointer");

        let color = state.text("style", "Button Color");
        match state.choice("style", "Button Style").as_str() {
            "Outline" => {
                m.style("border", format!("2px solid {}", color))
                    .style("background", "transparent")
                    .style("color", color);
            }
            "Ghost" => {
                m.style("border", "2px solid transparent")
                    .style("background", "transparent")
                    .style("color", color);
            }
            _ => {
                m.style("border", format!("2px solid {}", color))
                    .style("background", color)
                    .style("color", state.text("style", "Text Color"));
            }
        }

        if is_yes(&state.choice("style", "Full Width")) {
            m.style("display", "block").style("width", "100%");
        }
        apply_shadow(&mut m, &state.choice("style", "Shadow"));
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        match key {
            "content-Button Text" => {
                markup.text = state.text("content", "Button Text");
                true
            }
            "content-Link URL" => {
                markup.attr("href", state.text("content", "Link URL"));
                true
            }
            "style-Shadow" => {
                markup.styles.shift_remove("box-shadow");
                markup.style_opt(
                    "box-shadow",
                    ShadowPreset::from_choice(&state.choice("style", "Shadow")).css(),
                );
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

    fn button() -> Component {
        let kind: &'static dyn GeneratesMarkup = &Button;
        Block::new(kind, "button1")
    }

    #[test]
    fn outline_uses_button_color_for_border_and_text() {
        let mut b = button();
        b.apply_state(state_from([
            ("content-Button Text", StateValue::from("Buy Now")),
            ("style-Button Style", StateValue::from("Outline")),
        ]));
        let code = b.code();
        assert!(code.starts_with("<a "));
        assert!(code.contains("border: 2px solid #2563eb;"));
        assert!(code.contains("background: transparent;"));
        assert!(code.contains("color: #2563eb;"));
        assert!(code.ends_with(">Buy Now</a>"));
    }

    #[test]
    fn solid_is_default() {
        let b = button();
        assert_eq!(b.styles()["background"], "#2563eb");
        assert_eq!(b.styles()["color"], "#ffffff");
        assert_eq!(b.text(), "Click Me");
        assert!(b.code().contains("href=\"#\""));
    }

    #[test]
    fn shadow_patch_matches_full_generation() {
        let mut patched = button();
        patched.apply_state(state_from([("style-Shadow", StateValue::from("Large"))]));
        let mut full = patched.clone();
        full.update();
        assert_eq!(patched.code(), full.code());
    }

    #[test]
    fn new_tab_adds_rel() {
        let mut b = button();
        b.apply_state(state_from([("content-Open In New Tab", StateValue::from("Yes"))]));
        assert!(b.code().contains("target=\"_blank\" rel=\"noopener noreferrer\""));
    }
}
