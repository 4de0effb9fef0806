use std::sync::OnceLock;

use super::YES_NO;
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::{is_yes, px, SizeTier};

const INPUT_TYPES: &[&str] = &["text", "email", "password", "number", "tel", "url", "date"];

/// Single-line form field.
pub struct Input;

impl GeneratesMarkup for Input {
    fn type_id(&self) -> &'static str {
        "input"
    }

    fn label(&self) -> &'static str {
        "Input"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Placeholder", "Enter text...")
                        .select("Input Type", "text", INPUT_TYPES)
                        .text("Field Name", "field")
                        .select("Required", "No", YES_NO)
                })
                .group("style", "Styling", |g| {
                    g.select("Size", "Medium", SizeTier::CHOICES)
                        .color("Border Color", "#d1d5db")
                        .color("Background Color", "#ffffff")
                        .color("Text Color", "#111827")
                        .number("Border Radius", 6.0, 0.0, 50.0)
                        .select("Full Width", "Yes", YES_NO)
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let input_type = state.choice("content", "Input Type");
        let input_type = if INPUT_TYPES.contains(&input_type.as_str()) {
            input_type
        } else {
            "text".to_string()
        };
        let (pad_y, pad_x, font) = SizeTier::from_choice(&state.choice("style", "Size")).metrics();

        let mut m = Markup::new("input");
        m.attr("type", input_type)
            .attr("name", state.text("content", "Field Name"))
            .attr("placeholder", state.text("content", "Placeholder"))
            .flag("required", is_yes(&state.choice("content", "Required")));
        m.add_class("pb-input");
        m.style("display", "block")
            .style("padding", format!("{} {}", px(pad_y), px(pad_x / 2.0 + 4.0)))
            .style("font-size", px(font))
            .style("color", state.text("style", "Text Color"))
            .style("background-color", state.text("style", "Background Color"))
            .style("border", format!("1px solid {}", state.text("style", "Border Color")))
            .style("border-radius", px(state.number("style", "Border Radius")))
            .style("box-sizing", "border-box");
        if is_yes(&state.choice("style", "Full Width")) {
            m.style("width", "100%");
        }
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        match key {
            "content-Placeholder" => {
                markup.attr("placeholder", state.text("content", "Placeholder"));
                true
            }
            "content-Field Name" => {
                markup.attr("name", state.text("content", "Field Name"));
                true
            }
            _ => false,
        }
    }
}
