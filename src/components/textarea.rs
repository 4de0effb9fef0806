use std::sync::OnceLock;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::px;

pub struct TextArea;

impl GeneratesMarkup for TextArea {
    fn type_id(&self) -> &'static str {
        "textarea"
    }

    fn label(&self) -> &'static str {
        "Text Area"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Placeholder", "Write your message...")
                        .text("Field Name", "message")
                        .text("Default Text", "")
                        .number("Rows", 4.0, 1.0, 20.0)
                })
                .group("style", "Styling", |g| {
                    g.select("Resize", "Vertical", &["None", "Vertical", "Both"])
                        .color("Border Color", "#d1d5db")
                        .color("Background Color", "#ffffff")
                        .color("Text Color", "#111827")
                        .number("Font Size", 16.0, 10.0, 32.0)
                        .number("Border Radius", 6.0, 0.0, 50.0)
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let rows = state.number("content", "Rows").clamp(1.0, 20.0).round();
        let mut m = Markup::new("textarea").with_text(state.text("content", "Default Text"));
        m.attr("name", state.text("content", "Field Name"))
            .attr("placeholder", state.text("content", "Placeholder"))
            .attr("rows", format!("{}", rows as u32));
        m.add_class("pb-textarea");
        let resize = match state.choice("style", "Resize").as_str() {
            "None" => "none",
            "Both" => "both",
            _ => "vertical",
        };
        m.style("display", "block")
            .style("width", "100%")
            .style("padding", "10px 12px")
            .style("font-size", px(state.number("style", "Font Size")))
            .style("font-family", "inherit")
            .style("color", state.text("style", "Text Color"))
            .style("background-color", state.text("style", "Background Color"))
            .style("border", format!("1px solid {}", state.text("style", "Border Color")))
            .style("border-radius", px(state.number("style", "Border Radius")))
            .style("resize", resize)
            .style("box-sizing", "border-box");
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        match key {
            "content-Default Text" => {
                markup.text = state.text("content", "Default Text");
                true
            }
            "content-Placeholder" => {
                markup.attr("placeholder", state.text("content", "Placeholder"));
                true
            }
            _ => false,
        }
    }
}
