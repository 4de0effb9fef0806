use std::sync::OnceLock;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::state::format_number;
use crate::style::px;

/// Horizontal rule.
pub struct Divider;

impl GeneratesMarkup for Divider {
    fn type_id(&self) -> &'static str {
        "divider"
    }

    fn label(&self) -> &'static str {
        "Divider"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new().group("style", "Styling", |g| {
                g.number("Thickness", 1.0, 1.0, 20.0)
                    .color("Line Color", "#e5e7eb")
                    .select("Line Style", "Solid", &["Solid", "Dashed", "Dotted"])
                    .number("Width", 100.0, 10.0, 100.0)
                    .number("Spacing", 24.0, 0.0, 128.0)
            })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let line_style = state.choice("style", "Line Style").to_lowercase();
        let line_style = match line_style.as_str() {
            "dashed" | "dotted" => line_style,
            _ => "solid".to_string(),
        };
        let mut m = Markup::new("hr");
        m.add_class("pb-divider");
        m.style("border", "none")
            .style(
                "border-top",
                format!(
                    "{} {} {}",
                    px(state.number("style", "Thickness")),
                    line_style,
                    state.text("style", "Line Color")
                ),
            )
            .style("width", format!("{}%", format_number(state.number("style", "Width"))))
            .style("margin", format!("{} auto", px(state.number("style", "Spacing"))));
        m
    }
}

/// Empty vertical gap.
pub struct Spacer;

impl GeneratesMarkup for Spacer {
    fn type_id(&self) -> &'static str {
        "spacer"
    }

    fn label(&self) -> &'static str {
        "Spacer"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new().group("style", "Styling", |g| g.number("Height", 32.0, 4.0, 400.0))
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("div");
        m.attr("aria-hidden", "true");
        m.add_class("pb-spacer");
        m.style("height", px(state.number("style", "Height")))
            .style("width", "100%");
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        if key == "style-Height" {
            markup.style("height", px(state.number("style", "Height")));
            return true;
        }
        false
    }
}
