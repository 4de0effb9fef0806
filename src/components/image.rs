use std::sync::OnceLock;

use super::apply_shadow;
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::state::format_number;
use crate::style::{px, ObjectFit};

pub struct Image;

impl GeneratesMarkup for Image {
    fn type_id(&self) -> &'static str {
        "image"
    }

    fn label(&self) -> &'static str {
        "Image"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Image URL", "https://placehold.co/600x400")
                        .text("Alt Text", "Placeholder image")
                })
                .group("style", "Styling", |g| {
                    g.number("Width", 100.0, 10.0, 100.0)
                        .number("Height", 0.0, 0.0, 1200.0)
                        .select("Object Fit", "Cover", ObjectFit::CHOICES)
                        .number("Border Radius", 0.0, 0.0, 200.0)
                        .number("Opacity", 100.0, 0.0, 100.0)
                        .select("Shadow", "None", &["None", "Small", "Medium", "Large"])
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("img");
        m.attr("src", state.text("content", "Image URL"))
            .attr("alt", state.text("content", "Alt Text"))
            .attr("loading", "lazy");
        m.add_class("pb-image");
        m.style("display", "block")
            .style("width", format!("{}%", format_number(state.number("style", "Width"))))
            .style("max-width", "100%");

        // 0 keeps the intrinsic aspect ratio
        let height = state.number("style", "Height");
        if height > 0.0 {
            m.style("height", px(height));
        } else {
            m.style("height", "auto");
        }
        m.style(
            "object-fit",
            ObjectFit::from_choice(&state.choice("style", "Object Fit")).css(),
        )
        .style("border-radius", px(state.number("style", "Border Radius")));

        let opacity = state.number("style", "Opacity").clamp(0.0, 100.0);
        if opacity < 100.0 {
            m.style("opacity", format_number(opacity / 100.0));
        }
        apply_shadow(&mut m, &state.choice("style", "Shadow"));
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        match key {
            "content-Image URL" => {
                markup.attr("src", state.text("content", "Image URL"));
                true
            }
            "content-Alt Text" => {
                markup.attr("alt", state.text("content", "Alt Text"));
                true
            }
            _ => false,
        }
    }
}
