use std::sync::OnceLock;

use super::{apply_link_target, YES_NO};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::{px, FontWeight};

pub struct Link;

impl GeneratesMarkup for Link {
    fn type_id(&self) -> &'static str {
        "link"
    }

    fn label(&self) -> &'static str {
        "Link"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Link Text", "Learn more")
                        .text("Link URL", "#")
                        .select("Open In New Tab", "No", YES_NO)
                })
                .group("style", "Styling", |g| {
                    g.color("Link Color", "#2563eb")
                        .select("Underline", "Always", &["Always", "Hover", "Never"])
                        .number("Font Size", 16.0, 8.0, 64.0)
                        .select("Font Weight", "Medium", FontWeight::CHOICES)
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = Markup::new("a").with_text(state.text("content", "Link Text"));
        m.attr("href", state.text("content", "Link URL"));
        apply_link_target(&mut m, state);
        m.add_class("pb-link");
        m.style("color", state.text("style", "Link Color"))
            .style("font-size", px(state.number("style", "Font Size")))
            .style(
                "font-weight",
                FontWeight::from_choice(&state.choice("style", "Font Weight")).css(),
            );
        match state.choice("style", "Underline").as_str() {
            "Hover" => {
                // the exporter's base sheet underlines .pb-underline-hover on :hover
                m.add_class("pb-underline-hover");
                m.style("text-decoration", "none");
            }
            "Never" => {
                m.style("text-decoration", "none");
            }
            _ => {
                m.style("text-decoration", "underline");
            }
        }
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        match key {
            "content-Link Text" => {
                markup.text = state.text("content", "Link Text");
                true
            }
            "style-Link Color" => {
                markup.style("color", state.text("style", "Link Color"));
                true
            }
            _ => false,
        }
    }
}
