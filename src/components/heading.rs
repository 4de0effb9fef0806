use std::sync::OnceLock;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::{px, FontFamily, FontWeight, TextAlign};

const LEVELS: &[&str] = &["H1", "H2", "H3", "H4", "H5", "H6"];

pub struct Heading;

impl GeneratesMarkup for Heading {
    fn type_id(&self) -> &'static str {
        "heading"
    }

    fn label(&self) -> &'static str {
        "Heading"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Heading Text", "Your Heading Here")
                        .select("Level", "H2", LEVELS)
                })
                .group("typography", "Typography", |g| {
                    g.number("Font Size", 32.0, 12.0, 120.0)
                        .select("Font Weight", "Bold", FontWeight::CHOICES)
                        .select("Font Family", "Sans", FontFamily::CHOICES)
                        .select("Text Align", "Left", TextAlign::CHOICES)
                        .number("Letter Spacing", 0.0, -5.0, 20.0)
                        .color("Text Color", "#0f172a")
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let level = state.choice("content", "Level");
        let tag = if LEVELS.contains(&level.as_str()) {
            level.to_lowercase()
        } else {
            "h2".to_string()
        };
        let mut m = Markup::new(&tag).with_text(state.text("content", "Heading Text"));
        m.add_class("pb-heading");
        m.style("margin", "0 0 16px")
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
            .style("line-height", "1.2")
            .style("color", state.text("typography", "Text Color"));

        let spacing = state.number("typography", "Letter Spacing");
        if spacing != 0.0 {
            m.style("letter-spacing", px(spacing));
        }
        m
    }

    fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
        if key == "content-Heading Text" {
            markup.text = state.text("content", "Heading Text");
            return true;
        }
        false
    }
}
