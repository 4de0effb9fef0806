//! Full-bleed hero section.
//!
//! `Centered` keeps a single zone; `Split` adds a second column, typically
//! for an image beside the headline.

use std::sync::OnceLock;

use super::{common_frame, frame_markup, spacing_fields, surface_fields};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::state::format_number;
use crate::style::{escape_css_string, GradientPreset, TextAlign};
use crate::zone::{zone_key, LayoutFrame, LayoutKind};

pub struct Hero;

impl Hero {
    fn is_split(state: &StateView<'_>) -> bool {
        state.choice("content", "Arrangement") == "Split"
    }
}

impl GeneratesMarkup for Hero {
    fn type_id(&self) -> &'static str {
        "hero"
    }

    fn label(&self) -> &'static str {
        "Hero Section"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.select("Arrangement", "Centered", &["Centered", "Split"])
                        .select("Content Align", "Center", TextAlign::CHOICES)
                })
                .group("layout", "Layout", |g| spacing_fields(g, 64.0, 420.0))
                .group("style", "Styling", |g| {
                    surface_fields(g, "#0f172a")
                        .select("Gradient", "None", GradientPreset::CHOICES)
                        .text("Background Image", "")
                        .number("Overlay Opacity", 0.0, 0.0, 90.0)
                        .color("Text Color", "#ffffff")
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = frame_markup("pb-hero", &self.frame(state), &self.grid_areas(state), None);
        m.style("align-items", "center")
            .style("color", state.text("style", "Text Color"));

        let image = state.text("style", "Background Image");
        let gradient = GradientPreset::from_choice(&state.choice("style", "Gradient")).css();
        if !image.is_empty() {
            let overlay = format_number(
                state.number("style", "Overlay Opacity").clamp(0.0, 90.0) / 100.0,
            );
            m.style(
                "background-image",
                format!(
                    "linear-gradient(rgba(0, 0, 0, {o}), rgba(0, 0, 0, {o})), url(\"{}\")",
                    escape_css_string(&image),
                    o = overlay
                ),
            )
            .style("background-size", "cover")
            .style("background-position", "center");
        } else if let Some(gradient) = gradient {
            m.style("background-image", gradient);
        }
        m
    }
}

impl LayoutKind for Hero {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &self.grid_areas(state))
    }

    fn grid_areas(&self, state: &StateView<'_>) -> Vec<Vec<String>> {
        if Hero::is_split(state) {
            vec![vec![zone_key(0), zone_key(1)]]
        } else {
            vec![vec![zone_key(0)]]
        }
    }

    fn style_zone(&self, state: &StateView<'_>, _zone: &str, markup: &mut Markup) {
        let align = TextAlign::from_choice(&state.choice("content", "Content Align"));
        markup
            .style("align-items", align.justify_css())
            .style("text-align", align.css());
    }
}
