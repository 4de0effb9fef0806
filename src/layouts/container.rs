use std::sync::OnceLock;

use super::{common_frame, frame_markup, spacing_fields, surface_fields};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::{px, GradientPreset, ShadowPreset};
use crate::zone::{zone_key, LayoutFrame, LayoutKind};

/// Single-zone, horizontally centred box.
pub struct Container;

impl GeneratesMarkup for Container {
    fn type_id(&self) -> &'static str {
        "container"
    }

    fn label(&self) -> &'static str {
        "Container"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("layout", "Layout", |g| {
                    spacing_fields(g, 32.0, 120.0).number("Max Width", 1200.0, 320.0, 1920.0)
                })
                .group("style", "Styling", |g| {
                    surface_fields(g, "#ffffff")
                        .select("Gradient", "None", GradientPreset::CHOICES)
                        .select("Shadow", "None", &["None", "Small", "Medium", "Large"])
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let areas = self.grid_areas(state);
        let mut m = frame_markup("pb-container", &self.frame(state), &areas, None);
        m.style("max-width", px(state.number("layout", "Max Width")))
            .style("margin", "0 auto");
        m.style_opt(
            "background-image",
            GradientPreset::from_choice(&state.choice("style", "Gradient")).css(),
        );
        m.style_opt(
            "box-shadow",
            ShadowPreset::from_choice(&state.choice("style", "Shadow")).css(),
        );
        m
    }
}

impl LayoutKind for Container {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &self.grid_areas(state))
    }

    fn grid_areas(&self, _state: &StateView<'_>) -> Vec<Vec<String>> {
        vec![vec![zone_key(0)]]
    }
}
