//! Fixed square grids.

use std::sync::OnceLock;

use super::{common_frame, frame_markup, spacing_fields, surface_fields};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::zone::{grid_of, LayoutFrame, LayoutKind};

fn grid_schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::new()
            .group("layout", "Layout", |g| spacing_fields(g, 24.0, 240.0))
            .group("style", "Styling", |g| {
                surface_fields(g, "#ffffff").color("Cell Color", "transparent")
            })
    })
}

fn style_cell(state: &StateView<'_>, markup: &mut Markup) {
    let cell = state.text("style", "Cell Color");
    if cell != "transparent" {
        markup.style("background-color", cell).style("padding", "12px");
    }
}

/// Two by two grid.
pub struct Grid2x2;

impl GeneratesMarkup for Grid2x2 {
    fn type_id(&self) -> &'static str {
        "grid-2x2"
    }

    fn label(&self) -> &'static str {
        "Grid 2x2"
    }

    fn schema(&self) -> &'static OptionSchema {
        grid_schema()
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        frame_markup("pb-grid", &self.frame(state), &self.grid_areas(state), None)
    }
}

impl LayoutKind for Grid2x2 {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &self.grid_areas(state))
    }

    fn grid_areas(&self, _state: &StateView<'_>) -> Vec<Vec<String>> {
        grid_of(4, 2)
    }

    fn style_zone(&self, state: &StateView<'_>, _zone: &str, markup: &mut Markup) {
        style_cell(state, markup);
    }
}

/// Three by three grid.
pub struct Grid3x3;

impl GeneratesMarkup for Grid3x3 {
    fn type_id(&self) -> &'static str {
        "grid-3x3"
    }

    fn label(&self) -> &'static str {
        "Grid 3x3"
    }

    fn schema(&self) -> &'static OptionSchema {
        grid_schema()
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        frame_markup("pb-grid", &self.frame(state), &self.grid_areas(state), None)
    }
}

impl LayoutKind for Grid3x3 {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &self.grid_areas(state))
    }

    fn grid_areas(&self, _state: &StateView<'_>) -> Vec<Vec<String>> {
        grid_of(9, 3)
    }

    fn style_zone(&self, state: &StateView<'_>, _zone: &str, markup: &mut Markup) {
        style_cell(state, markup);
    }
}
