use std::sync::OnceLock;

use super::{common_frame, frame_markup, spacing_fields, surface_fields};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::zone::{grid_of, LayoutFrame, LayoutKind};

const MAX_COLUMNS: f64 = 6.0;

/// One row of equal columns; the column count decides which zones exist.
pub struct Columns;

impl Columns {
    fn count(state: &StateView<'_>) -> usize {
        state.number("layout", "Columns").round().clamp(1.0, MAX_COLUMNS) as usize
    }
}

impl GeneratesMarkup for Columns {
    fn type_id(&self) -> &'static str {
        "columns"
    }

    fn label(&self) -> &'static str {
        "Columns"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("layout", "Layout", |g| {
                    spacing_fields(g.number("Columns", 2.0, 1.0, MAX_COLUMNS), 24.0, 160.0)
                        .select("Vertical Align", "Top", &["Top", "Center", "Bottom", "Stretch"])
                })
                .group("style", "Styling", |g| surface_fields(g, "#ffffff"))
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = frame_markup("pb-columns", &self.frame(state), &self.grid_areas(state), None);
        let align = match state.choice("layout", "Vertical Align").as_str() {
            "Center" => "center",
            "Bottom" => "end",
            "Stretch" => "stretch",
            _ => "start",
        };
        m.style("align-items", align);
        m
    }
}

impl LayoutKind for Columns {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &self.grid_areas(state))
    }

    fn grid_areas(&self, state: &StateView<'_>) -> Vec<Vec<String>> {
        let n = Columns::count(state);
        grid_of(n, n)
    }
}
