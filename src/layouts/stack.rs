use std::sync::OnceLock;

use super::{common_frame, frame_markup, spacing_fields, surface_fields};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::zone::{grid_of, LayoutFrame, LayoutKind};

/// Vertical stack of full-width rows.
pub struct Stack;

impl GeneratesMarkup for Stack {
    fn type_id(&self) -> &'static str {
        "stack"
    }

    fn label(&self) -> &'static str {
        "Stack"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("layout", "Layout", |g| {
                    spacing_fields(g.number("Rows", 3.0, 1.0, 6.0), 24.0, 200.0)
                })
                .group("style", "Styling", |g| {
                    surface_fields(g, "#ffffff").select("Dividers", "No", &["No", "Yes"])
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        frame_markup("pb-stack", &self.frame(state), &self.grid_areas(state), None)
    }
}

impl LayoutKind for Stack {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &self.grid_areas(state))
    }

    fn grid_areas(&self, state: &StateView<'_>) -> Vec<Vec<String>> {
        let rows = state.number("layout", "Rows").round().clamp(1.0, 6.0) as usize;
        grid_of(rows, 1)
    }

    fn style_zone(&self, state: &StateView<'_>, zone: &str, markup: &mut Markup) {
        if state.choice("style", "Dividers") == "Yes" && zone != "zone-0" {
            markup.style("border-top", "1px solid #e5e7eb").style("padding-top", "16px");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{state_from, StateValue};
    use crate::zone::Layout;

    #[test]
    fn rows_are_single_column() {
        let mut layout = Layout::new(&Stack, "layout-1");
        assert_eq!(layout.grid_areas().len(), 3);
        assert!(layout.grid_areas().iter().all(|row| row.len() == 1));
        layout.apply_state(state_from([("layout-Rows", StateValue::Number(5.0))]));
        assert_eq!(layout.frame().rows, 5);
        assert_eq!(layout.frame().columns, 1);
    }

    #[test]
    fn infinite_row_count_keeps_default_rows() {
        let mut layout = Layout::new(&Stack, "layout-1");
        layout.apply_state(state_from([("layout-Rows", StateValue::from("inf"))]));
        assert_eq!(layout.zone_keys(), vec!["zone-0", "zone-1", "zone-2"]);
    }

    #[test]
    fn dividers_skip_first_row() {
        let mut layout = Layout::new(&Stack, "layout-1");
        layout.apply_state(state_from([("style-Dividers", StateValue::from("Yes"))]));
        assert_eq!(layout.code().matches("border-top: 1px solid #e5e7eb;").count(), 2);
    }
}
