//! Layout variants: grid containers that own zones.
//!
//! Every layout renders as a CSS grid whose `grid-template-areas` names each
//! zone, so the frame and the zone topology come from the same
//! [`LayoutKind::grid_areas`] call. The `layout` group (gap, padding, min
//! height) and the `style` group (background, radius) are shared by all
//! variants; [`common_frame`] reads them.

pub mod columns;
pub mod container;
pub mod grid;
pub mod hero;
pub mod sidebar;
pub mod stack;

use crate::block::StateView;
use crate::markup::Markup;
use crate::schema::GroupBuilder;
use crate::style::px;
use crate::zone::{LayoutFrame, LayoutKind};

pub use columns::Columns;
pub use container::Container;
pub use grid::{Grid2x2, Grid3x3};
pub use hero::Hero;
pub use sidebar::{SidebarLeft, SidebarRight};
pub use stack::Stack;

/// Built-in layouts in palette order.
pub static ALL: &[&dyn LayoutKind] = &[
    &Container,
    &Grid2x2,
    &Grid3x3,
    &Columns,
    &Stack,
    &Hero,
    &SidebarLeft,
    &SidebarRight,
];

/// Fields of the shared `layout` group.
pub(crate) fn spacing_fields(g: GroupBuilder, padding: f64, min_height: f64) -> GroupBuilder {
    g.number("Gap", 16.0, 0.0, 128.0)
        .number("Padding", padding, 0.0, 256.0)
        .number("Min Height", min_height, 0.0, 1200.0)
}

/// Fields every `style` group starts with.
pub(crate) fn surface_fields(g: GroupBuilder, background: &str) -> GroupBuilder {
    g.color("Background Color", background)
        .number("Border Radius", 0.0, 0.0, 64.0)
}

/// Frame from the shared groups, sized to `areas`.
pub(crate) fn common_frame(state: &StateView<'_>, areas: &[Vec<String>]) -> LayoutFrame {
    LayoutFrame {
        rows: areas.len().max(1),
        columns: areas.iter().map(Vec::len).max().unwrap_or(1).max(1),
        gap: state.number("layout", "Gap"),
        padding: state.number("layout", "Padding"),
        background_color: state.text("style", "Background Color"),
        border_radius: state.number("style", "Border Radius"),
        min_height: state.number("layout", "Min Height"),
    }
}

/// `"zone-0 zone-1" "zone-2 zone-3"`
pub fn template_areas(areas: &[Vec<String>]) -> String {
    areas
        .iter()
        .map(|row| format!("\"{}\"", row.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Grid shell shared by all layouts. `template_columns` overrides the
/// default of equal fractional columns.
pub(crate) fn frame_markup(
    variant_class: &str,
    frame: &LayoutFrame,
    areas: &[Vec<String>],
    template_columns: Option<String>,
) -> Markup {
    let mut m = Markup::new("div");
    m.add_class("pb-layout");
    m.add_class(variant_class);
    let columns = template_columns
        .unwrap_or_else(|| format!("repeat({}, minmax(0, 1fr))", frame.columns));
    m.style("display", "grid")
        .style("grid-template-columns", columns)
        .style("grid-template-areas", template_areas(areas))
        .style("gap", px(frame.gap))
        .style("padding", px(frame.padding))
        .style("background-color", frame.background_color.as_str())
        .style("border-radius", px(frame.border_radius))
        .style("min-height", px(frame.min_height))
        .style("box-sizing", "border-box")
        .style("width", "100%");
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::GeneratesMarkup;
    use crate::zone::grid_of;
    use std::collections::HashSet;

    #[test]
    fn template_areas_quote_each_row() {
        assert_eq!(
            template_areas(&grid_of(4, 2)),
            "\"zone-0 zone-1\" \"zone-2 zone-3\""
        );
    }

    #[test]
    fn builtin_layouts_are_well_formed() {
        let mut ids = HashSet::new();
        for kind in ALL {
            assert!(ids.insert(kind.type_id()), "duplicate id {}", kind.type_id());
            assert!(kind.schema().defects().is_empty(), "{}", kind.type_id());
        }
    }
}
