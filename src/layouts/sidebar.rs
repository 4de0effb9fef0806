//! Two-column layouts with a fixed-width sidebar.

use std::sync::OnceLock;

use super::{common_frame, frame_markup, spacing_fields, surface_fields};
use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::px;
use crate::zone::{zone_key, LayoutFrame, LayoutKind};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn sidebar_zone(self) -> &'static str {
        match self {
            Side::Left => "zone-0",
            Side::Right => "zone-1",
        }
    }

    fn template_columns(self, width: f64) -> String {
        match self {
            Side::Left => format!("{} minmax(0, 1fr)", px(width)),
            Side::Right => format!("minmax(0, 1fr) {}", px(width)),
        }
    }
}

fn sidebar_schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::new()
            .group("layout", "Layout", |g| {
                spacing_fields(g.number("Sidebar Width", 280.0, 160.0, 480.0), 24.0, 400.0)
            })
            .group("style", "Styling", |g| {
                surface_fields(g, "#ffffff").color("Sidebar Color", "#f3f4f6")
            })
    })
}

fn areas() -> Vec<Vec<String>> {
    vec![vec![zone_key(0), zone_key(1)]]
}

fn generate(side: Side, kind: &dyn LayoutKind, state: &StateView<'_>) -> Markup {
    let columns = side.template_columns(state.number("layout", "Sidebar Width"));
    frame_markup("pb-sidebar", &kind.frame(state), &areas(), Some(columns))
}

fn style_zone(side: Side, state: &StateView<'_>, zone: &str, markup: &mut Markup) {
    if zone == side.sidebar_zone() {
        markup
            .style("background-color", state.text("style", "Sidebar Color"))
            .style("padding", "16px")
            .style("border-radius", px(state.number("style", "Border Radius")));
    }
}

pub struct SidebarLeft;

impl GeneratesMarkup for SidebarLeft {
    fn type_id(&self) -> &'static str {
        "sidebar-left"
    }

    fn label(&self) -> &'static str {
        "Sidebar Left"
    }

    fn schema(&self) -> &'static OptionSchema {
        sidebar_schema()
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        generate(Side::Left, self, state)
    }
}

impl LayoutKind for SidebarLeft {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &areas())
    }

    fn grid_areas(&self, _state: &StateView<'_>) -> Vec<Vec<String>> {
        areas()
    }

    fn style_zone(&self, state: &StateView<'_>, zone: &str, markup: &mut Markup) {
        style_zone(Side::Left, state, zone, markup);
    }
}

pub struct SidebarRight;

impl GeneratesMarkup for SidebarRight {
    fn type_id(&self) -> &'static str {
        "sidebar-right"
    }

    fn label(&self) -> &'static str {
        "Sidebar Right"
    }

    fn schema(&self) -> &'static OptionSchema {
        sidebar_schema()
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        generate(Side::Right, self, state)
    }
}

impl LayoutKind for SidebarRight {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame {
        common_frame(state, &areas())
    }

    fn grid_areas(&self, _state: &StateView<'_>) -> Vec<Vec<String>> {
        areas()
    }

    fn style_zone(&self, state: &StateView<'_>, zone: &str, markup: &mut Markup) {
        style_zone(Side::Right, state, zone, markup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{state_from, StateValue};
    use crate::zone::Layout;

    #[test]
    fn left_sidebar_leads_the_template() {
        let mut layout = Layout::new(&SidebarLeft, "layout-1");
        layout.apply_state(state_from([("layout-Sidebar Width", StateValue::Number(200.0))]));
        assert_eq!(
            layout.markup().styles["grid-template-columns"],
            "200px minmax(0, 1fr)"
        );
    }

    #[test]
    fn right_sidebar_colors_second_zone() {
        let layout = Layout::new(&SidebarRight, "layout-1");
        assert_eq!(
            layout.markup().styles["grid-template-columns"],
            "minmax(0, 1fr) 280px"
        );
        let code = layout.code();
        let zone0 = code.find("data-zone=\"zone-0\"").unwrap();
        let zone1 = code.find("data-zone=\"zone-1\"").unwrap();
        let sidebar = code.find("background-color: #f3f4f6;").unwrap();
        assert!(zone0 < zone1 && zone1 < sidebar);
    }
}
