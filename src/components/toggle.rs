//! Boolean form controls.
//!
//! Both render a wrapping `<label>` so the caption is clickable. The toggle
//! switch is drawn with two nested spans (track and thumb) rather than a
//! native checkbox.

use std::sync::OnceLock;

use crate::block::{GeneratesMarkup, StateView};
use crate::markup::Markup;
use crate::schema::OptionSchema;
use crate::style::px;

const ON_OFF: &[&str] = &["Off", "On"];

fn is_on(state: &StateView<'_>) -> bool {
    state.choice("content", "Initial State") == "On"
}

fn caption(state: &StateView<'_>, color: String) -> Markup {
    let mut span = Markup::new("span").with_text(state.text("content", "Label"));
    span.style("color", color).style("font-size", px(state.number("style", "Font Size")));
    span
}

fn label_shell(class: &str) -> Markup {
    let mut m = Markup::new("label");
    m.add_class(class);
    m.style("display", "inline-flex")
        .style("align-items", "center")
        .style("gap", "8px")
        .style("cursor", "pointer");
    m
}

pub struct Checkbox;

impl GeneratesMarkup for Checkbox {
    fn type_id(&self) -> &'static str {
        "checkbox"
    }

    fn label(&self) -> &'static str {
        "Checkbox"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Label", "I agree to the terms")
                        .text("Field Name", "agree")
                        .select("Initial State", "Off", ON_OFF)
                })
                .group("style", "Styling", |g| {
                    g.color("Accent Color", "#2563eb")
                        .color("Text Color", "#111827")
                        .number("Font Size", 16.0, 10.0, 32.0)
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let mut m = label_shell("pb-checkbox");
        let mut input = Markup::new("input");
        input
            .attr("type", "checkbox")
            .attr("name", state.text("content", "Field Name"))
            .flag("checked", is_on(state));
        input
            .style("accent-color", state.text("style", "Accent Color"))
            .style("width", "18px")
            .style("height", "18px");
        m.child(input);
        m.child(caption(state, state.text("style", "Text Color")));
        m
    }
}

pub struct Toggle;

impl GeneratesMarkup for Toggle {
    fn type_id(&self) -> &'static str {
        "toggle"
    }

    fn label(&self) -> &'static str {
        "Toggle"
    }

    fn schema(&self) -> &'static OptionSchema {
        static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            OptionSchema::new()
                .group("content", "Content", |g| {
                    g.text("Label", "Enable notifications")
                        .select("Initial State", "Off", ON_OFF)
                })
                .group("style", "Styling", |g| {
                    g.color("Active Color", "#2563eb")
                        .color("Inactive Color", "#d1d5db")
                        .color("Text Color", "#111827")
                        .number("Font Size", 16.0, 10.0, 32.0)
                })
        })
    }

    fn generate(&self, state: &StateView<'_>) -> Markup {
        let on = is_on(state);
        let mut m = label_shell("pb-toggle");
        m.attr("role", "switch")
            .attr("aria-checked", if on { "true" } else { "false" });

        let track_color = if on {
            state.text("style", "Active Color")
        } else {
            state.text("style", "Inactive Color")
        };
        let mut track = Markup::new("span");
        track.add_class("pb-toggle-track");
        track
            .style("position", "relative")
            .style("display", "inline-block")
            .style("width", "40px")
            .style("height", "22px")
            .style("border-radius", "9999px")
            .style("background-color", track_color)
            .style("transition", "background-color 0.2s");

        let mut thumb = Markup::new("span");
        thumb.add_class("pb-toggle-thumb");
        thumb
            .style("position", "absolute")
            .style("top", "2px")
            .style("left", if on { "20px" } else { "2px" })
            .style("width", "18px")
            .style("height", "18px")
            .style("border-radius", "50%")
            .style("background-color", "#ffffff")
            .style("transition", "left 0.2s");
        track.child(thumb);

        m.child(track);
        m.child(caption(state, state.text("style", "Text Color")));
        m
    }
}
