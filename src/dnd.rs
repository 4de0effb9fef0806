//! Drop protocol.
//!
//! The gesture library reports `{active: {id}, over: {id} | null}` when a drag
//! ends. `over.id` is either the root drop surface sentinel or a zone
//! composite `"<layoutInstanceId>-zone-<index>"`; `active.id` is a palette
//! type id or the instance id of a block already on the page. Anything that
//! does not resolve leaves the page untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::registry::Registry;
use crate::zone::{self, zone_key, Layout};

/// Default id of the page's root drop surface.
pub const ROOT_DROP_ZONE: &str = "root-drop-zone";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    pub active: DragRef,
    #[serde(default)]
    pub over: Option<DragRef>,
}

impl DropEvent {
    pub fn new(active: impl Into<String>, over: Option<&str>) -> Self {
        Self {
            active: DragRef { id: active.into() },
            over: over.map(|id| DragRef { id: id.to_string() }),
        }
    }
}

/// Parsed `over.id`.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    Root,
    Zone { layout: String, zone: String },
    /// Anything else; may still name a layout instance
    Other(String),
}

impl DropTarget {
    pub fn parse(over_id: &str, root_sentinel: &str) -> Self {
        if over_id == root_sentinel {
            return DropTarget::Root;
        }
        static ZONE_TARGET_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ZONE_TARGET_REGEX.get_or_init(|| {
            Regex::new(r"^(?P<layout>.+)-zone-(?P<index>\d+)$").expect("valid regex")
        });
        let Some(caps) = re.captures(over_id) else {
            return DropTarget::Other(over_id.to_string());
        };
        match caps["index"].parse::<usize>() {
            Ok(index) => DropTarget::Zone {
                layout: caps["layout"].to_string(),
                zone: zone_key(index),
            },
            Err(_) => DropTarget::Other(over_id.to_string()),
        }
    }
}

/// Why a drop changed nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum IgnoreReason {
    NoTarget,
    UnknownTarget(String),
    UnknownType(String),
    UnknownLayout(String),
    UndefinedZone { layout: String, zone: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Ignored(IgnoreReason),
    LayoutPlaced { instance_id: String, position: usize },
    ComponentPlaced { layout: String, zone: String, instance_id: String },
    LayoutMoved { instance_id: String, position: usize },
    ComponentMoved { layout: String, zone: String, instance_id: String },
}

impl DropOutcome {
    /// True when the page tree changed.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, DropOutcome::Ignored(_))
    }
}

fn ignored(reason: IgnoreReason) -> DropOutcome {
    tracing::debug!(?reason, "drop ignored");
    DropOutcome::Ignored(reason)
}

/// Apply a finished drag to the ordered layouts of a page.
pub fn apply_drop(
    layouts: &mut Vec<Layout>,
    registry: &Registry,
    event: &DropEvent,
    root_sentinel: &str,
) -> DropOutcome {
    let Some(over) = &event.over else {
        return ignored(IgnoreReason::NoTarget);
    };
    let active = event.active.id.as_str();

    match DropTarget::parse(&over.id, root_sentinel) {
        DropTarget::Root => {
            if zone::find_layout(layouts, active).is_some() {
                let end = layouts.len();
                return reorder(layouts, active, end);
            }
            match registry.create_layout(active) {
                Ok(mut layout) => {
                    let position = layouts.len();
                    layout.set_position(position);
                    let instance_id = layout.instance_id().to_string();
                    tracing::debug!(type_id = active, %instance_id, position, "layout placed");
                    layouts.push(layout);
                    DropOutcome::LayoutPlaced {
                        instance_id,
                        position,
                    }
                }
                Err(_) => ignored(IgnoreReason::UnknownType(active.to_string())),
            }
        }
        DropTarget::Zone { layout, zone } => {
            let Some(index) = zone::find_layout(layouts, &layout) else {
                return ignored(IgnoreReason::UnknownLayout(layout));
            };
            if !layouts[index].defines_zone(&zone) {
                return ignored(IgnoreReason::UndefinedZone { layout, zone });
            }

            if zone::find_component(layouts, active).is_some() {
                return match zone::move_component(layouts, active, &layout, &zone, None) {
                    Ok(()) => DropOutcome::ComponentMoved {
                        layout,
                        zone,
                        instance_id: active.to_string(),
                    },
                    Err(_) => ignored(IgnoreReason::UndefinedZone { layout, zone }),
                };
            }

            let component = match registry.create_component(active) {
                Ok(component) => component,
                Err(_) => return ignored(IgnoreReason::UnknownType(active.to_string())),
            };
            let instance_id = component.instance_id().to_string();
            match layouts[index].insert_component(&zone, component) {
                Ok(()) => {
                    tracing::debug!(type_id = active, %instance_id, %layout, %zone, "component placed");
                    DropOutcome::ComponentPlaced {
                        layout,
                        zone,
                        instance_id,
                    }
                }
                Err(_) => ignored(IgnoreReason::UndefinedZone { layout, zone }),
            }
        }
        DropTarget::Other(target) => {
            let dragged_layout = zone::find_layout(layouts, active).is_some();
            match zone::find_layout(layouts, &target) {
                Some(before) if dragged_layout && target != active => {
                    let from = zone::find_layout(layouts, active).unwrap_or(before);
                    // removing the dragged layout first shifts later targets left
                    let to = if from < before { before - 1 } else { before };
                    reorder(layouts, active, to)
                }
                _ => ignored(IgnoreReason::UnknownTarget(target)),
            }
        }
    }
}

fn reorder(layouts: &mut Vec<Layout>, instance_id: &str, to: usize) -> DropOutcome {
    match zone::move_layout(layouts, instance_id, to) {
        Ok(()) => {
            let position = zone::find_layout(layouts, instance_id).unwrap_or(to);
            tracing::debug!(%instance_id, position, "layout moved");
            DropOutcome::LayoutMoved {
                instance_id: instance_id.to_string(),
                position,
            }
        }
        Err(_) => ignored(IgnoreReason::UnknownLayout(instance_id.to_string())),
    }
}
