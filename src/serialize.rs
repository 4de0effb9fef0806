//! Persistence-safe page tree and its reconstruction.
//!
//! Only `state` is trusted on load. `layoutData` and `componentData` are
//! written for consumers that read the document without this crate and are
//! re-derived by the generators on reconstruction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::block::{component_instance_id, layout_instance_id, Component};
use crate::registry::{BlockKind, Registry};
use crate::state::State;
use crate::zone::{renumber, Layout, PlacedComponent};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    pub gap: f64,
    pub padding: f64,
    pub background_color: String,
    pub border_radius: f64,
    pub min_height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentData {
    pub tag: String,
    pub text: String,
    pub classes: Vec<String>,
    pub styles: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    /// Cached markup; never read back
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedComponent {
    /// Component type id
    pub id: String,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub state: State,
    #[serde(default)]
    pub component_data: ComponentData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedLayout {
    pub id: String,
    #[serde(default)]
    pub instance_id: String,
    /// Layout type id; `id` is used when empty
    #[serde(rename = "type", default)]
    pub layout_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub state: State,
    #[serde(default)]
    pub layout_data: LayoutData,
    #[serde(default)]
    pub components: BTreeMap<String, Vec<SerializedComponent>>,
}

fn serialize_component(component: &Component) -> SerializedComponent {
    let markup = component.markup();
    SerializedComponent {
        id: component.type_id().to_string(),
        instance_id: component.instance_id().to_string(),
        label: component.label().to_string(),
        state: component.state().clone(),
        component_data: ComponentData {
            tag: markup.tag.clone(),
            text: markup.text.clone(),
            classes: markup.classes.clone(),
            styles: markup.styles.clone(),
            attributes: markup.attributes.clone(),
            code: component.code().to_string(),
        },
    }
}

pub fn serialize_layout(layout: &Layout) -> SerializedLayout {
    let frame = layout.frame();
    let components = layout
        .zones()
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(zone, entries)| {
            let entries = entries.iter().map(|p| serialize_component(&p.node)).collect();
            (zone.clone(), entries)
        })
        .collect();
    SerializedLayout {
        id: layout.type_id().to_string(),
        instance_id: layout.instance_id().to_string(),
        layout_type: layout.type_id().to_string(),
        name: layout.label().to_string(),
        position: layout.position(),
        state: layout.state().clone(),
        layout_data: LayoutData {
            gap: frame.gap,
            padding: frame.padding,
            background_color: frame.background_color.clone(),
            border_radius: frame.border_radius,
            min_height: frame.min_height,
        },
        components,
    }
}

/// Plain tree for an ordered list of layouts.
pub fn serialize(layouts: &[Layout]) -> Vec<SerializedLayout> {
    layouts.iter().map(serialize_layout).collect()
}

/// A saved block whose type is no longer registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingBlock {
    pub kind: BlockKind,
    pub type_id: String,
    pub instance_id: String,
    /// Components lost with a missing layout
    pub nested_components: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    pub layouts: Vec<Layout>,
    pub missing: Vec<MissingBlock>,
}

impl Reconstruction {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// User-facing note about dropped blocks, if any were dropped.
    pub fn notice(&self) -> Option<String> {
        match self.missing.len() {
            0 => None,
            1 => Some("page recovered with 1 missing block".to_string()),
            n => Some(format!("page recovered with {} missing blocks", n)),
        }
    }
}

/// Rebuild live layouts from saved data.
///
/// Unknown layout or component types are dropped individually and recorded;
/// the rest of the page still loads. Layouts come back ordered by their saved
/// `position` and renumbered from zero.
pub fn reconstruct(saved: &[SerializedLayout], registry: &Registry) -> Reconstruction {
    let mut entries: Vec<&SerializedLayout> = saved.iter().collect();
    entries.sort_by_key(|l| l.position);

    let mut result = Reconstruction::default();
    for saved in entries {
        let type_id = if saved.layout_type.is_empty() {
            saved.id.as_str()
        } else {
            saved.layout_type.as_str()
        };
        let factory = match registry
            .resolve_layout(type_id)
            .or_else(|_| registry.resolve_layout(&saved.id))
        {
            Ok(factory) => factory,
            Err(err) => {
                let nested: usize = saved.components.values().map(Vec::len).sum();
                tracing::warn!(
                    instance_id = %saved.instance_id,
                    nested,
                    "dropping layout: {}",
                    err
                );
                result.missing.push(MissingBlock {
                    kind: BlockKind::Layout,
                    type_id: type_id.to_string(),
                    instance_id: saved.instance_id.clone(),
                    nested_components: nested,
                });
                continue;
            }
        };

        let instance_id = if saved.instance_id.is_empty() {
            layout_instance_id()
        } else {
            saved.instance_id.clone()
        };
        let mut layout = factory(instance_id);
        layout.apply_state(saved.state.clone());

        let mut zones: BTreeMap<String, Vec<PlacedComponent>> = BTreeMap::new();
        for (zone, components) in &saved.components {
            for saved_component in components {
                match reconstruct_component(saved_component, registry) {
                    Ok(component) => zones
                        .entry(zone.clone())
                        .or_default()
                        .push(PlacedComponent::new(component)),
                    Err(missing) => result.missing.push(missing),
                }
            }
        }
        layout.set_zones(zones);
        result.layouts.push(layout);
    }
    renumber(&mut result.layouts);
    tracing::debug!(
        layouts = result.layouts.len(),
        missing = result.missing.len(),
        "page reconstructed"
    );
    result
}

fn reconstruct_component(
    saved: &SerializedComponent,
    registry: &Registry,
) -> Result<Component, MissingBlock> {
    let factory = registry.resolve_component(&saved.id).map_err(|err| {
        tracing::warn!(instance_id = %saved.instance_id, "dropping component: {}", err);
        MissingBlock {
            kind: BlockKind::Component,
            type_id: saved.id.clone(),
            instance_id: saved.instance_id.clone(),
            nested_components: 0,
        }
    })?;
    let instance_id = if saved.instance_id.is_empty() {
        component_instance_id(&saved.id)
    } else {
        saved.instance_id.clone()
    };
    let mut component = factory(instance_id);
    component.apply_state(saved.state.clone());
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnd::{apply_drop, DropEvent, DropOutcome, ROOT_DROP_ZONE};
    use crate::state::{state_from, StateValue};
    use pretty_assertions::assert_eq;

    fn sample_page(registry: &Registry) -> Vec<Layout> {
        let mut layouts = Vec::new();
        let event = DropEvent::new("grid-2x2", Some(ROOT_DROP_ZONE));
        let grid = match apply_drop(&mut layouts, registry, &event, ROOT_DROP_ZONE) {
            DropOutcome::LayoutPlaced { instance_id, .. } => instance_id,
            other => panic!("unexpected {:?}", other),
        };
        for (type_id, zone) in [("button", "zone-0"), ("text", "zone-2")] {
            let over = format!("{}-{}", grid, zone);
            let event = DropEvent::new(type_id, Some(over.as_str()));
            assert!(apply_drop(&mut layouts, registry, &event, ROOT_DROP_ZONE).is_mutation());
        }
        layouts
    }

    #[test]
    fn grid_scenario_serializes_two_zones() {
        let registry = Registry::builtin();
        let layouts = sample_page(&registry);
        let saved = serialize(&layouts);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].layout_type, "grid-2x2");
        assert_eq!(saved[0].id, "grid-2x2");
        assert_eq!(
            saved[0].components.keys().collect::<Vec<_>>(),
            vec!["zone-0", "zone-2"]
        );
        assert_eq!(saved[0].components["zone-0"].len(), 1);
        assert_eq!(saved[0].components["zone-2"].len(), 1);
        assert_eq!(saved[0].components["zone-0"][0].component_data.tag, "a");
    }

    #[test]
    fn round_trip_is_stable() {
        let registry = Registry::builtin();
        let mut layouts = sample_page(&registry);
        let button = layouts[0].zone("zone-0")[0].instance_id().to_string();
        layouts[0]
            .edit_component(
                &button,
                state_from([("content-Button Text", StateValue::from("Buy <Now>"))]),
            )
            .unwrap();

        let first = serialize(&layouts);
        let rebuilt = reconstruct(&first, &registry);
        assert!(rebuilt.is_complete());
        assert_eq!(serialize(&rebuilt.layouts), first);

        let json = serde_json::to_string(&first).unwrap();
        let parsed: Vec<SerializedLayout> = serde_json::from_str(&json).unwrap();
        assert_eq!(serialize(&reconstruct(&parsed, &registry).layouts), first);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let registry = Registry::builtin();
        let value = serde_json::to_value(serialize(&sample_page(&registry))).unwrap();
        let layout = &value[0];
        assert_eq!(layout["type"], "grid-2x2");
        assert!(layout["instanceId"].as_str().unwrap().starts_with("layout-"));
        assert!(layout["layoutData"]["backgroundColor"].is_string());
        let component = &layout["components"]["zone-0"][0];
        assert_eq!(component["id"], "button");
        assert!(component["componentData"]["code"].as_str().unwrap().starts_with("<a "));
    }

    #[test]
    fn unknown_types_are_isolated() {
        let registry = Registry::builtin();
        let mut saved = serialize(&sample_page(&registry));
        saved[0].components.get_mut("zone-2").unwrap()[0].id = "carousel".into();
        let mut ghost = saved[0].clone();
        ghost.id = "parallax".into();
        ghost.layout_type = "parallax".into();
        ghost.instance_id = "layout-ghost".into();
        ghost.position = 0;
        saved[0].position = 1;
        saved.push(ghost);

        let rebuilt = reconstruct(&saved, &registry);
        assert_eq!(rebuilt.layouts.len(), 1);
        assert_eq!(rebuilt.layouts[0].position(), 0);
        assert_eq!(rebuilt.layouts[0].component_count(), 1);
        assert_eq!(rebuilt.missing.len(), 2);
        assert_eq!(rebuilt.missing[0].kind, BlockKind::Layout);
        assert_eq!(rebuilt.missing[0].nested_components, 2);
        assert_eq!(rebuilt.missing[1].type_id, "carousel");
        assert_eq!(
            rebuilt.notice().as_deref(),
            Some("page recovered with 2 missing blocks")
        );
    }

    #[test]
    fn stored_code_and_layout_data_are_not_trusted() {
        let registry = Registry::builtin();
        let mut saved = serialize(&sample_page(&registry));
        let expected = saved.clone();
        saved[0].layout_data.gap = 999.0;
        saved[0].components.get_mut("zone-0").unwrap()[0].component_data.code =
            "<script>alert(1)</script>".into();
        let rebuilt = reconstruct(&saved, &registry);
        assert_eq!(serialize(&rebuilt.layouts), expected);
    }

    #[test]
    fn missing_type_falls_back_to_id_and_positions_sort() {
        let registry = Registry::builtin();
        let json = r#"[
            {"id": "hero", "instanceId": "layout-2", "position": 5},
            {"id": "container", "instanceId": "layout-1", "position": 2,
             "components": {"zone-0": [{"id": "heading", "instanceId": "heading1"}],
                            "zone-4": [{"id": "text", "instanceId": "text1"}]}}
        ]"#;
        let saved: Vec<SerializedLayout> = serde_json::from_str(json).unwrap();
        let rebuilt = reconstruct(&saved, &registry);
        let order: Vec<(&str, usize)> = rebuilt
            .layouts
            .iter()
            .map(|l| (l.instance_id(), l.position()))
            .collect();
        assert_eq!(order, vec![("layout-1", 0), ("layout-2", 1)]);

        // zone-4 is not defined by a container; its component joins the last zone
        let container = &rebuilt.layouts[0];
        assert_eq!(container.zones().keys().collect::<Vec<_>>(), vec!["zone-0"]);
        assert_eq!(container.zone("zone-0").len(), 2);
        assert!(rebuilt.notice().is_none());
    }
}
