use pagesmith::components;
use pagesmith::layouts;
use pagesmith::page::Page;
use pagesmith::registry;
use pagesmith::schema::{FieldKind, OptionSchema};
use pagesmith::serialize::{serialize, SerializedLayout};
use pagesmith::state::state_from;
use pagesmith::{
    apply_drop, reconstruct, BuilderConfig, BuilderError, Component, DropEvent, DropOutcome,
    EditorSession, GeneratesMarkup, IgnoreReason, Layout, MemoryStore, PageRepository, Registry,
    StateValue, ROOT_DROP_ZONE,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn drop_layout(layouts: &mut Vec<Layout>, registry: &Registry, type_id: &str) -> String {
    let event = DropEvent::new(type_id, Some(ROOT_DROP_ZONE));
    match apply_drop(layouts, registry, &event, ROOT_DROP_ZONE) {
        DropOutcome::LayoutPlaced { instance_id, .. } => instance_id,
        other => panic!("unexpected {:?}", other),
    }
}

fn drop_component(
    layouts: &mut Vec<Layout>,
    registry: &Registry,
    type_id: &str,
    layout: &str,
    zone: usize,
) -> String {
    let over = format!("{}-zone-{}", layout, zone);
    let event = DropEvent::new(type_id, Some(over.as_str()));
    match apply_drop(layouts, registry, &event, ROOT_DROP_ZONE) {
        DropOutcome::ComponentPlaced { instance_id, .. } => instance_id,
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn outline_button_renders_anchor_with_colored_border() {
    let kind: &'static dyn GeneratesMarkup = &components::Button;
    let mut button = Component::new(kind, "button1");
    button.apply_state(state_from([
        ("content-Button Text", StateValue::from("Buy Now")),
        ("style-Button Style", StateValue::from("Outline")),
    ]));

    assert_eq!(button.tag(), "a");
    assert_eq!(button.text(), "Buy Now");
    assert_eq!(button.styles()["border"], "2px solid #2563eb");
    assert_eq!(button.styles()["background"], "transparent");
    assert_eq!(button.styles()["color"], "#2563eb");
}

#[test]
fn grid_scenario_serializes_only_occupied_zones() {
    let registry = Registry::builtin();
    let mut layouts = Vec::new();
    let grid = drop_layout(&mut layouts, &registry, "grid-2x2");
    drop_component(&mut layouts, &registry, "heading", &grid, 0);
    drop_component(&mut layouts, &registry, "text", &grid, 2);

    assert_eq!(
        layouts[0].grid_areas(),
        vec![
            vec!["zone-0".to_string(), "zone-1".to_string()],
            vec!["zone-2".to_string(), "zone-3".to_string()],
        ]
    );
    let saved = serialize(&layouts);
    let keys: Vec<&str> = saved[0].components.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zone-0", "zone-2"]);
    assert_eq!(saved[0].components["zone-0"].len(), 1);
    assert_eq!(saved[0].components["zone-2"].len(), 1);
}

#[test]
fn every_variant_fills_defaults_and_generates_deterministically() {
    let registry = Registry::builtin();
    for entry in registry.catalog() {
        let type_id = entry.type_id.as_str();
        if registry.has_component(type_id) {
            let a = registry.create_component(type_id).unwrap();
            let b = registry.create_component(type_id).unwrap();
            assert!(a.validate_state().is_empty(), "{}: {:?}", type_id, a.validate_state());
            assert_eq!(a.state(), &a.schema().default_state(), "{}", type_id);
            assert_eq!(a.code(), b.code(), "{}", type_id);
            assert!(!a.code().is_empty(), "{}", type_id);
        } else {
            let a = registry.create_layout(type_id).unwrap();
            let b = registry.create_layout(type_id).unwrap();
            assert!(a.validate_state().is_empty(), "{}: {:?}", type_id, a.validate_state());
            assert!(!a.zone_keys().is_empty(), "{}", type_id);
            assert_eq!(a.frame(), b.frame(), "{}", type_id);
        }
    }
    assert_eq!(
        registry.catalog().len(),
        components::ALL.len() + layouts::ALL.len()
    );
}

/// One state edit per field, each moving the field off its default.
fn edits_off_default(schema: &OptionSchema) -> Vec<(String, StateValue)> {
    schema
        .entries()
        .map(|(key, field)| {
            let value = match &field.kind {
                FieldKind::Text => StateValue::from(format!("Edited {}", key)),
                FieldKind::Color => StateValue::from("#123456"),
                FieldKind::Number { min, max } => {
                    let default = field.default.as_ref().and_then(StateValue::as_number);
                    StateValue::Number(if default == Some(*max) { *min } else { *max })
                }
                FieldKind::Select { options } => {
                    let default = field.default.as_ref().map(StateValue::to_text);
                    let other = options
                        .iter()
                        .find(|o| Some(o.as_str()) != default.as_deref())
                        .or_else(|| options.first())
                        .cloned()
                        .unwrap_or_default();
                    StateValue::from(other)
                }
            };
            (key, value)
        })
        .collect()
}

#[test]
fn field_edits_match_full_regeneration_for_every_variant() {
    let registry = Registry::builtin();
    for entry in registry.catalog() {
        let type_id = entry.type_id.as_str();
        if registry.has_component(type_id) {
            let mut block = registry.create_component(type_id).unwrap();
            let edits = edits_off_default(block.schema());
            for (key, value) in edits {
                block.apply_state(state_from([(key.clone(), value)]));
                let edited = block.code().to_string();
                block.update();
                assert_eq!(block.code(), edited, "{} after {}", type_id, key);
            }
            let first = block.code().to_string();
            block.update();
            assert_eq!(block.code(), first, "{}", type_id);
        } else {
            let mut layout = registry.create_layout(type_id).unwrap();
            let edits = edits_off_default(layout.block().schema());
            for (key, value) in edits {
                layout.apply_state(state_from([(key.clone(), value)]));
                let edited = layout.code().to_string();
                layout.update();
                assert_eq!(layout.code(), edited, "{} after {}", type_id, key);
            }
            let first = layout.code().to_string();
            layout.update();
            assert_eq!(layout.code(), first, "{}", type_id);
        }
    }
}

#[test]
fn user_text_is_escaped_in_markup() {
    let registry = Registry::builtin();
    let mut text = registry.create_component("text").unwrap();
    text.apply_state(state_from([(
        "content-Text Content",
        StateValue::from("<script>alert(\"x\")</script>"),
    )]));
    assert!(!text.code().contains("<script>"));
    assert!(text.code().contains("&lt;script&gt;"));

    let mut link = registry.create_component("link").unwrap();
    link.apply_state(state_from([(
        "content-Link URL",
        StateValue::from("\" onclick=\"steal()"),
    )]));
    assert!(!link.code().contains("\" onclick"));
}

#[test]
fn zone_drops_require_a_defined_zone() {
    let registry = Registry::builtin();
    let mut layouts = Vec::new();
    let grid = drop_layout(&mut layouts, &registry, "grid-2x2");
    let over = format!("{}-zone-7", grid);
    let outcome = apply_drop(
        &mut layouts,
        &registry,
        &DropEvent::new("text", Some(over.as_str())),
        ROOT_DROP_ZONE,
    );
    assert_eq!(
        outcome,
        DropOutcome::Ignored(IgnoreReason::UndefinedZone {
            layout: grid.clone(),
            zone: "zone-7".into(),
        })
    );
    assert_eq!(layouts[0].component_count(), 0);

    let over = format!("{}-zone-0", grid);
    let outcome = apply_drop(
        &mut layouts,
        &registry,
        &DropEvent::new("carousel", Some(over.as_str())),
        ROOT_DROP_ZONE,
    );
    assert!(!outcome.is_mutation());
}

#[test]
fn shrinking_a_layout_keeps_its_components() {
    let registry = Registry::builtin();
    let mut layouts = Vec::new();
    let columns = drop_layout(&mut layouts, &registry, "columns");
    layouts[0].apply_state(state_from([("layout-Columns", StateValue::Number(4.0))]));
    let text = drop_component(&mut layouts, &registry, "text", &columns, 3);

    layouts[0].apply_state(state_from([("layout-Columns", StateValue::Number(2.0))]));
    assert_eq!(layouts[0].component_count(), 1);
    let (zone, _) = layouts[0].locate(&text).unwrap();
    assert!(layouts[0].defines_zone(&zone));
}

#[test]
fn saved_page_round_trips_through_json() {
    let registry = Registry::builtin();
    let mut layouts = Vec::new();
    let hero = drop_layout(&mut layouts, &registry, "hero");
    let sidebar = drop_layout(&mut layouts, &registry, "sidebar-left");
    let heading = drop_component(&mut layouts, &registry, "heading", &hero, 0);
    drop_component(&mut layouts, &registry, "image", &sidebar, 1);
    layouts[0]
        .edit_component(
            &heading,
            state_from([("content-Heading Text", StateValue::from("Launch"))]),
        )
        .unwrap();

    let json = serde_json::to_string(&serialize(&layouts)).unwrap();
    let saved: Vec<SerializedLayout> = serde_json::from_str(&json).unwrap();
    let rebuilt = reconstruct(&saved, &registry);

    assert!(rebuilt.is_complete());
    assert_eq!(rebuilt.layouts.len(), 2);
    assert_eq!(serialize(&rebuilt.layouts), serialize(&layouts));
    for (before, after) in layouts.iter().zip(&rebuilt.layouts) {
        assert_eq!(before.instance_id(), after.instance_id());
        assert_eq!(before.state(), after.state());
        assert_eq!(before.code(), after.code());
    }
    assert_eq!(rebuilt.layouts[0].component(&heading).unwrap().text(), "Launch");
}

#[test]
fn unknown_types_are_dropped_with_a_notice() {
    let registry = Registry::builtin();
    let mut layouts = Vec::new();
    let grid = drop_layout(&mut layouts, &registry, "grid-2x2");
    drop_component(&mut layouts, &registry, "text", &grid, 0);
    drop_layout(&mut layouts, &registry, "stack");
    let mut saved = serialize(&layouts);
    saved[0].components.get_mut("zone-0").unwrap()[0].id = "marquee".into();
    saved[1].layout_type = "masonry".into();
    saved[1].id = "masonry".into();

    let rebuilt = reconstruct(&saved, &registry);
    assert_eq!(rebuilt.layouts.len(), 1);
    assert_eq!(rebuilt.layouts[0].instance_id(), grid);
    assert_eq!(rebuilt.layouts[0].component_count(), 0);
    assert_eq!(rebuilt.missing.len(), 2);
    assert_eq!(
        rebuilt.notice().as_deref(),
        Some("page recovered with 2 missing blocks")
    );
}

#[test]
fn global_registry_can_be_replaced_and_reset() {
    let mut builder = Registry::builder();
    builder.register_component(&components::Text).unwrap();
    let installed = registry::install(builder.build());
    assert!(Arc::ptr_eq(&installed, &registry::global()));
    assert!(!registry::global().has_component("button"));

    registry::reset();
    assert!(registry::global().has_component("button"));
    assert!(registry::global().has_layout("grid-3x3"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut builder = Registry::builder();
    builder.register_layout(&layouts::Stack).unwrap();
    assert_eq!(
        builder.register_layout(&layouts::Stack).err(),
        Some(BuilderError::DuplicateType {
            type_id: "stack".into()
        })
    );
}

async fn seeded_repository() -> (Arc<MemoryStore>, PageRepository<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let repo = PageRepository::new(Arc::clone(&store), &BuilderConfig::default());
    repo.upsert_page(Page::new("home", "Home", "/")).await.unwrap();
    (store, repo)
}

#[tokio::test]
async fn editor_saves_and_reloads_a_page() {
    let (_store, repo) = seeded_repository().await;
    let registry = Arc::new(Registry::builtin());
    let config = BuilderConfig::default();

    let mut session = EditorSession::new(Arc::clone(&registry), &config);
    let layout = match session.handle_drop(&DropEvent::new("container", Some(ROOT_DROP_ZONE))) {
        DropOutcome::LayoutPlaced { instance_id, .. } => instance_id,
        other => panic!("unexpected {:?}", other),
    };
    let over = format!("{}-zone-0", layout);
    assert!(session
        .handle_drop(&DropEvent::new("badge", Some(over.as_str())))
        .is_mutation());
    assert!(session.is_dirty());

    session.save(&repo, "home").await.unwrap();
    assert!(!session.is_dirty());

    let mut reopened = EditorSession::new(registry, &config);
    assert_eq!(reopened.load(&repo, "home").await.unwrap(), None);
    assert!(!reopened.is_dirty());
    assert_eq!(reopened.serialize(), session.serialize());
    assert!(reopened.defects().is_empty());
}

#[tokio::test]
async fn failed_save_keeps_the_session_dirty() {
    let (store, repo) = seeded_repository().await;
    let mut session = EditorSession::new(Arc::new(Registry::builtin()), &BuilderConfig::default());
    session.handle_drop(&DropEvent::new("stack", Some(ROOT_DROP_ZONE)));

    store.fail_writes(true);
    let err = session.save(&repo, "home").await.unwrap_err();
    assert!(matches!(err, BuilderError::Persistence { .. }));
    assert!(session.is_dirty());

    store.fail_writes(false);
    session.save(&repo, "home").await.unwrap();
    assert!(!session.is_dirty());
    assert!(matches!(
        session.save(&repo, "missing").await,
        Err(BuilderError::PageNotFound { .. })
    ));
}
