//! Zone composition model.
//!
//! A [`Layout`] owns named zones (`zone-<index>`); each holds an ordered list
//! of placed components. The set of valid zone keys is whatever the layout's
//! variant derives from current state via [`LayoutKind::grid_areas`], so it is
//! re-derived on every call and never cached across an update.

use std::collections::BTreeMap;
use std::fmt;

use crate::block::{Block, Component, GeneratesMarkup, StateView};
use crate::error::{BuilderError, BuilderResult};
use crate::markup::Markup;
use crate::state::State;

pub const ZONE_PREFIX: &str = "zone-";

/// `3` -> `zone-3`
pub fn zone_key(index: usize) -> String {
    format!("{}{}", ZONE_PREFIX, index)
}

/// `zone-3` -> `3`
pub fn zone_index(key: &str) -> Option<usize> {
    key.strip_prefix(ZONE_PREFIX)?.parse().ok()
}

/// Row-major grid of `count` zones laid out `columns` wide.
pub fn grid_of(count: usize, columns: usize) -> Vec<Vec<String>> {
    let columns = columns.max(1);
    (0..count)
        .collect::<Vec<_>>()
        .chunks(columns)
        .map(|row| row.iter().map(|&i| zone_key(i)).collect())
        .collect()
}

/// Box properties a layout derives from its state.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    pub rows: usize,
    pub columns: usize,
    pub gap: f64,
    pub padding: f64,
    pub background_color: String,
    pub border_radius: f64,
    pub min_height: f64,
}

impl Default for LayoutFrame {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            gap: 16.0,
            padding: 24.0,
            background_color: "#ffffff".to_string(),
            border_radius: 0.0,
            min_height: 120.0,
        }
    }
}

/// Capability of layout variants on top of [`GeneratesMarkup`].
pub trait LayoutKind: GeneratesMarkup {
    fn frame(&self, state: &StateView<'_>) -> LayoutFrame;

    /// Zone topology, row-major.
    fn grid_areas(&self, state: &StateView<'_>) -> Vec<Vec<String>>;

    /// Extra styling for one zone's wrapper, e.g. a sidebar background.
    fn style_zone(&self, _state: &StateView<'_>, _zone: &str, _markup: &mut Markup) {}
}

/// A component sitting in a zone.
#[derive(Debug, Clone)]
pub struct PlacedComponent {
    pub node: Component,
    pub in_zone: bool,
    /// Free-floating position; always `None` for zoned components
    pub position: Option<usize>,
}

impl PlacedComponent {
    pub fn new(node: Component) -> Self {
        Self {
            node,
            in_zone: true,
            position: None,
        }
    }

    /// Component type id
    pub fn id(&self) -> &'static str {
        self.node.type_id()
    }

    pub fn instance_id(&self) -> &str {
        self.node.instance_id()
    }

    pub fn label(&self) -> &'static str {
        self.node.label()
    }
}

/// A placed layout with its zones.
#[derive(Clone)]
pub struct Layout {
    block: Block<dyn LayoutKind>,
    frame: LayoutFrame,
    position: usize,
    zones: BTreeMap<String, Vec<PlacedComponent>>,
    code: String,
}

impl Layout {
    pub fn new(kind: &'static dyn LayoutKind, instance_id: impl Into<String>) -> Self {
        let block = Block::new(kind, instance_id);
        let frame = kind.frame(&block.view());
        let mut layout = Self {
            block,
            frame,
            position: 0,
            zones: BTreeMap::new(),
            code: String::new(),
        };
        layout.refresh_code();
        layout
    }

    pub fn block(&self) -> &Block<dyn LayoutKind> {
        &self.block
    }

    pub fn type_id(&self) -> &'static str {
        self.block.type_id()
    }

    pub fn label(&self) -> &'static str {
        self.block.label()
    }

    pub fn instance_id(&self) -> &str {
        self.block.instance_id()
    }

    pub fn state(&self) -> &State {
        self.block.state()
    }

    pub fn markup(&self) -> &Markup {
        self.block.markup()
    }

    pub fn frame(&self) -> &LayoutFrame {
        &self.frame
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Full markup: the layout element with every zone and its components.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn update(&mut self) {
        self.block.update();
        self.after_state_change();
    }

    pub fn apply_state(&mut self, partial: State) {
        self.block.apply_state(partial);
        self.after_state_change();
    }

    pub fn validate_state(&self) -> Vec<String> {
        self.block.validate_state()
    }

    pub fn grid_areas(&self) -> Vec<Vec<String>> {
        self.block.kind().grid_areas(&self.block.view())
    }

    /// Flattened zone keys in row-major order.
    pub fn zone_keys(&self) -> Vec<String> {
        self.grid_areas().into_iter().flatten().collect()
    }

    pub fn defines_zone(&self, key: &str) -> bool {
        self.grid_areas().iter().flatten().any(|k| k == key)
    }

    pub fn zones(&self) -> &BTreeMap<String, Vec<PlacedComponent>> {
        &self.zones
    }

    pub fn zone(&self, key: &str) -> &[PlacedComponent] {
        self.zones.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn component_count(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    /// Append `component` to `zone`, creating the zone array if absent.
    pub fn insert_component(&mut self, zone: &str, component: Component) -> BuilderResult<()> {
        let len = self.zone(zone).len();
        self.insert_component_at(zone, len, component)
    }

    /// Insert at `index` (clamped to the zone length).
    pub fn insert_component_at(
        &mut self,
        zone: &str,
        index: usize,
        component: Component,
    ) -> BuilderResult<()> {
        if !self.defines_zone(zone) {
            return Err(BuilderError::UnknownZone {
                layout: self.instance_id().to_string(),
                zone: zone.to_string(),
            });
        }
        let entries = self.zones.entry(zone.to_string()).or_default();
        let index = index.min(entries.len());
        entries.insert(index, PlacedComponent::new(component));
        self.refresh_code();
        Ok(())
    }

    /// Remove a component by instance id. Empty zones disappear.
    pub fn remove_component(&mut self, instance_id: &str) -> Option<Component> {
        let (zone, index) = self.locate(instance_id)?;
        let entries = self.zones.get_mut(&zone)?;
        let placed = entries.remove(index);
        if entries.is_empty() {
            self.zones.remove(&zone);
        }
        self.refresh_code();
        Some(placed.node)
    }

    /// `(zone key, index)` of a component.
    pub fn locate(&self, instance_id: &str) -> Option<(String, usize)> {
        self.zones.iter().find_map(|(zone, entries)| {
            entries
                .iter()
                .position(|p| p.instance_id() == instance_id)
                .map(|index| (zone.clone(), index))
        })
    }

    pub fn component(&self, instance_id: &str) -> Option<&Component> {
        self.zones
            .values()
            .flatten()
            .find(|p| p.instance_id() == instance_id)
            .map(|p| &p.node)
    }

    /// Apply a form edit to one of this layout's components.
    pub fn edit_component(&mut self, instance_id: &str, partial: State) -> BuilderResult<()> {
        let placed = self
            .zones
            .values_mut()
            .flatten()
            .find(|p| p.instance_id() == instance_id)
            .ok_or_else(|| BuilderError::UnknownInstance {
                instance_id: instance_id.to_string(),
            })?;
        placed.node.apply_state(partial);
        self.refresh_code();
        Ok(())
    }

    /// Replace the zone map wholesale; used by reconstruction.
    pub(crate) fn set_zones(&mut self, zones: BTreeMap<String, Vec<PlacedComponent>>) {
        self.zones = zones;
        self.settle_zones();
        self.refresh_code();
    }

    fn after_state_change(&mut self) {
        self.frame = self.block.kind().frame(&self.block.view());
        self.settle_zones();
        self.refresh_code();
    }

    /// Move components out of zones the current topology no longer defines
    /// into the last defined zone, keeping their order.
    fn settle_zones(&mut self) {
        let keys = self.zone_keys();
        let orphaned: Vec<String> = self
            .zones
            .keys()
            .filter(|k| !keys.contains(*k))
            .cloned()
            .collect();
        if orphaned.is_empty() {
            return;
        }
        let Some(target) = keys.last().cloned() else {
            return;
        };
        let mut orphaned = orphaned;
        orphaned.sort_by_key(|k| zone_index(k).unwrap_or(usize::MAX));
        for key in orphaned {
            if let Some(entries) = self.zones.remove(&key) {
                tracing::debug!(
                    layout = %self.block.instance_id(),
                    "moving {} component(s) from {} into {}",
                    entries.len(),
                    key,
                    target
                );
                self.zones.entry(target.clone()).or_default().extend(entries);
            }
        }
    }

    fn refresh_code(&mut self) {
        let areas = self.grid_areas();
        let mut inner = String::new();
        for key in areas.iter().flatten() {
            let mut zone = Markup::new("div");
            zone.attr("data-zone", key.as_str());
            zone.style("grid-area", key.as_str())
                .style("display", "flex")
                .style("flex-direction", "column")
                .style("gap", crate::style::px(self.frame.gap))
                .style("min-width", "0");
            self.block
                .kind()
                .style_zone(&self.block.view(), key, &mut zone);
            let contents: String = self
                .zone(key)
                .iter()
                .map(|p| p.node.code())
                .collect();
            inner.push_str(&zone.render_with_inner(&contents));
        }
        let mut shell = self.block.markup().clone();
        shell.attr("data-layout", self.block.instance_id());
        self.code = shell.render_with_inner(&inner);
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("type_id", &self.type_id())
            .field("instance_id", &self.instance_id())
            .field("position", &self.position)
            .field("state", self.state())
            .field("zones", &self.zones)
            .finish()
    }
}

/// Reassign positions `0..n` in current order.
pub fn renumber(layouts: &mut [Layout]) {
    for (index, layout) in layouts.iter_mut().enumerate() {
        layout.set_position(index);
    }
}

pub fn find_layout(layouts: &[Layout], instance_id: &str) -> Option<usize> {
    layouts.iter().position(|l| l.instance_id() == instance_id)
}

/// Index of the layout holding component `instance_id`.
pub fn find_component(layouts: &[Layout], instance_id: &str) -> Option<usize> {
    layouts
        .iter()
        .position(|l| l.component(instance_id).is_some())
}

/// Move a component into `zone` of layout `target`, at `index` or appended.
/// The target zone is checked before anything is removed.
pub fn move_component(
    layouts: &mut [Layout],
    instance_id: &str,
    target: &str,
    zone: &str,
    index: Option<usize>,
) -> BuilderResult<()> {
    let to = find_layout(layouts, target).ok_or_else(|| BuilderError::UnknownInstance {
        instance_id: target.to_string(),
    })?;
    if !layouts[to].defines_zone(zone) {
        return Err(BuilderError::UnknownZone {
            layout: target.to_string(),
            zone: zone.to_string(),
        });
    }
    let unknown = || BuilderError::UnknownInstance {
        instance_id: instance_id.to_string(),
    };
    let from = find_component(layouts, instance_id).ok_or_else(unknown)?;
    let component = layouts[from]
        .remove_component(instance_id)
        .ok_or_else(unknown)?;
    let layout = &mut layouts[to];
    let index = index.unwrap_or_else(|| layout.zone(zone).len());
    layout.insert_component_at(zone, index, component)
}

/// Move layout `instance_id` to `index` (clamped) and renumber.
pub fn move_layout(layouts: &mut Vec<Layout>, instance_id: &str, index: usize) -> BuilderResult<()> {
    let from = find_layout(layouts, instance_id).ok_or_else(|| BuilderError::UnknownInstance {
        instance_id: instance_id.to_string(),
    })?;
    let layout = layouts.remove(from);
    let index = index.min(layouts.len());
    layouts.insert(index, layout);
    renumber(layouts);
    Ok(())
}
