//! Editing session over one page's layout tree.
//!
//! Every successful mutation bumps a revision counter. A save snapshots the
//! tree synchronously with [`EditorSession::begin_save`], writes it, and then
//! [`EditorSession::finish_save`] marks the snapshot's revision as saved, so
//! an edit made while the write was in flight keeps the session dirty.

use std::sync::Arc;

use crate::block::Component;
use crate::config::BuilderConfig;
use crate::dnd::{apply_drop, DropEvent, DropOutcome};
use crate::error::{BuilderError, BuilderResult};
use crate::page::PageRepository;
use crate::registry::Registry;
use crate::serialize::{self, MissingBlock, SerializedLayout};
use crate::state::State;
use crate::store::DocumentStore;
use crate::zone::{self, Layout};

/// Serialized tree captured at the start of a save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSnapshot {
    pub revision: u64,
    pub layouts: Vec<SerializedLayout>,
}

pub struct EditorSession {
    registry: Arc<Registry>,
    root_drop_zone: String,
    layouts: Vec<Layout>,
    /// Last tree read from or written to storage
    saved: Vec<SerializedLayout>,
    missing: Vec<MissingBlock>,
    revision: u64,
    saved_revision: u64,
}

impl EditorSession {
    pub fn new(registry: Arc<Registry>, config: &BuilderConfig) -> Self {
        Self {
            registry,
            root_drop_zone: config.root_drop_zone.clone(),
            layouts: Vec::new(),
            saved: Vec::new(),
            missing: Vec::new(),
            revision: 0,
            saved_revision: 0,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Layouts in position order.
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn layout(&self, instance_id: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.instance_id() == instance_id)
    }

    pub fn component(&self, instance_id: &str) -> Option<&Component> {
        self.layouts.iter().find_map(|l| l.component(instance_id))
    }

    /// Blocks dropped by the last reconstruction.
    pub fn missing(&self) -> &[MissingBlock] {
        &self.missing
    }

    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn handle_drop(&mut self, event: &DropEvent) -> DropOutcome {
        let outcome = apply_drop(&mut self.layouts, &self.registry, event, &self.root_drop_zone);
        if outcome.is_mutation() {
            self.touch();
        }
        outcome
    }

    pub fn edit_component(&mut self, instance_id: &str, partial: State) -> BuilderResult<()> {
        let index = zone::find_component(&self.layouts, instance_id).ok_or_else(|| {
            BuilderError::UnknownInstance {
                instance_id: instance_id.to_string(),
            }
        })?;
        self.layouts[index].edit_component(instance_id, partial)?;
        self.touch();
        Ok(())
    }

    pub fn edit_layout(&mut self, instance_id: &str, partial: State) -> BuilderResult<()> {
        let index = self.layout_index(instance_id)?;
        self.layouts[index].apply_state(partial);
        self.touch();
        Ok(())
    }

    pub fn move_component(
        &mut self,
        instance_id: &str,
        target_layout: &str,
        zone: &str,
        index: Option<usize>,
    ) -> BuilderResult<()> {
        zone::move_component(&mut self.layouts, instance_id, target_layout, zone, index)?;
        self.touch();
        Ok(())
    }

    pub fn remove_component(&mut self, instance_id: &str) -> BuilderResult<Component> {
        let index = zone::find_component(&self.layouts, instance_id).ok_or_else(|| {
            BuilderError::UnknownInstance {
                instance_id: instance_id.to_string(),
            }
        })?;
        let component = self.layouts[index]
            .remove_component(instance_id)
            .ok_or_else(|| BuilderError::UnknownInstance {
                instance_id: instance_id.to_string(),
            })?;
        self.touch();
        Ok(component)
    }

    /// Remove a layout together with its components.
    pub fn remove_layout(&mut self, instance_id: &str) -> BuilderResult<Layout> {
        let index = self.layout_index(instance_id)?;
        let layout = self.layouts.remove(index);
        zone::renumber(&mut self.layouts);
        self.touch();
        Ok(layout)
    }

    pub fn move_layout(&mut self, instance_id: &str, index: usize) -> BuilderResult<()> {
        zone::move_layout(&mut self.layouts, instance_id, index)?;
        self.touch();
        Ok(())
    }

    fn layout_index(&self, instance_id: &str) -> BuilderResult<usize> {
        zone::find_layout(&self.layouts, instance_id).ok_or_else(|| BuilderError::UnknownInstance {
            instance_id: instance_id.to_string(),
        })
    }

    /// Schema and state defects of every block, prefixed by instance id.
    pub fn defects(&self) -> Vec<String> {
        let mut defects = Vec::new();
        for layout in &self.layouts {
            for defect in layout.validate_state() {
                defects.push(format!("{}: {}", layout.instance_id(), defect));
            }
            for placed in layout.zones().values().flatten() {
                for defect in placed.node.validate_state() {
                    defects.push(format!("{}: {}", placed.instance_id(), defect));
                }
            }
        }
        defects
    }

    pub fn serialize(&self) -> Vec<SerializedLayout> {
        serialize::serialize(&self.layouts)
    }

    /// Replace the tree with one rebuilt from saved data. Returns the
    /// recovery notice when blocks had to be dropped.
    pub fn restore(&mut self, saved: Vec<SerializedLayout>) -> Option<String> {
        let rebuilt = serialize::reconstruct(&saved, &self.registry);
        let notice = rebuilt.notice();
        if let Some(notice) = &notice {
            tracing::warn!(missing = rebuilt.missing.len(), "{}", notice);
        }
        self.layouts = rebuilt.layouts;
        self.missing = rebuilt.missing;
        self.saved = saved;
        self.saved_revision = self.revision;
        notice
    }

    /// Swap the catalog and rebuild the tree against it. A clean session is
    /// rebuilt from the saved data, so blocks that were missing can come
    /// back; a dirty one is rebuilt from its current tree.
    pub fn set_registry(&mut self, registry: Arc<Registry>) -> Option<String> {
        self.registry = registry;
        if self.is_dirty() {
            let current = self.serialize();
            let rebuilt = serialize::reconstruct(&current, &self.registry);
            let notice = rebuilt.notice();
            self.layouts = rebuilt.layouts;
            self.missing = rebuilt.missing;
            self.touch();
            notice
        } else {
            let saved = std::mem::take(&mut self.saved);
            self.restore(saved)
        }
    }

    pub fn begin_save(&self) -> SaveSnapshot {
        SaveSnapshot {
            revision: self.revision,
            layouts: self.serialize(),
        }
    }

    /// Record a completed write of `snapshot`.
    pub fn finish_save(&mut self, snapshot: SaveSnapshot) {
        self.saved_revision = snapshot.revision;
        self.saved = snapshot.layouts;
    }

    /// Persist the tree into page `page_id`. On failure nothing changes and
    /// the session stays dirty.
    pub async fn save<S: DocumentStore>(
        &mut self,
        pages: &PageRepository<S>,
        page_id: &str,
    ) -> BuilderResult<()> {
        let snapshot = self.begin_save();
        pages.save_layouts(page_id, snapshot.layouts.clone()).await?;
        tracing::info!(page = %page_id, revision = snapshot.revision, "session saved");
        self.finish_save(snapshot);
        Ok(())
    }

    /// Load page `page_id`, replacing the current tree.
    pub async fn load<S: DocumentStore>(
        &mut self,
        pages: &PageRepository<S>,
        page_id: &str,
    ) -> BuilderResult<Option<String>> {
        let page = pages.get_page(page_id).await?;
        tracing::info!(page = %page_id, layouts = page.body.components.len(), "loading page");
        Ok(self.restore(page.body.components))
    }
}
