//! Type registry: the only place building block variants are wired in.
//!
//! Maps a stable type id to a factory for components and for layouts. A
//! [`Registry`] is built once through [`RegistryBuilder`] and is immutable
//! afterwards; the process-wide instance behind [`global`] can be swapped with
//! [`install`] and dropped with [`reset`].

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::block::{component_instance_id, layout_instance_id, Block, Component, GeneratesMarkup};
use crate::error::{BuilderError, BuilderResult};
use crate::zone::{Layout, LayoutKind};

/// Builds a component given its instance id.
pub type ComponentFactory = Arc<dyn Fn(String) -> Component + Send + Sync>;

/// Builds a layout given its instance id.
pub type LayoutFactory = Arc<dyn Fn(String) -> Layout + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Component,
    Layout,
}

/// Palette entry for the editor shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub type_id: String,
    pub label: String,
    pub kind: BlockKind,
}

#[derive(Clone)]
struct Entry<F> {
    label: String,
    factory: F,
}

/// Frozen catalog of variants.
#[derive(Clone, Default)]
pub struct Registry {
    components: IndexMap<String, Entry<ComponentFactory>>,
    layouts: IndexMap<String, Entry<LayoutFactory>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Every built-in component and layout in palette order.
    pub fn builtin() -> Self {
        let mut builder = Registry::builder();
        for kind in crate::components::ALL {
            builder.components.insert(kind.type_id().to_string(), component_entry(*kind));
        }
        for kind in crate::layouts::ALL {
            builder.layouts.insert(kind.type_id().to_string(), layout_entry(*kind));
        }
        builder.build()
    }

    pub fn resolve_component(&self, type_id: &str) -> BuilderResult<&ComponentFactory> {
        self.components
            .get(type_id)
            .map(|e| &e.factory)
            .ok_or_else(|| BuilderError::UnknownType {
                type_id: type_id.to_string(),
            })
    }

    pub fn resolve_layout(&self, type_id: &str) -> BuilderResult<&LayoutFactory> {
        self.layouts
            .get(type_id)
            .map(|e| &e.factory)
            .ok_or_else(|| BuilderError::UnknownType {
                type_id: type_id.to_string(),
            })
    }

    pub fn has_component(&self, type_id: &str) -> bool {
        self.components.contains_key(type_id)
    }

    pub fn has_layout(&self, type_id: &str) -> bool {
        self.layouts.contains_key(type_id)
    }

    /// Fresh component with a new instance id and every schema default
    /// written into its state.
    pub fn create_component(&self, type_id: &str) -> BuilderResult<Component> {
        let factory = self.resolve_component(type_id)?;
        let mut component = factory(component_instance_id(type_id));
        let defaults = component.schema().default_state();
        component.apply_state(defaults);
        Ok(component)
    }

    /// Fresh layout with a new instance id and every schema default
    /// written into its state.
    pub fn create_layout(&self, type_id: &str) -> BuilderResult<Layout> {
        let factory = self.resolve_layout(type_id)?;
        let mut layout = factory(layout_instance_id());
        let defaults = layout.block().schema().default_state();
        layout.apply_state(defaults);
        Ok(layout)
    }

    /// Components first, then layouts, each in registration order.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let components = self.components.iter().map(|(id, e)| CatalogEntry {
            type_id: id.clone(),
            label: e.label.clone(),
            kind: BlockKind::Component,
        });
        let layouts = self.layouts.iter().map(|(id, e)| CatalogEntry {
            type_id: id.clone(),
            label: e.label.clone(),
            kind: BlockKind::Layout,
        });
        components.chain(layouts).collect()
    }
}

fn component_entry(kind: &'static dyn GeneratesMarkup) -> Entry<ComponentFactory> {
    Entry {
        label: kind.label().to_string(),
        factory: Arc::new(move |instance_id: String| Block::new(kind, instance_id)),
    }
}

fn layout_entry(kind: &'static dyn LayoutKind) -> Entry<LayoutFactory> {
    Entry {
        label: kind.label().to_string(),
        factory: Arc::new(move |instance_id: String| Layout::new(kind, instance_id)),
    }
}

/// Collects registrations; duplicates are rejected.
#[derive(Default)]
pub struct RegistryBuilder {
    components: IndexMap<String, Entry<ComponentFactory>>,
    layouts: IndexMap<String, Entry<LayoutFactory>>,
}

impl RegistryBuilder {
    /// Start from the built-in catalog.
    pub fn with_builtins() -> Self {
        let registry = Registry::builtin();
        Self {
            components: registry.components,
            layouts: registry.layouts,
        }
    }

    pub fn register_component(
        &mut self,
        kind: &'static dyn GeneratesMarkup,
    ) -> BuilderResult<&mut Self> {
        self.register_component_factory(kind.type_id(), kind.label(), component_entry(kind).factory)
    }

    pub fn register_component_factory(
        &mut self,
        type_id: &str,
        label: &str,
        factory: ComponentFactory,
    ) -> BuilderResult<&mut Self> {
        if self.components.contains_key(type_id) {
            return Err(BuilderError::DuplicateType {
                type_id: type_id.to_string(),
            });
        }
        tracing::debug!(type_id, "registered component");
        self.components.insert(
            type_id.to_string(),
            Entry {
                label: label.to_string(),
                factory,
            },
        );
        Ok(self)
    }

    pub fn register_layout(&mut self, kind: &'static dyn LayoutKind) -> BuilderResult<&mut Self> {
        self.register_layout_factory(kind.type_id(), kind.label(), layout_entry(kind).factory)
    }

    pub fn register_layout_factory(
        &mut self,
        type_id: &str,
        label: &str,
        factory: LayoutFactory,
    ) -> BuilderResult<&mut Self> {
        if self.layouts.contains_key(type_id) {
            return Err(BuilderError::DuplicateType {
                type_id: type_id.to_string(),
            });
        }
        tracing::debug!(type_id, "registered layout");
        self.layouts.insert(
            type_id.to_string(),
            Entry {
                label: label.to_string(),
                factory,
            },
        );
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            components: self.components,
            layouts: self.layouts,
        }
    }
}

static GLOBAL: RwLock<Option<Arc<Registry>>> = RwLock::new(None);

/// Process-wide registry; the built-in catalog is installed on first use.
pub fn global() -> Arc<Registry> {
    if let Some(registry) = GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Arc::clone(registry);
    }
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    let registry = slot.get_or_insert_with(|| {
        tracing::debug!("installing built-in registry");
        Arc::new(Registry::builtin())
    });
    Arc::clone(registry)
}

/// Replace the process-wide registry.
pub fn install(registry: Registry) -> Arc<Registry> {
    let registry = Arc::new(registry);
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&registry));
    registry
}

/// Drop the process-wide registry; the next [`global`] call rebuilds it.
pub fn reset() {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = None;
}
