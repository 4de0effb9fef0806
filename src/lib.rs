//! # Pagesmith
//!
//! Page builder core: building blocks described by option schemas, layouts
//! that own named zones, a drop protocol for placing blocks, and a
//! serializer that saves and restores a page through a document store.
//!
//! ## Features
//! - Component and layout variants that regenerate their markup from state
//! - Registry of variants by type id, with a swappable process-wide catalog
//! - Drop handling for palette and in-page drags
//! - Save/load that rebuilds markup from state and isolates unknown types
//! - Static HTML export
//!
//! ## Example
//! ```ignore
//! use pagesmith::{apply_drop, DropEvent, Registry, ROOT_DROP_ZONE};
//!
//! let registry = Registry::builtin();
//! let mut layouts = Vec::new();
//! apply_drop(
//!     &mut layouts,
//!     &registry,
//!     &DropEvent::new("grid-2x2", Some(ROOT_DROP_ZONE)),
//!     ROOT_DROP_ZONE,
//! );
//! let saved = pagesmith::serialize::serialize(&layouts);
//! ```

pub mod block;
pub mod components;
pub mod config;
pub mod dnd;
pub mod editor;
pub mod error;
pub mod export;
pub mod layouts;
pub mod markup;
pub mod page;
pub mod registry;
pub mod schema;
pub mod serialize;
pub mod state;
pub mod store;
pub mod style;
pub mod zone;

// --- Core types ---
pub use block::{Block, Component, GeneratesMarkup, StateView};
pub use config::{BuilderConfig, ExportOptions};
pub use dnd::{apply_drop, DropEvent, DropOutcome, DropTarget, IgnoreReason, ROOT_DROP_ZONE};
pub use editor::EditorSession;
pub use error::{BuilderError, BuilderResult};
pub use markup::Markup;
pub use page::{Page, PageRepository};
pub use registry::{CatalogEntry, Registry, RegistryBuilder};
pub use schema::OptionSchema;
pub use serialize::{reconstruct, Reconstruction, SerializedComponent, SerializedLayout};
pub use state::{State, StateValue};
pub use store::{DocumentStore, FileStore, MemoryStore};
pub use zone::{Layout, LayoutKind};
