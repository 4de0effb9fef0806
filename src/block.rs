//! The building block contract.
//!
//! A variant is a stateless `&'static` value implementing [`GeneratesMarkup`];
//! a [`Block`] pairs it with one placement's identity, state and derived
//! markup. State is the only truth; markup and code are recomputed from it.

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::markup::Markup;
use crate::schema::{state_key, OptionSchema};
use crate::state::{State, StateValue};

/// Read access to a block's state with schema defaults filled in.
#[derive(Clone, Copy)]
pub struct StateView<'a> {
    schema: &'a OptionSchema,
    state: &'a State,
}

impl<'a> StateView<'a> {
    pub fn new(schema: &'a OptionSchema, state: &'a State) -> Self {
        Self { schema, state }
    }

    /// Stored value, else the schema default.
    pub fn value(&self, group: &str, label: &str) -> Option<&'a StateValue> {
        let key = state_key(group, label);
        self.state
            .get(&key)
            .or_else(|| self.schema.default_for(&key))
    }

    pub fn text(&self, group: &str, label: &str) -> String {
        self.value(group, label)
            .map(StateValue::to_text)
            .unwrap_or_default()
    }

    /// Numeric value; an unparseable stored value degrades to the default.
    pub fn number(&self, group: &str, label: &str) -> f64 {
        let key = state_key(group, label);
        self.state
            .get(&key)
            .and_then(StateValue::as_number)
            .or_else(|| self.schema.default_for(&key).and_then(StateValue::as_number))
            .unwrap_or(0.0)
    }

    pub fn choice(&self, group: &str, label: &str) -> String {
        self.text(group, label)
    }

    pub fn is_set(&self, group: &str, label: &str) -> bool {
        self.state.contains_key(&state_key(group, label))
    }
}

/// Capability every component and layout variant implements.
pub trait GeneratesMarkup: Send + Sync {
    /// Stable registry key, stored alongside every instance
    fn type_id(&self) -> &'static str;

    /// Palette label
    fn label(&self) -> &'static str;

    fn schema(&self) -> &'static OptionSchema;

    /// Pure function of state to element description.
    fn generate(&self, state: &StateView<'_>) -> Markup;

    /// Field-scoped update for `key`. Return `false` to request a full
    /// [`GeneratesMarkup::generate`] instead, which is always correct.
    fn patch(&self, _key: &str, _state: &StateView<'_>, _markup: &mut Markup) -> bool {
        false
    }
}

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp, strictly increasing within the process.
pub fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_STAMP.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// `"<typeId><timestamp>"`
pub fn component_instance_id(type_id: &str) -> String {
    format!("{}{}", type_id, next_timestamp())
}

/// `"layout-<timestamp>"`
pub fn layout_instance_id() -> String {
    format!("layout-{}", next_timestamp())
}

/// One placed building block: identity, state and cached output.
pub struct Block<K: ?Sized + 'static> {
    kind: &'static K,
    instance_id: String,
    state: State,
    markup: Markup,
    code: String,
}

impl<K: ?Sized + GeneratesMarkup> Block<K> {
    /// Fresh block with empty state; markup is generated immediately.
    pub fn new(kind: &'static K, instance_id: impl Into<String>) -> Self {
        let mut block = Self {
            kind,
            instance_id: instance_id.into(),
            state: State::new(),
            markup: Markup::default(),
            code: String::new(),
        };
        block.update();
        block
    }

    pub fn kind(&self) -> &'static K {
        self.kind
    }

    pub fn type_id(&self) -> &'static str {
        self.kind.type_id()
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn schema(&self) -> &'static OptionSchema {
        self.kind.schema()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn view(&self) -> StateView<'_> {
        StateView::new(self.kind.schema(), &self.state)
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn tag(&self) -> &str {
        &self.markup.tag
    }

    pub fn text(&self) -> &str {
        &self.markup.text
    }

    pub fn classes(&self) -> &[String] {
        &self.markup.classes
    }

    pub fn styles(&self) -> &indexmap::IndexMap<String, String> {
        &self.markup.styles
    }

    /// Cached markup from the last update.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Recompute every derived attribute from state.
    pub fn update(&mut self) {
        let view = StateView::new(self.kind.schema(), &self.state);
        self.markup = self.kind.generate(&view);
        self.code = self.markup.render();
    }

    /// Merge `partial` into state and refresh the derived attributes.
    pub fn apply_state(&mut self, partial: State) {
        if partial.is_empty() {
            return;
        }
        let schema = self.kind.schema();
        let keys: Vec<String> = partial.keys().cloned().collect();
        for key in &keys {
            if schema.field(key).is_none() {
                tracing::warn!(
                    type_id = self.kind.type_id(),
                    instance_id = %self.instance_id,
                    "state key '{}' is not declared by the schema",
                    key
                );
            }
        }
        self.state.extend(partial);

        let view = StateView::new(schema, &self.state);
        let patched = keys
            .iter()
            .all(|key| self.kind.patch(key, &view, &mut self.markup));
        if patched {
            self.code = self.markup.render();
        } else {
            self.update();
        }
    }

    /// Schema and state defects, as human readable lines.
    pub fn validate_state(&self) -> Vec<String> {
        let schema = self.kind.schema();
        let mut defects = schema.defects();
        defects.extend(schema.check_state(&self.state));
        defects
    }
}

impl<K: ?Sized + 'static> Clone for Block<K> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            instance_id: self.instance_id.clone(),
            state: self.state.clone(),
            markup: self.markup.clone(),
            code: self.code.clone(),
        }
    }
}

impl<K: ?Sized + GeneratesMarkup> fmt::Debug for Block<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("type_id", &self.kind.type_id())
            .field("instance_id", &self.instance_id)
            .field("state", &self.state)
            .field("code", &self.code)
            .finish()
    }
}

/// A placed component variant.
pub type Component = Block<dyn GeneratesMarkup>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::state_from;
    use std::sync::OnceLock;

    struct Label;

    impl GeneratesMarkup for Label {
        fn type_id(&self) -> &'static str {
            "label"
        }

        fn label(&self) -> &'static str {
            "Label"
        }

        fn schema(&self) -> &'static OptionSchema {
            static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                OptionSchema::new()
                    .group("content", "Content", |g| g.text("Text", "Hi"))
                    .group("style", "Styling", |g| g.number("Size", 14.0, 8.0, 72.0))
            })
        }

        fn generate(&self, state: &StateView<'_>) -> Markup {
            let mut m = Markup::new("span").with_text(state.text("content", "Text"));
            m.style("font-size", crate::style::px(state.number("style", "Size")));
            m
        }

        fn patch(&self, key: &str, state: &StateView<'_>, markup: &mut Markup) -> bool {
            if key == "content-Text" {
                markup.text = state.text("content", "Text");
                return true;
            }
            false
        }
    }

    static LABEL: Label = Label;

    fn label_block(instance_id: &str) -> Component {
        let kind: &'static dyn GeneratesMarkup = &LABEL;
        Block::new(kind, instance_id)
    }

    #[test]
    fn new_block_renders_defaults() {
        let block = label_block("label1");
        assert_eq!(block.code(), "<span style=\"font-size: 14px;\">Hi</span>");
    }

    #[test]
    fn patch_matches_full_update() {
        let mut patched = label_block("a");
        patched.apply_state(state_from([("content-Text", StateValue::from("<x>"))]));

        let mut full = label_block("b");
        full.apply_state(state_from([("content-Text", StateValue::from("<x>"))]));
        full.update();

        assert_eq!(patched.code(), full.code());
        assert!(patched.code().contains("&lt;x&gt;"));
    }

    #[test]
    fn later_keys_win_and_defects_are_reported() {
        let mut block = label_block("a");
        block.apply_state(state_from([("style-Size", StateValue::Number(20.0))]));
        block.apply_state(state_from([
            ("style-Size", StateValue::Number(99.0)),
            ("style-Colour", StateValue::from("red")),
        ]));
        assert_eq!(block.view().number("style", "Size"), 99.0);
        let defects = block.validate_state();
        assert!(defects.contains(&"unknown state key style-Colour".to_string()));
        assert!(defects.iter().any(|d| d.contains("outside [8, 72]")));
    }

    #[test]
    fn unparseable_number_degrades_to_default() {
        let mut block = label_block("a");
        block.apply_state(state_from([("style-Size", StateValue::from("huge"))]));
        assert_eq!(block.styles()["font-size"], "14px");
    }

    #[test]
    fn timestamps_are_strictly_increasing() {
        let a = next_timestamp();
        let b = next_timestamp();
        assert!(b > a);
        assert_ne!(component_instance_id("button"), component_instance_id("button"));
    }
}
