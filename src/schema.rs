//! Declarative option schemas.
//!
//! A schema is an ordered list of option groups, each an ordered list of
//! fields. The same definition drives the property form in the editor and
//! the default values generators fall back to, so every field needs a default.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::state::{format_number, State, StateValue};

/// Builds the state key for a field. The only place keys are minted.
pub fn state_key(group_id: &str, label: &str) -> String {
    format!("{}-{}", group_id, label)
}

/// Value type of a field, with the constraints the form enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number { min: f64, max: f64 },
    Select { options: Vec<String> },
    Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique within its group; part of the state key
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<StateValue>,
}

impl Field {
    /// Returns a defect message when `value` is not legal for this field.
    fn check_value(&self, key: &str, value: &StateValue) -> Option<String> {
        match &self.kind {
            FieldKind::Number { min, max } => match value.as_number() {
                Some(n) if n < *min || n > *max => Some(format!(
                    "value {} for field {} is outside [{}, {}]",
                    format_number(n),
                    key,
                    format_number(*min),
                    format_number(*max)
                )),
                Some(_) => None,
                None => Some(format!("value '{}' for field {} is not a number", value, key)),
            },
            FieldKind::Select { options } => {
                let text = value.to_text();
                if options.iter().any(|o| *o == text) {
                    None
                } else {
                    Some(format!(
                        "value '{}' for field {} is not one of: {}",
                        text,
                        key,
                        options.join(", ")
                    ))
                }
            }
            FieldKind::Text | FieldKind::Color => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Key prefix, e.g. `content`
    pub id: String,
    /// Display name, e.g. `Typography`
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSchema {
    pub groups: Vec<OptionGroup>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group built by `build`.
    pub fn group(
        mut self,
        id: &str,
        name: &str,
        build: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        let builder = build(GroupBuilder {
            group: OptionGroup {
                id: id.to_string(),
                name: name.to_string(),
                fields: Vec::new(),
            },
        });
        self.groups.push(builder.group);
        self
    }

    /// Every `(state key, field)` pair in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &Field)> + '_ {
        self.groups.iter().flat_map(|group| {
            group
                .fields
                .iter()
                .map(move |field| (state_key(&group.id, &field.label), field))
        })
    }

    /// Look up the field owning `key`.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.groups.iter().find_map(|group| {
            let label = key.strip_prefix(group.id.as_str())?.strip_prefix('-')?;
            group.fields.iter().find(|f| f.label == label)
        })
    }

    pub fn default_for(&self, key: &str) -> Option<&StateValue> {
        self.field(key).and_then(|f| f.default.as_ref())
    }

    /// Flat state holding the default of every field that declares one.
    pub fn default_state(&self) -> State {
        self.entries()
            .filter_map(|(key, field)| field.default.clone().map(|v| (key, v)))
            .collect()
    }

    /// Defects in the schema itself.
    pub fn defects(&self) -> Vec<String> {
        let mut defects = Vec::new();
        if self.groups.iter().all(|g| g.fields.is_empty()) {
            defects.push("schema declares no fields".to_string());
        }
        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id.as_str()) {
                defects.push(format!("duplicate option group '{}'", group.id));
            }
            let mut labels = HashSet::new();
            for field in &group.fields {
                let key = state_key(&group.id, &field.label);
                if !labels.insert(field.label.as_str()) {
                    defects.push(format!(
                        "duplicate field label '{}' in group '{}'",
                        field.label, group.id
                    ));
                }
                match &field.default {
                    None => defects.push(format!("missing default for field {}", key)),
                    Some(value) => {
                        if let Some(problem) = field.check_value(&key, value) {
                            defects.push(format!("default {}", problem));
                        }
                    }
                }
            }
        }
        defects
    }

    /// Defects of `state` measured against this schema.
    pub fn check_state(&self, state: &State) -> Vec<String> {
        let mut defects = Vec::new();
        for (key, value) in state {
            match self.field(key) {
                None => defects.push(format!("unknown state key {}", key)),
                Some(field) => {
                    if let Some(problem) = field.check_value(key, value) {
                        defects.push(problem);
                    }
                }
            }
        }
        defects
    }
}

/// Fluent builder for one option group.
pub struct GroupBuilder {
    group: OptionGroup,
}

impl GroupBuilder {
    fn push(mut self, label: &str, kind: FieldKind, default: StateValue) -> Self {
        self.group.fields.push(Field {
            label: label.to_string(),
            kind,
            default: Some(default),
        });
        self
    }

    pub fn text(self, label: &str, default: &str) -> Self {
        self.push(label, FieldKind::Text, StateValue::from(default))
    }

    pub fn number(self, label: &str, default: f64, min: f64, max: f64) -> Self {
        self.push(label, FieldKind::Number { min, max }, StateValue::Number(default))
    }

    pub fn select(self, label: &str, default: &str, options: &[&str]) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        self.push(label, FieldKind::Select { options }, StateValue::from(default))
    }

    pub fn color(self, label: &str, default: &str) -> Self {
        self.push(label, FieldKind::Color, StateValue::from(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::state_from;
    use pretty_assertions::assert_eq;

    fn sample() -> OptionSchema {
        OptionSchema::new()
            .group("content", "Content", |g| g.text("Button Text", "Click Me"))
            .group("style", "Styling", |g| {
                g.select("Button Style", "Solid", &["Solid", "Outline"])
                    .number("Border Radius", 6.0, 0.0, 50.0)
                    .color("Button Color", "#2563eb")
            })
    }

    #[test]
    fn keys_are_group_prefixed_labels() {
        let keys: Vec<String> = sample().entries().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "content-Button Text",
                "style-Button Style",
                "style-Border Radius",
                "style-Button Color",
            ]
        );
    }

    #[test]
    fn field_lookup_resolves_exactly_one_field() {
        let schema = sample();
        assert_eq!(schema.field("style-Border Radius").unwrap().label, "Border Radius");
        assert!(schema.field("style-Missing").is_none());
        assert!(schema.field("styleBorder Radius").is_none());
    }

    #[test]
    fn default_state_is_flat() {
        let state = sample().default_state();
        assert_eq!(state.len(), 4);
        assert_eq!(state["style-Border Radius"], StateValue::Number(6.0));
    }

    #[test]
    fn missing_default_is_a_defect() {
        let mut schema = sample();
        schema.groups[0].fields[0].default = None;
        assert_eq!(
            schema.defects(),
            vec!["missing default for field content-Button Text".to_string()]
        );
    }

    #[test]
    fn empty_schema_is_a_defect() {
        assert_eq!(OptionSchema::new().defects(), vec!["schema declares no fields"]);
    }

    #[test]
    fn state_checks_bounds_and_options() {
        let schema = sample();
        let mut state = State::new();
        state.insert("style-Border Radius".into(), StateValue::Number(80.0));
        state.insert("style-Button Style".into(), StateValue::from("Dashed"));
        state.insert("style-Typo".into(), StateValue::from("x"));
        let defects = schema.check_state(&state);
        assert_eq!(defects.len(), 3);
        assert!(defects.iter().any(|d| d.contains("outside [0, 50]")));
        assert!(defects.iter().any(|d| d.contains("not one of: Solid, Outline")));
        assert!(defects.iter().any(|d| d == "unknown state key style-Typo"));
    }

    #[test]
    fn non_finite_number_is_a_defect() {
        let schema = sample();
        let state = state_from([("style-Border Radius", StateValue::from("NaN"))]);
        assert_eq!(
            schema.check_state(&state),
            vec!["value 'NaN' for field style-Border Radius is not a number".to_string()]
        );
    }

    #[test]
    fn schema_serializes_for_form_generation() {
        let json = serde_json::to_value(sample()).unwrap();
        let field = &json["groups"][1]["fields"][1];
        assert_eq!(field["type"], "number");
        assert_eq!(field["min"], 0.0);
        assert_eq!(field["default"], 6.0);
    }
}
