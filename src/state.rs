use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single field value held in a block's state bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Number(f64),
    Text(String),
}

impl StateValue {
    /// Text form of the value. Numbers print without a trailing `.0`.
    pub fn to_text(&self) -> String {
        match self {
            StateValue::Text(s) => s.clone(),
            StateValue::Number(n) => format_number(*n),
        }
    }

    /// Numeric form of the value, parsing text when it holds a number.
    /// Non-finite values (`NaN`, `inf`) do not count as numbers.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            StateValue::Number(n) => Some(*n),
            StateValue::Text(s) => s.trim().trim_end_matches("px").parse::<f64>().ok(),
        };
        n.filter(|n| n.is_finite())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            StateValue::Number(_) => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Number(value)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        StateValue::Number(f64::from(value))
    }
}

/// Sparse state bag keyed by `"<groupId>-<fieldLabel>"`.
///
/// Ordered so that serialized snapshots are byte-stable.
pub type State = BTreeMap<String, StateValue>;

/// Build a [`State`] from literal pairs.
///
/// ```ignore
/// let state = state_from([("content-Button Text", "Buy Now".into())]);
/// ```
pub fn state_from<I, K>(pairs: I) -> State
where
    I: IntoIterator<Item = (K, StateValue)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Formats a number for CSS and markup: integers print without a fraction.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_without_fraction() {
        assert_eq!(StateValue::Number(16.0).to_text(), "16");
        assert_eq!(StateValue::Number(1.5).to_text(), "1.5");
        assert_eq!(format_number(-4.0), "-4");
    }

    #[test]
    fn text_parses_as_number() {
        assert_eq!(StateValue::from("24").as_number(), Some(24.0));
        assert_eq!(StateValue::from("24px").as_number(), Some(24.0));
        assert_eq!(StateValue::from("wide").as_number(), None);
    }

    #[test]
    fn non_finite_values_are_not_numbers() {
        assert_eq!(StateValue::from("NaN").as_number(), None);
        assert_eq!(StateValue::from("inf").as_number(), None);
        assert_eq!(StateValue::from("-infinity").as_number(), None);
        assert_eq!(StateValue::Number(f64::NAN).as_number(), None);
        assert_eq!(StateValue::Number(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn untagged_round_trip_through_json() {
        let state = state_from([
            ("style-Gap", StateValue::Number(12.0)),
            ("content-Text Content", StateValue::from("Hello")),
        ]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"content-Text Content":"Hello","style-Gap":12.0}"#);
        let back: State = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
