// src/domain/note.rs

use serde::{Deserialize, Serialize};

/// Post type whose metadata is tracked.
pub const PROPERTY_POST_TYPE: &str = "property";

pub const PRICE_KEY: &str = "_price";
pub const RENT_KEY: &str = "_rent";
pub const ON_MARKET_KEY: &str = "_on_market";
pub const PRICE_CHANGE_DATE_KEY: &str = "_price_change_date";
pub const ON_MARKET_CHANGE_DATE_KEY: &str = "_on_market_change_date";

/// Value of the on-market flag meaning "listed".
pub const ON_MARKET_YES: &str = "yes";

/// Approval state every note is written with.
pub const NOTE_APPROVED: &str = "1";

/// Format used for the `*_change_date` timestamps.
pub const CHANGE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Action,
}

/// What happened to the property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NoteAction {
    /// Price or rent edited. Values are kept exactly as stored.
    PropertyPriceChange {
        original_value: String,
        new_value: String,
    },
    PropertyOnMarket,
    PropertyOffMarket,
}

impl NoteAction {
    pub fn market(on_market: bool) -> Self {
        if on_market {
            NoteAction::PropertyOnMarket
        } else {
            NoteAction::PropertyOffMarket
        }
    }
}

/// Body of a note comment, stored as JSON in the comment content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub note_type: NoteType,
    #[serde(flatten)]
    pub action: NoteAction,
}

impl NotePayload {
    pub fn action(action: NoteAction) -> Self {
        Self {
            note_type: NoteType::Action,
            action,
        }
    }

    pub fn to_content(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_content(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// One-line, human readable description for the admin screens.
    pub fn summary(&self) -> String {
        match &self.action {
            NoteAction::PropertyPriceChange {
                original_value,
                new_value,
            } => {
                let from = if original_value.is_empty() {
                    "(none)"
                } else {
                    original_value.as_str()
                };
                format!("Price changed from {from} to {new_value}")
            }
            NoteAction::PropertyOnMarket => "Property on market".to_string(),
            NoteAction::PropertyOffMarket => "Property taken off market".to_string(),
        }
    }
}

/// Whether `key` is one of the price fields that produce price-change notes.
pub fn is_price_key(key: &str) -> bool {
    key == PRICE_KEY || key == RENT_KEY
}

/// Parses a plain decimal string (sign, digits, point, exponent, surrounding
/// whitespace). Anything else, including `inf`, `NaN` and thousands
/// separators, is not numeric.
fn numeric_value(s: &str) -> Option<f64> {
    let s = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    if !s.bytes().any(|b| b.is_ascii_digit())
        || !s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    s.parse().ok()
}

/// Whether a stored metadata value and its replacement count as the same.
/// Two numeric strings compare by value (`"250000"` equals `"250000.00"`);
/// otherwise the strings must match exactly.
pub fn same_meta_value(a: &str, b: &str) -> bool {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_change_serializes_flat() {
        let payload = NotePayload::action(NoteAction::PropertyPriceChange {
            original_value: "250000".to_string(),
            new_value: "245000".to_string(),
        });
        let json: serde_json::Value =
            serde_json::from_str(&payload.to_content().unwrap()).unwrap();

        assert_eq!(json["note_type"], "action");
        assert_eq!(json["action"], "property_price_change");
        assert_eq!(json["original_value"], "250000");
        assert_eq!(json["new_value"], "245000");
    }

    #[test]
    fn market_notes_carry_only_the_action() {
        let payload = NotePayload::action(NoteAction::market(false));
        assert_eq!(
            payload.to_content().unwrap(),
            r#"{"note_type":"action","action":"property_off_market"}"#
        );

        let back = NotePayload::from_content(r#"{"note_type":"action","action":"property_on_market"}"#)
            .unwrap();
        assert_eq!(back.action, NoteAction::PropertyOnMarket);
    }

    #[test]
    fn unknown_action_does_not_decode() {
        assert!(NotePayload::from_content(r#"{"note_type":"action","action":"sold"}"#).is_err());
        assert!(NotePayload::from_content("a:2:{}").is_err());
    }

    #[test]
    fn summaries() {
        let price = NotePayload::action(NoteAction::PropertyPriceChange {
            original_value: String::new(),
            new_value: "1200".to_string(),
        });
        assert_eq!(price.summary(), "Price changed from (none) to 1200");
        assert_eq!(
            NotePayload::action(NoteAction::PropertyOnMarket).summary(),
            "Property on market"
        );
    }

    #[test]
    fn price_keys() {
        assert!(is_price_key("_price"));
        assert!(is_price_key("_rent"));
        assert!(!is_price_key("_price_change_date"));
        assert!(!is_price_key("price"));
    }

    #[test]
    fn numeric_values_compare_by_value() {
        assert!(same_meta_value("250000", "250000.00"));
        assert!(same_meta_value("1e3", "1000"));
        assert!(same_meta_value(" 42", "42"));
        assert!(!same_meta_value("250000", "245000"));
    }

    #[test]
    fn other_values_compare_as_text() {
        assert!(same_meta_value("yes", "yes"));
        assert!(!same_meta_value("yes", "Yes"));
        assert!(!same_meta_value("", "0"));
        assert!(!same_meta_value("1,200", "1200"));
        assert!(!same_meta_value("inf", "INF"));
        assert!(same_meta_value("POA", "POA"));
    }
}
