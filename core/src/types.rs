//! Observable property names, validation issues, and state snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SchemeRecord;

/// Message reported when the scheme text is empty and the URI is absolute.
pub const SCHEME_NOT_PROVIDED: &str = "scheme not provided";

/// Message reported when the scheme text fails the scheme-name grammar.
pub const INVALID_URI_SCHEME: &str = "invalid URI scheme";

/// The observable properties of a
/// [`SchemeValidationState`](crate::SchemeValidationState).
///
/// Observers receive one of these for every property whose value changed
/// during an entry-point call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// The trimmed scheme text.
    RawText,
    /// Whether an empty scheme denotes a relative reference.
    IsRelativeReference,
    /// The validation message; empty when valid.
    ErrorMessage,
    /// `true` exactly when the error message is empty.
    IsValid,
    /// Value of the selected registry record.
    SelectedValue,
    /// Id of the selected registry record.
    SelectedId,
}

impl Property {
    /// Every property, in notification order.
    pub const ALL: [Property; 6] = [
        Property::RawText,
        Property::IsRelativeReference,
        Property::ErrorMessage,
        Property::IsValid,
        Property::SelectedValue,
        Property::SelectedId,
    ];

    /// Stable snake_case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Property::RawText => "raw_text",
            Property::IsRelativeReference => "is_relative_reference",
            Property::ErrorMessage => "error_message",
            Property::IsValid => "is_valid",
            Property::SelectedValue => "selected_value",
            Property::SelectedId => "selected_id",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the current scheme text is not valid.
///
/// This is a state, not an error: the validator always holds either no
/// issue or exactly one of these.
///
/// # Examples
///
/// ```
/// use uri_scheme_core::SchemeIssue;
///
/// assert_eq!(SchemeIssue::NotProvided.to_string(), "scheme not provided");
/// assert_eq!(SchemeIssue::InvalidScheme.message(), "invalid URI scheme");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeIssue {
    /// Empty scheme text while the URI is not a relative reference.
    NotProvided,
    /// Non-empty text that is neither a known scheme nor grammatical.
    InvalidScheme,
}

impl SchemeIssue {
    /// The error message surfaced to hosts.
    pub fn message(self) -> &'static str {
        match self {
            SchemeIssue::NotProvided => SCHEME_NOT_PROVIDED,
            SchemeIssue::InvalidScheme => INVALID_URI_SCHEME,
        }
    }
}

impl fmt::Display for SchemeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Point-in-time copy of every observable property.
///
/// Serializes with snake_case keys; used for host output and for detecting
/// which properties an entry point changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeSnapshot {
    /// Trimmed scheme text.
    pub raw_text: String,
    /// Relative-reference flag.
    pub is_relative_reference: bool,
    /// Validation message; empty when valid.
    pub error_message: String,
    /// Mirrors `error_message.is_empty()`.
    pub is_valid: bool,
    /// Registry record matching `raw_text`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_record: Option<SchemeRecord>,
    /// Selected record value.
    pub selected_value: Option<String>,
    /// Selected record id.
    pub selected_id: Option<u64>,
}

impl SchemeSnapshot {
    /// Properties whose values differ between `self` and `after`, in
    /// [`Property::ALL`] order.
    pub fn changed_properties(&self, after: &SchemeSnapshot) -> Vec<Property> {
        Property::ALL
            .into_iter()
            .filter(|property| match property {
                Property::RawText => self.raw_text != after.raw_text,
                Property::IsRelativeReference => {
                    self.is_relative_reference != after.is_relative_reference
                }
                Property::ErrorMessage => self.error_message != after.error_message,
                Property::IsValid => self.is_valid != after.is_valid,
                Property::SelectedValue => self.selected_value != after.selected_value,
                Property::SelectedId => self.selected_id != after.selected_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> SchemeSnapshot {
        SchemeSnapshot {
            raw_text: String::new(),
            is_relative_reference: false,
            error_message: SCHEME_NOT_PROVIDED.to_string(),
            is_valid: false,
            matched_record: None,
            selected_value: None,
            selected_id: None,
        }
    }

    #[test]
    fn test_property_names_match_serde() {
        for property in Property::ALL {
            let json = serde_json::to_value(property).unwrap();
            assert_eq!(json, serde_json::Value::String(property.name().to_string()));
        }
    }

    #[test]
    fn test_changed_properties_none() {
        let snapshot = empty_snapshot();
        assert!(snapshot.changed_properties(&snapshot.clone()).is_empty());
    }

    #[test]
    fn test_changed_properties_in_fixed_order() {
        let before = empty_snapshot();
        let after = SchemeSnapshot {
            raw_text: "ftp".to_string(),
            error_message: String::new(),
            is_valid: true,
            selected_value: Some("ftp".to_string()),
            selected_id: Some(5),
            ..before.clone()
        };
        assert_eq!(
            before.changed_properties(&after),
            vec![
                Property::RawText,
                Property::ErrorMessage,
                Property::IsValid,
                Property::SelectedValue,
                Property::SelectedId,
            ]
        );
    }

    #[test]
    fn test_snapshot_omits_missing_match() {
        let json = serde_json::to_value(empty_snapshot()).unwrap();
        assert!(json.get("matched_record").is_none());
        assert_eq!(json["error_message"], "scheme not provided");
    }
}
