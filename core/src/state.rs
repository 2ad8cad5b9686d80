//! Scheme validation state bound to a [`SchemeRegistry`].
//!
//! The state tracks the scheme text of a URI-like value and keeps four
//! derived properties consistent with it: the matched registry record, the
//! selected record (id and value), the validation issue, and validity.
//!
//! There are four entry points: [`set_raw_text`], [`set_is_relative_reference`],
//! [`set_selected_id`], and [`set_selected_value`]. Each one runs a single
//! forward sweep over the properties that depend on it and never re-enters
//! another entry point, so propagation always terminates. After every sweep:
//!
//! 1. `is_valid() == error_message().is_empty()`.
//! 2. Empty text with `is_relative_reference()` has no error.
//! 3. Empty text without it reports [`SchemeIssue::NotProvided`].
//! 4. Non-empty text is valid iff it matches a registry record or passes the
//!    scheme-name grammar.
//! 5. `selected_id()` and `selected_value()` are both `Some` or both `None`.
//! 6. `selected_id()` always names a record in the bound registry.
//!
//! Observers registered with [`subscribe`] hear about each changed property
//! once per call, after the sweep has settled.
//!
//! # Examples
//!
//! ```
//! use uri_scheme_core::SchemeValidationState;
//!
//! let mut state = SchemeValidationState::new(None, None);
//! assert_eq!(state.error_message(), "scheme not provided");
//!
//! state.set_raw_text(" HTTP ");
//! assert!(state.is_valid());
//! assert_eq!(state.raw_text(), "HTTP");
//! assert_eq!(state.selected_value(), Some("http"));
//! assert_eq!(state.selected_id(), Some(0));
//!
//! state.set_raw_text("1bad");
//! assert_eq!(state.error_message(), "invalid URI scheme");
//! assert_eq!(state.selected_id(), None);
//! ```
//!
//! [`set_raw_text`]: SchemeValidationState::set_raw_text
//! [`set_is_relative_reference`]: SchemeValidationState::set_is_relative_reference
//! [`set_selected_id`]: SchemeValidationState::set_selected_id
//! [`set_selected_value`]: SchemeValidationState::set_selected_value
//! [`subscribe`]: SchemeValidationState::subscribe

use tracing::{debug, warn};

use crate::error::{Result, SchemeError};
use crate::grammar::{is_valid_scheme_grammar, scheme_eq, split_scheme};
use crate::observer::{Observers, PropertyObserver, SubscriptionId};
use crate::registry::{SchemeRecord, SchemeRegistry};
use crate::types::{SchemeIssue, SchemeSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    id: u64,
    value: String,
}

impl From<&SchemeRecord> for Selection {
    fn from(record: &SchemeRecord) -> Self {
        Self {
            id: record.id(),
            value: record.value().to_string(),
        }
    }
}

/// Validator for the scheme component of a URI-like value.
///
/// Owns its [`SchemeRegistry`]; registry changes go through the
/// `*_custom_scheme` passthroughs so the derived properties stay in sync.
#[derive(Debug)]
pub struct SchemeValidationState {
    registry: SchemeRegistry,
    raw_text: String,
    is_relative_reference: bool,
    matched_id: Option<u64>,
    selection: Option<Selection>,
    issue: Option<SchemeIssue>,
    observers: Observers,
}

impl Default for SchemeValidationState {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl SchemeValidationState {
    /// Creates a state bound to `registry` (built-ins only when `None`) and
    /// seeded with `initial_scheme`.
    ///
    /// Without initial text the state is empty, absolute, and therefore
    /// reports [`SchemeIssue::NotProvided`].
    pub fn new(registry: Option<SchemeRegistry>, initial_scheme: Option<&str>) -> Self {
        let mut state = Self {
            registry: registry.unwrap_or_default(),
            raw_text: String::new(),
            is_relative_reference: false,
            matched_id: None,
            selection: None,
            issue: Some(SchemeIssue::NotProvided),
            observers: Observers::default(),
        };
        if let Some(text) = initial_scheme {
            state.apply_raw_text(text);
        }
        state
    }

    /// Creates a state seeded from whole URI-like text.
    ///
    /// The scheme is extracted with [`split_scheme`]. Text without a scheme
    /// is treated as a relative reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_scheme_core::SchemeValidationState;
    ///
    /// let state = SchemeValidationState::from_uri(None, "mailto:ops@example.com");
    /// assert_eq!(state.raw_text(), "mailto");
    /// assert!(!state.is_relative_reference());
    ///
    /// let state = SchemeValidationState::from_uri(None, "../index.html");
    /// assert_eq!(state.raw_text(), "");
    /// assert!(state.is_relative_reference());
    /// assert!(state.is_valid());
    /// ```
    pub fn from_uri(registry: Option<SchemeRegistry>, uri_text: &str) -> Self {
        let scheme = split_scheme(uri_text);
        let mut state = Self::new(registry, None);
        state.apply_is_relative_reference(scheme.is_none());
        if let Some(scheme) = scheme {
            state.apply_raw_text(scheme);
        }
        state
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The trimmed scheme text.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Whether an empty scheme is acceptable.
    pub fn is_relative_reference(&self) -> bool {
        self.is_relative_reference
    }

    /// The current validation issue, if any.
    pub fn issue(&self) -> Option<SchemeIssue> {
        self.issue
    }

    /// Validation message; empty when the scheme is valid.
    pub fn error_message(&self) -> &str {
        self.issue.map_or("", SchemeIssue::message)
    }

    /// `true` exactly when [`error_message`](Self::error_message) is empty.
    pub fn is_valid(&self) -> bool {
        self.issue.is_none()
    }

    /// The registry record whose value matches the text ignoring case.
    pub fn matched_record(&self) -> Option<&SchemeRecord> {
        self.matched_id.and_then(|id| self.registry.find_by_id(id))
    }

    /// Value of the selected record.
    pub fn selected_value(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.value.as_str())
    }

    /// Id of the selected record.
    pub fn selected_id(&self) -> Option<u64> {
        self.selection.as_ref().map(|s| s.id)
    }

    /// The bound registry.
    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// All registry records in insertion order.
    pub fn all_schemes(&self) -> &[SchemeRecord] {
        self.registry.all()
    }

    /// Releases the bound registry.
    pub fn into_registry(self) -> SchemeRegistry {
        self.registry
    }

    /// Copies every observable property.
    pub fn snapshot(&self) -> SchemeSnapshot {
        SchemeSnapshot {
            raw_text: self.raw_text.clone(),
            is_relative_reference: self.is_relative_reference,
            error_message: self.error_message().to_string(),
            is_valid: self.is_valid(),
            matched_record: self.matched_record().cloned(),
            selected_value: self.selected_value().map(String::from),
            selected_id: self.selected_id(),
        }
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Registers an observer for property changes.
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: PropertyObserver + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// Sets the scheme text.
    ///
    /// Surrounding whitespace is dropped. Setting the text it already holds
    /// does nothing.
    pub fn set_raw_text(&mut self, value: &str) {
        self.notifying(|state| {
            state.apply_raw_text(value);
        });
    }

    /// Sets whether an empty scheme denotes a relative reference.
    ///
    /// Only affects validity while the text is empty.
    pub fn set_is_relative_reference(&mut self, value: bool) {
        self.notifying(|state| {
            state.apply_is_relative_reference(value);
        });
    }

    /// Selects a registry record by id, or clears the selection with `None`.
    ///
    /// Selecting a record copies its value into the scheme text. Clearing
    /// the selection also clears the text when the text equals (ignoring
    /// case) the value that was selected.
    ///
    /// # Errors
    ///
    /// [`SchemeError::UnknownSchemeId`] if `id` is not in the registry. The
    /// selection is cleared exactly as for `None` before returning.
    pub fn set_selected_id(&mut self, id: Option<u64>) -> Result<()> {
        self.notifying(|state| state.apply_selected_id(id))
    }

    /// Selects the registry record whose value matches `value` ignoring case.
    ///
    /// Text that matches no record clears the selection and leaves the
    /// scheme text untouched.
    pub fn set_selected_value(&mut self, value: &str) {
        self.notifying(|state| {
            let found = state.registry.find_by_value(value.trim()).map(Selection::from);
            match found {
                Some(selection) => state.select(selection),
                None => {
                    if let Some(previous) = state.selection.take() {
                        debug!(value = %previous.value, "selection cleared by unknown value");
                    }
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Registry passthroughs
    // ------------------------------------------------------------------

    /// Adds a custom scheme.
    ///
    /// The state is re-derived only when the new record matches the current
    /// text.
    ///
    /// # Errors
    ///
    /// See [`SchemeRegistry::add`].
    pub fn add_custom_scheme(&mut self, value: &str) -> Result<SchemeRecord> {
        self.notifying(|state| {
            let record = state.registry.add(value)?;
            if state.affected_by(&record) {
                state.rederive();
            }
            Ok(record)
        })
    }

    /// Removes a custom scheme.
    ///
    /// The state is re-derived when the removed record matched the current
    /// text or was selected; a selection of it is dropped.
    ///
    /// # Errors
    ///
    /// See [`SchemeRegistry::remove`].
    pub fn remove_custom_scheme(&mut self, id: u64) -> Result<SchemeRecord> {
        self.notifying(|state| {
            let record = state.registry.remove(id)?;
            if state.affected_by(&record) {
                state.rederive();
            }
            Ok(record)
        })
    }

    /// Renames a custom scheme.
    ///
    /// The state is re-derived when either the old or the new value matches
    /// the current text, or the record is selected.
    ///
    /// # Errors
    ///
    /// See [`SchemeRegistry::rename`].
    pub fn rename_custom_scheme(&mut self, id: u64, value: &str) -> Result<SchemeRecord> {
        self.notifying(|state| {
            let record = state.registry.rename(id, value)?;
            if state.affected_by(&record) {
                state.rederive();
            }
            Ok(record)
        })
    }

    // ------------------------------------------------------------------
    // Sweeps
    // ------------------------------------------------------------------

    /// Runs `f`, then notifies observers of every property it changed.
    fn notifying<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.observers.is_empty() {
            return f(self);
        }
        let before = self.snapshot();
        let out = f(self);
        let after = self.snapshot();
        let changed = before.changed_properties(&after);
        if !changed.is_empty() {
            self.observers.notify(&changed, &after);
        }
        out
    }

    fn apply_raw_text(&mut self, value: &str) -> bool {
        let normalized = value.trim();
        if normalized == self.raw_text {
            return false;
        }
        debug!(from = %self.raw_text, to = %normalized, "scheme text changed");
        self.raw_text = normalized.to_string();
        self.rederive();
        true
    }

    fn apply_is_relative_reference(&mut self, value: bool) -> bool {
        if value == self.is_relative_reference {
            return false;
        }
        debug!(relative = value, "relative reference flag changed");
        self.is_relative_reference = value;
        if self.raw_text.is_empty() {
            self.issue = self.derive_issue();
        }
        true
    }

    fn apply_selected_id(&mut self, id: Option<u64>) -> Result<()> {
        let Some(id) = id else {
            self.deselect();
            return Ok(());
        };
        let Some(selection) = self.registry.find_by_id(id).map(Selection::from) else {
            warn!(id, "selected unknown scheme id");
            self.deselect();
            return Err(SchemeError::UnknownSchemeId(id));
        };
        self.select(selection);
        Ok(())
    }

    /// Stores `selection` and copies its value into the text.
    fn select(&mut self, selection: Selection) {
        let value = selection.value.clone();
        self.selection = Some(selection);
        self.apply_raw_text(&value);
    }

    /// Whether a registry change to `record` can alter the derived state.
    fn affected_by(&self, record: &SchemeRecord) -> bool {
        self.selected_id() == Some(record.id())
            || self.matched_id == Some(record.id())
            || (!self.raw_text.is_empty() && scheme_eq(record.value(), &self.raw_text))
    }

    fn deselect(&mut self) {
        let Some(previous) = self.selection.take() else {
            return;
        };
        debug!(id = previous.id, value = %previous.value, "selection cleared");
        if scheme_eq(&self.raw_text, &previous.value) {
            self.apply_raw_text("");
        }
    }

    /// Recomputes match, issue, and selection from the current text.
    fn rederive(&mut self) {
        let matched = if self.raw_text.is_empty() {
            None
        } else {
            self.registry.find_by_value(&self.raw_text).map(Selection::from)
        };
        self.matched_id = matched.as_ref().map(|s| s.id);
        self.issue = self.derive_issue();
        self.selection = matched;
    }

    fn derive_issue(&self) -> Option<SchemeIssue> {
        if self.raw_text.is_empty() {
            return (!self.is_relative_reference).then_some(SchemeIssue::NotProvided);
        }
        if self.matched_id.is_some() || is_valid_scheme_grammar(&self.raw_text) {
            None
        } else {
            Some(SchemeIssue::InvalidScheme)
        }
    }
}
