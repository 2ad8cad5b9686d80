//! URI scheme registry and scheme-name validation.
//!
//! This crate tracks the scheme component of a URI-like value and keeps it
//! in sync with a registry of known schemes:
//!
//! - [`SchemeRegistry`]: ordered, case-insensitively unique
//!   [`SchemeRecord`]s, seeded with ten protected built-ins.
//! - [`SchemeValidationState`]: the scheme text plus its derived
//!   properties (matched record, selection, error message, validity),
//!   recomputed eagerly by each setter.
//!
//! Validation results are states ([`SchemeIssue`]), never errors. Registry
//! misuse is reported through [`SchemeError`].
//!
//! Everything here is synchronous and in memory. A validator has a single
//! owner; wrap it in a mutex if it must be shared across threads.
//!
//! # Example
//!
//! ```
//! use uri_scheme_core::*;
//!
//! let mut state = SchemeValidationState::new(None, None);
//! assert!(!state.is_valid());
//!
//! state.set_is_relative_reference(true);
//! assert!(state.is_valid());
//!
//! let git = state.add_custom_scheme("git").unwrap();
//! state.set_selected_id(Some(git.id())).unwrap();
//! assert_eq!(state.raw_text(), "git");
//! assert_eq!(state.matched_record(), Some(&git));
//!
//! assert!(matches!(
//!     state.remove_custom_scheme(0),
//!     Err(SchemeError::ProtectedRecord(_))
//! ));
//! ```

mod error;
mod grammar;
mod observer;
mod registry;
mod state;
mod types;

pub use error::{Result, SchemeError};
pub use grammar::{is_valid_scheme_grammar, split_scheme};
pub use observer::{PropertyObserver, SubscriptionId};
pub use registry::{BUILTIN_SCHEMES, SchemeRecord, SchemeRegistry};
pub use state::SchemeValidationState;
pub use types::{INVALID_URI_SCHEME, Property, SCHEME_NOT_PROVIDED, SchemeIssue, SchemeSnapshot};
