//! Error types for checked property access.

use thiserror::Error;

/// Errors raised where property values cross the type-erased boundary.
///
/// Typed keys make these impossible at compile time; they surface only from
/// [`OverrideSet::try_resolve`](crate::OverrideSet::try_resolve) and the
/// name-based override API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
	/// No property with this name exists on the owner type.
	#[error("unknown property '{name}' on {owner}{}", .suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownProperty {
		/// Owner type name.
		owner: &'static str,
		/// The name that was looked up.
		name: String,
		/// A close match, if one exists.
		suggestion: Option<String>,
	},

	/// A value of the wrong type was supplied for a property.
	#[error("type mismatch for property '{property}': expected {expected}, got {got}")]
	TypeMismatch {
		/// Property label.
		property: &'static str,
		/// The property's value type.
		expected: &'static str,
		/// The type that was supplied or stored.
		got: &'static str,
	},

	/// An explicit null was requested for a property that cannot hold one.
	#[error("property '{property}' of type {value_type} cannot be set to null")]
	NotNullable {
		/// Property label.
		property: &'static str,
		/// The property's value type.
		value_type: &'static str,
	},
}

/// Result type for checked property operations.
pub type Result<T> = std::result::Result<T, PropertyError>;
