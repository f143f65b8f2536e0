//! Name-indexed property schemas.
//!
//! Typed keys cover almost every use. A [`PropertySchema`] adds a way in for
//! callers that only have a property name and a loosely typed value, such as
//! table-driven tests. Values supplied this way are type-checked when the
//! override is created and rejected with [`PropertyError::TypeMismatch`]
//! rather than converted.

use std::any::Any;

use crate::error::{PropertyError, Result};
use crate::lookup::PropertyLookup;
use crate::maker::Maker;
use crate::overrides::{Override, OverrideSet};
use crate::property::{Nullable, Property, PropertyId};


/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

type ValueFactory<O> = Box<dyn Fn(Box<dyn Any + Send>) -> Option<Override<O>> + Send + Sync>;
type NullFactory<O> = Box<dyn Fn() -> Override<O> + Send + Sync>;

/// Describes one property of `O` by name.
pub struct PropertyDescriptor<O> {
	id: PropertyId,
	name: &'static str,
	value_type: &'static str,
	value: ValueFactory<O>,
	null: Option<NullFactory<O>>,
}

impl<O: 'static> PropertyDescriptor<O> {
	/// Describes `key`, which cannot be overridden with null by name.
	pub fn new<V>(key: &Property<O, V>) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		let key = *key;
		Self {
			id: key.id(),
			name: key.name(),
			value_type: std::any::type_name::<V>(),
			value: Box::new(move |value: Box<dyn Any + Send>| {
				value
					.downcast::<V>()
					.ok()
					.map(|value| Override::value(&key, *value))
			}),
			null: None,
		}
	}

	/// Describes `key` and allows null overrides by name.
	pub fn nullable<V>(key: &Property<O, V>) -> Self
	where
		V: Nullable + Clone + Send + Sync + 'static,
	{
		let mut descriptor = Self::new(key);
		let key = *key;
		descriptor.null = Some(Box::new(move || Override::null(&key)));
		descriptor
	}
}

impl<O> PropertyDescriptor<O> {
	pub fn id(&self) -> PropertyId {
		self.id
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Name of the property's value type.
	pub fn value_type(&self) -> &'static str {
		self.value_type
	}

	pub fn is_nullable(&self) -> bool {
		self.null.is_some()
	}

	/// Creates an override from a value of unchecked type.
	pub fn override_with<T: Any + Send>(&self, value: T) -> Result<Override<O>> {
		(self.value)(Box::new(value)).ok_or(PropertyError::TypeMismatch {
			property: self.name,
			expected: self.value_type,
			got: std::any::type_name::<T>(),
		})
	}

	/// Creates an explicit-null override.
	pub fn override_null(&self) -> Result<Override<O>> {
		let null = self.null.as_ref().ok_or(PropertyError::NotNullable {
			property: self.name,
			value_type: self.value_type,
		})?;
		Ok(null())
	}
}

impl<O> std::fmt::Debug for PropertyDescriptor<O> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PropertyDescriptor")
			.field("name", &self.name)
			.field("value_type", &self.value_type)
			.field("nullable", &self.is_nullable())
			.finish()
	}
}

/// Ordered set of property descriptors for `O`.
pub struct PropertySchema<O> {
	properties: Vec<PropertyDescriptor<O>>,
}

impl<O> PropertySchema<O> {
	pub fn new() -> Self {
		Self {
			properties: Vec::new(),
		}
	}

	/// Adds a descriptor. A later descriptor with the same name shadows an
	/// earlier one for name lookups.
	pub fn with(mut self, descriptor: PropertyDescriptor<O>) -> Self {
		self.properties.push(descriptor);
		self
	}

	pub fn get(&self, name: &str) -> Option<&PropertyDescriptor<O>> {
		self.properties.iter().rev().find(|d| d.name == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.properties.iter().map(|d| d.name)
	}

	pub fn len(&self) -> usize {
		self.properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	/// Looks up `name`, failing with a suggestion when it is unknown.
	pub fn require(&self, name: &str) -> Result<&PropertyDescriptor<O>> {
		self.get(name).ok_or_else(|| PropertyError::UnknownProperty {
			owner: std::any::type_name::<O>(),
			name: name.to_string(),
			suggestion: self.suggest(name),
		})
	}

	/// Suggests a similar property name using fuzzy matching.
	pub fn suggest(&self, name: &str) -> Option<String> {
		self.names()
			.min_by_key(|candidate| strsim::levenshtein(name, candidate))
			.filter(|candidate| strsim::levenshtein(name, candidate) <= SUGGESTION_DISTANCE)
			.map(str::to_string)
	}
}

impl<O> Default for PropertySchema<O> {
	fn default() -> Self {
		Self::new()
	}
}

impl<O> FromIterator<PropertyDescriptor<O>> for PropertySchema<O> {
	fn from_iter<I: IntoIterator<Item = PropertyDescriptor<O>>>(iter: I) -> Self {
		Self {
			properties: iter.into_iter().collect(),
		}
	}
}

/// A type that knows how to build itself from a [`PropertyLookup`].
///
/// Usually derived with `#[derive(Buildable)]`.
pub trait Buildable: Sized + 'static {
	fn instantiate(lookup: &PropertyLookup<'_, Self>) -> Self;

	/// Describes the properties [`instantiate`](Self::instantiate) reads.
	fn schema() -> PropertySchema<Self> {
		PropertySchema::new()
	}

	/// A maker with no overrides.
	fn maker() -> Maker<Self> {
		Maker::of(Self::instantiate, OverrideSet::new())
	}
}

impl<O: Buildable> Maker<O> {
	/// Derives a maker overriding the property called `name` with `value`.
	///
	/// Fails if `O` has no such property or `value` is not of the property's
	/// value type.
	pub fn try_but_named<T: Any + Send>(&self, name: &str, value: T) -> Result<Self> {
		let schema = O::schema();
		let entry = schema
			.require(name)
			.and_then(|descriptor| descriptor.override_with(value))
			.inspect_err(|err| {
				tracing::debug!(
					domain = "maker",
					owner = std::any::type_name::<O>(),
					%err,
					"named override rejected",
				);
			})?;
		Ok(self.but([entry]))
	}

	/// Derives a maker overriding the property called `name` with null.
	pub fn try_but_null_named(&self, name: &str) -> Result<Self> {
		let schema = O::schema();
		let entry = schema
			.require(name)
			.and_then(PropertyDescriptor::override_null)
			.inspect_err(|err| {
				tracing::debug!(
					domain = "maker",
					owner = std::any::type_name::<O>(),
					%err,
					"named null override rejected",
				);
			})?;
		Ok(self.but([entry]))
	}
}
