//! Override storage.
//!
//! An [`OverrideSet`] is an ordered list of [`Override`] entries plus an index
//! of the latest entry per property. Later entries shadow earlier ones, which
//! is what makes [`Maker::but`](crate::Maker::but) a patch rather than a merge.
//!
//! The storage sits behind an [`Arc`] and is copied on write: cloning a set is
//! cheap, and adding to a set that is shared with anyone else copies it first.
//! A maker's overrides therefore never change once another maker can see them.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::donor::{Donor, Erased, ErasedDonor, Fixed, NullOf};
use crate::error::{PropertyError, Result};
use crate::property::{Nullable, Property, PropertyId};

#[cfg(test)]
mod tests;

/// Tri-state outcome of resolving one property against an override set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<V> {
	/// No override recorded; the caller's default applies.
	Unset,
	/// Overridden with a value.
	Value(V),
	/// Overridden with an explicit null.
	Null,
}

#[derive(Clone)]
enum Source {
	Value(Arc<dyn ErasedDonor>),
	Null(Arc<dyn ErasedDonor>),
}

impl Source {
	fn donor(&self) -> &dyn ErasedDonor {
		match self {
			Source::Value(donor) | Source::Null(donor) => donor.as_ref(),
		}
	}
}

/// One override entry for a property of `O`.
///
/// Built with [`with`](crate::with), [`with_donor`](crate::with_donor) and
/// [`with_null`](crate::with_null).
pub struct Override<O> {
	id: PropertyId,
	name: &'static str,
	source: Source,
	_owner: PhantomData<fn() -> O>,
}

impl<O> Override<O> {
	/// Overrides `key` with values drawn from `donor`.
	pub fn donor<V, D>(key: &Property<O, V>, donor: D) -> Self
	where
		V: 'static,
		D: Donor<V> + 'static,
	{
		Self::from_source(
			key.id(),
			key.name(),
			Source::Value(Arc::new(Erased::<D, V>::new(donor))),
		)
	}

	/// Overrides `key` with a fixed value.
	pub fn value<V>(key: &Property<O, V>, value: V) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		Self::donor(key, Fixed::new(value))
	}

	/// Overrides `key` with an explicit null.
	pub fn null<V>(key: &Property<O, V>) -> Self
	where
		V: Nullable + 'static,
	{
		Self::from_source(
			key.id(),
			key.name(),
			Source::Null(Arc::new(NullOf::<V>::new())),
		)
	}

	fn from_source(id: PropertyId, name: &'static str, source: Source) -> Self {
		Self {
			id,
			name,
			source,
			_owner: PhantomData,
		}
	}

	pub fn property_id(&self) -> PropertyId {
		self.id
	}

	/// Label of the overridden property.
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn is_null(&self) -> bool {
		matches!(self.source, Source::Null(_))
	}

	/// Draws a value from the entry's donor, checking it against `V`.
	fn take<V: 'static>(&self) -> Result<V> {
		let donor = self.source.donor();
		donor
			.donate()
			.downcast::<V>()
			.map(|value| *value)
			.map_err(|_| PropertyError::TypeMismatch {
				property: self.name,
				expected: std::any::type_name::<V>(),
				got: donor.value_type(),
			})
	}
}

impl<O> Clone for Override<O> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			name: self.name,
			source: self.source.clone(),
			_owner: PhantomData,
		}
	}
}

impl<O> fmt::Debug for Override<O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Override")
			.field("property", &self.name)
			.field("id", &self.id)
			.field("null", &self.is_null())
			.field("value_type", &self.source.donor().value_type())
			.finish()
	}
}

struct Entries<O> {
	list: Vec<Override<O>>,
	latest: HashMap<PropertyId, usize>,
}

impl<O> Clone for Entries<O> {
	fn clone(&self) -> Self {
		Self {
			list: self.list.clone(),
			latest: self.latest.clone(),
		}
	}
}

/// Ordered, copy-on-write collection of overrides for `O`.
pub struct OverrideSet<O> {
	entries: Arc<Entries<O>>,
}

impl<O> OverrideSet<O> {
	pub fn new() -> Self {
		Self {
			entries: Arc::new(Entries {
				list: Vec::new(),
				latest: HashMap::default(),
			}),
		}
	}

	/// Returns a set where `key` resolves to `value`.
	pub fn with_value<V>(mut self, key: &Property<O, V>, value: impl Into<V>) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		self.push(Override::value(key, value.into()));
		self
	}

	/// Returns a set where `key` resolves to values drawn from `donor`.
	pub fn with_donor<V, D>(mut self, key: &Property<O, V>, donor: D) -> Self
	where
		V: 'static,
		D: Donor<V> + 'static,
	{
		self.push(Override::donor(key, donor));
		self
	}

	/// Returns a set where `key` resolves to an explicit null.
	pub fn with_null<V>(mut self, key: &Property<O, V>) -> Self
	where
		V: Nullable + 'static,
	{
		self.push(Override::null(key));
		self
	}

	/// Appends an entry, shadowing earlier entries for the same property.
	///
	/// Copies the backing storage first if any other set shares it.
	pub fn push(&mut self, entry: Override<O>) {
		let entries = Arc::make_mut(&mut self.entries);
		entries.latest.insert(entry.id, entries.list.len());
		entries.list.push(entry);
	}

	/// Resolves `key` to its most recent override.
	///
	/// # Panics
	///
	/// Panics if the stored value is not a `V`. Entries are created from typed
	/// keys, so this cannot happen for sets built through the public API.
	pub fn resolve<V: 'static>(&self, key: &Property<O, V>) -> Resolution<V> {
		match self.try_resolve(key) {
			Ok(resolution) => resolution,
			Err(err) => unreachable!("{err}"),
		}
	}

	/// Resolves `key`, reporting a stored value of the wrong type as an error.
	pub fn try_resolve<V: 'static>(&self, key: &Property<O, V>) -> Result<Resolution<V>> {
		let Some(entry) = self.latest(key.id()) else {
			return Ok(Resolution::Unset);
		};
		if entry.is_null() {
			return Ok(Resolution::Null);
		}
		entry.take().map(Resolution::Value)
	}

	/// Produces the value an override supplies for `key`, if any.
	///
	/// Explicit nulls produce the null value of `V`.
	pub(crate) fn produce<V: 'static>(&self, key: &Property<O, V>) -> Result<Option<V>> {
		match self.latest(key.id()) {
			Some(entry) => entry.take().map(Some),
			None => Ok(None),
		}
	}

	fn latest(&self, id: PropertyId) -> Option<&Override<O>> {
		let index = *self.entries.latest.get(&id)?;
		self.entries.list.get(index)
	}

	pub fn contains<V>(&self, key: &Property<O, V>) -> bool {
		self.entries.latest.contains_key(&key.id())
	}

	/// Returns true if the latest override for `key` is an explicit null.
	pub fn is_null<V>(&self, key: &Property<O, V>) -> bool {
		self.latest(key.id()).is_some_and(Override::is_null)
	}

	/// Number of distinct properties overridden.
	pub fn len(&self) -> usize {
		self.entries.latest.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.list.is_empty()
	}

	/// Labels of all entries in insertion order, shadowed ones included.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.entries.list.iter().map(|entry| entry.name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Override<O>> + '_ {
		self.entries.list.iter()
	}

	/// Returns true if both sets share the same backing storage.
	pub fn shares_storage(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.entries, &other.entries)
	}
}

impl<O> Default for OverrideSet<O> {
	fn default() -> Self {
		Self::new()
	}
}

impl<O> Clone for OverrideSet<O> {
	fn clone(&self) -> Self {
		Self {
			entries: Arc::clone(&self.entries),
		}
	}
}

impl<O> Extend<Override<O>> for OverrideSet<O> {
	fn extend<I: IntoIterator<Item = Override<O>>>(&mut self, iter: I) {
		for entry in iter {
			self.push(entry);
		}
	}
}

impl<O> FromIterator<Override<O>> for OverrideSet<O> {
	fn from_iter<I: IntoIterator<Item = Override<O>>>(iter: I) -> Self {
		let mut set = Self::new();
		set.extend(iter);
		set
	}
}

impl<O> fmt::Debug for OverrideSet<O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.entries.list.iter().map(|entry| {
				if entry.is_null() {
					format!("{}=null", entry.name)
				} else {
					entry.name.to_string()
				}
			}))
			.finish()
	}
}
