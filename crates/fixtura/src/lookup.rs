//! Per-build property resolution.

use std::any::Any;
use std::cell::RefCell;
use std::marker::PhantomData;

use rustc_hash::FxHashMap as HashMap;

use crate::overrides::{OverrideSet, Resolution};
use crate::property::{Property, PropertyId};

/// Resolves property values for a single build of `O`.
///
/// A lookup borrows the overrides of the maker being built and is handed to
/// the instantiator by reference, so it can never outlive that call. Defaults
/// are supplied at each call site; the lookup itself only knows overrides.
///
/// An override's donor is asked for a value at most once per build. Later
/// reads of the same key within that build get clones of the first value, so
/// they always agree even when the donor would not.
pub struct PropertyLookup<'a, O> {
	overrides: &'a OverrideSet<O>,
	drawn: RefCell<HashMap<PropertyId, Box<dyn Any>>>,
	_owner: PhantomData<fn() -> O>,
}

impl<'a, O> PropertyLookup<'a, O> {
	pub(crate) fn new(overrides: &'a OverrideSet<O>) -> Self {
		Self {
			overrides,
			drawn: RefCell::new(HashMap::default()),
			_owner: PhantomData,
		}
	}

	/// Returns the override for `key`, or `default` if there is none.
	///
	/// An explicit null override yields the null value of `V`, never
	/// `default`.
	pub fn value_of<V: Clone + 'static>(&self, key: &Property<O, V>, default: V) -> V {
		self.value_or_else(key, || default)
	}

	/// Like [`value_of`](Self::value_of), but only evaluates the default when
	/// no override exists.
	pub fn value_or_else<V: Clone + 'static>(
		&self,
		key: &Property<O, V>,
		default: impl FnOnce() -> V,
	) -> V {
		match self.draw(key) {
			Some(value) => {
				tracing::trace!(domain = "maker", property = key.name(), "override");
				value
			}
			None => {
				tracing::trace!(domain = "maker", property = key.name(), "default");
				default()
			}
		}
	}

	/// Reports how `key` is overridden without producing a default.
	pub fn resolve<V: Clone + 'static>(&self, key: &Property<O, V>) -> Resolution<V> {
		if self.overrides.is_null(key) {
			return Resolution::Null;
		}
		match self.draw(key) {
			Some(value) => Resolution::Value(value),
			None => Resolution::Unset,
		}
	}

	/// Returns true if `key` has an override, null included.
	pub fn is_set<V>(&self, key: &Property<O, V>) -> bool {
		self.overrides.contains(key)
	}

	/// Produces the override value for `key`, drawing from its donor only on
	/// the first read in this build.
	fn draw<V: Clone + 'static>(&self, key: &Property<O, V>) -> Option<V> {
		if let Some(value) = self
			.drawn
			.borrow()
			.get(&key.id())
			.and_then(|value| value.downcast_ref::<V>())
		{
			return Some(value.clone());
		}

		// No borrow is held here: donors may build nested makers.
		let value = match self.overrides.produce(key) {
			Ok(value) => value?,
			Err(err) => unreachable!("{err}"),
		};
		self.drawn
			.borrow_mut()
			.insert(key.id(), Box::new(value.clone()));
		Some(value)
	}
}
