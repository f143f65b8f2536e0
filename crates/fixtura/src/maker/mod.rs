//! Makers: reusable construction recipes.

use std::fmt;
use std::sync::Arc;

use crate::donor::Donor;
use crate::lookup::PropertyLookup;
use crate::overrides::{Override, OverrideSet};
use crate::property::{Nullable, Property};


/// Builds an `O` from the values a [`PropertyLookup`] resolves.
///
/// Implemented for every `Fn(&PropertyLookup<'_, O>) -> O`, so fn items,
/// fn-pointer statics and closures all work. An instantiator should depend on
/// nothing but the lookup; anything it panics with reaches the caller of
/// [`Maker::make`] unchanged.
pub trait Instantiator<O>: Send + Sync {
	fn instantiate(&self, lookup: &PropertyLookup<'_, O>) -> O;
}

impl<O, F> Instantiator<O> for F
where
	F: Fn(&PropertyLookup<'_, O>) -> O + Send + Sync,
{
	fn instantiate(&self, lookup: &PropertyLookup<'_, O>) -> O {
		self(lookup)
	}
}

/// An instantiator paired with a fixed set of overrides.
///
/// Makers are immutable. [`make`](Self::make) builds a fresh instance on
/// every call, and [`but`](Self::but) returns a new maker with extra
/// overrides while leaving the receiver untouched. Cloning is cheap: the
/// instantiator is shared and the overrides are copied on write.
pub struct Maker<O> {
	instantiator: Arc<dyn Instantiator<O>>,
	overrides: OverrideSet<O>,
}

impl<O: 'static> Maker<O> {
	/// Pairs `instantiator` with `overrides`.
	pub fn of(instantiator: impl Instantiator<O> + 'static, overrides: OverrideSet<O>) -> Self {
		Self {
			instantiator: Arc::new(instantiator),
			overrides,
		}
	}

	/// Builds a new instance.
	pub fn make(&self) -> O {
		tracing::trace!(
			domain = "maker",
			owner = std::any::type_name::<O>(),
			overrides = self.overrides.len(),
			"make",
		);
		let lookup = PropertyLookup::new(&self.overrides);
		self.instantiator.instantiate(&lookup)
	}

	/// Derives a maker with `overrides` applied on top of this one's.
	///
	/// Later overrides win over earlier ones for the same property.
	pub fn but(&self, overrides: impl IntoIterator<Item = Override<O>>) -> Self {
		let mut derived = self.overrides.clone();
		derived.extend(overrides);
		tracing::trace!(
			domain = "maker",
			owner = std::any::type_name::<O>(),
			inherited = self.overrides.len(),
			overrides = derived.len(),
			"but",
		);
		Self {
			instantiator: Arc::clone(&self.instantiator),
			overrides: derived,
		}
	}

	/// Derives a maker with a single value override.
	pub fn but_with<V>(&self, key: &Property<O, V>, value: impl Into<V>) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		self.but([Override::value(key, value.into())])
	}

	/// Derives a maker with a single explicit-null override.
	pub fn but_null<V>(&self, key: &Property<O, V>) -> Self
	where
		V: Nullable + 'static,
	{
		self.but([Override::null(key)])
	}

	pub fn overrides(&self) -> &OverrideSet<O> {
		&self.overrides
	}
}

impl<O> Clone for Maker<O> {
	fn clone(&self) -> Self {
		Self {
			instantiator: Arc::clone(&self.instantiator),
			overrides: self.overrides.clone(),
		}
	}
}

impl<O> fmt::Debug for Maker<O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Maker")
			.field("owner", &std::any::type_name::<O>())
			.field("overrides", &self.overrides)
			.finish()
	}
}

/// A maker used as a property value builds a fresh instance per resolution.
impl<O: 'static> Donor<O> for Maker<O> {
	fn value(&self) -> O {
		self.make()
	}
}
