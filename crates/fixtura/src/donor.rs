//! Value sources for overrides.
//!
//! An override does not store a value directly; it stores a [`Donor`] that is
//! asked for a value every time the property is resolved. Fixed values hand
//! out clones, makers build a fresh instance per request, and [`the_same`]
//! hands out one shared instance.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::Nullable;

/// A source of property values.
pub trait Donor<V>: Send + Sync {
	fn value(&self) -> V;
}

/// Donor that clones a fixed value.
#[derive(Debug, Clone)]
pub struct Fixed<V>(V);

impl<V> Fixed<V> {
	pub fn new(value: V) -> Self {
		Self(value)
	}
}

impl<V: Clone + Send + Sync> Donor<V> for Fixed<V> {
	fn value(&self) -> V {
		self.0.clone()
	}
}

/// Donor backed by a closure.
pub struct FromFn<F>(F);

/// Wraps a closure as a donor; it is called once per resolution.
pub fn from_fn<V, F>(f: F) -> FromFn<F>
where
	F: Fn() -> V + Send + Sync,
{
	FromFn(f)
}

impl<V, F> Donor<V> for FromFn<F>
where
	F: Fn() -> V + Send + Sync,
{
	fn value(&self) -> V {
		(self.0)()
	}
}

/// Donor handing out clones of a single shared instance.
#[derive(Debug)]
pub struct SameValue<V> {
	shared: Arc<V>,
}

impl<V> Clone for SameValue<V> {
	fn clone(&self) -> Self {
		Self {
			shared: Arc::clone(&self.shared),
		}
	}
}

impl<V: Send + Sync> Donor<Arc<V>> for SameValue<V> {
	fn value(&self) -> Arc<V> {
		Arc::clone(&self.shared)
	}
}

/// Evaluates `donor` once, now, and shares the result with every build.
///
/// The property must hold an `Arc<V>`; all instances built with this override
/// point at the same value.
pub fn the_same<V, D: Donor<V>>(donor: D) -> SameValue<V> {
	SameValue {
		shared: Arc::new(donor.value()),
	}
}

/// Type-erased donor stored inside an override entry.
pub(crate) trait ErasedDonor: Send + Sync {
	fn donate(&self) -> Box<dyn Any>;

	fn value_type(&self) -> &'static str;
}

pub(crate) struct Erased<D, V> {
	donor: D,
	_value: PhantomData<fn() -> V>,
}

impl<D, V> Erased<D, V> {
	pub(crate) fn new(donor: D) -> Self {
		Self {
			donor,
			_value: PhantomData,
		}
	}
}

impl<D, V> ErasedDonor for Erased<D, V>
where
	D: Donor<V>,
	V: 'static,
{
	fn donate(&self) -> Box<dyn Any> {
		Box::new(self.donor.value())
	}

	fn value_type(&self) -> &'static str {
		std::any::type_name::<V>()
	}
}

/// Produces the null value of `V`, boxed for erased storage.
pub(crate) struct NullOf<V>(PhantomData<fn() -> V>);

impl<V> NullOf<V> {
	pub(crate) fn new() -> Self {
		Self(PhantomData)
	}
}

impl<V: Nullable + 'static> ErasedDonor for NullOf<V> {
	fn donate(&self) -> Box<dyn Any> {
		Box::new(V::null())
	}

	fn value_type(&self) -> &'static str {
		std::any::type_name::<V>()
	}
}
