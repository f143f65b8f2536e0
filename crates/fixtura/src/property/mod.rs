//! Property keys.
//!
//! A [`Property`] names one constructible attribute of an owner type. It is a
//! lookup key only: it never holds a value. Identity comes from a
//! process-unique [`PropertyId`], so two keys never compare equal unless one
//! is a copy of the other, whatever their labels or type parameters.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};


static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(NonZeroU64);

impl PropertyId {
	fn next() -> Self {
		let raw = NEXT_ID.fetch_add(1, Ordering::Relaxed);
		match NonZeroU64::new(raw) {
			Some(id) => Self(id),
			None => unreachable!("property id counter wrapped around"),
		}
	}

	/// Returns the raw numeric id.
	pub fn get(self) -> u64 {
		self.0.get()
	}
}

impl fmt::Display for PropertyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Typed key for one property of `O` holding values of type `V`.
///
/// Keys are usually declared once as statics, either with [`property!`] or by
/// `#[derive(Buildable)]`:
///
/// ```
/// use fixtura::{Property, property};
///
/// struct Ship {
///     name: String,
///     crew: u32,
/// }
///
/// property! {
///     pub static NAME: Property<Ship, String>;
///     pub static CREW: Property<Ship, u32>;
/// }
///
/// assert_ne!(NAME.id(), CREW.id());
/// assert_eq!(NAME.name(), "name");
/// ```
///
/// [`property!`]: crate::property
pub struct Property<O, V> {
	id: PropertyId,
	name: &'static str,
	_marker: PhantomData<fn() -> (O, V)>,
}

impl<O, V> Property<O, V> {
	/// Declares a new, unlabelled property.
	pub fn declare() -> Self {
		Self::named("<anonymous>")
	}

	/// Declares a new property with a diagnostic label.
	///
	/// The label is metadata only; it takes no part in equality.
	pub fn named(name: &'static str) -> Self {
		Self {
			id: PropertyId::next(),
			name,
			_marker: PhantomData,
		}
	}

	pub fn id(&self) -> PropertyId {
		self.id
	}

	/// Returns the diagnostic label.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl<O, V> Clone for Property<O, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<O, V> Copy for Property<O, V> {}

impl<O, V> PartialEq for Property<O, V> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl<O, V> Eq for Property<O, V> {}

impl<O, V> Hash for Property<O, V> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl<O, V> fmt::Debug for Property<O, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Property")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("owner", &std::any::type_name::<O>())
			.field("value", &std::any::type_name::<V>())
			.finish()
	}
}

/// Value types that have an explicit null representation.
///
/// Only properties whose value type is `Nullable` can be overridden with
/// [`with_null`](crate::with_null).
pub trait Nullable {
	fn null() -> Self;
}

impl<T> Nullable for Option<T> {
	fn null() -> Self {
		None
	}
}
