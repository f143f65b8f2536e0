//! Free-function helpers that read like the test they set up:
//!
//! ```
//! use fixtura::{PropertyLookup, Property, a, make, property, with};
//!
//! #[derive(Debug)]
//! struct Fish {
//!     name: String,
//!     age: u32,
//! }
//!
//! property! {
//!     static NAME: Property<Fish, String>;
//!     static AGE: Property<Fish, u32>;
//! }
//!
//! fn fish(lookup: &PropertyLookup<'_, Fish>) -> Fish {
//!     Fish {
//!         name: lookup.value_of(&NAME, "Nemo".into()),
//!         age: lookup.value_of(&AGE, 99),
//!     }
//! }
//!
//! let bob = make(a(fish, [with(&NAME, "Bob")]));
//! assert_eq!(bob.name, "Bob");
//! assert_eq!(bob.age, 99);
//! ```

use crate::donor::Donor;
use crate::maker::{Instantiator, Maker};
use crate::overrides::{Override, OverrideSet};
use crate::property::{Nullable, Property};

/// Creates a maker from an instantiator and zero or more overrides.
pub fn a<O: 'static>(
	instantiator: impl Instantiator<O> + 'static,
	overrides: impl IntoIterator<Item = Override<O>>,
) -> Maker<O> {
	Maker::of(instantiator, overrides.into_iter().collect::<OverrideSet<O>>())
}

/// Alias of [`a`] for nouns starting with a vowel.
pub fn an<O: 'static>(
	instantiator: impl Instantiator<O> + 'static,
	overrides: impl IntoIterator<Item = Override<O>>,
) -> Maker<O> {
	a(instantiator, overrides)
}

/// Overrides `key` with a fixed value.
pub fn with<O, V>(key: &Property<O, V>, value: impl Into<V>) -> Override<O>
where
	V: Clone + Send + Sync + 'static,
{
	Override::value(key, value.into())
}

/// Overrides `key` with values from `donor`, such as another [`Maker`].
pub fn with_donor<O, V, D>(key: &Property<O, V>, donor: D) -> Override<O>
where
	V: 'static,
	D: Donor<V> + 'static,
{
	Override::donor(key, donor)
}

/// Overrides `key` with an explicit null.
pub fn with_null<O, V>(key: &Property<O, V>) -> Override<O>
where
	V: Nullable + 'static,
{
	Override::null(key)
}

/// Builds an instance from `maker`.
pub fn make<O: 'static>(maker: Maker<O>) -> O {
	maker.make()
}
