//! Declarative test-object makers.
//!
//! A test should only spell out the properties it cares about. `fixtura`
//! captures a type's defaults once, in an [`Instantiator`], and lets each test
//! build instances with just the overrides it needs:
//!
//! * [`Property`] - typed key naming one attribute of a buildable type
//! * [`OverrideSet`] - ordered overrides, last write wins, copied on write
//! * [`PropertyLookup`] - per-build resolver: override, explicit null, or default
//! * [`Maker`] - instantiator plus overrides; [`make`](Maker::make) builds,
//!   [`but`](Maker::but) derives without touching the original
//! * [`Donor`] - where override values come from (fixed values, makers, shared instances)
//!
//! ```
//! use fixtura::{Property, PropertyLookup, a, make, property, with, with_donor, with_null};
//!
//! #[derive(Debug, Clone)]
//! struct Crew {
//!     name: Option<String>,
//!     rank: u8,
//! }
//!
//! #[derive(Debug)]
//! struct Vessel {
//!     captain: Crew,
//! }
//!
//! property! {
//!     static NAME: Property<Crew, Option<String>>;
//!     static RANK: Property<Crew, u8>;
//!     static CAPTAIN: Property<Vessel, Crew>;
//! }
//!
//! fn crew(lookup: &PropertyLookup<'_, Crew>) -> Crew {
//!     Crew {
//!         name: lookup.value_of(&NAME, Some("Ishmael".into())),
//!         rank: lookup.value_of(&RANK, 1),
//!     }
//! }
//!
//! fn vessel(lookup: &PropertyLookup<'_, Vessel>) -> Vessel {
//!     Vessel {
//!         captain: lookup.value_or_else(&CAPTAIN, || make(a(crew, []))),
//!     }
//! }
//!
//! let ahab = a(crew, [with(&NAME, Some("Ahab".to_string())), with(&RANK, 9u8)]);
//! let pequod = make(a(vessel, [with_donor(&CAPTAIN, ahab.clone())]));
//! assert_eq!(pequod.captain.name.as_deref(), Some("Ahab"));
//!
//! let nameless = make(ahab.but([with_null(&NAME)]));
//! assert_eq!(nameless.name, None);
//! assert_eq!(nameless.rank, 9);
//! ```

pub mod compose;
pub mod donor;
pub mod error;
pub mod lookup;
mod macros;
pub mod maker;
pub mod overrides;
pub mod property;
pub mod schema;

pub use compose::{a, an, make, with, with_donor, with_null};
pub use donor::{Donor, Fixed, FromFn, SameValue, from_fn, the_same};
pub use error::{PropertyError, Result};
#[cfg(feature = "derive")]
pub use fixtura_macros::Buildable;
pub use lookup::PropertyLookup;
pub use maker::{Instantiator, Maker};
pub use overrides::{Override, OverrideSet, Resolution};
pub use property::{Nullable, Property, PropertyId};
pub use schema::{Buildable, PropertyDescriptor, PropertySchema};

#[doc(hidden)]
pub mod __private {
	pub use paste;
}
