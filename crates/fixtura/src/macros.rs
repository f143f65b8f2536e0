//! Declaration macros for property keys.

/// Declares property keys as lazily initialized statics.
///
/// Each static is a [`LazyLock`](std::sync::LazyLock) holding a fresh
/// [`Property`](crate::Property), labelled with the lower-cased static name.
/// Keys deref to `Property`, so `&NAME` can be passed wherever a
/// `&Property<_, _>` is expected.
///
/// # Example
///
/// ```
/// use fixtura::{Property, property};
///
/// struct Account {
///     owner: String,
///     balance: i64,
///     closed_on: Option<u32>,
/// }
///
/// property! {
///     /// Holder of the account.
///     pub static OWNER: Property<Account, String>;
///     pub static BALANCE: Property<Account, i64>;
///     pub(crate) static CLOSED_ON: Property<Account, Option<u32>>;
/// }
///
/// assert_eq!(CLOSED_ON.name(), "closed_on");
/// ```
#[macro_export]
macro_rules! property {
	($(
		$(#[$attr:meta])*
		$vis:vis static $name:ident : Property<$owner:ty, $value:ty>;
	)*) => {
		$crate::__private::paste::paste! {
			$(
				$(#[$attr])*
				$vis static $name: ::std::sync::LazyLock<$crate::Property<$owner, $value>> =
					::std::sync::LazyLock::new(|| {
						$crate::Property::named(::core::stringify!([<$name:lower>]))
					});
			)*
		}
	};
}
