use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

struct Thing;

fn keys() -> (Property<Thing, String>, Property<Thing, Option<u32>>) {
	(Property::named("name"), Property::named("age"))
}

#[test]
fn unset_key_resolves_unset() {
	let (name, _) = keys();
	let set = OverrideSet::<Thing>::new();
	assert_eq!(set.resolve(&name), Resolution::Unset);
	assert!(set.is_empty());
}

#[test]
fn value_and_null_are_distinct() {
	let (name, age) = keys();
	let set = OverrideSet::new().with_value(&name, "Bob").with_null(&age);

	assert_eq!(set.resolve(&name), Resolution::Value("Bob".to_string()));
	assert_eq!(set.resolve(&age), Resolution::Null);
	assert_eq!(set.produce(&age), Ok(Some(None)));
	assert!(set.is_null(&age));
	assert!(!set.is_null(&name));
}

#[test]
fn last_write_wins() {
	let (name, age) = keys();
	let set = OverrideSet::new()
		.with_value(&name, "Bob")
		.with_null(&age)
		.with_value(&name, "Bill")
		.with_value(&age, Some(3u32));

	assert_eq!(set.resolve(&name), Resolution::Value("Bill".to_string()));
	assert_eq!(set.resolve(&age), Resolution::Value(Some(3)));
	assert_eq!(set.len(), 2);
	assert_eq!(set.names().collect::<Vec<_>>(), ["name", "age", "name", "age"]);
}

#[test]
fn shared_set_is_copied_before_push() {
	let (name, _) = keys();
	let parent = OverrideSet::new().with_value(&name, "x");
	let child = parent.clone();
	assert!(parent.shares_storage(&child));

	let child = child.with_value(&name, "y");
	assert!(!parent.shares_storage(&child));
	assert_eq!(parent.resolve(&name), Resolution::Value("x".to_string()));
	assert_eq!(child.resolve(&name), Resolution::Value("y".to_string()));
}

#[test]
fn unshared_set_is_extended_in_place() {
	let (name, _) = keys();
	let mut set = OverrideSet::new().with_value(&name, "x");
	let before = Arc::as_ptr(&set.entries);
	set.push(Override::value(&name, "y".to_string()));
	assert_eq!(Arc::as_ptr(&set.entries), before);
}

#[test]
fn stored_type_is_checked() {
	let (_, age) = keys();
	let wrong = Override::from_source(
		age.id(),
		age.name(),
		Source::Value(Arc::new(Erased::<_, String>::new(Fixed::new(
			"old".to_string(),
		)))),
	);
	let set: OverrideSet<Thing> = [wrong].into_iter().collect();

	assert_eq!(
		set.try_resolve(&age),
		Err(PropertyError::TypeMismatch {
			property: "age",
			expected: std::any::type_name::<Option<u32>>(),
			got: std::any::type_name::<String>(),
		})
	);
}

#[test]
fn keys_of_same_label_do_not_share_overrides() {
	let first = Property::<Thing, u32>::named("n");
	let second = Property::<Thing, u32>::named("n");
	let set = OverrideSet::new().with_value(&first, 1u32);

	assert!(set.contains(&first));
	assert!(!set.contains(&second));
	assert_eq!(set.resolve(&second), Resolution::Unset);
}

#[test]
fn debug_lists_labels() {
	let (name, age) = keys();
	let set = OverrideSet::new().with_value(&name, "a").with_null(&age);
	assert_eq!(format!("{set:?}"), r#"["name", "age=null"]"#);
}

proptest! {
	/// Resolution always reflects the final write for each key: unset, value or null.
	#[test]
	fn prop_last_write_wins(writes in proptest::collection::vec((0usize..4, any::<Option<u8>>()), 0..24)) {
		let keys: Vec<Property<Thing, Option<u8>>> = (0..4).map(|_| Property::named("k")).collect();
		let mut set = OverrideSet::new();
		let mut expected = vec![Resolution::Unset; keys.len()];

		for (slot, write) in writes {
			match write {
				Some(v) => {
					set.push(Override::value(&keys[slot], Some(v)));
					expected[slot] = Resolution::Value(Some(v));
				}
				None => {
					set.push(Override::null(&keys[slot]));
					expected[slot] = Resolution::Null;
				}
			}
		}

		for (key, want) in keys.iter().zip(expected) {
			prop_assert_eq!(set.is_null(key), want == Resolution::Null);
			prop_assert_eq!(set.resolve(key), want);
		}
	}

	/// Deriving from a snapshot never changes what the snapshot resolves to.
	#[test]
	fn prop_clone_is_isolated(first in any::<u16>(), later in proptest::collection::vec(any::<u16>(), 1..8)) {
		let key = Property::<Thing, u16>::named("k");
		let parent = OverrideSet::new().with_value(&key, first);

		let mut child = parent.clone();
		for v in later {
			child.push(Override::value(&key, v));
		}

		prop_assert_eq!(parent.resolve(&key), Resolution::Value(first));
	}
}
