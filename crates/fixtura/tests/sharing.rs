//! Makers shared between threads and builds.

use std::sync::Arc;
use std::thread;

use fixtura::{Maker, Property, PropertyLookup, a, from_fn, property, the_same, with, with_donor};
use pretty_assertions::assert_eq;

mod common;

#[derive(Debug, Clone, PartialEq)]
pub struct Tag(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
	pub label: String,
	pub weight: u64,
	pub tag: Arc<Tag>,
}

property! {
	pub static LABEL: Property<Item, String>;
	pub static WEIGHT: Property<Item, u64>;
	pub static TAG: Property<Item, Arc<Tag>>;
}

fn item(lookup: &PropertyLookup<'_, Item>) -> Item {
	Item {
		label: lookup.value_of(&LABEL, "widget".to_string()),
		weight: lookup.value_of(&WEIGHT, 1),
		tag: lookup.value_or_else(&TAG, || Arc::new(Tag("default".into()))),
	}
}

#[test]
fn makers_are_shared_across_threads() {
	common::init_tracing();
	let base: Maker<Item> = a(item, [with(&LABEL, "shared")]);

	let weights: Vec<u64> = thread::scope(|scope| {
		let handles: Vec<_> = (0..8u64)
			.map(|n| {
				let base = &base;
				scope.spawn(move || base.but_with(&WEIGHT, n).make().weight)
			})
			.collect();
		handles
			.into_iter()
			.map(|handle| handle.join().unwrap_or(u64::MAX))
			.collect()
	});

	assert_eq!(weights, (0..8u64).collect::<Vec<_>>());
	assert_eq!(base.make().weight, 1);
	assert_eq!(base.make().label, "shared");
}

#[test]
fn cloned_makers_move_into_threads() {
	let base = a(item, [with(&WEIGHT, 3u64)]);
	let heavy = base.clone();

	let made = thread::spawn(move || heavy.but_with(&WEIGHT, 300u64).make())
		.join()
		.map(|item| item.weight);

	assert_eq!(made.ok(), Some(300));
	assert_eq!(base.make().weight, 3);
}

#[test]
fn the_same_donates_one_instance() {
	let tag = the_same(from_fn(|| Tag("once".into())));
	let maker = a(item, [with_donor(&TAG, tag)]);

	let first = maker.make();
	let second = maker.but_with(&WEIGHT, 2u64).make();
	assert!(Arc::ptr_eq(&first.tag, &second.tag));

	let fresh = a(item, []);
	assert!(!Arc::ptr_eq(&fresh.make().tag, &fresh.make().tag));
	assert_eq!(fresh.make().tag, fresh.make().tag);
}

#[test]
fn the_same_is_shared_between_threads() {
	let maker = a(item, [with_donor(&TAG, the_same(from_fn(|| Tag("pinned".into()))))]);

	let tags: Vec<Arc<Tag>> = thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|_| scope.spawn(|| maker.make().tag))
			.collect();
		handles.into_iter().filter_map(|h| h.join().ok()).collect()
	});

	assert_eq!(tags.len(), 4);
	assert!(tags.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn maker_donors_build_a_fresh_value_per_build() {
	let tags = a(
		|_: &PropertyLookup<'_, Arc<Tag>>| Arc::new(Tag("fresh".into())),
		[],
	);
	let maker = a(item, [with_donor(&TAG, tags)]);

	let first = maker.make();
	let second = maker.make();
	assert_eq!(first.tag, second.tag);
	assert!(!Arc::ptr_eq(&first.tag, &second.tag));
}
