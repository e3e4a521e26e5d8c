use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;
use crate::record::Overrides;
use crate::test_support::Profile;

fn attached(cell: &StateCell<Profile>, pairs: &[(&str, Value)]) -> OverrideMap {
	let overrides: Overrides = pairs
		.iter()
		.map(|(name, value)| (name.to_string(), value.clone()))
		.collect();
	let map = Arc::new(Mutex::new(overrides));
	cell.attach(Arc::clone(&map));
	map
}

#[test]
fn set_without_overrides_publishes_natural_value() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	let mut rx = cell.subscribe();

	cell.set(Profile::new(true, 2, "Y"));

	assert!(rx.has_changed().unwrap());
	let seen = rx.borrow_and_update().clone();
	assert_eq!(*seen, Profile::new(true, 2, "Y"));
	assert_eq!(*cell.get(), *cell.natural());
}

#[test]
fn overrides_survive_natural_updates() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	attached(&cell, &[("level", Value::Int(5))]);
	cell.reapply().unwrap();
	assert_eq!(*cell.get(), Profile::new(false, 5, "X"));

	cell.set(Profile::new(true, 1, "Y"));

	assert_eq!(*cell.get(), Profile::new(true, 5, "Y"));
	assert_eq!(*cell.natural(), Profile::new(true, 1, "Y"));
}

#[test]
fn update_derives_from_natural_value() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	attached(&cell, &[("city", Value::from("Z"))]);

	cell.update(|p| Profile {
		level: p.level + 1,
		..p.clone()
	});

	assert_eq!(*cell.get(), Profile::new(false, 2, "Z"));
	assert_eq!(cell.natural().city, "X");
}

#[test]
fn failed_override_publishes_natural_value() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	attached(&cell, &[("level", Value::from("lots"))]);

	cell.set(Profile::new(true, 4, "Y"));

	assert_eq!(*cell.get(), Profile::new(true, 4, "Y"));
}

#[test]
fn failed_reapply_leaves_visible_value() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	let map = attached(&cell, &[("level", Value::Int(3))]);
	cell.reapply().unwrap();

	map.lock().insert("level".to_string(), Value::from("x"));
	assert!(cell.reapply().is_err());
	assert_eq!(*cell.get(), Profile::new(false, 3, "X"));
}

#[test]
fn detach_stops_applying_overrides() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	attached(&cell, &[("level", Value::Int(9))]);
	cell.detach();

	cell.set(Profile::new(false, 2, "X"));
	assert_eq!(cell.get().level, 2);
}

#[test]
fn clones_share_one_container() {
	let cell = StateCell::new(Profile::new(false, 1, "X"));
	let other = cell.clone();
	let mut rx = other.subscribe();

	cell.set(Profile::new(false, 8, "X"));

	assert!(rx.has_changed().unwrap());
	assert_eq!(other.get().level, 8);
}

#[test]
fn erased_holder_reads_visible_fields() {
	let cell = StateCell::new(Profile::new(true, 1, "X"));
	let holder: Box<dyn StateHolder> = Box::new(cell.clone());

	assert_eq!(holder.record_name(), "Profile");
	assert!(holder.declares("city"));
	assert!(!holder.declares("revision"));
	assert_eq!(holder.read_field("active"), Some(Value::Bool(true)));

	let empty: Box<dyn StateHolder> = Box::new(StateCell::<Option<Profile>>::new(None));
	assert_eq!(empty.record_name(), "Unknown");
	assert_eq!(empty.read_field("city"), None);
}
