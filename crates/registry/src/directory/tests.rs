use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{Counter, Panel};

fn bind<T: Inspect>(instance: &Shared<T>) -> Arc<dyn InstanceHandle> {
	Arc::new(Bound::new(instance, Arc::new(TypeTable::<T>::build())))
}

#[test]
fn last_registration_wins() {
	let directory = InstanceDirectory::new();
	let first = shared(Counter { count: 1 });
	let second = shared(Counter { count: 2 });

	assert!(directory.insert(bind(&first)).is_none());
	let replaced = directory.insert(bind(&second)).unwrap();
	assert_eq!(replaced.addr(), Arc::as_ptr(&first) as usize);

	let resolved = directory.resolve::<Counter>().unwrap();
	assert!(Arc::ptr_eq(&resolved, &second));
	assert_eq!(directory.len(), 1);
}

#[test]
fn remove_if_same_ignores_stale_instances() {
	let directory = InstanceDirectory::new();
	let first = shared(Counter::default());
	let second = shared(Counter::default());
	directory.insert(bind(&first));
	directory.insert(bind(&second));

	let owner = Counter::type_name();
	assert!(
		directory
			.remove_if_same(owner, Arc::as_ptr(&first) as usize)
			.is_none()
	);
	assert!(directory.contains(owner));
	assert!(
		directory
			.remove_if_same(owner, Arc::as_ptr(&second) as usize)
			.is_some()
	);
	assert!(directory.is_empty());
}

#[test]
fn dropped_instances_report_dropped() {
	let directory = InstanceDirectory::new();
	let panel = shared(Panel::default());
	directory.insert(bind(&panel));
	assert!(directory.is_live(Panel::OWNER));

	drop(panel);

	assert!(directory.contains(Panel::OWNER));
	assert!(!directory.is_live(Panel::OWNER));
	assert!(directory.resolve::<Panel>().is_none());
	let handle = directory.resolve_handle(Panel::OWNER).unwrap();
	assert_eq!(handle.read_field("speed"), Err(AccessError::Dropped("Panel")));
	assert!(handle.state_holders().is_empty());
}

#[test]
fn handles_read_write_and_invoke() {
	let panel = shared(Panel::default());
	let handle = bind(&panel);

	assert_eq!(handle.field_type("label"), Ok(StaticType::String));
	handle.write_field("label", &Value::from("edited")).unwrap();
	assert_eq!(handle.read_field("label"), Ok(Value::from("edited")));

	handle.call_trigger("reset").unwrap();
	handle.call_function("pick", &[Value::Enum("Running".to_string())]).unwrap();
	assert_eq!(panel.read().calls, ["reset", "pick(Running)"]);
	assert_eq!(handle.state_holders().len(), 1);
}

#[test]
fn panicking_methods_are_contained() {
	let panel = shared(Panel::default());
	let handle = bind(&panel);

	assert_eq!(
		handle.call_trigger("explode"),
		Err(AccessError::Panicked("boom".to_string()))
	);
	// parking_lot locks do not poison.
	assert_eq!(handle.read_field("speed"), Ok(Value::Int(3)));
}

#[test]
fn owners_are_sorted() {
	let directory = InstanceDirectory::new();
	let panel = shared(Panel::default());
	let counter = shared(Counter::default());
	directory.insert(bind(&panel));
	directory.insert(bind(&counter));

	let owners = directory.owners();
	assert_eq!(owners.len(), 2);
	assert_eq!(owners[0], "Panel");
	assert_eq!(directory.drain().len(), 2);
	assert!(directory.is_empty());
}
