//! Plain data describing discovered members and the values they hold.

mod descriptor;
mod mapping;
mod value;

pub use descriptor::{
	FlowManipulationDescriptor, FunctionDescriptor, FunctionParameter, GroupDescriptor,
	ManipulableField, MemberKey, ParameterDescriptor, TriggerDescriptor,
};
pub use mapping::EnumMapping;
pub use value::{FieldValue, StaticType, Value, ValueType};
