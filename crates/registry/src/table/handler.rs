use crate::error::AccessError;
use crate::model::{FieldValue, StaticType, Value};

/// Host method callable with staged argument values.
///
/// Implemented for every `Fn(&mut T, A1, .., An)` with up to six arguments
/// whose types implement [`FieldValue`]. `Args` is the argument tuple and
/// only disambiguates the arity impls.
pub trait DebugHandler<T, Args>: Send + Sync + 'static {
	/// Declared argument types in order.
	fn param_types(&self) -> Vec<StaticType>;

	/// Converts `args` to the argument types and invokes the method.
	fn call(&self, target: &mut T, args: &[Value]) -> Result<(), AccessError>;
}

macro_rules! impl_debug_handler {
	($($ty:ident),*) => {
		impl<T, Func, $($ty,)*> DebugHandler<T, ($($ty,)*)> for Func
		where
			Func: Fn(&mut T, $($ty),*) + Send + Sync + 'static,
			$($ty: FieldValue + 'static,)*
		{
			fn param_types(&self) -> Vec<StaticType> {
				vec![$(<$ty as FieldValue>::static_type()),*]
			}

			#[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
			fn call(&self, target: &mut T, args: &[Value]) -> Result<(), AccessError> {
				let expected = <[&str]>::len(&[$(stringify!($ty)),*]);
				if args.len() != expected {
					return Err(AccessError::ArityMismatch {
						expected,
						got: args.len(),
					});
				}
				let mut index = 0usize;
				$(
					let $ty = <$ty as FieldValue>::from_value(&args[index]).ok_or_else(|| {
						AccessError::TypeMismatch {
							member: format!("param{index}"),
							expected: <$ty as FieldValue>::static_type().value_type(),
							got: args[index].type_name(),
						}
					})?;
					index += 1;
				)*
				self(target, $($ty),*);
				Ok(())
			}
		}
	};
}

impl_debug_handler!();
impl_debug_handler!(A1);
impl_debug_handler!(A1, A2);
impl_debug_handler!(A1, A2, A3);
impl_debug_handler!(A1, A2, A3, A4);
impl_debug_handler!(A1, A2, A3, A4, A5);
impl_debug_handler!(A1, A2, A3, A4, A5, A6);
