//! Generic factories that receive resolved dependencies as positional arguments

use crate::{error::Error, value::Value};
use std::sync::Arc;

/// Type-erased factory stored in the registry.
///
/// Receives the id of the module being built and the resolved values of its
/// declared dependencies, in declared order.
pub(crate) type FactoryFn = Arc<
    dyn Fn(&str, &[Value]) -> Result<Value, Error>
    + Send
    + Sync
>;

/// A trait that describes how to build a tuple of factory arguments
/// from the resolved dependency values
pub trait FromArgs: Sized {
    /// Number of arguments the tuple consumes
    const ARITY: usize;

    /// Downcasts resolved values into `Self` on behalf of `module`
    fn from_args(module: &str, args: &[Value]) -> Result<Self, Error>;
}

impl FromArgs for () {
    const ARITY: usize = 0;

    #[inline]
    fn from_args(module: &str, args: &[Value]) -> Result<Self, Error> {
        check_arity(module, Self::ARITY, args.len())
    }
}

/// A trait that describes a generic factory function
/// whose parameters are filled with resolved dependencies
pub trait GenericFactory<Args>: Send + Sync + 'static {
    /// A type of object that will be produced
    type Output: Send + Sync + 'static;

    /// Calls a generic function and returns the produced object
    fn call(&self, args: Args) -> Self::Output;
}

impl<F, R> GenericFactory<()> for F
where
    F: Fn() -> R + Send + Sync + 'static,
    R: Send + Sync + 'static
{
    type Output = R;

    #[inline]
    fn call(&self, _: ()) -> Self::Output {
        self()
    }
}

macro_rules! define_generic_factory ({ $($param:ident)* } => {
    impl<F, R, $($param,)*> GenericFactory<($($param,)*)> for F
    where
        F: Fn($($param),*) -> R + Send + Sync + 'static,
        R: Send + Sync + 'static
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }

    impl<$($param,)*> FromArgs for ($($param,)*)
    where
        $($param: Clone + Send + Sync + 'static,)*
    {
        const ARITY: usize = [$(stringify!($param)),*].len();

        #[inline]
        #[allow(non_snake_case)]
        fn from_args(module: &str, args: &[Value]) -> Result<Self, Error> {
            check_arity(module, Self::ARITY, args.len())?;
            let mut args = args.iter();
            $(
            let $param = match args.next() {
                Some(value) => value.downcast_for::<$param>(module)?.as_ref().clone(),
                None => unreachable!("arity is checked above"),
            };
            )*
            Ok(($($param,)*))
        }
    }
});

define_generic_factory! { T1 }
define_generic_factory! { T1 T2 }
define_generic_factory! { T1 T2 T3 }
define_generic_factory! { T1 T2 T3 T4 }
define_generic_factory! { T1 T2 T3 T4 T5 }
define_generic_factory! { T1 T2 T3 T4 T5 T6 }
define_generic_factory! { T1 T2 T3 T4 T5 T6 T7 }
define_generic_factory! { T1 T2 T3 T4 T5 T6 T7 T8 }

#[inline]
fn check_arity(module: &str, expected: usize, actual: usize) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ArityMismatch { module: module.to_owned(), expected, actual })
    }
}

/// Erases a typed factory into a [`FactoryFn`]
#[inline]
pub(crate) fn make_factory_fn<F, Args>(factory: F) -> FactoryFn
where
    F: GenericFactory<Args>,
    Args: FromArgs
{
    Arc::new(move |module: &str, args: &[Value]| -> Result<Value, Error> {
        let args = Args::from_args(module, args)?;
        Ok(Value::new(factory.call(args)))
    })
}
