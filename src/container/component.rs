//! Component declarations.
//!
//! A component states its identifier, the parameter list of its constructor
//! and how to build itself from the auto-wired arguments. This is the typed
//! replacement for constructor introspection: the container walks `params()`
//! exactly the way it would walk a reflected signature.

use std::any::{type_name, Any};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::container::error::ContainerError;

/// A shared, type-erased component instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Declared type of a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// An object dependency, resolved through the container by id.
    Component(&'static str),
    /// A builtin value (number, string, flag). Never auto-wired.
    Primitive(&'static str),
    /// No declared type. Never auto-wired.
    Untyped,
}

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl Param {
    /// Parameter whose type is another component.
    pub fn component<T: Component>(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Component(T::ID),
        }
    }

    /// Parameter that depends on an abstract id (bound at bootstrap).
    pub fn abstract_id(name: &'static str, id: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Component(id),
        }
    }

    pub fn primitive(name: &'static str, ty: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Primitive(ty),
        }
    }

    pub fn untyped(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Untyped,
        }
    }

    /// Id to resolve, if this parameter is auto-wired.
    pub fn dependency(&self) -> Option<&'static str> {
        match self.kind {
            ParamKind::Component(id) => Some(id),
            ParamKind::Primitive(_) | ParamKind::Untyped => None,
        }
    }
}

/// Positional arguments resolved for a constructor.
///
/// Only component parameters are present, in declaration order.
pub struct Args {
    component: String,
    values: VecDeque<Instance>,
    position: usize,
}

impl Args {
    pub(crate) fn new(component: impl Into<String>, values: Vec<Instance>) -> Self {
        Self {
            component: component.into(),
            values: values.into(),
            position: 0,
        }
    }

    /// Take the next argument as a concrete type.
    pub fn take<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>, ContainerError> {
        let position = self.position;
        self.position += 1;

        let value = self
            .values
            .pop_front()
            .ok_or_else(|| ContainerError::MissingArgument {
                id: self.component.clone(),
                position,
                expected: type_name::<T>(),
            })?;

        value
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: self.component.clone(),
                expected: type_name::<T>(),
            })
    }

    /// Arguments not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// A type the container knows how to build.
pub trait Component: Any + Send + Sync + Sized {
    /// Fully-qualified identifier the component is registered under.
    const ID: &'static str;

    /// Declared constructor parameters, in order.
    fn params() -> Vec<Param> {
        Vec::new()
    }

    /// Build the component from its auto-wired arguments.
    fn construct(args: &mut Args) -> Result<Self, ContainerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock;

    impl Component for Clock {
        const ID: &'static str = "tests::Clock";

        fn construct(_args: &mut Args) -> Result<Self, ContainerError> {
            Ok(Clock)
        }
    }

    #[test]
    fn test_param_dependency() {
        assert_eq!(Param::component::<Clock>("clock").dependency(), Some("tests::Clock"));
        assert_eq!(Param::primitive("limit", "u32").dependency(), None);
        assert_eq!(Param::untyped("anything").dependency(), None);
    }

    #[test]
    fn test_args_take_in_order() {
        let first: Instance = Arc::new(1u32);
        let second: Instance = Arc::new("two".to_string());
        let mut args = Args::new("tests::Pair", vec![first, second]);

        assert_eq!(*args.take::<u32>().unwrap(), 1);
        assert_eq!(args.take::<String>().unwrap().as_str(), "two");
        assert_eq!(args.remaining(), 0);
    }

    #[test]
    fn test_args_missing_argument() {
        let mut args = Args::new("tests::Needy", Vec::new());
        let err = args.take::<u32>().unwrap_err();
        assert!(matches!(
            err,
            ContainerError::MissingArgument { position: 0, .. }
        ));
    }

    #[test]
    fn test_args_type_mismatch() {
        let value: Instance = Arc::new(5u8);
        let mut args = Args::new("tests::Picky", vec![value]);
        let err = args.take::<String>().unwrap_err();
        assert!(matches!(err, ContainerError::TypeMismatch { .. }));
    }
}
