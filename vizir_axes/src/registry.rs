// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-type registry.
//!
//! Configuration loaders name axis types by string (`"linear"`, and whatever
//! extensions add). The registry maps those names to constructors. It is an
//! ordinary value owned by the host; there is no process-wide instance.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::linear::LinearScale;
use crate::options::SharedAxisOptions;
use crate::scale::{AxisPosition, Scale};

/// Builds an axis of one registered type.
pub type ScaleConstructor = fn(AxisPosition, SharedAxisOptions) -> Box<dyn Scale>;

/// Name of the built-in [`LinearScale`] type.
pub const LINEAR: &str = "linear";

/// Maps axis-type names to constructors.
#[derive(Clone, Default)]
pub struct ScaleTypeRegistry {
    constructors: HashMap<String, ScaleConstructor>,
}

impl fmt::Debug for ScaleTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ScaleTypeRegistry")
            .field("types", &names)
            .finish()
    }
}

impl ScaleTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in types (`"linear"`).
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register_type(LINEAR, linear_scale);
        registry
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register_type(&mut self, name: impl Into<String>, constructor: ScaleConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    /// Looks up the constructor for `name`.
    pub fn constructor_for(&self, name: &str) -> Option<ScaleConstructor> {
        self.constructors.get(name).copied()
    }

    /// Constructs an axis of type `name`, if registered.
    pub fn create(
        &self,
        name: &str,
        position: AxisPosition,
        options: SharedAxisOptions,
    ) -> Option<Box<dyn Scale>> {
        self.constructor_for(name).map(|ctor| ctor(position, options))
    }
}

fn linear_scale(position: AxisPosition, options: SharedAxisOptions) -> Box<dyn Scale> {
    Box::new(LinearScale::new(position, options))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::options::AxisOptions;

    #[test]
    fn builtin_linear_type() {
        let registry = ScaleTypeRegistry::with_builtin_types();
        let options = AxisOptions::new().shared();
        let axis = registry
            .create(LINEAR, AxisPosition::Left, options.clone())
            .expect("linear is built in");
        assert_eq!(axis.position(), AxisPosition::Left);
        assert!(axis.options().ptr_eq(&options));
    }

    #[test]
    fn unknown_type_is_absent() {
        let registry = ScaleTypeRegistry::with_builtin_types();
        assert!(registry.constructor_for("logarithmic").is_none());
        assert!(ScaleTypeRegistry::new().constructor_for(LINEAR).is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        fn bottom_only(_: AxisPosition, options: SharedAxisOptions) -> Box<dyn Scale> {
            Box::new(LinearScale::new(AxisPosition::Bottom, options))
        }

        let mut registry = ScaleTypeRegistry::with_builtin_types();
        registry.register_type(LINEAR, bottom_only);
        let axis = registry
            .create(LINEAR, AxisPosition::Left, SharedAxisOptions::default())
            .expect("registered");
        assert_eq!(axis.position(), AxisPosition::Bottom);
    }
}
