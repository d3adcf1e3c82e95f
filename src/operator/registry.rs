// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Operator registry
//!
//! The registry is built once at process start and passed by reference to
//! whatever resolves operators: the command-line entry points and pipeline
//! definitions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::{Multiply, Operation};
use crate::errors::{ComponentError, ComponentResult};

/// Pattern for operator and node names
pub(crate) const NAME_PATTERN: &str = r"^[a-z][a-z0-9_-]*$";

fn name_regex() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("name pattern is a valid regex"))
}

/// Check a name against [`NAME_PATTERN`]
pub(crate) fn validate_name(kind: &str, name: &str) -> ComponentResult<()> {
    if name_regex().is_match(name) {
        Ok(())
    } else {
        Err(ComponentError::InvalidName {
            kind: kind.to_string(),
            name: name.to_string(),
        })
    }
}

struct Registration {
    operation: Box<dyn Operation>,
    resources: Vec<PathBuf>,
}

/// Mapping from operator names to implementations
#[derive(Default)]
pub struct OperatorRegistry {
    operators: BTreeMap<String, Registration>,
}

impl OperatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the operators shipped with this package
    pub fn builtin() -> ComponentResult<Self> {
        let mut registry = Self::new();
        registry.register("multiply", Multiply::new(), vec![PathBuf::from("yaml/multiply.yaml")])?;
        Ok(registry)
    }

    /// Register an operation under `name`, with the static resource files
    /// describing it. `name` must be the operation's own spec name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        operation: impl Operation + 'static,
        resources: Vec<PathBuf>,
    ) -> ComponentResult<()> {
        let name = name.into();
        validate_name("operator", &name)?;

        let declared = &operation.spec().name;
        if *declared != name {
            return Err(ComponentError::NameMismatch {
                name,
                declared: declared.clone(),
            });
        }

        if self.operators.contains_key(&name) {
            return Err(ComponentError::DuplicateName { name });
        }

        debug!(operator = %name, resources = resources.len(), "Registered operator");
        self.operators.insert(
            name,
            Registration {
                operation: Box::new(operation),
                resources,
            },
        );
        Ok(())
    }

    /// Get the operation registered under `name`
    pub fn resolve(&self, name: &str) -> ComponentResult<&dyn Operation> {
        self.operators
            .get(name)
            .map(|r| r.operation.as_ref())
            .ok_or_else(|| ComponentError::UnknownOperator {
                name: name.to_string(),
            })
    }

    /// Resource files registered alongside an operator
    pub fn resources(&self, name: &str) -> ComponentResult<&[PathBuf]> {
        self.operators
            .get(name)
            .map(|r| r.resources.as_slice())
            .ok_or_else(|| ComponentError::UnknownOperator {
                name: name.to_string(),
            })
    }

    /// Resource files of every operator that do not exist under `base_dir`
    pub fn missing_resources(&self, base_dir: &Path) -> Vec<(String, PathBuf)> {
        self.operators
            .iter()
            .flat_map(|(name, r)| r.resources.iter().map(move |p| (name, p)))
            .filter(|(_, p)| !base_dir.join(p).exists())
            .map(|(name, p)| (name.clone(), p.clone()))
            .collect()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.operators.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.names())
            .finish()
    }
}
