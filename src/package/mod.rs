// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Package descriptor
//!
//! Describes how the operators are installed and exposed: package name and
//! version, command-line entry points, and the bundled operator definition
//! files. Read from `package.toml`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{ComponentError, ComponentResult};
use crate::operator::{Arguments, Operation, OperatorRegistry, OperatorSpec};

/// Package metadata from package.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,

    pub version: String,

    /// Command name -> operator name
    #[serde(default)]
    pub entry_points: BTreeMap<String, String>,

    /// Glob patterns of bundled resource files, relative to the package root
    #[serde(default)]
    pub resources: Vec<String>,
}

impl PackageDescriptor {
    /// The descriptor of this package
    pub fn builtin() -> Self {
        Self {
            name: "kubeflow-components".into(),
            version: "0.0.1".into(),
            entry_points: BTreeMap::from([("multiply".to_string(), "multiply".to_string())]),
            resources: vec!["yaml/*.yaml".into()],
        }
    }

    /// Load a descriptor from a TOML file
    pub fn from_file(path: &Path) -> ComponentResult<Self> {
        let content = ComponentError::read_file(path)?;
        Self::from_toml(&content)
    }

    /// Parse a descriptor from TOML
    pub fn from_toml(content: &str) -> ComponentResult<Self> {
        toml::from_str(content).map_err(Into::into)
    }

    /// Check that every entry point resolves to a registered operator
    pub fn validate(&self, registry: &OperatorRegistry) -> ComponentResult<()> {
        for (command, operator) in &self.entry_points {
            registry.resolve(operator)?;
            debug!(%command, %operator, "Entry point resolves");
        }
        Ok(())
    }

    /// Resolve a command name to its operation
    pub fn entry_point<'r>(
        &self,
        command: &str,
        registry: &'r OperatorRegistry,
    ) -> ComponentResult<&'r dyn Operation> {
        let operator = self
            .entry_points
            .get(command)
            .ok_or_else(|| ComponentError::UnknownEntryPoint {
                package: self.name.clone(),
                command: command.to_string(),
            })?;
        registry.resolve(operator)
    }

    /// Run an entry point with raw command-line values
    pub fn invoke<S: AsRef<str>>(
        &self,
        command: &str,
        registry: &OperatorRegistry,
        values: &[S],
    ) -> ComponentResult<Value> {
        let operation = self.entry_point(command, registry)?;
        let args = Arguments::from_positional(operation.spec(), values)?;
        operation.invoke(args)
    }

    /// Expand the resource patterns under `base_dir`
    pub fn bundled_resources(&self, base_dir: &Path) -> ComponentResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in &self.resources {
            // The base directory is literal; only the descriptor pattern globs
            let base = glob::Pattern::escape(&base_dir.to_string_lossy());
            let full_pattern = Path::new(&base).join(pattern).to_string_lossy().to_string();
            let matches = glob::glob(&full_pattern)?.filter_map(Result::ok);
            files.extend(matches);
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Compare the bundled operator definitions with the registry.
    ///
    /// Returns one message per problem: an unreadable definition, a
    /// definition of an unregistered operator, a definition whose inputs
    /// disagree with the registered operator, or a registered resource file
    /// that is missing.
    pub fn check_resources(
        &self,
        registry: &OperatorRegistry,
        base_dir: &Path,
    ) -> ComponentResult<Vec<String>> {
        let mut problems = Vec::new();

        for file in self.bundled_resources(base_dir)? {
            let display = file
                .strip_prefix(base_dir)
                .unwrap_or(file.as_path())
                .display()
                .to_string();

            let bundled = match OperatorSpec::from_file(&file) {
                Ok(spec) => spec,
                Err(e) => {
                    problems.push(format!("{}: {}", display, e));
                    continue;
                }
            };

            match registry.resolve(&bundled.name) {
                Ok(operation) => {
                    if let Some(diff) = input_mismatch(&bundled, operation.spec()) {
                        problems.push(format!("{}: {}", display, diff));
                    }
                }
                Err(_) => problems.push(format!(
                    "{}: defines unknown operator '{}'",
                    display, bundled.name
                )),
            }
        }

        for (operator, path) in registry.missing_resources(base_dir) {
            problems.push(format!(
                "Resource '{}' of operator '{}' not found",
                path.display(),
                operator
            ));
        }

        Ok(problems)
    }
}

fn input_mismatch(bundled: &OperatorSpec, registered: &OperatorSpec) -> Option<String> {
    let signature = |spec: &OperatorSpec| {
        spec.inputs
            .iter()
            .map(|i| (i.name.clone(), i.kind))
            .collect::<Vec<_>>()
    };

    if signature(bundled) == signature(registered) {
        None
    } else {
        let names = |spec: &OperatorSpec| {
            spec.inputs
                .iter()
                .map(|i| format!("{}: {:?}", i.name, i.kind))
                .collect::<Vec<_>>()
                .join(", ")
        };
        Some(format!(
            "inputs ({}) do not match registered operator '{}' ({})",
            names(bundled),
            registered.name,
            names(registered)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Multiply;

    const DESCRIPTOR: &str = r#"
name = "kubeflow-components"
version = "0.0.1"
resources = ["yaml/*.yaml"]

[entry_points]
multiply = "multiply"
"#;

    #[test]
    fn test_parse_descriptor() {
        let descriptor = PackageDescriptor::from_toml(DESCRIPTOR).unwrap();
        assert_eq!(descriptor, PackageDescriptor::builtin());
    }

    #[test]
    fn test_validate_entry_points() {
        let registry = OperatorRegistry::builtin().unwrap();
        PackageDescriptor::builtin().validate(&registry).unwrap();

        let mut descriptor = PackageDescriptor::builtin();
        descriptor.entry_points.insert("divide".into(), "divide".into());
        let err = descriptor.validate(&registry).unwrap_err();
        assert!(matches!(err, ComponentError::UnknownOperator { ref name } if name == "divide"));
    }

    #[test]
    fn test_invoke_entry_point() {
        let registry = OperatorRegistry::builtin().unwrap();
        let result = PackageDescriptor::builtin()
            .invoke("multiply", &registry, &["4", "5"])
            .unwrap();
        assert_eq!(result.to_string(), "20");
    }

    #[test]
    fn test_invoke_non_numeric() {
        let registry = OperatorRegistry::builtin().unwrap();
        let err = PackageDescriptor::builtin()
            .invoke("multiply", &registry, &["four", "5"])
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidArgument { .. }));
    }

    #[test]
    fn test_unknown_entry_point() {
        let registry = OperatorRegistry::builtin().unwrap();
        let err = PackageDescriptor::builtin()
            .invoke("divide", &registry, &["4", "5"])
            .unwrap_err();
        assert!(matches!(err, ComponentError::UnknownEntryPoint { .. }));
    }

    #[test]
    fn test_check_resources() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_dir = dir.path().join("yaml");
        std::fs::create_dir(&yaml_dir).unwrap();

        let spec = Multiply::new().spec().clone();
        std::fs::write(yaml_dir.join("multiply.yaml"), spec.to_yaml().unwrap()).unwrap();

        let registry = OperatorRegistry::builtin().unwrap();
        let descriptor = PackageDescriptor::builtin();
        assert_eq!(descriptor.bundled_resources(dir.path()).unwrap().len(), 1);
        assert!(descriptor.check_resources(&registry, dir.path()).unwrap().is_empty());

        std::fs::write(yaml_dir.join("divide.yaml"), "name: divide\n").unwrap();
        let problems = descriptor.check_resources(&registry, dir.path()).unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("unknown operator 'divide'"));
    }

    #[test]
    fn test_check_resources_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_dir = dir.path().join("yaml");
        std::fs::create_dir(&yaml_dir).unwrap();
        std::fs::write(
            yaml_dir.join("multiply.yaml"),
            "name: multiply\ninputs:\n  - name: x\n    type: Integer\n",
        )
        .unwrap();

        let registry = OperatorRegistry::builtin().unwrap();
        let problems = PackageDescriptor::builtin()
            .check_resources(&registry, dir.path())
            .unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("do not match"));
    }

    #[test]
    fn test_bundled_resources_in_bracketed_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("pkg[1]");
        std::fs::create_dir_all(base.join("yaml")).unwrap();
        std::fs::write(base.join("yaml/multiply.yaml"), Multiply::new().spec().to_yaml().unwrap())
            .unwrap();

        let files = PackageDescriptor::builtin().bundled_resources(&base).unwrap();
        assert_eq!(files, vec![base.join("yaml/multiply.yaml")]);
    }
}
