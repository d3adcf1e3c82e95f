// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Pipeline definition structures
//!
//! [`PipelineSpec`] is what a user writes (in code or in a pipeline.yaml
//! file). [`PipelineGraph`] is the immutable, fully bound description handed
//! to the orchestration platform; it only comes out of
//! [`define`](super::define).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{ComponentError, ComponentResult};
use crate::operator::Arguments;

/// Pipeline definition from pipeline.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Definition format version
    #[serde(default = "default_version")]
    pub version: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Pipeline parameters and their default values
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,

    pub nodes: Vec<NodeSpec>,
}

pub(crate) fn default_version() -> String {
    "1".to_string()
}

impl PipelineSpec {
    /// Load a pipeline definition from a YAML file
    pub fn from_file(path: &Path) -> ComponentResult<Self> {
        if !path.exists() {
            return Err(ComponentError::PipelineNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = ComponentError::read_file(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a pipeline definition from YAML
    pub fn from_yaml(yaml: &str) -> ComponentResult<Self> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }
}

/// A node as written in a pipeline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Node name (must be unique within the pipeline)
    pub name: String,

    /// Name of the operator this node invokes
    pub operator: String,

    /// Explicit argument bindings. Inputs not listed here are bound to the
    /// pipeline parameter of the same name, or to the operator default.
    #[serde(default)]
    pub arguments: BTreeMap<String, ArgumentSpec>,

    /// Nodes this node is ordered after
    #[serde(default)]
    pub after: Vec<String>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: operator.into(),
            arguments: BTreeMap::new(),
            after: Vec::new(),
        }
    }

    /// Bind an input to a literal value
    pub fn argument(mut self, input: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments
            .insert(input.into(), ArgumentSpec::Value(value.into()));
        self
    }

    /// Bind an input to a pipeline parameter
    pub fn parameter(mut self, input: impl Into<String>, parameter: impl Into<String>) -> Self {
        self.arguments.insert(
            input.into(),
            ArgumentSpec::Parameter {
                parameter: parameter.into(),
            },
        );
        self
    }

    pub fn after(mut self, node: impl Into<String>) -> Self {
        self.after.push(node.into());
        self
    }
}

/// An explicit argument binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentSpec {
    /// Reference to a pipeline parameter
    Parameter { parameter: String },

    /// Literal value
    Value(Value),
}

/// An argument binding in a defined graph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Binding {
    /// Literal value
    Value { value: Value },

    /// Pipeline parameter, with the parameter's default value
    Parameter { parameter: String, default: Value },
}

impl Binding {
    /// The value used when the pipeline runs with default parameters
    pub fn default_value(&self) -> &Value {
        match self {
            Self::Value { value } => value,
            Self::Parameter { default, .. } => default,
        }
    }
}

/// A node in a defined graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) operator: String,
    pub(crate) arguments: BTreeMap<String, Binding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) after: Vec<String>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Every operator input, bound
    pub fn arguments(&self) -> &BTreeMap<String, Binding> {
        &self.arguments
    }

    pub fn after(&self) -> &[String] {
        &self.after
    }

    /// Argument values under the pipeline's default parameters
    pub fn default_arguments(&self) -> Arguments {
        self.arguments
            .iter()
            .map(|(name, binding)| (name.clone(), binding.default_value().clone()))
            .collect()
    }
}

/// Immutable graph description consumed by the orchestration platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineGraph {
    pub(crate) version: String,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) parameters: BTreeMap<String, Value>,
    pub(crate) nodes: Vec<Node>,
}

impl PipelineGraph {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }

    /// Nodes in definition order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by name
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Get all node names
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Serialize the graph to YAML
    pub fn to_yaml(&self) -> ComponentResult<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Serialize the graph to pretty-printed JSON
    pub fn to_json(&self) -> ComponentResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline_spec() {
        let yaml = r#"
name: Demo
description: A sample pipeline.
parameters:
  a: 2
  b: 3
nodes:
  - name: multiply
    operator: multiply
"#;

        let spec = PipelineSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.version, "1");
        assert_eq!(spec.name, "Demo");
        assert_eq!(spec.parameters["a"], Value::from(2));
        assert_eq!(spec.nodes.len(), 1);
        assert!(spec.nodes[0].arguments.is_empty());
    }

    #[test]
    fn test_parse_argument_bindings() {
        let yaml = r#"
name: chain
parameters:
  scale: 10
nodes:
  - name: first
    operator: multiply
    arguments:
      a: 4
      b:
        parameter: scale
  - name: second
    operator: multiply
    arguments:
      a: 1.5
      b: 2
    after: [first]
"#;

        let spec = PipelineSpec::from_yaml(yaml).unwrap();
        let first = &spec.nodes[0];
        assert_eq!(first.arguments["a"], ArgumentSpec::Value(Value::from(4)));
        assert_eq!(
            first.arguments["b"],
            ArgumentSpec::Parameter {
                parameter: "scale".into()
            }
        );
        assert_eq!(spec.nodes[1].after, vec!["first"]);
    }

    #[test]
    fn test_missing_pipeline_file() {
        let err = PipelineSpec::from_file(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, ComponentError::PipelineNotFound { .. }));
    }

    #[test]
    fn test_binding_default_value() {
        let literal = Binding::Value { value: Value::from(4) };
        let param = Binding::Parameter {
            parameter: "a".into(),
            default: Value::from(2),
        };
        assert_eq!(literal.default_value(), &Value::from(4));
        assert_eq!(param.default_value(), &Value::from(2));
    }
}
