// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Pipeline definition
//!
//! Turns a [`PipelineSpec`] into an immutable [`PipelineGraph`], resolving
//! every node's operator against an [`OperatorRegistry`] and binding every
//! operator input.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

use crate::errors::{ComponentError, ComponentResult};
use crate::operator::{validate_name, InputSpec, OperatorRegistry};
use crate::pipeline::{
    default_version, ArgumentSpec, Binding, DagBuilder, Node, NodeSpec, PipelineGraph, PipelineSpec,
};

/// Define a pipeline without parameters
pub fn define(
    registry: &OperatorRegistry,
    name: impl Into<String>,
    description: impl Into<String>,
    nodes: Vec<NodeSpec>,
) -> ComponentResult<PipelineGraph> {
    PipelineBuilder::new(name)
        .description(description)
        .nodes(nodes)
        .build(registry)
}

/// The demo pipeline: a single `multiply` node with parameters `a=2, b=3`
pub fn demo_pipeline(registry: &OperatorRegistry) -> ComponentResult<PipelineGraph> {
    PipelineBuilder::new("Demo")
        .description("A sample pipeline.")
        .parameter("a", 2)
        .parameter("b", 3)
        .node(NodeSpec::new("multiply", "multiply"))
        .build(registry)
}

/// Builder for pipeline graphs
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    spec: PipelineSpec,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: PipelineSpec {
                version: default_version(),
                name: name.into(),
                description: None,
                parameters: BTreeMap::new(),
                nodes: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = Some(description.into());
        self
    }

    /// Declare a pipeline parameter with its default value
    pub fn parameter(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.spec.parameters.insert(name.into(), default.into());
        self
    }

    pub fn node(mut self, node: NodeSpec) -> Self {
        self.spec.nodes.push(node);
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.spec.nodes.extend(nodes);
        self
    }

    pub fn build(self, registry: &OperatorRegistry) -> ComponentResult<PipelineGraph> {
        self.spec.define(registry)
    }
}

impl PipelineSpec {
    /// Resolve and bind every node, producing the immutable graph
    pub fn define(&self, registry: &OperatorRegistry) -> ComponentResult<PipelineGraph> {
        if self.nodes.is_empty() {
            return Err(ComponentError::InvalidPipeline {
                reason: format!("pipeline '{}' has no nodes", self.name),
                help: Some("Add at least one node bound to a registered operator".into()),
            });
        }

        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            validate_name("node", &node.name)?;
            if !seen.insert(node.name.as_str()) {
                return Err(ComponentError::DuplicateNode {
                    node: node.name.clone(),
                });
            }
            nodes.push(self.bind_node(node, registry)?);
        }

        // Rejects unknown `after` targets and cycles
        DagBuilder::build(&nodes)?;

        info!(pipeline = %self.name, nodes = nodes.len(), "Defined pipeline");

        Ok(PipelineGraph {
            version: self.version.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            nodes,
        })
    }

    fn bind_node(&self, node: &NodeSpec, registry: &OperatorRegistry) -> ComponentResult<Node> {
        let operation = registry
            .resolve(&node.operator)
            .map_err(|_| ComponentError::UnresolvedOperator {
                node: node.name.clone(),
                operator: node.operator.clone(),
            })?;
        let spec = operation.spec();

        if let Some(unknown) = node.arguments.keys().find(|name| spec.get_input(name).is_none()) {
            return Err(ComponentError::UnknownArgument {
                operator: spec.name.clone(),
                argument: unknown.clone(),
            });
        }

        let mut arguments = BTreeMap::new();
        for input in &spec.inputs {
            let binding = self.bind_input(node, &spec.name, input)?;
            if !input.kind.accepts(binding.default_value()) {
                return Err(ComponentError::invalid_argument(
                    &spec.name,
                    &input.name,
                    input.kind,
                    &binding.default_value().to_string(),
                ));
            }
            arguments.insert(input.name.clone(), binding);
        }

        debug!(node = %node.name, operator = %node.operator, "Bound node");

        Ok(Node {
            name: node.name.clone(),
            operator: node.operator.clone(),
            arguments,
            after: node.after.clone(),
        })
    }

    fn bind_input(
        &self,
        node: &NodeSpec,
        operator: &str,
        input: &InputSpec,
    ) -> ComponentResult<Binding> {
        let parameter_binding = |parameter: &str| {
            self.parameters.get(parameter).map(|default| Binding::Parameter {
                parameter: parameter.to_string(),
                default: default.clone(),
            })
        };

        match node.arguments.get(&input.name) {
            Some(ArgumentSpec::Value(value)) => Ok(Binding::Value {
                value: value.clone(),
            }),
            Some(ArgumentSpec::Parameter { parameter }) => {
                parameter_binding(parameter.as_str()).ok_or_else(|| {
                    ComponentError::UnknownParameter {
                        node: node.name.clone(),
                        parameter: parameter.clone(),
                    }
                })
            }
            None => parameter_binding(input.name.as_str())
                .or_else(|| {
                    input.default.clone().map(|value| Binding::Value { value })
                })
                .ok_or_else(|| ComponentError::MissingArgument {
                    operator: operator.to_string(),
                    input: input.name.clone(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{Arguments, FnOperation, OperatorSpec, ParamType};

    fn registry() -> OperatorRegistry {
        let mut registry = OperatorRegistry::builtin().unwrap();
        let spec = OperatorSpec::new("greet")
            .input(InputSpec::new("who", ParamType::String).with_default("world"))
            .output("greeting", ParamType::String);
        let greet = FnOperation::new(spec, |args: &Arguments| {
            let who = args.get("who").and_then(Value::as_str).unwrap_or_default();
            Ok(Value::from(format!("hello {}", who)))
        });
        registry.register("greet", greet, vec![]).unwrap();
        registry
    }

    #[test]
    fn test_demo_pipeline_defaults() {
        let graph = demo_pipeline(&registry()).unwrap();

        assert_eq!(graph.version(), "1");
        assert_eq!(graph.name(), "Demo");
        assert_eq!(graph.description(), Some("A sample pipeline."));
        assert_eq!(graph.parameters()["a"], Value::from(2));
        assert_eq!(graph.parameters()["b"], Value::from(3));
        assert_eq!(graph.nodes().len(), 1);

        let node = &graph.nodes()[0];
        assert_eq!(node.operator(), "multiply");
        assert_eq!(node.default_arguments(), Arguments::new().with("a", 2).with("b", 3));
        assert_eq!(
            node.arguments()["a"],
            Binding::Parameter {
                parameter: "a".into(),
                default: Value::from(2)
            }
        );
    }

    #[test]
    fn test_demo_node_runs_with_defaults() {
        let registry = registry();
        let graph = demo_pipeline(&registry).unwrap();
        let node = &graph.nodes()[0];

        let result = registry
            .resolve(node.operator())
            .unwrap()
            .invoke(node.default_arguments())
            .unwrap();
        assert_eq!(result, Value::from(6));
    }

    #[test]
    fn test_unresolved_operator() {
        let err = define(&registry(), "bad", "", vec![NodeSpec::new("div", "divide")]).unwrap_err();
        match err {
            ComponentError::UnresolvedOperator { node, operator } => {
                assert_eq!(node, "div");
                assert_eq!(operator, "divide");
            }
            other => panic!("Expected UnresolvedOperator, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let err = define(&registry(), "empty", "", vec![]).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidPipeline { .. }));
    }

    #[test]
    fn test_duplicate_node() {
        let nodes = vec![
            NodeSpec::new("step", "greet"),
            NodeSpec::new("step", "greet"),
        ];
        let err = define(&registry(), "dup", "", nodes).unwrap_err();
        assert!(matches!(err, ComponentError::DuplicateNode { ref node } if node == "step"));
    }

    #[test]
    fn test_missing_argument_without_parameter() {
        let err = define(&registry(), "p", "", vec![NodeSpec::new("m", "multiply")]).unwrap_err();
        assert!(matches!(err, ComponentError::MissingArgument { ref input, .. } if input == "a"));
    }

    #[test]
    fn test_operator_default_used() {
        let graph = define(&registry(), "p", "", vec![NodeSpec::new("hi", "greet")]).unwrap();
        assert_eq!(
            graph.nodes()[0].default_arguments(),
            Arguments::new().with("who", "world")
        );
    }

    #[test]
    fn test_literal_and_parameter_arguments() {
        let graph = PipelineBuilder::new("p")
            .parameter("factor", 10)
            .node(NodeSpec::new("m", "multiply").argument("a", 4).parameter("b", "factor"))
            .build(&registry())
            .unwrap();

        let node = graph.get_node("m").unwrap();
        assert_eq!(node.arguments()["a"], Binding::Value { value: Value::from(4) });
        assert_eq!(node.default_arguments(), Arguments::new().with("a", 4).with("b", 10));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = PipelineBuilder::new("p")
            .node(NodeSpec::new("m", "multiply").argument("a", 1).parameter("b", "missing"))
            .build(&registry())
            .unwrap_err();
        assert!(matches!(
            err,
            ComponentError::UnknownParameter { ref parameter, .. } if parameter == "missing"
        ));
    }

    #[test]
    fn test_unknown_argument() {
        let err = PipelineBuilder::new("p")
            .node(
                NodeSpec::new("m", "multiply")
                    .argument("a", 1)
                    .argument("b", 2)
                    .argument("c", 3),
            )
            .build(&registry())
            .unwrap_err();
        assert!(matches!(
            err,
            ComponentError::UnknownArgument { ref argument, .. } if argument == "c"
        ));
    }

    #[test]
    fn test_wrong_literal_type() {
        let err = PipelineBuilder::new("p")
            .parameter("b", 3)
            .node(NodeSpec::new("m", "multiply").argument("a", "two"))
            .build(&registry())
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidArgument { ref input, .. } if input == "a"));
    }

    #[test]
    fn test_after_edges_validated() {
        let registry = registry();

        let graph = PipelineBuilder::new("p")
            .node(NodeSpec::new("first", "greet"))
            .node(NodeSpec::new("second", "greet").after("first"))
            .build(&registry)
            .unwrap();
        assert_eq!(graph.get_node("second").unwrap().after(), ["first"]);

        let err = PipelineBuilder::new("p")
            .node(NodeSpec::new("first", "greet").after("second"))
            .node(NodeSpec::new("second", "greet").after("first"))
            .build(&registry)
            .unwrap_err();
        assert!(matches!(err, ComponentError::CircularDependency { .. }));
    }

    #[test]
    fn test_graph_serialization() {
        let graph = demo_pipeline(&registry()).unwrap();
        let json: Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

        assert_eq!(json["name"], "Demo");
        assert_eq!(json["parameters"]["b"], 3);
        assert_eq!(json["nodes"][0]["arguments"]["a"]["kind"], "parameter");
        assert_eq!(json["nodes"][0]["arguments"]["a"]["default"], 2);
        assert!(json["nodes"][0].get("after").is_none());

        let yaml = graph.to_yaml().unwrap();
        assert!(yaml.contains("name: Demo"));
    }
}
