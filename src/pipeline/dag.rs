// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Node ordering graph
//!
//! Builds the graph of `after` edges between nodes and checks it is acyclic.
//! The edges are declarative; running nodes in order is up to the
//! orchestration platform.

use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use crate::errors::ComponentError;
use crate::pipeline::{Node, PipelineGraph};

/// Builder for node ordering DAGs
pub struct DagBuilder {
    graph: DiGraph<String, ()>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl DagBuilder {
    /// Create an empty DAG builder
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_to_index: HashMap::new(),
        }
    }

    /// Build a DAG from defined nodes
    pub fn build(nodes: &[Node]) -> Result<Self, ComponentError> {
        let mut builder = Self::new();

        for node in nodes {
            let index = builder.graph.add_node(node.name.clone());
            builder.name_to_index.insert(node.name.clone(), index);
        }

        for node in nodes {
            let node_index = builder.name_to_index[&node.name];

            for dep_name in &node.after {
                let dep_index = builder.name_to_index.get(dep_name).ok_or_else(|| {
                    ComponentError::UnknownDependency {
                        node: node.name.clone(),
                        dependency: dep_name.clone(),
                    }
                })?;

                if !builder.graph.contains_edge(*dep_index, node_index) {
                    builder.graph.add_edge(*dep_index, node_index, ());
                }
            }
        }

        builder.topological_order_names()?;

        Ok(builder)
    }

    /// Node names in an order compatible with every `after` edge
    pub fn topological_order_names(&self) -> Result<Vec<String>, ComponentError> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|n| self.graph[n].clone()).collect())
            .map_err(|cycle| ComponentError::CircularDependency {
                nodes: self.cycle_members(cycle.node_id()),
            })
    }

    /// Names of the strongly connected component containing `start`
    fn cycle_members(&self, start: NodeIndex) -> Vec<String> {
        let mut members: Vec<NodeIndex> = kosaraju_scc(&self.graph)
            .into_iter()
            .find(|component| component.contains(&start))
            .unwrap_or_else(|| vec![start]);

        members.sort();
        members.into_iter().map(|n| self.graph[n].clone()).collect()
    }

    /// Nodes that must come before `node_name`
    pub fn dependencies(&self, node_name: &str) -> Option<Vec<String>> {
        let index = self.name_to_index.get(node_name)?;
        let mut deps: Vec<String> = self
            .graph
            .neighbors_directed(*index, petgraph::Direction::Incoming)
            .map(|n| self.graph[n].clone())
            .collect();
        deps.sort();
        Some(deps)
    }

    /// Generate Mermaid diagram of the DAG
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for index in self.graph.node_indices() {
            let name = &self.graph[index];
            out.push_str(&format!("    {}[{}]\n", name, name));
        }

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "    {} --> {}\n",
                self.graph[edge.source()],
                self.graph[edge.target()]
            ));
        }

        out
    }

    /// Generate DOT diagram of the DAG
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\";\n",
                self.graph[edge.source()],
                self.graph[edge.target()]
            ));
        }

        // Isolated nodes have no edge to make them appear
        for index in self.graph.node_indices() {
            if self.graph.neighbors_undirected(index).count() == 0 {
                out.push_str(&format!("    \"{}\";\n", self.graph[index]));
            }
        }

        out.push_str("}\n");
        out
    }

    /// Generate a numbered listing of the nodes with their bindings
    pub fn to_text(&self, pipeline: &PipelineGraph) -> Result<String, ComponentError> {
        let order = self.topological_order_names()?;
        let mut out = String::new();

        for (i, name) in order.iter().enumerate() {
            let Some(node) = pipeline.get_node(name) else {
                continue;
            };

            let args: Vec<String> = node
                .default_arguments()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();

            out.push_str(&format!("{}. {} ({})", i + 1, node.name(), node.operator()));

            if !args.is_empty() {
                out.push_str(&format!(" {}", args.join(", ")));
            }

            let deps = self.dependencies(name).unwrap_or_default();
            if !deps.is_empty() {
                out.push_str(&format!(" [after: {}]", deps.join(", ")));
            }

            out.push('\n');
        }

        Ok(out)
    }
}

impl Default for DagBuilder {
    fn default() -> Self {
        Self::new()
    }
}
