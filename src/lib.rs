// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! # kf-components - packaged pipeline operators
//!
//! `kf-components` bundles named operators (such as `multiply`) with the
//! YAML definitions that describe them to an orchestration platform, and
//! defines pipelines that wire those operators into a graph.
//!
//! ## Quick Start
//!
//! ```bash
//! # Invoke the multiply entry point directly
//! multiply 4 5
//!
//! # Compile the demo pipeline for the orchestration platform
//! kfc compile
//!
//! # Check the package descriptor and bundled definitions
//! kfc package
//! ```
//!
//! ```
//! use kf_components::{demo_pipeline, OperatorRegistry};
//!
//! let registry = OperatorRegistry::builtin().unwrap();
//! let graph = demo_pipeline(&registry).unwrap();
//! assert_eq!(graph.node_names(), vec!["multiply"]);
//! ```

pub mod cli;
pub mod errors;
pub mod operator;
pub mod package;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use errors::{ComponentError, ComponentResult};
pub use operator::{Arguments, Operation, OperatorRegistry, OperatorSpec};
pub use package::PackageDescriptor;
pub use pipeline::{define, demo_pipeline, NodeSpec, PipelineBuilder, PipelineGraph, PipelineSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
