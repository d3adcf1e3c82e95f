// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Pipeline definitions
//!
//! A pipeline is a declarative graph of operator invocations with bound
//! arguments. Defining one validates it against an operator registry and
//! yields an immutable graph for an orchestration platform to run.

mod dag;
mod define;
mod definition;

pub use dag::DagBuilder;
pub use define::{define, demo_pipeline, PipelineBuilder};
pub use definition::*;
