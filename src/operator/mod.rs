// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Operators
//!
//! An operator is a named computational step with typed inputs and a single
//! result. This module defines the operator description ([`OperatorSpec`]),
//! the [`Operation`] trait implemented by callable operators, argument
//! binding, and the [`OperatorRegistry`] that makes operators resolvable by
//! name.

mod multiply;
mod registry;

pub use multiply::Multiply;
pub use registry::OperatorRegistry;
pub(crate) use registry::validate_name;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{ComponentError, ComponentResult};

/// Type of an operator input or output
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParamType {
    /// Signed 64-bit integer
    Integer,
    /// Finite floating point number
    Float,
    /// Integer or finite float
    Number,
    String,
    Boolean,
}

impl ParamType {
    /// Check whether an already-typed value fits this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64(),
            Self::Float | Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }

    /// Parse a raw command-line value. Returns `None` when the text is not a
    /// valid value of this type; nothing is coerced.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        match self {
            Self::Integer => raw.parse::<i64>().ok().map(Value::from),
            Self::Float => parse_finite(raw),
            Self::Number => raw
                .parse::<i64>()
                .ok()
                .map(Value::from)
                .or_else(|| parse_finite(raw)),
            Self::String => Some(Value::String(raw.to_string())),
            Self::Boolean => match raw {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

fn parse_finite(raw: &str) -> Option<Value> {
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "an integer"),
            Self::Float => write!(f, "a float"),
            Self::Number => write!(f, "a number"),
            Self::String => write!(f, "a string"),
            Self::Boolean => write!(f, "a boolean"),
        }
    }
}

/// A declared operator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParamType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InputSpec {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            description: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declared operator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParamType,
}

/// How an orchestration platform launches the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    /// Command line, normally the package entry point
    #[serde(default)]
    pub command: Vec<String>,
}

/// Operator definition, as bundled in the package's `yaml/*.yaml` files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub inputs: Vec<InputSpec>,

    #[serde(default)]
    pub outputs: Vec<OutputSpec>,

    #[serde(default)]
    pub implementation: Implementation,
}

impl OperatorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            implementation: Implementation::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input(mut self, input: InputSpec) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn output(mut self, name: impl Into<String>, kind: ParamType) -> Self {
        self.outputs.push(OutputSpec {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implementation.command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Get a declared input by name
    pub fn get_input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Load an operator definition from a YAML file
    pub fn from_file(path: &Path) -> ComponentResult<Self> {
        let content = ComponentError::read_file(path)?;
        Self::from_yaml(&content)
    }

    /// Parse an operator definition from YAML
    pub fn from_yaml(yaml: &str) -> ComponentResult<Self> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Render the operator definition as YAML
    pub fn to_yaml(&self) -> ComponentResult<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// Named argument values passed to an operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse positional command-line values against the declared inputs, in
    /// declaration order. Inputs left without a value are filled in later by
    /// [`Arguments::bind`].
    pub fn from_positional<S: AsRef<str>>(spec: &OperatorSpec, raw: &[S]) -> ComponentResult<Self> {
        if raw.len() > spec.inputs.len() {
            return Err(ComponentError::TooManyArguments {
                operator: spec.name.clone(),
                expected: spec.inputs.len(),
                got: raw.len(),
            });
        }

        let mut args = Self::new();
        for (input, value) in spec.inputs.iter().zip(raw) {
            let value = value.as_ref();
            let parsed = input.kind.parse(value).ok_or_else(|| {
                ComponentError::invalid_argument(&spec.name, &input.name, input.kind, value)
            })?;
            args.insert(input.name.clone(), parsed);
        }

        Ok(args)
    }

    /// Check the arguments against an operator's inputs and fill in defaults
    pub fn bind(mut self, spec: &OperatorSpec) -> ComponentResult<Self> {
        if let Some(unknown) = self.0.keys().find(|name| spec.get_input(name).is_none()) {
            return Err(ComponentError::UnknownArgument {
                operator: spec.name.clone(),
                argument: unknown.clone(),
            });
        }

        for input in &spec.inputs {
            match self.0.get(&input.name) {
                Some(value) if !input.kind.accepts(value) => {
                    return Err(ComponentError::invalid_argument(
                        &spec.name,
                        &input.name,
                        input.kind,
                        &value.to_string(),
                    ));
                }
                Some(_) => {}
                None => {
                    let default = input.default.clone().ok_or_else(|| {
                        ComponentError::MissingArgument {
                            operator: spec.name.clone(),
                            input: input.name.clone(),
                        }
                    })?;
                    self.0.insert(input.name.clone(), default);
                }
            }
        }

        Ok(self)
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Trait for callable operators
pub trait Operation: Send + Sync {
    /// Declared inputs and outputs
    fn spec(&self) -> &OperatorSpec;

    /// Compute the result from arguments already bound by [`Arguments::bind`]
    fn call(&self, args: &Arguments) -> ComponentResult<Value>;

    /// Bind and check the arguments, then call the operator
    fn invoke(&self, args: Arguments) -> ComponentResult<Value> {
        let bound = args.bind(self.spec())?;
        self.call(&bound)
    }
}

/// An operator backed by a closure
pub struct FnOperation<F> {
    spec: OperatorSpec,
    func: F,
}

impl<F> FnOperation<F>
where
    F: Fn(&Arguments) -> ComponentResult<Value> + Send + Sync,
{
    pub fn new(spec: OperatorSpec, func: F) -> Self {
        Self { spec, func }
    }
}

impl<F> Operation for FnOperation<F>
where
    F: Fn(&Arguments) -> ComponentResult<Value> + Send + Sync,
{
    fn spec(&self) -> &OperatorSpec {
        &self.spec
    }

    fn call(&self, args: &Arguments) -> ComponentResult<Value> {
        (self.func)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_spec() -> OperatorSpec {
        OperatorSpec::new("add")
            .input(InputSpec::new("x", ParamType::Integer))
            .input(InputSpec::new("y", ParamType::Integer).with_default(1))
            .output("sum", ParamType::Integer)
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(ParamType::Number.parse("4"), Some(Value::from(4)));
        assert_eq!(ParamType::Number.parse("2.5"), Some(Value::from(2.5)));
        assert_eq!(ParamType::Number.parse("four"), None);
        assert_eq!(ParamType::Integer.parse("2.5"), None);
        assert_eq!(ParamType::Boolean.parse("yes"), None);
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(ParamType::Float.parse("NaN"), None);
        assert_eq!(ParamType::Number.parse("inf"), None);
    }

    #[test]
    fn test_from_positional_too_many() {
        let err = Arguments::from_positional(&add_spec(), &["1", "2", "3"]).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::TooManyArguments { expected: 2, got: 3, .. }
        ));
    }

    #[test]
    fn test_from_positional_invalid_value() {
        let err = Arguments::from_positional(&add_spec(), &["one"]).unwrap_err();
        match err {
            ComponentError::InvalidArgument { input, got, .. } => {
                assert_eq!(input, "x");
                assert_eq!(got, "one");
            }
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_bind_fills_defaults() {
        let args = Arguments::new().with("x", 5).bind(&add_spec()).unwrap();
        assert_eq!(args.get("y"), Some(&Value::from(1)));
    }

    #[test]
    fn test_bind_missing_and_unknown() {
        let missing = Arguments::new().bind(&add_spec()).unwrap_err();
        assert!(matches!(
            missing,
            ComponentError::MissingArgument { ref input, .. } if input == "x"
        ));

        let unknown = Arguments::new()
            .with("x", 1)
            .with("z", 2)
            .bind(&add_spec())
            .unwrap_err();
        assert!(matches!(
            unknown,
            ComponentError::UnknownArgument { ref argument, .. } if argument == "z"
        ));
    }

    #[test]
    fn test_bind_rejects_wrong_type() {
        let err = Arguments::new().with("x", "five").bind(&add_spec()).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidArgument { .. }));
    }

    #[test]
    fn test_fn_operation_invoke() {
        let op = FnOperation::new(add_spec(), |args: &Arguments| {
            let x = args.get("x").and_then(Value::as_i64).unwrap_or_default();
            let y = args.get("y").and_then(Value::as_i64).unwrap_or_default();
            Ok(Value::from(x + y))
        });

        let result = op.invoke(Arguments::new().with("x", 41)).unwrap();
        assert_eq!(result, Value::from(42));
    }

    #[test]
    fn test_parse_operator_definition() {
        let yaml = r#"
name: scale
description: Scale a value.
inputs:
  - name: value
    type: Float
  - name: factor
    type: Float
    default: 2.0
outputs:
  - name: scaled
    type: Float
implementation:
  command: [scale]
"#;

        let spec = OperatorSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "scale");
        assert_eq!(spec.inputs.len(), 2);
        assert_eq!(spec.get_input("factor").unwrap().default, Some(Value::from(2.0)));
        assert_eq!(spec.implementation.command, vec!["scale"]);
    }
}
