// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! The `multiply` operator

use serde_json::{Number, Value};

use super::{Arguments, InputSpec, Operation, OperatorSpec, ParamType};
use crate::errors::{ComponentError, ComponentResult};

/// Multiplies two numbers: `multiply(a, b) -> a * b`
///
/// Two integers multiply to an integer. If either side is a float, or the
/// integer product overflows, the product is a float.
pub struct Multiply {
    spec: OperatorSpec,
}

impl Multiply {
    pub fn new() -> Self {
        let spec = OperatorSpec::new("multiply")
            .description("Multiply two numbers.")
            .input(InputSpec::new("a", ParamType::Number).with_description("First factor"))
            .input(InputSpec::new("b", ParamType::Number).with_description("Second factor"))
            .output("product", ParamType::Number)
            .command(["multiply"]);

        Self { spec }
    }

    fn factor(&self, args: &Arguments, name: &str) -> ComponentResult<f64> {
        match args.get(name) {
            Some(value) => value.as_f64().ok_or_else(|| {
                ComponentError::invalid_argument(
                    &self.spec.name,
                    name,
                    ParamType::Number,
                    &value.to_string(),
                )
            }),
            None => Err(ComponentError::MissingArgument {
                operator: self.spec.name.clone(),
                input: name.to_string(),
            }),
        }
    }
}

impl Default for Multiply {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for Multiply {
    fn spec(&self) -> &OperatorSpec {
        &self.spec
    }

    fn call(&self, args: &Arguments) -> ComponentResult<Value> {
        let exact = args
            .get("a")
            .and_then(Value::as_i64)
            .zip(args.get("b").and_then(Value::as_i64))
            .and_then(|(a, b)| a.checked_mul(b));

        if let Some(product) = exact {
            return Ok(Value::from(product));
        }

        let product = self.factor(args, "a")? * self.factor(args, "b")?;
        Number::from_f64(product)
            .map(Value::Number)
            .ok_or_else(|| ComponentError::OperationFailed {
                operator: self.spec.name.clone(),
                message: format!("product is not a finite number ({})", product),
            })
    }
}
