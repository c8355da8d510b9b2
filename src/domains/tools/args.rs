//! Typed extraction of tool-call arguments.
//!
//! Incoming arguments are an untyped JSON object. Each declared
//! [`ParameterSpec`] is looked up and converted into an [`ArgumentValue`] of
//! the declared kind; anything that does not fit becomes
//! [`ToolError::InvalidArgument`] naming the parameter.

use std::collections::HashMap;

use rmcp::model::JsonObject;
use serde_json::Value;

use super::ToolError;
use super::tool::{ParameterKind, ParameterSpec};

/// A validated argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    String(String),
    StringList(Vec<String>),
}

impl ArgumentValue {
    fn extract(parameter: &ParameterSpec, value: &Value) -> Result<Self, ToolError> {
        match (parameter.kind, value) {
            (ParameterKind::String, Value::String(s)) => Ok(Self::String(s.clone())),
            (ParameterKind::StringList, Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        ToolError::invalid_argument(
                            &parameter.name,
                            format!("expected a list of strings, found {} item", json_type(item)),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::StringList),
            (kind, other) => Err(ToolError::invalid_argument(
                &parameter.name,
                format!("expected {}, found {}", kind, json_type(other)),
            )),
        }
    }
}

/// Arguments of one tool call, checked against the tool's parameters.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    values: HashMap<String, ArgumentValue>,
}

impl ToolArguments {
    /// Validate `raw` against `parameters`, in declaration order.
    ///
    /// Required parameters must be present and non-null; present parameters
    /// must have the declared kind. Undeclared keys are ignored.
    pub fn validate(parameters: &[ParameterSpec], raw: &JsonObject) -> Result<Self, ToolError> {
        let mut values = HashMap::with_capacity(parameters.len());

        for parameter in parameters {
            match raw.get(&parameter.name) {
                None | Some(Value::Null) => {
                    if parameter.required {
                        return Err(ToolError::invalid_argument(
                            &parameter.name,
                            "missing required parameter",
                        ));
                    }
                }
                Some(value) => {
                    let value = ArgumentValue::extract(parameter, value)?;
                    values.insert(parameter.name.clone(), value);
                }
            }
        }

        Ok(Self { values })
    }

    /// Get a string argument that must be present.
    pub fn string(&self, name: &str) -> Result<&str, ToolError> {
        match self.values.get(name) {
            Some(ArgumentValue::String(s)) => Ok(s),
            Some(ArgumentValue::StringList(_)) => Err(ToolError::internal(format!(
                "parameter '{}' is not declared as a string",
                name
            ))),
            None => Err(ToolError::invalid_argument(name, "missing required parameter")),
        }
    }

    /// Get a list-of-strings argument that must be present.
    pub fn string_list(&self, name: &str) -> Result<&[String], ToolError> {
        match self.values.get(name) {
            Some(ArgumentValue::StringList(items)) => Ok(items),
            Some(ArgumentValue::String(_)) => Err(ToolError::internal(format!(
                "parameter '{}' is not declared as a list of strings",
                name
            ))),
            None => Err(ToolError::invalid_argument(name, "missing required parameter")),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
