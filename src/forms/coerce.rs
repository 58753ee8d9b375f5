use jsonschema::JSONSchema;
use serde_json::{Map, Number, Value};

use crate::error::{McpMenuError, Result};
use crate::mcp::types::McpTool;

/// Convert raw input according to a declared type tag. Unknown tags, and
/// `string`, leave the text untouched.
pub fn coerce_value(type_tag: &str, raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    match type_tag {
        "integer" => trimmed
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid(raw, type_tag)),
        "number" => {
            if let Ok(int) = trimmed.parse::<i64>() {
                return Ok(Value::from(int));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(raw, type_tag))
        }
        "boolean" => match trimmed.to_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid(raw, type_tag)),
        },
        _ => Ok(Value::String(raw.to_string())),
    }
}

fn invalid(raw: &str, type_tag: &str) -> McpMenuError {
    McpMenuError::InvalidArguments(format!("'{}' is not a valid {}", raw, type_tag))
}

pub fn coerce_arguments(
    tool: &McpTool,
    arguments: Map<String, Value>,
) -> Result<Map<String, Value>> {
    let parameters = tool.parameters();
    let mut coerced = Map::new();

    for (name, value) in arguments {
        let type_tag = parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.type_tag.as_str())
            .unwrap_or("string");

        let value = match value {
            Value::String(raw) => coerce_value(type_tag, &raw).map_err(|e| match e {
                McpMenuError::InvalidArguments(msg) => {
                    McpMenuError::InvalidArguments(format!("{}: {}", name, msg))
                }
                other => other,
            })?,
            other => other,
        };
        coerced.insert(name, value);
    }

    Ok(coerced)
}

/// Check arguments against the tool's input schema.
pub fn validate_arguments(tool: &McpTool, arguments: &Map<String, Value>) -> Result<()> {
    if !tool.input_schema.is_object() {
        return Ok(());
    }

    let schema = JSONSchema::compile(&tool.input_schema).map_err(|e| {
        McpMenuError::InvalidArguments(format!("Invalid tool schema: {}", e))
    })?;

    let instance = Value::Object(arguments.clone());
    if let Err(errors) = schema.validate(&instance) {
        let error_messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        return Err(McpMenuError::InvalidArguments(format!(
            "Tool '{}' argument validation failed: {}",
            tool.name,
            error_messages.join("; ")
        )));
    }

    Ok(())
}
