//! Loader query strings, e.g. `?keepUrl=true` or `?{"keepUrl":true}`.

use serde_json::{Map, Value};

use crate::config::ConfigLayer;
use crate::error::ConfigError;

/// Parse a resource query into a JSON object.
///
/// Arguments are separated by `&` or `,`. A bare `name` or `+name` is
/// `true`, `-name` is `false`, `name=true`/`name=false` are booleans,
/// `name[]=v` collects into an array and anything else is a string.
pub fn parse_query(query: &str) -> Result<Map<String, Value>, ConfigError> {
    if query.is_empty() {
        return Ok(Map::new());
    }

    let Some(body) = query.strip_prefix('?') else {
        return Err(invalid(query, "a query string must begin with `?`"));
    };

    if body.starts_with('{') && body.ends_with('}') {
        return match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(invalid(query, "expected a JSON object")),
            Err(err) => Err(invalid(query, &err.to_string())),
        };
    }

    let mut result = Map::new();
    for arg in body.split(['&', ',']).filter(|arg| !arg.is_empty()) {
        match arg.split_once('=') {
            Some((name, value)) => {
                let name = decode(query, name)?;
                let value = decode(query, value)?;
                insert(&mut result, &name, typed(value));
            }
            None => {
                let (name, flag) = if let Some(name) = arg.strip_prefix('-') {
                    (name, false)
                } else if let Some(name) = arg.strip_prefix('+') {
                    (name, true)
                } else {
                    (arg, true)
                };
                result.insert(decode(query, name)?, Value::Bool(flag));
            }
        }
    }

    Ok(result)
}

/// Query options as a configuration layer.
pub fn query_layer(query: &str) -> Result<ConfigLayer, ConfigError> {
    let map = parse_query(query)?;
    ConfigLayer::from_value(&Value::Object(map))
}

fn insert(result: &mut Map<String, Value>, name: &str, value: Value) {
    match name.strip_suffix("[]") {
        Some(name) => {
            let entry = result
                .entry(name.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            match entry {
                Value::Array(items) => items.push(value),
                other => *other = Value::Array(vec![value]),
            }
        }
        None => {
            result.insert(name.to_string(), value);
        }
    }
}

fn typed(value: String) -> Value {
    match value.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(value),
    }
}

fn decode(query: &str, raw: &str) -> Result<String, ConfigError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| invalid(query, &err.to_string()))
}

fn invalid(query: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidQuery {
        query: query.to_string(),
        reason: reason.to_string(),
    }
}
