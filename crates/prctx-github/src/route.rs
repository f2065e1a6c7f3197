//! Route templates such as `POST /repos/{owner}/{repo}/issues/{issue_number}/comments`.
//!
//! Placeholders are filled from a parameter map and consumed from it. What is
//! left over becomes the query string or the JSON body of the request.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Characters escaped in path values: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A route with its placeholders filled in.
#[derive(Debug)]
pub(crate) struct Expanded {
    pub method: Method,
    pub path: String,
    /// Parameters not consumed by the path.
    pub rest: Map<String, Value>,
}

impl Expanded {
    /// Whether leftover parameters belong in the body rather than the query.
    pub fn has_body(&self) -> bool {
        matches!(self.method, Method::POST | Method::PATCH | Method::PUT)
    }

    /// Leftover parameters as query pairs. Arrays are joined with `,`.
    pub fn query(&self) -> Vec<(&str, String)> {
        self.rest
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Array(items) => {
                        items.iter().map(to_param).collect::<Vec<_>>().join(",")
                    }
                    other => to_param(other),
                };
                (key.as_str(), value)
            })
            .collect()
    }
}

/// Expand `route` using `params`.
pub(crate) fn expand(route: &str, mut params: Map<String, Value>) -> Result<Expanded> {
    let invalid = || Error::InvalidRoute(route.to_string());

    let (method, template) = route.split_once(' ').ok_or_else(invalid)?;
    let method = match method {
        "GET" => Method::GET,
        "POST" => Method::POST,
        "PATCH" => Method::PATCH,
        "PUT" => Method::PUT,
        "DELETE" => Method::DELETE,
        _ => return Err(invalid()),
    };
    if !template.starts_with('/') {
        return Err(invalid());
    }

    let mut path = String::with_capacity(template.len());
    let mut remaining = template;
    while let Some(start) = remaining.find('{') {
        path.push_str(&remaining[..start]);
        let after = &remaining[start + 1..];
        let end = after.find('}').ok_or_else(invalid)?;
        let name = &after[..end];
        if name.is_empty() {
            return Err(invalid());
        }

        let value = params
            .remove(name)
            .ok_or_else(|| Error::MissingParameter(name.to_string()))?;
        if !is_scalar(&value) {
            return Err(Error::MissingParameter(name.to_string()));
        }
        path.extend(utf8_percent_encode(&to_param(&value), PATH_VALUE));

        remaining = &after[end + 1..];
    }
    path.push_str(remaining);

    Ok(Expanded {
        method,
        path,
        rest: params,
    })
}

const fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Strings are used verbatim, everything else as JSON text.
fn to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
