// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Lenient deserializers for integration config fields.
//!
//! Integration configs are hand written, so scalars are accepted the way the
//! agent has always accepted them: `service: 123` is the string `"123"` and a key
//! written without a value (`logs:`) is empty.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a string from any scalar. Null becomes the empty string.
pub fn deserialize_string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Array(_)) => Err(D::Error::custom(
            "invalid type: sequence, expected a string or a number",
        )),
        Some(Value::Object(_)) => Err(D::Error::custom(
            "invalid type: map, expected a string or a number",
        )),
    }
}
