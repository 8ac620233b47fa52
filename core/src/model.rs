// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic building blocks for the data types of any service.
//!
//! Model types should be newtypes or plain structs that validate their contents at construction
//! time.  Types that are received from the network should also implement `Deserialize` by going
//! through the same validation so that invalid requests never reach the business logic.

use serde::de::{Deserializer, Visitor};
use std::fmt;

/// Model errors.  These indicate that a value cannot be represented by a model type.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Ensures that `value` is a finite number within the `[min, max]` closed range.
///
/// The `what` string names the quantity being validated for error reporting purposes.
pub fn check_range(what: &str, value: f64, min: f64, max: f64) -> ModelResult<f64> {
    if !value.is_finite() {
        return Err(ModelError(format!("{} must be a finite number", what)));
    }
    if value < min || value > max {
        return Err(ModelError(format!("{} must be between {} and {}", what, min, max)));
    }
    Ok(value)
}

/// A deserialization visitor that accepts any JSON number and validates it with `ctor`.
struct F64Visitor<T> {
    /// Validating constructor for the target type.
    ctor: fn(f64) -> ModelResult<T>,
}

impl<T> Visitor<'_> for F64Visitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        (self.ctor)(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_f64(v as f64)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_f64(v as f64)
    }
}

/// Deserializes a floating point number and validates it with `ctor`.
///
/// Model types that wrap a constrained `f64` should delegate their `Deserialize` implementation to
/// this function.
pub fn deserialize_f64_with<'de, D, T>(
    deserializer: D,
    ctor: fn(f64) -> ModelResult<T>,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_f64(F64Visitor { ctor })
}
