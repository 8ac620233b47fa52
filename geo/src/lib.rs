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

//! Geographic coordinates and distances between them.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use iii_iv_core::model::{ModelResult, check_range, deserialize_f64_with};
use serde::{Deserialize, Deserializer, Serialize};

mod distance;
pub use distance::geodesic_distance_km;

/// A latitude in degrees, guaranteed to be within `[-90, 90]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Latitude(f64);

impl Latitude {
    /// Creates a new latitude after validating that it is within range.
    pub fn new(degrees: f64) -> ModelResult<Self> {
        check_range("Latitude", degrees, -90.0, 90.0).map(Self)
    }

    /// Returns the latitude in degrees.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Latitude {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_f64_with(deserializer, Latitude::new)
    }
}

/// A longitude in degrees, guaranteed to be within `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Longitude(f64);

impl Longitude {
    /// Creates a new longitude after validating that it is within range.
    pub fn new(degrees: f64) -> ModelResult<Self> {
        check_range("Longitude", degrees, -180.0, 180.0).map(Self)
    }

    /// Returns the longitude in degrees.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Longitude {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_f64_with(deserializer, Longitude::new)
    }
}

/// A point on the surface of the Earth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// North-south position.
    latitude: Latitude,

    /// East-west position.
    longitude: Longitude,
}

impl Coordinates {
    /// Creates a new point from its already-validated components.
    pub fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a new point from raw degrees, validating their ranges.
    pub fn from_degrees(latitude: f64, longitude: f64) -> ModelResult<Self> {
        Ok(Self::new(Latitude::new(latitude)?, Longitude::new(longitude)?))
    }

    /// Returns the latitude of the point.
    pub fn latitude(&self) -> Latitude {
        self.latitude
    }

    /// Returns the longitude of the point.
    pub fn longitude(&self) -> Longitude {
        self.longitude
    }

    /// Computes the geodesic distance in kilometers between this point and `other`.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        geodesic_distance_km(self, other)
    }
}
