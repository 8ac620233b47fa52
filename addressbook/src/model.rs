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

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use iii_iv_geo::{Coordinates, Latitude, Longitude};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an address as assigned by the database.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct AddressId(i64);

impl AddressId {
    /// Wraps a raw database identifier.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database identifier.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-supplied contents of an address.
///
/// This is the payload accepted by both the create and the update APIs.  Every field is required
/// because updates replace the stored row in full.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct AddressFields {
    /// Name of the person or place the address belongs to.
    name: String,

    /// Street and number.
    street: String,

    /// City name.
    city: String,

    /// State or province name.
    state: String,

    /// Postal code.  Kept as text because many postal codes have leading zeros or letters.
    zip_code: String,

    /// Latitude of the address.
    latitude: Latitude,

    /// Longitude of the address.
    longitude: Longitude,
}

impl AddressFields {
    /// Returns the location of the address.
    pub(crate) fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A stored address.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Address {
    /// Database identifier.
    id: AddressId,

    /// Contents of the address.
    #[serde(flatten)]
    fields: AddressFields,
}
