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

//! API to find the addresses near a point.

use crate::driver::Driver;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use iii_iv_core::rest::{EmptyBody, RestError};
use iii_iv_geo::{Coordinates, Latitude, Longitude};
use serde::Deserialize;

/// Query parameters for the API.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct DistanceQuery {
    /// Latitude of the center of the search.
    lat: Latitude,

    /// Longitude of the center of the search.
    lon: Longitude,

    /// Search radius in kilometers.
    distance_km: f64,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<DistanceQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let center = Coordinates::new(query.lat, query.lon);
    let addresses = driver.get_addresses_within_distance(center, query.distance_km).await?;
    Ok(Json(addresses))
}
