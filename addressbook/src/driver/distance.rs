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

//! Proximity queries over the stored addresses.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use iii_iv_core::driver::DriverResult;
use iii_iv_geo::Coordinates;
use log::info;

impl Driver {
    /// Gets all addresses whose geodesic distance to `center` is at most `distance_km`.
    ///
    /// This scans the whole table.  Results are returned in storage order.
    pub(crate) async fn get_addresses_within_distance(
        self,
        center: Coordinates,
        distance_km: f64,
    ) -> DriverResult<Vec<Address>> {
        info!(
            "Fetching addresses within {} km of ({}, {})",
            distance_km,
            center.latitude().as_f64(),
            center.longitude().as_f64()
        );
        let addresses = db::get_addresses(&mut self.db.ex().await?).await?;
        let nearby: Vec<Address> = addresses
            .into_iter()
            .filter(|address| center.distance_km(&address.fields().coordinates()) <= distance_km)
            .collect();
        info!("Found {} addresses within {} km", nearby.len(), distance_km);
        Ok(nearby)
    }
}
