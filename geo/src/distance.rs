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

//! Distance computations on the WGS-84 ellipsoid.

use crate::Coordinates;
use geographiclib_rs::{Geodesic, InverseGeodesic};

/// Computes the geodesic distance in kilometers between `from` and `to` on the WGS-84 ellipsoid.
///
/// Uses Karney's solution to the inverse problem, which converges everywhere including nearly
/// antipodal points.  The distance is exactly zero for identical points.
pub fn geodesic_distance_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude().as_f64();
    let lon1 = from.longitude().as_f64();
    let lat2 = to.latitude().as_f64();
    let lon2 = to.longitude().as_f64();
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let meters: f64 = Geodesic::wgs84().inverse(lat1, lon1, lat2, lon2);
    meters / 1000.0
}
