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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;

mod address_delete;
mod address_get;
mod address_put;
mod addresses_get;
mod addresses_post;
#[cfg(test)]
mod testutils;
mod within_distance_get;

/// Creates the router for the application.
///
/// Collection paths are served with and without their trailing slash.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    let addresses = get(addresses_get::handler).post(addresses_post::handler);
    let within_distance = get(within_distance_get::handler);
    Router::new()
        .route("/addresses", addresses.clone())
        .route("/addresses/", addresses)
        .route("/addresses/within_distance", within_distance.clone())
        .route("/addresses/within_distance/", within_distance)
        .route(
            "/addresses/:address_id",
            get(address_get::handler).put(address_put::handler).delete(address_delete::handler),
        )
        .with_state(driver)
}
