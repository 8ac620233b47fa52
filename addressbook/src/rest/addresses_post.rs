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

//! API to create a new address.

use crate::driver::Driver;
use crate::model::AddressFields;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use iii_iv_core::rest::RestError;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(fields): Json<AddressFields>,
) -> Result<impl IntoResponse, RestError> {
    let address = driver.create_address(fields).await?;
    Ok(Json(address))
}

#[cfg(test)]
mod tests {
    use crate::model::testutils::fields_at;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use iii_iv_core::rest::testutils::*;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/addresses/".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let fields = fields_at("Home", 44.05, -123.09);
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(&fields)
            .await
            .expect_json::<Address>()
            .await;
        assert_eq!(&fields, response.fields());

        assert_eq!(Some(response.clone()), context.get_address(*response.id()).await);
    }

    #[tokio::test]
    async fn test_integer_coordinates() {
        let context = TestContext::setup().await;

        let request = json!({
            "name": "Null Island",
            "street": "Null Island street 1",
            "city": "Springfield",
            "state": "Oregon",
            "zip_code": "97477",
            "latitude": 0,
            "longitude": 0,
        });
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_json::<Address>()
            .await;
        assert_eq!(&fields_at("Null Island", 0.0, 0.0), response.fields());
    }

    #[tokio::test]
    async fn test_latitude_out_of_range() {
        let context = TestContext::setup().await;

        let request = json!({
            "name": "Nowhere",
            "street": "Nowhere street 1",
            "city": "Springfield",
            "state": "Oregon",
            "zip_code": "97477",
            "latitude": 200.0,
            "longitude": 0.0,
        });
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_text("Latitude must be between -90 and 90")
            .await;

        assert!(context.get_address(AddressId::new(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_longitude_out_of_range() {
        let context = TestContext::setup().await;

        let request = json!({
            "name": "Nowhere",
            "street": "Nowhere street 1",
            "city": "Springfield",
            "state": "Oregon",
            "zip_code": "97477",
            "latitude": 0.0,
            "longitude": -180.5,
        });
        OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_text("Longitude must be between -180 and 180")
            .await;
    }

    #[tokio::test]
    async fn test_missing_field() {
        let context = TestContext::setup().await;

        let request = json!({"name": "Home", "latitude": 1.0, "longitude": 2.0});
        OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_text("missing field")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
