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

//! API to add a review to a book.

use crate::driver::Driver;
use crate::model::{BookId, ReviewFields};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use iii_iv_core::rest::RestError;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(book_id): Path<BookId>,
    Json(fields): Json<ReviewFields>,
) -> Result<impl IntoResponse, RestError> {
    let review = driver.add_review(book_id, fields).await?;
    Ok(Json(review))
}

#[cfg(test)]
mod tests {
    use crate::model::testutils::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use iii_iv_core::rest::testutils::*;
    use serde_json::json;

    fn route(book_id: i64) -> (http::Method, String) {
        (http::Method::POST, format!("/books/{}/add_review", book_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let book = context.put_book("One", "A", 2001).await;

        let response = OneShotBuilder::new(context.app(), route(book.as_i64()))
            .send_json(review_fields("A masterpiece", 4.75))
            .await
            .expect_json::<Review>()
            .await;
        assert_eq!(&review_fields("A masterpiece", 4.75), response.fields());
        assert_eq!(book, *response.book_id());

        assert_eq!(vec![response], context.get_reviews().await);
    }

    #[tokio::test]
    async fn test_integer_rating() {
        let context = TestContext::setup().await;

        let book = context.put_book("One", "A", 2001).await;

        let response = OneShotBuilder::new(context.app(), route(book.as_i64()))
            .send_json(json!({"text_review": "Solid", "rating": 4}))
            .await
            .expect_json::<Review>()
            .await;
        assert_eq!(4.0, *response.fields().rating());
    }

    #[tokio::test]
    async fn test_book_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(42))
            .send_json(review_fields("Nobody reads this", 1.0))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Book not found$")
            .await;

        assert!(context.get_reviews().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_rating() {
        let context = TestContext::setup().await;

        let book = context.put_book("One", "A", 2001).await;

        OneShotBuilder::new(context.app(), route(book.as_i64()))
            .send_json(json!({"text_review": "No score"}))
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_text("missing field .rating.")
            .await;

        assert!(context.get_reviews().await.is_empty());
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route(1));
}
