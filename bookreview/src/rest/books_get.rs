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

//! API to list all books with their reviews.

use crate::driver::Driver;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use iii_iv_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let books = driver.get_books().await?;
    Ok(Json(books))
}

#[cfg(test)]
mod tests {
    use crate::model::testutils::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use iii_iv_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/books/".to_owned())
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Book>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let book1 = context.put_book("One", "A", 2001).await;
        let book2 = context.put_book("Two", "B", 2002).await;
        context.put_review(book2, "first", 4.0).await;
        context.put_review(book2, "second", 2.5).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Book>>()
            .await;
        let exp_response = vec![
            Book::new(book1, book_fields("One", "A", 2001), vec![]),
            Book::new(
                book2,
                book_fields("Two", "B", 2002),
                vec![review_fields("first", 4.0), review_fields("second", 2.5)],
            ),
        ];
        assert_eq!(exp_response, response);
    }

    #[tokio::test]
    async fn test_without_trailing_slash() {
        let context = TestContext::setup().await;

        let book = context.put_book("One", "A", 2001).await;

        let response = OneShotBuilder::new(context.into_app(), (http::Method::GET, "/books"))
            .send_empty()
            .await
            .expect_json::<Vec<Book>>()
            .await;
        assert_eq!(vec![Book::new(book, book_fields("One", "A", 2001), vec![])], response);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
