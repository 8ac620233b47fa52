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

mod book_delete;
mod book_review_post;
mod book_reviews_get;
mod books_filter_get;
mod books_get;
mod books_post;
mod review_delete;
mod reviews_get;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
///
/// Collection paths are served with and without their trailing slash.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{delete, get, post};
    let books = get(books_get::handler).post(books_post::handler);
    let reviews = get(reviews_get::handler);
    Router::new()
        .route("/books", books.clone())
        .route("/books/", books)
        .route("/books/filter", get(books_filter_get::handler))
        .route("/books/:book_id", delete(book_delete::handler))
        .route("/books/:book_id/add_review", post(book_review_post::handler))
        .route("/books/:book_id/reviews", get(book_reviews_get::handler))
        .route("/reviews", reviews.clone())
        .route("/reviews/", reviews)
        .route("/reviews/:review_id", delete(review_delete::handler))
        .with_state(driver)
}
