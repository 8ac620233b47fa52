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

//! Operations on reviews.

use crate::db;
use crate::driver::{BOOK_NOT_FOUND, Driver};
use crate::model::*;
use iii_iv_core::driver::{DbResultExt, DriverError, DriverResult, warn_if_not_found};
use log::{info, warn};

/// Error message returned when a review does not exist.
const REVIEW_NOT_FOUND: &str = "Review not found";

/// Error message returned when a book has no reviews.
const NO_REVIEWS_FOR_BOOK: &str = "No reviews found for this book";

impl Driver {
    /// Adds a review with `fields` to the existing book `book_id`.
    pub(crate) async fn add_review(
        self,
        book_id: BookId,
        fields: ReviewFields,
    ) -> DriverResult<Review> {
        info!("Adding review to book {}", book_id);
        let mut tx = self.db.begin().await?;
        if !db::has_book(tx.ex(), book_id).await? {
            warn!("Book {} not found", book_id);
            return Err(DriverError::NotFound(BOOK_NOT_FOUND.to_owned()));
        }
        let id = db::create_review(tx.ex(), book_id, &fields).await?;
        tx.commit().await?;
        info!("Created review {} for book {}", id, book_id);
        Ok(Review::new(id, fields, book_id))
    }

    /// Gets all reviews.
    pub(crate) async fn get_reviews(self) -> DriverResult<Vec<Review>> {
        let reviews = db::get_reviews(&mut self.db.ex().await?).await?;
        Ok(reviews)
    }

    /// Gets all reviews of `book_id`.
    ///
    /// Finding no reviews is an error, regardless of whether the book exists or not.
    pub(crate) async fn get_book_reviews(self, book_id: BookId) -> DriverResult<Vec<Review>> {
        let reviews = db::get_book_reviews(&mut self.db.ex().await?, book_id).await?;
        if reviews.is_empty() {
            warn!("No reviews for book {}", book_id);
            return Err(DriverError::NotFound(NO_REVIEWS_FOR_BOOK.to_owned()));
        }
        Ok(reviews)
    }

    /// Deletes the review identified by `id` and returns its last contents.
    pub(crate) async fn delete_review(self, id: ReviewId) -> DriverResult<Review> {
        info!("Deleting review {}", id);
        let mut tx = self.db.begin().await?;
        let result = db::get_review(tx.ex(), id).await;
        let review = warn_if_not_found(result.or_not_found(REVIEW_NOT_FOUND), "Review", id)?;
        db::delete_review(tx.ex(), id).await?;
        tx.commit().await?;
        info!("Deleted review {}", id);
        Ok(review)
    }
}
