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

//! Operations on books.

use crate::db;
use crate::driver::{BOOK_NOT_FOUND, Driver};
use crate::model::*;
use iii_iv_core::driver::{DbResultExt, DriverError, DriverResult, warn_if_not_found};
use log::{info, warn};

/// Error message returned when adding a book whose title and author are already taken.
const BOOK_EXISTS: &str = "Book Already Exists with the given title for the author";

/// Error message returned when a filter does not match any book.
const BOOKS_NOT_FOUND: &str = "Books not found";

impl Driver {
    /// Gets all books with their reviews.
    pub(crate) async fn get_books(self) -> DriverResult<Vec<Book>> {
        let books = db::get_books(&mut self.db.ex().await?, &BookFilter::default()).await?;
        Ok(books)
    }

    /// Creates a new book from `fields`.  The title and author pair must not be in use.
    pub(crate) async fn create_book(self, fields: BookFields) -> DriverResult<Book> {
        info!("Creating book '{}' by {}", fields.title(), fields.author());
        let mut tx = self.db.begin().await?;
        let id = db::create_book(tx.ex(), &fields).await.or_already_exists(BOOK_EXISTS)?;
        tx.commit().await?;
        info!("Created book {}", id);
        Ok(Book::new(id, fields, vec![]))
    }

    /// Deletes the book identified by `id` and returns its last contents.
    ///
    /// The reviews of the book are not deleted.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<Book> {
        info!("Deleting book {}", id);
        let mut tx = self.db.begin().await?;
        let result = db::get_book(tx.ex(), id).await;
        let book = warn_if_not_found(result.or_not_found(BOOK_NOT_FOUND), "Book", id)?;
        db::delete_book(tx.ex(), id).await?;
        tx.commit().await?;
        info!("Deleted book {}", id);
        Ok(book)
    }

    /// Gets all books that match `filter` with their reviews.
    ///
    /// Finding no books is an error.
    pub(crate) async fn filter_books(self, filter: BookFilter) -> DriverResult<Vec<Book>> {
        let books = db::get_books(&mut self.db.ex().await?, &filter).await?;
        if books.is_empty() {
            warn!("No books match {:?}", filter);
            return Err(DriverError::NotFound(BOOKS_NOT_FOUND.to_owned()));
        }
        Ok(books)
    }
}
