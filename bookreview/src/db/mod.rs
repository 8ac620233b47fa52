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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use futures::TryStreamExt;
use iii_iv_core::db::sqlite::{map_sqlx_error, run_schema};
use iii_iv_core::db::{DbError, DbResult, Executor, check_one_row};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::collections::HashMap;


/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("sqlite.sql");

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    run_schema(ex, SCHEMA).await
}

/// Extracts the identifier and the contents of a book from a `row` of the `books` table.
fn book_from_row(row: SqliteRow) -> DbResult<(BookId, BookFields)> {
    let book_id: i64 = row.try_get("book_id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let author: String = row.try_get("author").map_err(map_sqlx_error)?;
    let publication_year: i64 = row.try_get("publication_year").map_err(map_sqlx_error)?;
    Ok((BookId::new(book_id), BookFields::new(title, author, publication_year)))
}

impl TryFrom<SqliteRow> for Review {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let text_review: String = row.try_get("text_review").map_err(map_sqlx_error)?;
        let rating: f64 = row.try_get("rating").map_err(map_sqlx_error)?;
        let book_id: i64 = row.try_get("book_id").map_err(map_sqlx_error)?;
        Ok(Review::new(
            ReviewId::new(id),
            ReviewFields::new(text_review, rating),
            BookId::new(book_id),
        ))
    }
}

/// Appends a `WHERE` clause to `query` that selects the books matching `filter`.
fn push_book_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &BookFilter) {
    query.push(" WHERE 1 = 1");
    if let Some(author) = filter.author() {
        query.push(" AND author = ").push_bind(author.to_owned());
    }
    if let Some(publication_year) = filter.publication_year() {
        query.push(" AND publication_year = ").push_bind(publication_year);
    }
}

/// Inserts a new book with the given `fields` and returns its assigned identifier.
///
/// Fails with `AlreadyExists` if there already is a book with the same title and author.
pub(crate) async fn create_book(ex: &mut Executor, fields: &BookFields) -> DbResult<BookId> {
    let query_str = "INSERT INTO books (title, author, publication_year) VALUES (?, ?, ?)";
    let done = sqlx::query(query_str)
        .bind(fields.title())
        .bind(fields.author())
        .bind(*fields.publication_year())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(BookId::new(done.last_insert_rowid()))
}

/// Checks if the book identified by `id` exists.
pub(crate) async fn has_book(ex: &mut Executor, id: BookId) -> DbResult<bool> {
    let query_str = "SELECT 1 FROM books WHERE book_id = ?";
    let maybe_row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_optional(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(maybe_row.is_some())
}

/// Gets the book identified by `id` with all of its reviews.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    let query_str = "SELECT * FROM books WHERE book_id = ?";
    let row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    let (id, fields) = book_from_row(row)?;

    let reviews = get_book_reviews(ex, id)
        .await?
        .into_iter()
        .map(|review| {
            let (_id, fields, _book_id) = review.dissolve();
            fields
        })
        .collect();
    Ok(Book::new(id, fields, reviews))
}

/// Gets all books that match `filter` with their reviews, sorted by identifier.
pub(crate) async fn get_books(ex: &mut Executor, filter: &BookFilter) -> DbResult<Vec<Book>> {
    let mut books = vec![];
    {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM books");
        push_book_filter(&mut query, filter);
        query.push(" ORDER BY book_id");
        let mut rows = query.build().fetch(ex.conn());
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            books.push(book_from_row(row)?);
        }
    }

    let mut reviews: HashMap<BookId, Vec<ReviewFields>> = HashMap::default();
    {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT * FROM reviews WHERE book_id IN (SELECT book_id FROM books",
        );
        push_book_filter(&mut query, filter);
        query.push(") ORDER BY id");
        let mut rows = query.build().fetch(ex.conn());
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            let (_id, fields, book_id) = Review::try_from(row)?.dissolve();
            reviews.entry(book_id).or_default().push(fields);
        }
    }

    Ok(books
        .into_iter()
        .map(|(id, fields)| Book::new(id, fields, reviews.remove(&id).unwrap_or_default()))
        .collect())
}

/// Deletes the book identified by `id`.  Its reviews are left untouched.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<()> {
    let query_str = "DELETE FROM books WHERE book_id = ?";
    let done = sqlx::query(query_str)
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    check_one_row(done.rows_affected(), "Deletion")
}

/// Inserts a new review for `book_id` and returns its assigned identifier.
///
/// This does not verify that the book exists.
pub(crate) async fn create_review(
    ex: &mut Executor,
    book_id: BookId,
    fields: &ReviewFields,
) -> DbResult<ReviewId> {
    let query_str = "INSERT INTO reviews (text_review, rating, book_id) VALUES (?, ?, ?)";
    let done = sqlx::query(query_str)
        .bind(fields.text_review())
        .bind(*fields.rating())
        .bind(book_id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(ReviewId::new(done.last_insert_rowid()))
}

/// Gets the review identified by `id`.
pub(crate) async fn get_review(ex: &mut Executor, id: ReviewId) -> DbResult<Review> {
    let query_str = "SELECT * FROM reviews WHERE id = ?";
    let row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Review::try_from(row)
}

/// Gets all reviews, sorted by identifier.
pub(crate) async fn get_reviews(ex: &mut Executor) -> DbResult<Vec<Review>> {
    let query_str = "SELECT * FROM reviews ORDER BY id";
    let rows = sqlx::query(query_str).fetch_all(ex.conn()).await.map_err(map_sqlx_error)?;
    rows.into_iter().map(Review::try_from).collect()
}

/// Gets all reviews of `book_id`, sorted by identifier.
pub(crate) async fn get_book_reviews(ex: &mut Executor, book_id: BookId) -> DbResult<Vec<Review>> {
    let query_str = "SELECT * FROM reviews WHERE book_id = ? ORDER BY id";
    let rows = sqlx::query(query_str)
        .bind(book_id.as_i64())
        .fetch_all(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    rows.into_iter().map(Review::try_from).collect()
}

/// Deletes the review identified by `id`.
pub(crate) async fn delete_review(ex: &mut Executor, id: ReviewId) -> DbResult<()> {
    let query_str = "DELETE FROM reviews WHERE id = ?";
    let done = sqlx::query(query_str)
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    check_one_row(done.rows_affected(), "Deletion")
}
