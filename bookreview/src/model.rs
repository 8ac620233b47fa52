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

//! High-level data types.

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a book as assigned by the database.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct BookId(i64);

impl BookId {
    /// Wraps a raw database identifier.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database identifier.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a review as assigned by the database.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct ReviewId(i64);

impl ReviewId {
    /// Wraps a raw database identifier.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database identifier.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-supplied contents of a book.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct BookFields {
    /// Title of the book.  Unique per author.
    title: String,

    /// Name of the author of the book.
    author: String,

    /// Year in which the book was published.
    publication_year: i64,
}

/// User-supplied contents of a review.
///
/// This doubles as the summary of a review that is embedded in its book.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct ReviewFields {
    /// Free-form opinion on the book.
    text_review: String,

    /// Score given to the book.
    rating: f64,
}

/// A stored book along with the reviews that reference it.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Book {
    /// Database identifier.
    book_id: BookId,

    /// Contents of the book.
    #[serde(flatten)]
    fields: BookFields,

    /// Reviews of the book, in creation order.
    reviews: Vec<ReviewFields>,
}

/// A stored review.
#[derive(Clone, Constructor, Debug, Dissolve, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Review {
    /// Database identifier.
    id: ReviewId,

    /// Contents of the review.
    #[serde(flatten)]
    fields: ReviewFields,

    /// Book this review belongs to.
    book_id: BookId,
}

/// Criteria to select books.  All present criteria must match.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct BookFilter {
    /// Exact name of the author.  An empty string is the same as no filter.
    author: Option<String>,

    /// Exact publication year.
    publication_year: Option<i64>,
}

impl BookFilter {
    /// Creates a new filter from its optional criteria.
    #[cfg(test)]
    pub(crate) fn new(author: Option<&str>, publication_year: Option<i64>) -> Self {
        Self { author: author.map(str::to_owned), publication_year }
    }

    /// Returns the author to filter by, if any.
    pub(crate) fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|author| !author.is_empty())
    }

    /// Returns the publication year to filter by, if any.
    pub(crate) fn publication_year(&self) -> Option<i64> {
        self.publication_year
    }
}

#[cfg(test)]
pub(crate) mod testutils {
    use super::*;

    /// Shorthand to create the contents of a book.
    pub(crate) fn book_fields(title: &str, author: &str, publication_year: i64) -> BookFields {
        BookFields::new(title.to_owned(), author.to_owned(), publication_year)
    }

    /// Shorthand to create the contents of a review.
    pub(crate) fn review_fields(text_review: &str, rating: f64) -> ReviewFields {
        ReviewFields::new(text_review.to_owned(), rating)
    }
}
