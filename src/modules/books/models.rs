use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a book at creation.
pub type BookId = u64;

/// Domain model for the books module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, assigned by the store and never reassigned
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Publisher of the book
    pub publisher: String,
    /// Publication date, as a date-formatted string
    pub published_date: String,
    /// Number of pages
    pub page_count: u32,
    /// Language the book is written in
    pub language: String,
}
