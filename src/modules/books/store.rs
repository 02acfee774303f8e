//! In-memory store for the book catalog.
//!
//! Records are keyed by id in a `BTreeMap`. Ids come from a monotonically
//! increasing counter, so iterating the map in key order is also insertion
//! order. The store is volatile: its contents live exactly as long as the
//! process.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::models::{Book, BookId};
use super::schemas::{CreateBook, UpdateBook};

/// Shared, process-lifetime store for book records.
///
/// Reads take the shared lock, mutations the exclusive lock, so every
/// operation observes the collection in a consistent state and every
/// mutation is atomic.
pub struct BookStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    books: BTreeMap<BookId, Book>,
    next_id: BookId,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Return all books in insertion order.
    pub fn list(&self) -> Vec<Book> {
        let inner = self.inner.read().expect("book store lock poisoned");
        inner.books.values().cloned().collect()
    }

    /// Assign a fresh id, insert the record, and return it.
    pub fn create(&self, request: CreateBook) -> Book {
        let mut inner = self.inner.write().expect("book store lock poisoned");

        let id = inner.next_id;
        inner.next_id += 1;

        let book = Book {
            id,
            title: request.title,
            author: request.author,
            publisher: request.publisher,
            published_date: request.published_date,
            page_count: request.page_count,
            language: request.language,
        };
        inner.books.insert(id, book.clone());

        book
    }

    /// Look up a book by id, returning a value snapshot.
    pub fn get(&self, id: BookId) -> Option<Book> {
        let inner = self.inner.read().expect("book store lock poisoned");
        inner.books.get(&id).cloned()
    }

    /// Overwrite the supplied fields of an existing book.
    ///
    /// Absent patch fields retain their prior value; `id` is never altered.
    /// Returns `None` without mutation when the id is absent.
    pub fn update(&self, id: BookId, patch: UpdateBook) -> Option<Book> {
        let mut inner = self.inner.write().expect("book store lock poisoned");
        let book = inner.books.get_mut(&id)?;

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        if let Some(publisher) = patch.publisher {
            book.publisher = publisher;
        }
        if let Some(page_count) = patch.page_count {
            book.page_count = page_count;
        }
        if let Some(language) = patch.language {
            book.language = language;
        }

        Some(book.clone())
    }

    /// Remove a book by id. Returns `false` when the id is absent.
    pub fn delete(&self, id: BookId) -> bool {
        let mut inner = self.inner.write().expect("book store lock poisoned");
        inner.books.remove(&id).is_some()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn sample_create(title: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Allen B. Downey".to_string(),
            publisher: "O'Reilly".to_string(),
            published_date: "2021-01-01".to_string(),
            page_count: 1234,
            language: "English".to_string(),
        }
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = BookStore::new();
        let created = store.create(sample_create("Think Python"));

        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Think Python");
        assert_eq!(fetched.page_count, 1234);
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let store = BookStore::new();
        let ids: Vec<BookId> = (0..10)
            .map(|n| store.create(sample_create(&format!("Book {n}"))).id)
            .collect();

        let unique: HashSet<BookId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let store = Arc::new(BookStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|n| store.create(sample_create(&format!("Book {n}"))).id)
                        .collect::<Vec<BookId>>()
                })
            })
            .collect();

        let mut all_ids = Vec::new();
        for handle in handles {
            all_ids.extend(handle.join().unwrap());
        }

        let unique: HashSet<BookId> = all_ids.iter().copied().collect();
        assert_eq!(unique.len(), all_ids.len());
        assert_eq!(store.list().len(), all_ids.len());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = BookStore::new();
        store.create(sample_create("First"));
        store.create(sample_create("Second"));
        store.create(sample_create("Third"));

        let titles: Vec<String> = store.list().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn update_preserves_identity_and_unset_fields() {
        let store = BookStore::new();
        let created = store.create(sample_create("Think Python"));

        let patch = UpdateBook {
            title: Some("Think Python, 2nd Edition".to_string()),
            page_count: Some(292),
            ..UpdateBook::default()
        };
        let updated = store.update(created.id, patch).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Think Python, 2nd Edition");
        assert_eq!(updated.page_count, 292);
        // Fields absent from the patch keep their prior values
        assert_eq!(updated.author, created.author);
        assert_eq!(updated.publisher, created.publisher);
        assert_eq!(updated.published_date, created.published_date);
        assert_eq!(updated.language, created.language);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let store = BookStore::new();
        let first = store.create(sample_create("First"));
        store.create(sample_create("Second"));

        assert!(store.delete(first.id));
        assert_eq!(store.list().len(), 1);
        assert!(store.get(first.id).is_none());
    }

    #[test]
    fn missing_ids_never_mutate_the_store() {
        let store = BookStore::new();
        store.create(sample_create("Only"));
        let before = store.list();

        assert!(store.get(999).is_none());
        assert!(store.update(999, UpdateBook::default()).is_none());
        assert!(!store.delete(999));
        assert_eq!(store.list(), before);
    }
}
