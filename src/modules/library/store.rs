use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::models::{Author, Book};

/// The two in-memory collections. Author names join books to authors.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
}

impl Store {
    /// Empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference dataset: five authors and seven books with fixed ids.
    pub fn seeded() -> Self {
        Self {
            authors: vec![
                author("Robert Martin", "afa51ab0-344d-11e9-a414-719c6709cf3e", Some(1952)),
                author("Martin Fowler", "afa5b6f0-344d-11e9-a414-719c6709cf3e", Some(1963)),
                author("Fyodor Dostoevsky", "afa5b6f1-344d-11e9-a414-719c6709cf3e", Some(1821)),
                author("Joshua Kerievsky", "afa5b6f2-344d-11e9-a414-719c6709cf3e", None),
                author("Sandi Metz", "afa5b6f3-344d-11e9-a414-719c6709cf3e", None),
            ],
            books: vec![
                book(
                    "Clean Code",
                    2008,
                    "Robert Martin",
                    "afa5b6f4-344d-11e9-a414-719c6709cf3e",
                    &["refactoring"],
                ),
                book(
                    "Agile software development",
                    2002,
                    "Robert Martin",
                    "afa5b6f5-344d-11e9-a414-719c6709cf3e",
                    &["agile", "patterns", "design"],
                ),
                book(
                    "Refactoring, edition 2",
                    2018,
                    "Martin Fowler",
                    "afa5de00-344d-11e9-a414-719c6709cf3e",
                    &["refactoring"],
                ),
                book(
                    "Refactoring to patterns",
                    2008,
                    "Joshua Kerievsky",
                    "afa5de01-344d-11e9-a414-719c6709cf3e",
                    &["refactoring", "patterns"],
                ),
                book(
                    "Practical Object-Oriented Design, An Agile Primer Using Ruby",
                    2012,
                    "Sandi Metz",
                    "afa5de02-344d-11e9-a414-719c6709cf3e",
                    &["refactoring", "design"],
                ),
                book(
                    "Crime and punishment",
                    1866,
                    "Fyodor Dostoevsky",
                    "afa5de03-344d-11e9-a414-719c6709cf3e",
                    &["classic", "crime"],
                ),
                book(
                    "The Demon ",
                    1872,
                    "Fyodor Dostoevsky",
                    "afa5de04-344d-11e9-a414-719c6709cf3e",
                    &["classic", "revolution"],
                ),
            ],
        }
    }
}

fn author(name: &str, id: &str, born: Option<i32>) -> Author {
    Author {
        name: name.to_string(),
        id: id.to_string(),
        born,
    }
}

fn book(title: &str, published: i32, author: &str, id: &str, genres: &[&str]) -> Book {
    Book {
        title: title.to_string(),
        published,
        author: author.to_string(),
        id: id.to_string(),
        genres: genres.iter().map(|genre| genre.to_string()).collect(),
    }
}

/// Cloneable handle to the process-wide store.
///
/// Every mutation holds the write guard for its whole duration, so concurrent
/// requests observe each operation as a single step.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner.write().await
    }
}
