use async_graphql::{ComplexObject, SimpleObject};

/// A catalogued book. `author` holds the author's name, not an author id.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(complex)]
pub struct Book {
    pub title: String,
    pub published: i32,
    pub author: String,
    pub id: String,
    #[graphql(skip)]
    pub genres: Vec<String>,
}

#[ComplexObject]
impl Book {
    /// Genres in insertion order, duplicates kept
    async fn genres(&self) -> Option<Vec<String>> {
        Some(self.genres.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Author {
    pub name: String,
    pub id: String,
    /// Birth year, unknown when absent
    pub born: Option<i32>,
}

/// Per-author aggregate computed from the books collection.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct AuthorResult {
    pub name: String,
    pub book_count: usize,
    pub born: Option<i32>,
}

/// Arguments of the `addBook` mutation.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published: i32,
    pub genres: Vec<String>,
}
