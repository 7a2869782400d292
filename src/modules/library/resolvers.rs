//! Query and mutation logic over the in-memory [`Store`].
//!
//! Every function here is total: lookups that miss yield empty or `None`
//! results and nothing is validated.

use std::collections::HashMap;

use catalog_kernel::settings::StubAuthorIds;
use uuid::{Timestamp, Uuid};

use super::models::{Author, AuthorResult, Book, NewBook};
use super::store::Store;

/// Identifier shared by every stub author under [`StubAuthorIds::Placeholder`].
/// It is also the id of the seeded "Robert Martin" record.
pub const PLACEHOLDER_AUTHOR_ID: &str = "afa51ab0-344d-11e9-a414-719c6709cf3e";

pub fn book_count(store: &Store) -> usize {
    store.books.len()
}

pub fn author_count(store: &Store) -> usize {
    store.authors.len()
}

/// Books in store order, narrowed by exact author name and genre membership.
///
/// An empty string filter is treated as no filter.
pub fn all_books(store: &Store, author: Option<&str>, genre: Option<&str>) -> Vec<Book> {
    let author = author.filter(|name| !name.is_empty());
    let genre = genre.filter(|genre| !genre.is_empty());

    store
        .books
        .iter()
        .filter(|book| author.map_or(true, |name| book.author == name))
        .filter(|book| genre.map_or(true, |genre| book.genres.iter().any(|g| g == genre)))
        .cloned()
        .collect()
}

/// One entry per distinct author name found among the books, in first-seen order.
///
/// Authors without books do not appear. `born` comes from the first author
/// record carrying that name.
pub fn all_authors(store: &Store) -> Vec<AuthorResult> {
    let mut born_by_name: HashMap<&str, Option<i32>> = HashMap::new();
    for author in &store.authors {
        born_by_name.entry(author.name.as_str()).or_insert(author.born);
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut results: Vec<AuthorResult> = Vec::new();

    for book in &store.books {
        match positions.get(book.author.as_str()) {
            Some(&index) => results[index].book_count += 1,
            None => {
                positions.insert(book.author.as_str(), results.len());
                results.push(AuthorResult {
                    name: book.author.clone(),
                    book_count: 1,
                    born: born_by_name.get(book.author.as_str()).copied().flatten(),
                });
            }
        }
    }

    results
}

/// Append a book, creating a stub author first when the name is unknown.
pub fn add_book(store: &mut Store, new_book: NewBook, stub_ids: StubAuthorIds) -> Book {
    let book = Book {
        title: new_book.title,
        published: new_book.published,
        author: new_book.author,
        id: generate_id(),
        genres: new_book.genres,
    };

    if !store.authors.iter().any(|author| author.name == book.author) {
        let id = match stub_ids {
            StubAuthorIds::Generated => generate_id(),
            StubAuthorIds::Placeholder => PLACEHOLDER_AUTHOR_ID.to_string(),
        };
        store.authors.push(Author {
            name: book.author.clone(),
            id,
            born: None,
        });
    }

    store.books.push(book.clone());
    book
}

/// Overwrite the birth year of the first author named `name`.
///
/// Returns the updated record, or `None` without touching the store.
pub fn edit_author(store: &mut Store, name: &str, born: i32) -> Option<Author> {
    let author = store.authors.iter_mut().find(|author| author.name == name)?;
    author.born = Some(born);
    Some(author.clone())
}

fn generate_id() -> String {
    Uuid::new_v7(Timestamp::now(uuid::NoContext)).to_string()
}
