//! GraphQL roots for the catalog. Each field locks the store once and
//! delegates to [`resolvers`].

use async_graphql::{Context, EmptySubscription, Object, Schema};
use catalog_kernel::settings::StubAuthorIds;

use super::models::{Author, AuthorResult, Book, NewBook};
use super::resolvers;
use super::store::SharedStore;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema over `store`
pub fn build_schema(store: SharedStore, stub_ids: StubAuthorIds) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(stub_ids)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Number of books in the catalog
    async fn book_count(&self, ctx: &Context<'_>) -> async_graphql::Result<usize> {
        let store = ctx.data::<SharedStore>()?;
        Ok(resolvers::book_count(&*store.read().await))
    }

    /// Number of author records, including authors without books
    async fn author_count(&self, ctx: &Context<'_>) -> async_graphql::Result<usize> {
        let store = ctx.data::<SharedStore>()?;
        Ok(resolvers::author_count(&*store.read().await))
    }

    /// Books filtered by exact author name and/or genre
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> async_graphql::Result<Vec<Book>> {
        let store = ctx.data::<SharedStore>()?;
        let store = store.read().await;
        Ok(resolvers::all_books(
            &store,
            author.as_deref(),
            genre.as_deref(),
        ))
    }

    /// Authors that have at least one book, with their book counts
    async fn all_authors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<AuthorResult>> {
        let store = ctx.data::<SharedStore>()?;
        Ok(resolvers::all_authors(&*store.read().await))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Add a book; an unknown author name gets a stub author record
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> async_graphql::Result<Book> {
        let store = ctx.data::<SharedStore>()?;
        let stub_ids = *ctx.data::<StubAuthorIds>()?;

        let new_book = NewBook {
            title,
            author,
            published,
            genres,
        };
        let book = resolvers::add_book(&mut *store.write().await, new_book, stub_ids);

        tracing::info!(
            book_id = %book.id,
            title = %book.title,
            author = %book.author,
            "book added"
        );
        Ok(book)
    }

    /// Set an author's birth year; `null` when no author has that name
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> async_graphql::Result<Option<Author>> {
        let store = ctx.data::<SharedStore>()?;
        let updated = resolvers::edit_author(&mut *store.write().await, &name, set_born_to);

        match &updated {
            Some(author) => tracing::info!(author = %author.name, born = set_born_to, "author edited"),
            None => tracing::debug!(author = %name, "edit skipped, no such author"),
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::library::store::Store;
    use serde_json::json;

    fn seeded_schema() -> CatalogSchema {
        build_schema(SharedStore::new(Store::seeded()), StubAuthorIds::Generated)
    }

    async fn run(schema: &CatalogSchema, query: &str) -> serde_json::Value {
        let response = schema.execute(query).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn counts() {
        let schema = seeded_schema();
        let data = run(&schema, "{ bookCount authorCount }").await;
        assert_eq!(data, json!({ "bookCount": 7, "authorCount": 5 }));
    }

    #[tokio::test]
    async fn all_books_by_genre() {
        let schema = seeded_schema();
        let data = run(&schema, r#"{ allBooks(genre: "refactoring") { title } }"#).await;
        assert_eq!(data["allBooks"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn all_books_by_author_and_genre() {
        let schema = seeded_schema();
        let data = run(
            &schema,
            r#"{ allBooks(author: "Fyodor Dostoevsky", genre: "crime") { title published author genres } }"#,
        )
        .await;
        assert_eq!(
            data,
            json!({
                "allBooks": [{
                    "title": "Crime and punishment",
                    "published": 1866,
                    "author": "Fyodor Dostoevsky",
                    "genres": ["classic", "crime"]
                }]
            })
        );
    }

    #[tokio::test]
    async fn all_authors_lists_counts_and_birth_years() {
        let schema = seeded_schema();
        let data = run(&schema, "{ allAuthors { name bookCount born } }").await;
        assert_eq!(
            data["allAuthors"],
            json!([
                { "name": "Robert Martin", "bookCount": 2, "born": 1952 },
                { "name": "Martin Fowler", "bookCount": 1, "born": 1963 },
                { "name": "Joshua Kerievsky", "bookCount": 1, "born": null },
                { "name": "Sandi Metz", "bookCount": 1, "born": null },
                { "name": "Fyodor Dostoevsky", "bookCount": 2, "born": 1821 }
            ])
        );
    }

    #[tokio::test]
    async fn add_book_for_new_author_bumps_author_count() {
        let schema = seeded_schema();
        let data = run(
            &schema,
            r#"mutation { addBook(title: "New", author: "New Author", published: 2020, genres: []) { title author published genres id } }"#,
        )
        .await;
        let book = &data["addBook"];
        assert_eq!(book["title"], "New");
        assert_eq!(book["genres"], json!([]));
        assert!(!book["id"].as_str().unwrap().is_empty());

        let data = run(&schema, "{ bookCount authorCount }").await;
        assert_eq!(data, json!({ "bookCount": 8, "authorCount": 6 }));
    }

    #[tokio::test]
    async fn edit_author_returns_updated_record() {
        let schema = seeded_schema();
        let data = run(
            &schema,
            r#"mutation { editAuthor(name: "Joshua Kerievsky", setBornTo: 1974) { name born id } }"#,
        )
        .await;
        assert_eq!(
            data["editAuthor"],
            json!({
                "name": "Joshua Kerievsky",
                "born": 1974,
                "id": "afa5b6f2-344d-11e9-a414-719c6709cf3e"
            })
        );

        let data = run(&schema, "{ allAuthors { name born } }").await;
        assert!(data["allAuthors"]
            .as_array()
            .unwrap()
            .contains(&json!({ "name": "Joshua Kerievsky", "born": 1974 })));
    }

    #[tokio::test]
    async fn edit_unknown_author_yields_null() {
        let schema = seeded_schema();
        let data = run(
            &schema,
            r#"mutation { editAuthor(name: "Nobody", setBornTo: 1900) { name } }"#,
        )
        .await;
        assert_eq!(data, json!({ "editAuthor": null }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_add_book_creates_author_once() {
        const WRITERS: usize = 64;
        let schema = seeded_schema();

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let schema = schema.clone();
                tokio::spawn(async move {
                    let mutation = format!(
                        r#"mutation {{ addBook(title: "Book {i}", author: "Same", published: 2020, genres: []) {{ id }} }}"#
                    );
                    schema.execute(mutation).await
                })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap();
            assert!(response.errors.is_empty(), "{:?}", response.errors);
        }

        let data = run(&schema, "{ bookCount authorCount allAuthors { name bookCount } }").await;
        assert_eq!(data["bookCount"], 7 + WRITERS);
        assert_eq!(data["authorCount"], 6);
        assert_eq!(
            data["allAuthors"].as_array().unwrap().last().unwrap(),
            &json!({ "name": "Same", "bookCount": WRITERS })
        );
    }

    #[test]
    fn sdl_exposes_catalog_operations() {
        let sdl = seeded_schema().sdl();
        for needle in [
            "type Book",
            "type Author",
            "type AuthorResult",
            "allBooks(author: String, genre: String): [Book!]!",
            "editAuthor(name: String!, setBornTo: Int!): Author",
            "addBook(title: String!, author: String!, published: Int!, genres: [String!]!): Book!",
            "genres: [String!]",
        ] {
            assert!(sdl.contains(needle), "missing `{needle}` in:\n{sdl}");
        }
    }
}
