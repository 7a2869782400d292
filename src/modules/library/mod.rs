pub mod models;
pub mod resolvers;
pub mod schema;
pub mod store;

use async_graphql::http::GraphiQLSource;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    routing::get,
    Json, Router,
};
use catalog_http::error::AppError;
use catalog_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use schema::{build_schema, CatalogSchema};
use store::{SharedStore, Store};

const GRAPHQL_ENDPOINT: &str = "/api/library/graphql";

/// Books and authors catalog served over GraphQL
pub struct LibraryModule {
    store: SharedStore,
    schema: CatalogSchema,
}

impl LibraryModule {
    pub fn new(settings: &CatalogSettings) -> Self {
        let store = if settings.seed {
            Store::seeded()
        } else {
            Store::new()
        };
        let store = SharedStore::new(store);
        let schema = build_schema(store.clone(), settings.stub_author_ids);

        Self { store, schema }
    }

    pub fn schema(&self) -> &CatalogSchema {
        &self.schema
    }
}

#[async_trait]
impl Module for LibraryModule {
    fn name(&self) -> &'static str {
        "library"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let store = self.store.read().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = store.books.len(),
            authors = store.authors.len(),
            stub_author_ids = ?ctx.settings.catalog.stub_author_ids,
            "library module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/graphql", get(graphiql).post(graphql_handler))
            .route("/health", get(health_check))
            .with_state(self.schema.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/graphql": {
                    "post": {
                        "summary": "Execute a GraphQL query or mutation",
                        "tags": ["Library"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/GraphQLRequest"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "GraphQL response, possibly carrying GraphQL errors",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/GraphQLResponse"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Body is not a GraphQL request",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "get": {
                        "summary": "GraphiQL explorer",
                        "tags": ["Library"],
                        "responses": {
                            "200": {
                                "description": "HTML page",
                                "content": {
                                    "text/html": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Library health check",
                        "tags": ["Library"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "GraphQLRequest": {
                        "type": "object",
                        "properties": {
                            "query": { "type": "string" },
                            "operationName": { "type": "string" },
                            "variables": { "type": "object" }
                        },
                        "required": ["query"]
                    },
                    "GraphQLResponse": {
                        "type": "object",
                        "properties": {
                            "data": { "type": "object" },
                            "errors": {
                                "type": "array",
                                "items": { "type": "object" }
                            }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            endpoint = GRAPHQL_ENDPOINT,
            "library module started"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "library module stopped");
        Ok(())
    }
}

/// Execute a GraphQL request
async fn graphql_handler(
    State(schema): State<CatalogSchema>,
    payload: Result<Json<async_graphql::Request>, JsonRejection>,
) -> Result<Json<async_graphql::Response>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(Json(schema.execute(request).await))
}

/// GraphiQL explorer page
async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_ENDPOINT).finish())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "library module is healthy"
}

/// Create a new instance of the library module
pub fn create_module(settings: &CatalogSettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(LibraryModule::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_kernel::settings::Settings;

    #[tokio::test]
    async fn unseeded_module_starts_empty() {
        let settings = CatalogSettings {
            seed: false,
            ..CatalogSettings::default()
        };
        let module = LibraryModule::new(&settings);

        let response = module.schema().execute("{ bookCount authorCount }").await;
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "bookCount": 0, "authorCount": 0 })
        );
    }

    #[tokio::test]
    async fn lifecycle_hooks_succeed() {
        let settings = Settings::default();
        let module = LibraryModule::new(&settings.catalog);
        let ctx = InitCtx {
            settings: &settings,
        };

        module.init(&ctx).await.unwrap();
        module.start(&ctx).await.unwrap();
        module.stop().await.unwrap();
    }

    #[test]
    fn openapi_fragment_documents_graphql_endpoint() {
        let module = LibraryModule::new(&CatalogSettings::default());
        let spec = module.openapi().unwrap();
        assert!(spec["paths"]["/graphql"]["post"].is_object());
        assert!(spec["components"]["schemas"]["GraphQLRequest"].is_object());
    }
}
