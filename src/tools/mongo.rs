//! MongoDB document tools.
//!
//! Each tool maps to one driver call against the configured database:
//! list_collections, find, insert_many, update_one/update_many,
//! delete_one/delete_many, create_collection. Filters, updates, sorts, and
//! documents are passed through verbatim after JSON-to-BSON conversion.

use crate::db::DbSession;
use crate::error::{DbError, DbResult};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson, to_document, Document};
use mongodb::results::CollectionType;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::sync::Arc;
use tracing::info;

/// Input for the mongodb_find tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MongoFindInput {
    /// Collection name
    pub collection: String,
    /// MongoDB query filter (optional; defaults to all documents)
    #[serde(default)]
    pub filter: Option<JsonMap<String, JsonValue>>,
    /// Maximum number of documents to return (optional)
    #[serde(default)]
    pub limit: Option<i64>,
    /// Number of documents to skip (optional)
    #[serde(default)]
    pub skip: Option<u64>,
    /// Sort criteria (optional)
    #[serde(default)]
    pub sort: Option<JsonMap<String, JsonValue>>,
}

/// Input for the mongodb_insert tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MongoInsertInput {
    /// Collection name
    pub collection: String,
    /// Documents to insert (non-empty)
    pub documents: Vec<JsonMap<String, JsonValue>>,
}

/// Input for the mongodb_update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MongoUpdateInput {
    /// Collection name
    pub collection: String,
    /// MongoDB query filter
    pub filter: JsonMap<String, JsonValue>,
    /// MongoDB update operations (e.g. {"$set": {...}})
    pub update: JsonMap<String, JsonValue>,
    /// Update multiple documents if true
    #[serde(default)]
    pub many: bool,
}

/// Input for the mongodb_delete tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MongoDeleteInput {
    /// Collection name
    pub collection: String,
    /// MongoDB query filter
    pub filter: JsonMap<String, JsonValue>,
    /// Delete multiple documents if true
    #[serde(default)]
    pub many: bool,
}

/// Input for the mongodb_create_collection tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MongoCreateCollectionInput {
    /// Collection name
    pub collection: String,
    /// Collection options, forwarded verbatim to the create command (optional)
    #[serde(default)]
    pub options: Option<JsonMap<String, JsonValue>>,
}

/// Convert a JSON object from a tool call into a BSON document.
fn to_bson_document(map: &JsonMap<String, JsonValue>, what: &str) -> DbResult<Document> {
    to_document(map).map_err(|e| DbError::invalid_params(format!("Invalid {}: {}", what, e)))
}

fn require_collection(name: &str) -> DbResult<()> {
    if name.trim().is_empty() {
        return Err(DbError::invalid_params("Collection name is required"));
    }
    Ok(())
}

/// Handler for the mongodb_* tools.
pub struct MongoToolHandler {
    session: Arc<DbSession>,
}

impl MongoToolHandler {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }

    /// Handle mongodb_list_collections.
    pub async fn list_collections(&self) -> DbResult<String> {
        let db = self.session.mongo_database().await?;

        let cursor = db
            .list_collections()
            .await
            .map_err(|e| DbError::internal(format!("Failed to list collections: {}", e)))?;
        let specs: Vec<_> = cursor
            .try_collect()
            .await
            .map_err(|e| DbError::internal(format!("Failed to list collections: {}", e)))?;

        let collections: Vec<JsonValue> = specs
            .iter()
            .map(|spec| {
                let kind = match spec.collection_type {
                    CollectionType::View => "view",
                    CollectionType::Timeseries => "timeseries",
                    _ => "collection",
                };
                json!({
                    "name": spec.name,
                    "type": kind,
                    "readOnly": spec.info.read_only,
                })
            })
            .collect();

        serde_json::to_string_pretty(&collections)
            .map_err(|e| DbError::internal(format!("Failed to serialize collections: {}", e)))
    }

    /// Handle mongodb_find: filter/limit/skip/sort pass through verbatim.
    pub async fn find(&self, input: MongoFindInput) -> DbResult<String> {
        let db = self.session.mongo_database().await?;
        require_collection(&input.collection)?;

        let filter = match &input.filter {
            Some(map) => to_bson_document(map, "filter")?,
            None => Document::new(),
        };

        let collection = db.collection::<Document>(&input.collection);
        let mut find = collection.find(filter);
        if let Some(limit) = input.limit {
            find = find.limit(limit);
        }
        if let Some(skip) = input.skip {
            find = find.skip(skip);
        }
        if let Some(sort) = &input.sort {
            find = find.sort(to_bson_document(sort, "sort")?);
        }

        let documents: Vec<Document> = find
            .await
            .map_err(|e| DbError::internal(format!("Failed to find documents: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| DbError::internal(format!("Failed to find documents: {}", e)))?;

        info!(
            collection = %input.collection,
            count = documents.len(),
            "Find executed"
        );
        serde_json::to_string_pretty(&documents)
            .map_err(|e| DbError::internal(format!("Failed to serialize documents: {}", e)))
    }

    /// Handle mongodb_insert: insertMany, reporting the inserted count.
    pub async fn insert(&self, input: MongoInsertInput) -> DbResult<String> {
        let db = self.session.mongo_database().await?;
        require_collection(&input.collection)?;
        if input.documents.is_empty() {
            return Err(DbError::invalid_params(
                "At least one document is required",
            ));
        }

        let documents: Vec<Document> = input
            .documents
            .iter()
            .map(|d| to_bson_document(d, "document"))
            .collect::<DbResult<_>>()?;

        let collection = db.collection::<Document>(&input.collection);
        let result = collection
            .insert_many(documents)
            .await
            .map_err(|e| DbError::internal(format!("Failed to insert documents: {}", e)))?;

        info!(
            collection = %input.collection,
            count = result.inserted_ids.len(),
            "Documents inserted"
        );
        Ok(format!(
            "Successfully inserted {} documents",
            result.inserted_ids.len()
        ))
    }

    /// Handle mongodb_update: the many flag selects updateOne vs updateMany.
    pub async fn update(&self, input: MongoUpdateInput) -> DbResult<String> {
        let db = self.session.mongo_database().await?;
        require_collection(&input.collection)?;

        let filter = to_bson_document(&input.filter, "filter")?;
        let update = to_bson_document(&input.update, "update")?;

        let collection = db.collection::<Document>(&input.collection);
        let result = if input.many {
            collection.update_many(filter, update).await
        } else {
            collection.update_one(filter, update).await
        }
        .map_err(|e| DbError::internal(format!("Failed to update documents: {}", e)))?;

        info!(
            collection = %input.collection,
            modified = result.modified_count,
            many = input.many,
            "Documents updated"
        );
        Ok(format!(
            "Successfully updated {} documents",
            result.modified_count
        ))
    }

    /// Handle mongodb_delete: the many flag selects deleteOne vs deleteMany.
    pub async fn delete(&self, input: MongoDeleteInput) -> DbResult<String> {
        let db = self.session.mongo_database().await?;
        require_collection(&input.collection)?;

        let filter = to_bson_document(&input.filter, "filter")?;

        let collection = db.collection::<Document>(&input.collection);
        let result = if input.many {
            collection.delete_many(filter).await
        } else {
            collection.delete_one(filter).await
        }
        .map_err(|e| DbError::internal(format!("Failed to delete documents: {}", e)))?;

        info!(
            collection = %input.collection,
            deleted = result.deleted_count,
            many = input.many,
            "Documents deleted"
        );
        Ok(format!(
            "Successfully deleted {} documents",
            result.deleted_count
        ))
    }

    /// Handle mongodb_create_collection, forwarding any options verbatim
    /// through the create command.
    pub async fn create_collection(&self, input: MongoCreateCollectionInput) -> DbResult<String> {
        let db = self.session.mongo_database().await?;
        require_collection(&input.collection)?;

        match &input.options {
            Some(options) => {
                let mut command = doc! { "create": &input.collection };
                for (key, value) in options {
                    let bson = to_bson(value).map_err(|e| {
                        DbError::invalid_params(format!("Invalid collection options: {}", e))
                    })?;
                    command.insert(key, bson);
                }
                db.run_command(command).await
            }
            None => db.create_collection(&input.collection).await.map(|_| {
                doc! {}
            }),
        }
        .map_err(|e| DbError::internal(format!("Failed to create collection: {}", e)))?;

        info!(collection = %input.collection, "Collection created");
        Ok(format!(
            "Collection {} created successfully",
            input.collection
        ))
    }
}
