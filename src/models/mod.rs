//! Data models shared across the server.
//!
//! This module defines connection configuration types and the wire shapes
//! used by the schema-modification tools.

pub mod connection;
pub mod schema;

pub use connection::{BackendKind, MongoConfig, MySqlConfig, SslOptions, DEFAULT_MONGODB_URI};
pub use schema::{FieldDefinition, IndexDefinition};
