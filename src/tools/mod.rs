//! Tool handlers for the MCP server.
//!
//! Each submodule implements the business logic for a group of tools;
//! the mcp module wires them into the protocol-level router.

pub mod connect;
pub mod guard;
pub mod mongo;
pub mod query;
pub mod schema;

pub use connect::{ConnectDbInput, ConnectMongoInput, ConnectToolHandler};
pub use mongo::{
    MongoCreateCollectionInput, MongoDeleteInput, MongoFindInput, MongoInsertInput,
    MongoToolHandler, MongoUpdateInput,
};
pub use query::{ExecuteInput, QueryInput, QueryParamInput, QueryToolHandler};
pub use schema::{AddColumnInput, CreateTableInput, DescribeTableInput, SchemaToolHandler};
