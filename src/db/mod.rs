//! Database layer: configuration resolution, session state, and execution.
//!
//! - `resolver`: three-tier connection configuration resolution
//! - `session`: one guarded connection handle per backend kind
//! - `executor`: prepared-statement execution and row decoding
//! - `ddl`: CREATE TABLE / ADD COLUMN statement building
//! - `types`: MySQL column value decoding to JSON

pub mod ddl;
pub mod executor;
pub mod resolver;
pub mod session;
pub mod types;

pub use executor::{ExecOutcome, SqlParam};
pub use resolver::{MongoConnectArgs, MySqlConnectArgs};
pub use session::DbSession;
