//! CLI command implementations
//!
//! - `run`: Run a request file
//! - `conditions`: List the supported conditions
//! - `schema`: JSON schemas of the file formats
//! - `util`: Shared utility functions

pub mod conditions;
pub mod run;
pub mod schema;
pub mod util;

pub use conditions::cmd_conditions;
pub use run::cmd_run;
pub use schema::cmd_schema;
