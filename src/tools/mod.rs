//! Tools module
//!
//! Tool implementations behind the MCP server.

pub mod calories;
pub mod profiles;
pub mod prompts;
pub mod status;
