//! MCP tool implementations.
//!
//! This module contains all tools exposed by the partscope server.

pub mod part_extract;
pub mod part_open;
