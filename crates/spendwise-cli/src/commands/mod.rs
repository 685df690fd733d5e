//! CLI command implementations
//!
//! Commands are organized by area:
//! - `common` - Shared utilities (config resolution, pipeline loading)
//! - `serve` - Web server command
//! - `predict` - Single-household recommendation
//! - `batch` - CSV scoring
//! - `status` - Artifact check and schema listing

pub mod batch;
pub mod common;
pub mod predict;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use batch::*;
pub use common::*;
pub use predict::*;
pub use serve::*;
pub use status::*;
