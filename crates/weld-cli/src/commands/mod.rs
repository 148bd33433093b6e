//! Command implementations for the weld CLI.

pub mod graph;
pub mod merge;
pub mod schema;
mod utils;

pub use graph::execute as graph_execute;
pub use merge::execute as merge_execute;
pub use schema::execute as schema_execute;
