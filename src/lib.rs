//! Tag-search query compiler for a manga metadata store.
//!
//! A typed query such as `artist:"jane doe" -yaoi lang:english $exact title*`
//! is parsed into [`query::QueryComponent`]s and compiled into a single SQL
//! SELECT over the `search_metadata`, `search_tags` and `search_titles` tables.
//! Executing that SQL belongs to the host; [`db`] carries the reference schema
//! and a rusqlite adapter.

pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod query;
pub mod search;
pub mod sql;

pub use cache::{CacheStats, QueryCache};
pub use config::SearchConfig;
pub use query::{parse_query, QueryComponent, Text, TextComponent};
pub use search::TagSearch;
pub use sql::{compile, CompiledQuery};
