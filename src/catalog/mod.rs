//! Country catalog and its sources.
//!
//! The catalog is the only collaborator the modes read from. Where the list
//! comes from (cache, host-provided sources, built-in data) is decided here.

#[allow(clippy::module_inception)]
mod catalog;
pub mod builtin;
pub mod cache;
pub mod source;

pub use cache::JsonCache;
pub use catalog::CountryCatalog;
pub use source::{BuiltinSource, CountrySource, MemorySource, SourceFuture};
