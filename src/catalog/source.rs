//! Country sources.
//!
//! A source delivers a full country list or fails. The catalog tries its
//! sources in order and keeps the first non-empty answer. Network fetching
//! lives with the host application, which plugs in its own `CountrySource`.

use std::future::Future;
use std::pin::Pin;

use crate::core::{Country, SourceError};

use super::builtin;

/// Boxed future returned by `CountrySource::fetch`.
pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Country>, SourceError>> + Send + 'a>>;

/// Something that can produce the country list.
pub trait CountrySource: Send + Sync {
    /// Short label used in logs and `LoadFailure` reports.
    fn name(&self) -> &str;

    /// Fetch every country.
    fn fetch(&self) -> SourceFuture<'_>;
}

/// Source backed by an in-memory list.
#[derive(Clone, Debug)]
pub struct MemorySource {
    label: String,
    countries: Vec<Country>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, countries: Vec<Country>) -> Self {
        Self {
            label: label.into(),
            countries,
        }
    }
}

impl CountrySource for MemorySource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> SourceFuture<'_> {
        Box::pin(async move {
            if self.countries.is_empty() {
                Err(SourceError::Empty)
            } else {
                Ok(self.countries.clone())
            }
        })
    }
}

/// The built-in offline dataset as a regular source.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinSource;

impl CountrySource for BuiltinSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn fetch(&self) -> SourceFuture<'_> {
        Box::pin(async { Ok(builtin::countries()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new("test", vec![Country::new("A"), Country::new("B")]);
        assert_eq!(source.name(), "test");

        let countries = source.fetch().await.unwrap();
        assert_eq!(countries.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_memory_source_fails() {
        let source = MemorySource::new("empty", Vec::new());
        assert!(matches!(source.fetch().await, Err(SourceError::Empty)));
    }

    #[tokio::test]
    async fn test_builtin_source() {
        let countries = BuiltinSource.fetch().await.unwrap();
        assert_eq!(countries.len(), 20);
    }
}
