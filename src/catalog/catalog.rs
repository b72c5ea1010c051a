//! The country catalog shared by every mode.

use std::fmt;

use im::Vector;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use tokio::sync::OnceCell;

use crate::core::{Country, FallbackPolicy, GameRng, LoadPolicy, QuizError, Region, SourceError};

use super::builtin;
use super::cache::JsonCache;
use super::source::CountrySource;

/// Loaded-once, read-only list of countries.
///
/// `load` is idempotent and atomic: either the full list is installed or
/// nothing is and a later `load` retries. After a successful load the list
/// never changes, so modes hold the catalog behind an `Arc` and read it
/// freely.
pub struct CountryCatalog {
    sources: Vec<Box<dyn CountrySource>>,
    cache: Option<JsonCache>,
    policy: LoadPolicy,
    countries: OnceCell<Vector<Country>>,
}

impl CountryCatalog {
    /// Create an unloaded catalog with no sources.
    pub fn new(policy: LoadPolicy) -> Self {
        Self {
            sources: Vec::new(),
            cache: None,
            policy,
            countries: OnceCell::new(),
        }
    }

    /// Create a catalog that is already loaded with `countries`.
    ///
    /// Duplicate names are dropped, first one wins. An empty list leaves the
    /// catalog unloaded.
    pub fn from_countries(countries: Vec<Country>) -> Self {
        let loaded = (!countries.is_empty()).then(|| dedupe(countries));
        Self {
            sources: Vec::new(),
            cache: None,
            policy: LoadPolicy::strict(),
            countries: OnceCell::new_with(loaded),
        }
    }

    /// Create a catalog preloaded with the built-in offline dataset.
    pub fn offline() -> Self {
        Self::from_countries(builtin::countries())
    }

    /// Append a source to the load chain (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: impl CountrySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Consult and refresh a JSON cache (builder pattern).
    #[must_use]
    pub fn with_cache(mut self, cache: JsonCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Load the country list if it is not loaded yet.
    ///
    /// Order: fresh cache, then each source, then the built-in dataset if
    /// the policy allows it. A list fetched from a source is written back to
    /// the cache.
    pub async fn load(&self) -> Result<(), QuizError> {
        self.countries.get_or_try_init(|| self.fetch_chain()).await?;
        Ok(())
    }

    async fn fetch_chain(&self) -> Result<Vector<Country>, QuizError> {
        let mut failures: Vec<(String, SourceError)> = Vec::new();

        if let Some(cache) = &self.cache {
            match cache.read(self.policy.cache_ttl).await {
                Ok(countries) => {
                    info!("Loaded {} countries from cache {}", countries.len(), cache.path().display());
                    return Ok(dedupe(countries));
                }
                Err(e) => {
                    debug!("Cache {} unusable: {}", cache.path().display(), e);
                    failures.push(("cache".to_string(), e));
                }
            }
        }

        for source in &self.sources {
            match source.fetch().await {
                Ok(countries) if !countries.is_empty() => {
                    info!("Loaded {} countries from {}", countries.len(), source.name());
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.write(&countries).await {
                            warn!("Failed to cache countries: {}", e);
                        }
                    }
                    return Ok(dedupe(countries));
                }
                Ok(_) => {
                    warn!("Source {} returned no countries", source.name());
                    failures.push((source.name().to_string(), SourceError::Empty));
                }
                Err(e) => {
                    warn!("Source {} failed: {}", source.name(), e);
                    failures.push((source.name().to_string(), e));
                }
            }
        }

        match self.policy.fallback {
            FallbackPolicy::Builtin => {
                info!("Using built-in countries after {} failed source(s)", failures.len());
                Ok(dedupe(builtin::countries()))
            }
            FallbackPolicy::Fail => Err(QuizError::LoadFailure { failures }),
        }
    }

    /// Loaded and non-empty.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.countries.get().is_some_and(|c| !c.is_empty())
    }

    /// Every country, in load order.
    pub fn all(&self) -> Result<&Vector<Country>, QuizError> {
        self.countries
            .get()
            .filter(|c| !c.is_empty())
            .ok_or(QuizError::NotReady)
    }

    /// Number of countries (0 while unloaded).
    #[must_use]
    pub fn size(&self) -> usize {
        self.countries.get().map_or(0, Vector::len)
    }

    /// Look a country up by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Country> {
        self.countries.get()?.iter().find(|c| c.name == name)
    }

    /// Uniformly random country.
    pub fn sample_one(&self, rng: &mut GameRng) -> Result<&Country, QuizError> {
        let countries = self.all()?;
        Ok(&countries[rng.gen_index(countries.len())])
    }

    /// Up to `k` distinct countries other than `exclude_name`.
    ///
    /// Shuffle-then-take over the eligible countries: uniform per call.
    pub fn sample_excluding(
        &self,
        rng: &mut GameRng,
        k: usize,
        exclude_name: &str,
    ) -> Result<Vec<&Country>, QuizError> {
        let eligible: Vec<&Country> = self.all()?.iter().filter(|c| c.name != exclude_name).collect();
        Ok(rng.sample(eligible, k))
    }

    /// Countries of one region, in load order. Empty while unloaded.
    #[must_use]
    pub fn in_region(&self, region: Region) -> Vec<&Country> {
        self.countries
            .get()
            .map(|all| all.iter().filter(|c| c.region == Some(region)).collect())
            .unwrap_or_default()
    }

    /// Countries that have a capital, in load order. Empty while unloaded.
    #[must_use]
    pub fn with_capitals(&self) -> Vec<&Country> {
        self.countries
            .get()
            .map(|all| all.iter().filter(|c| c.capital().is_some()).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for CountryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("CountryCatalog")
            .field("sources", &sources)
            .field("cache", &self.cache)
            .field("policy", &self.policy)
            .field("size", &self.size())
            .finish()
    }
}

fn dedupe(countries: Vec<Country>) -> Vector<Country> {
    let mut seen = FxHashSet::default();
    let mut unique = Vector::new();
    for country in countries {
        if seen.insert(country.name.clone()) {
            unique.push_back(country);
        } else {
            warn!("Dropping duplicate country {}", country.name);
        }
    }
    unique
}
