//! Library locations served by the catalog action buttons

use regex::Regex;
use thiserror::Error;

use crate::config::LocationConfig;
use crate::models::request::CatalogQuery;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("location {id}: invalid title pattern: {source}")]
    Pattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("location {0}: missing contact email")]
    MissingEmail(String),
}

/// A configured location with a compiled title pattern
#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub title: Regex,
    pub status: String,
    pub email: String,
}

impl Location {
    fn matches(&self, location: &str, status: &str) -> bool {
        self.title.is_match(location) && self.status == status
    }
}

impl TryFrom<LocationConfig> for Location {
    type Error = LocationError;

    fn try_from(config: LocationConfig) -> Result<Self, Self::Error> {
        if config.email.trim().is_empty() {
            return Err(LocationError::MissingEmail(config.id));
        }

        let title = Regex::new(&config.title).map_err(|source| LocationError::Pattern {
            id: config.id.clone(),
            source,
        })?;

        Ok(Self {
            id: config.id,
            title,
            status: config.status,
            email: config.email,
        })
    }
}

/// Ordered, immutable set of locations loaded at startup
#[derive(Debug, Clone, Default)]
pub struct LocationSet {
    locations: Vec<Location>,
}

impl LocationSet {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Compile every configured location, failing on the first bad entry
    pub fn from_config(configs: &[LocationConfig]) -> Result<Self, LocationError> {
        let locations = configs
            .iter()
            .cloned()
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(locations))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Find the location a catalog query points at.
    ///
    /// `Permalink`, `Location` and `Status` must all be present and
    /// non-empty. The first location, in declaration order, whose title
    /// pattern matches and whose status is equal wins.
    pub fn resolve(&self, query: &CatalogQuery) -> Option<&Location> {
        if query.permalink().is_empty() || query.location().is_empty() || query.status().is_empty() {
            return None;
        }

        self.locations
            .iter()
            .find(|l| l.matches(query.location(), query.status()))
    }
}
