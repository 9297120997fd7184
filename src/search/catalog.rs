//! The unit catalog seam: search and filter calls, plus an in-memory catalog
//! used offline and by tests.

use crate::error::CatalogError;
use crate::types::*;
use futures::future::{self, BoxFuture, FutureExt};
use serde::Deserialize;
use std::collections::HashSet;

/// Boxed future returned by catalog calls.
pub type CatalogFuture<T> = BoxFuture<'static, Result<T, CatalogError>>;

/// Source of search suggestions and filtered unit lists.
///
/// Futures are `'static` so they can be spawned onto the runtime while the
/// UI thread keeps running.
pub trait UnitCatalog: Send + Sync {
    /// Champions and traits whose name matches the query text.
    fn search(&self, query: &str) -> CatalogFuture<Vec<SearchItem>>;

    /// Units matching the selected champions and traits. Both lists empty
    /// means the unfiltered list.
    fn filter(&self, champions: &[String], traits: &[String]) -> CatalogFuture<Vec<Unit>>;
}

/// Upper-cases a name and strips whitespace and `,.'_-` so that
/// "street demon", "Street_Demon" and "STREETDEMON" compare equal.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '.' | '\'' | '_' | '-'))
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    #[serde(rename = "displayName")]
    display_name: String,
}

/// Body of a search response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResultBody {
    #[serde(rename = "championList", default)]
    champions: Vec<NamedEntry>,
    #[serde(rename = "traitList", default)]
    traits: Vec<NamedEntry>,
}

impl SearchResultBody {
    /// Flattens the body into items, champions first.
    pub(crate) fn into_items(self) -> Vec<SearchItem> {
        self.champions
            .into_iter()
            .map(|c| SearchItem::champion(c.display_name))
            .chain(
                self.traits
                    .into_iter()
                    .map(|t| SearchItem::trait_item(t.display_name)),
            )
            .collect()
    }
}

/// Catalog over a fixed list of units.
///
/// Search is a prefix match on normalized names. Filtering is conjunctive:
/// a unit must be every selected champion and carry every selected trait,
/// so selecting more never widens the result.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    units: Vec<Unit>,
}

impl StaticCatalog {
    /// Creates a catalog over `units`.
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    /// Catalog over the built-in demo roster.
    pub fn demo() -> Self {
        Self::new(demo_roster())
    }

    /// All units, unfiltered.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Synchronous search used by the [`UnitCatalog`] impl.
    pub fn search_now(&self, query: &str) -> Vec<SearchItem> {
        let prefix = normalize(query);
        if prefix.is_empty() {
            return Vec::new();
        }

        let mut champions = Vec::new();
        let mut traits = Vec::new();
        let mut seen_traits = HashSet::new();
        for unit in &self.units {
            if normalize(&unit.name).starts_with(&prefix) {
                champions.push(SearchItem::champion(unit.name.clone()));
            }
            for name in unit.distinct_traits() {
                if normalize(name).starts_with(&prefix) && seen_traits.insert(name) {
                    traits.push(SearchItem::trait_item(name));
                }
            }
        }
        champions.extend(traits);
        champions
    }

    /// Synchronous filter used by the [`UnitCatalog`] impl.
    pub fn filter_now(&self, champions: &[String], traits: &[String]) -> Vec<Unit> {
        let champions: Vec<String> = champions.iter().map(|c| normalize(c)).collect();
        let traits: Vec<String> = traits.iter().map(|t| normalize(t)).collect();

        self.units
            .iter()
            .filter(|unit| {
                let name = normalize(&unit.name);
                let unit_traits: HashSet<String> =
                    unit.traits.iter().map(|t| normalize(t)).collect();
                champions.iter().all(|c| *c == name)
                    && traits.iter().all(|t| unit_traits.contains(t))
            })
            .cloned()
            .collect()
    }
}

impl UnitCatalog for StaticCatalog {
    fn search(&self, query: &str) -> CatalogFuture<Vec<SearchItem>> {
        future::ready(Ok(self.search_now(query))).boxed()
    }

    fn filter(&self, champions: &[String], traits: &[String]) -> CatalogFuture<Vec<Unit>> {
        future::ready(Ok(self.filter_now(champions, traits))).boxed()
    }
}

/// The demo roster shown when running offline.
pub fn demo_roster() -> Vec<Unit> {
    vec![
        Unit::new("Alistar", ["Golden Ox", "Bruiser"]),
        Unit::new("Annie", ["Golden Ox", "A.M.P."]),
        Unit::new("Aphelios", ["Golden Ox", "Marksman"]),
        Unit::new("Yuumi", ["Anima Squad", "A.M.P.", "Strategist"]),
        Unit::new("Aurora", ["Anima Squad", "Dynamo"]),
        Unit::new("Brand", ["Street Demon", "Techie"]),
        Unit::new("Braum", ["Syndicate", "Vanguard"]),
        Unit::new("Jinx", ["Street Demon", "Marksman"]),
        Unit::new("Jhin", ["Exotech", "Marksman", "Dynamo"]),
    ]
}
