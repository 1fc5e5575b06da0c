//! In-memory catalog source for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use pokedex::application::services::CatalogService;
use pokedex::application::SourceFailure;
use pokedex::config::Settings;
use pokedex::infrastructure::traits::CatalogSource;
use pokedex::util::testing;

pub const BASE: &str = "http://catalog.test/api/v2";

/// Serves a synthetic listing from `names` plus canned bodies keyed by URL.
///
/// Unknown URLs answer HTTP 404.
#[derive(Default)]
pub struct MockCatalogSource {
    names: Vec<String>,
    responses: Mutex<HashMap<String, Result<Value, SourceFailure>>>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl MockCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Every request sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(self, url: impl Into<String>, body: Value) -> Self {
        self.responses.lock().unwrap().insert(url.into(), Ok(body));
        self
    }

    pub fn fail(self, url: impl Into<String>, failure: SourceFailure) -> Self {
        self.responses.lock().unwrap().insert(url.into(), Err(failure));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn listing_body(&self, query: &str) -> Value {
        let mut limit = 20usize;
        let mut offset = 0usize;
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("limit", v)) => limit = v.parse().unwrap(),
                Some(("offset", v)) => offset = v.parse().unwrap(),
                _ => {}
            }
        }
        let results: Vec<Value> = self
            .names
            .iter()
            .enumerate()
            .skip(offset)
            .take(limit)
            .map(|(i, name)| json!({ "name": name, "url": format!("{}/pokemon/{}/", BASE, i + 1) }))
            .collect();
        json!({
            "count": self.names.len(),
            "next": null,
            "previous": null,
            "results": results,
        })
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn get_json(&self, url: &str) -> Result<Value, SourceFailure> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(canned) = self.responses.lock().unwrap().get(url) {
            return canned.clone();
        }
        let listing_prefix = format!("{}/pokemon?", BASE);
        if let Some(query) = url.strip_prefix(&listing_prefix) {
            return Ok(self.listing_body(query));
        }
        Err(SourceFailure::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn test_settings() -> Settings {
    Settings {
        base_url: BASE.to_string(),
        ..Settings::default()
    }
}

/// Catalog service over `source`, returning the source for request inspection.
pub fn catalog_with(
    source: MockCatalogSource,
    settings: Settings,
) -> (CatalogService, Arc<MockCatalogSource>) {
    testing::init_test_setup();
    let source = Arc::new(source);
    let catalog = CatalogService::new(source.clone(), Arc::new(settings));
    (catalog, source)
}

pub fn catalog(source: MockCatalogSource) -> (CatalogService, Arc<MockCatalogSource>) {
    catalog_with(source, test_settings())
}

/// `name-1`, `name-2`, ... `name-{n}`.
pub fn numbered_names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("name-{}", i)).collect()
}

pub const STARTERS: [&str; 12] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "caterpie",
    "metapod",
    "butterfree",
];

pub fn species_body(chain_id: u32) -> Value {
    json!({
        "id": chain_id,
        "evolution_chain": { "url": format!("{}/evolution-chain/{}/", BASE, chain_id) }
    })
}

fn species_ref(id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("{}/pokemon-species/{}/", BASE, id) })
}

pub fn link(id: u32, name: &str, evolves_to: Vec<Value>) -> Value {
    json!({ "species": species_ref(id, name), "evolves_to": evolves_to, "is_baby": false })
}

pub fn detail_body(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "" } },
            { "slot": 2, "type": { "name": "poison", "url": "" } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false },
            { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true }
        ],
        "sprites": {
            "other": {
                "official-artwork": { "front_default": "https://img.test/1.png" }
            }
        }
    })
}
