//! Benchmark for collection-sync reducers using city data.
//!
//! Reads a JSON array of cities (or generates one when no file is given),
//! pushes it through a service's read/delete actions against an in-process
//! transport, and reports how long each fold takes.

use std::fs;
use std::path::Path;
use std::time::Instant;

use collection_sync::{
    CollectionDataService, Error, Field, MemoryStore, Model, Query, Request, Success, Transport,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct City {
    id: u32,
    name: String,
    country_code: String,
    state_code: String,
    population: Option<i64>,
    timezone: Option<String>,
}

const COUNTRIES: [&str; 6] = ["US", "FR", "DE", "JP", "BR", "IN"];

fn generate_cities(count: u32) -> Vec<City> {
    (0..count)
        .map(|id| City {
            id,
            name: format!("City {}", id),
            country_code: COUNTRIES[id as usize % COUNTRIES.len()].to_string(),
            state_code: format!("S{}", id % 50),
            population: (id % 3 != 0).then_some(i64::from(id) * 17),
            timezone: None,
        })
        .collect()
}

// =============================================================================
// IN-PROCESS TRANSPORT
// =============================================================================

/// Answers every request with the same canned body.
struct Canned {
    body: Value,
}

impl Transport for Canned {
    fn execute<'a>(&self, _request: Request, on_success: Success<'a>) -> Result<(), Error> {
        on_success(self.body.clone())
    }
}

fn city_model() -> Model {
    Model::builder("cities")
        .field("country_code", Field::text("country_code").primary())
        .field("id", Field::numeric("id").primary())
        .field("name", Field::text("name"))
        .field("population", Field::numeric("population"))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cities: Vec<City> = match std::env::args().nth(1) {
        Some(path) if Path::new(&path).exists() => {
            println!("Loading cities from: {}", path);
            let json_data = fs::read_to_string(&path)?;
            let parse_start = Instant::now();
            let cities = serde_json::from_str(&json_data)?;
            println!("Parsed in {:?}", parse_start.elapsed());
            cities
        }
        _ => {
            println!("No data file given, generating 150000 cities");
            generate_cities(150_000)
        }
    };
    println!("Loaded {} cities", cities.len());

    let body = serde_json::to_value(&cities)?;
    let service = CollectionDataService::builder(city_model())
        .base_url("http://bench.local")
        .build();
    let store = MemoryStore::new();
    service.register(&store);

    let population = service
        .model()
        .numeric_field("population")
        .ok_or("population field missing")?;
    let query = Query::default()
        .filter(population.greater_than(0))
        .order_by(population.order_descending())
        .limit(cities.len() as u64);

    // Read: upsert everything
    let read_start = Instant::now();
    service.read(&Canned { body }, &store, query.clone())?;
    let read_time = read_start.elapsed();
    let stored = service.instances(&store).len();
    println!("\nRead: {} records stored in {:?}", stored, read_time);
    println!(
        "  Throughput: {:.0} records/s",
        cities.len() as f64 / read_time.as_secs_f64()
    );

    // Refresh: same batch again, collection size must not change
    let refresh_body = serde_json::to_value(&cities)?;
    let refresh_start = Instant::now();
    service.read(&Canned { body: refresh_body }, &store, query)?;
    let refresh_time = refresh_start.elapsed();
    println!(
        "Refresh: {} records stored in {:?}",
        service.instances(&store).len(),
        refresh_time
    );

    // Delete: every other city
    let doomed: Vec<&City> = cities.iter().step_by(2).collect();
    let ids = service.model().numeric_field("id").ok_or("id field missing")?;
    let delete_query = Query::default().filter(ids.is_in(doomed.iter().map(|c| c.id).take(10)));
    let delete_body = serde_json::to_value(&doomed)?;
    let delete_start = Instant::now();
    service.delete(&Canned { body: delete_body }, &store, delete_query)?;
    let delete_time = delete_start.elapsed();
    println!(
        "Delete: {} removed, {} remaining in {:?}",
        doomed.len(),
        service.instances(&store).len(),
        delete_time
    );

    Ok(())
}
