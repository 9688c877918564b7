// Shared test helpers: table fixtures and a scripted geocoder.
//
// Included with `mod helpers;` from the integration test files.

#![allow(dead_code)] // Each test file uses a different subset

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use geobatch::{
    BatchSettings, CheckpointStore, Coordinates, GeocodeOutcome, GeocodeStatus, Geocoder,
    PrecisionTier, TableSchema,
};
use tempfile::TempDir;

pub const HEADER: &str = "Name,Address,Region,Price,ContactsPerMonth,Hours,lat,lon";

/// Writes a table with the default schema. `coords` rows are pre-resolved.
pub fn write_table(dir: &TempDir, rows: &[(&str, &str, Option<(f64, f64)>)]) -> PathBuf {
    let path = dir.path().join("map_prices.csv");
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for (idx, (address, region, coords)) in rows.iter().enumerate() {
        let (lat, lon) = match coords {
            Some((lat, lon)) => (format!("{:?}", lat), format!("{:?}", lon)),
            None => (String::new(), String::new()),
        };
        contents.push_str(&format!(
            "Brand {},\"{}\",{},{},{},09:00-21:00,{},{}\n",
            idx,
            address,
            region,
            100 + idx,
            10 * idx,
            lat,
            lon
        ));
    }
    fs::write(&path, contents).expect("Failed to write test table");
    path
}

pub fn store_for(path: &PathBuf) -> CheckpointStore {
    CheckpointStore::new(path, TableSchema::default())
}

/// Settings with no pacing delay so tests run fast.
pub fn fast_settings() -> BatchSettings {
    BatchSettings {
        request_delay: std::time::Duration::ZERO,
        ..Default::default()
    }
}

/// What the scripted geocoder does on a call.
pub enum Step {
    Return(GeocodeOutcome),
    /// Never completes, like a request stuck in flight
    Hang,
}

pub fn exact(lat: f64, lon: f64) -> Step {
    Step::Return(GeocodeOutcome::located(
        Coordinates::new(lat, lon),
        &PrecisionTier::Exact,
    ))
}

pub fn unresolved(status: GeocodeStatus) -> Step {
    Step::Return(GeocodeOutcome::unresolved(status))
}

/// Geocoder driven by a closure of (1-based call number, address, region).
pub struct ScriptedGeocoder<F> {
    script: F,
    calls: Mutex<Vec<String>>,
}

impl<F> ScriptedGeocoder<F>
where
    F: Fn(usize, &str, &str) -> Step,
{
    pub fn new(script: F) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn addresses(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl<F> Geocoder for ScriptedGeocoder<F>
where
    F: Fn(usize, &str, &str) -> Step,
{
    async fn resolve(&self, address: &str, region: &str) -> GeocodeOutcome {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(address.to_string());
            calls.len()
        };
        match (self.script)(call, address, region) {
            Step::Return(outcome) => outcome,
            Step::Hang => std::future::pending().await,
        }
    }
}

/// Geocoder that resolves every address to a position derived from the call number.
pub fn always_exact() -> ScriptedGeocoder<impl Fn(usize, &str, &str) -> Step> {
    ScriptedGeocoder::new(|call, _, _| exact(55.0 + call as f64 / 100.0, 37.0))
}
