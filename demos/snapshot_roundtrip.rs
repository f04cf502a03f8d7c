//! # Snapshot Round Trip Example
//!
//! Exports a store to a JSON lines file from async code, reloads it into a
//! fresh store and checks the two match.
//!
//! Run with:
//! ```bash
//! cargo run --example snapshot_roundtrip
//! ```

use serde::{Deserialize, Serialize};
use seqstore::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Measurement {
    station: String,
    celsius: f64,
}

#[tokio::main]
async fn main() -> StoreResult<()> {
    let store: Store<Measurement> = (0..1000)
        .map(|i| Measurement {
            station: format!("station-{}", i % 7),
            celsius: (i % 40) as f64 - 5.0,
        })
        .collect();

    let dir = std::env::temp_dir().join("seqstore-demo");
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join("measurements.jsonl");

    let written = save_json_lines(&store, &path).await?;
    println!("💾 Wrote {written} records to {}", path.display());

    let restored: Store<Measurement> = load_json_lines(&path, written).await?;
    assert_eq!(restored.get_all(), store.get_all());
    println!("✅ Restored {} records", restored.len());

    // The array form is a different wire format
    let array = restored.to_json()?;
    println!("📦 JSON array form is {} bytes", array.len());

    Ok(())
}
