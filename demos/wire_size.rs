//! TOON vs JSON wire-size comparison for tabular data.
//!
//! Repeated field names are TOON's main savings: JSON spells every key on
//! every record, TOON spells them once in the header.
//!
//! Run with: `cargo run --example wire_size`

use serde::Serialize;
use toon_records::to_string;

#[derive(Serialize, Clone)]
struct Reading {
    sensor: String,
    value: f64,
    unit: String,
    ok: bool,
}

fn main() {
    let readings: Vec<Reading> = (0..50)
        .map(|i| Reading {
            sensor: format!("sensor-{:02}", i),
            value: 20.0 + f64::from(i) * 0.25,
            unit: "C".to_string(),
            ok: i % 7 != 0,
        })
        .collect();

    let toon = to_string(&readings, "readings").expect("encode failed");
    let json = serde_json::to_string(&readings).expect("encode failed");

    println!("records:    {}", readings.len());
    println!("TOON bytes: {}", toon.len());
    println!("JSON bytes: {}", json.len());
    println!(
        "savings:    {:.1}%",
        100.0 * (1.0 - toon.len() as f64 / json.len() as f64)
    );

    println!("\nfirst TOON lines:");
    for line in toon.lines().take(4) {
        println!("{}", line);
    }
}
