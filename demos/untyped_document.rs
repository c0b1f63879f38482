//! Working with the untyped table model directly.
//!
//! The `Document` layer parses and renders TOON without any typed records,
//! which is handy when the schema is only known at runtime.
//!
//! Run with: `cargo run --example untyped_document`

use toon_records::Document;

fn main() -> toon_records::Result<()> {
    let text = "inventory[3]{sku,location,qty}:\n  A-100,warehouse-1,12\n  B-200,warehouse-2,0\n  C-300,storefront,4";

    let doc = Document::parse(text)?;
    println!("root:   {}", doc.root_name);
    println!("fields: {:?}", doc.fields);

    for row in &doc.rows {
        println!("row:    {:?}", row);
    }

    // Mutate and re-render.
    let mut doc = doc;
    doc.rows
        .push(vec!["D-400".to_string(), "in transit, due Friday".to_string(), "9".to_string()]);

    println!("\nre-rendered:\n{}", doc);
    Ok(())
}
