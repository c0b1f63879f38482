//! Your first TOON experience: encode a list of records, decode it back.
//!
//! Run with: `cargo run --example quick_start`

use serde::{Deserialize, Serialize};
use toon_records::{from_str, to_string};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    role: String,
}

fn main() -> toon_records::Result<()> {
    let users = vec![
        User {
            id: 1,
            name: "Alice".to_string(),
            role: "admin".to_string(),
        },
        User {
            id: 2,
            name: "Bob, the second".to_string(),
            role: "user".to_string(),
        },
    ];

    let toon = to_string(&users, "users")?;
    println!("Encoded:\n{}\n", toon);

    let back: Vec<User> = from_str(&toon)?;
    println!("Decoded {} users; first is {:?}", back.len(), back[0]);

    assert_eq!(users, back);
    Ok(())
}
