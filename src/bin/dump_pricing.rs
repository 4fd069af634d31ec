// src/bin/dump_pricing.rs
// Prints the built-in pricing tables in the format PRICING_TABLE_PATH accepts.
use recovery_quote_backend::services::rate_table::PricingTables;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let tables = PricingTables::default();
    tables.validate()?;
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}
