// src/bin/test_quote.rs
use dotenv::dotenv;
use recovery_quote_backend::config::AppConfig;
use recovery_quote_backend::services::pricing::{
    calculator_quote, generic_quote, raid_quote, CalculatorRequest, QuoteRequest, RaidQuoteRequest,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let rates = config.load_rate_table()?;

    for (device, damage, capacity) in [
        ("hard-drive", "physical", "8TB"),
        ("ssd", "logical", "2TB"),
        ("memory-card", "physical", "500GB"),
        ("toaster", "logical", "1TB"),
    ] {
        let quote = generic_quote(
            &rates,
            &QuoteRequest {
                device_type: device.to_string(),
                damage: damage.to_string(),
                urgency: "standard".to_string(),
                capacity: Some(capacity.to_string()),
            },
        );
        println!("{} / {} / {}: {} ({})", device, damage, capacity, quote.range, quote.turnaround);
        println!("  {}", quote.explanation);
    }

    for (level, drives, physical) in [("raid5", 5, false), ("raid6", 4, true), ("raid10", 8, true)] {
        let quote = raid_quote(
            &rates,
            &RaidQuoteRequest {
                raid_level: level.to_string(),
                drive_count: drives,
                is_physical_damage: physical,
            },
        );
        println!(
            "{} x{} (physical: {}): {} ({}) - {}",
            level, drives, physical, quote.range, quote.turnaround, quote.success_rate
        );
    }

    let quote = calculator_quote(
        &rates,
        &CalculatorRequest {
            device_type: "hdd".to_string(),
            failure_type: "clicking".to_string(),
            capacity_gb: 1000.0,
            urgency: "urgent".to_string(),
        },
    );
    println!("calculator hdd/clicking/1TB/urgent: ${} - ${}", quote.min, quote.max);

    Ok(())
}
