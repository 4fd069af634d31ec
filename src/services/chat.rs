// src/services/chat.rs
//! Pricing and location blocks appended to the assistant's answer.
use log::debug;
use regex::Regex;

use super::directory::{self, Partner};
use super::pricing::{generic_quote, raid_quote, QuoteRequest, RaidQuoteRequest};
use super::rate_table::RateTable;
use crate::models::{ChatRequest, RaidConfig};

const DEFAULT_CAPACITY: &str = "2TB";
const DEFAULT_DEVICE: &str = "hard-drive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChatIntent {
    pub asks_location: bool,
    pub asks_price: bool,
}

pub fn detect_intent(message: &str) -> ChatIntent {
    let message = message.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|n| message.contains(n));
    ChatIntent {
        asks_location: any(&["location", "near me", "in my area"]),
        asks_price: any(&["price", "cost", "how much"]),
    }
}

/// "my 8 tb drive" -> "8TB".
pub fn extract_capacity(message: &str) -> Option<String> {
    let re = Regex::new(r"(?i)(\d+)\s*(tb|gb)").ok()?;
    let caps = re.captures(message)?;
    Some(format!("{}{}", &caps[1], caps[2].to_uppercase()))
}

pub fn mentions_physical_damage(message: &str) -> bool {
    let message = message.to_lowercase();
    ["physical", "clicking", "dropped", "water", "not spinning"]
        .iter()
        .any(|k| message.contains(k))
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|i| format!("  • {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn partner_card(p: &Partner) -> String {
    format!(
        "🏢 {}\n📍 {}\n📞 {}\n🌐 {}\n\n✨ Specialties:\n{}\n\n🏆 Key Features:\n{}\n\n📋 Certifications:\n{}\n\n💰 Pricing:\n  • Diagnostic: {}\n  • Standard Recovery: {}\n  • Emergency Service: {}\n",
        p.name,
        p.contact.address,
        p.contact.phone,
        p.contact.website,
        bullets(p.specialties),
        bullets(p.features),
        bullets(p.certifications),
        p.pricing.diagnostic,
        p.pricing.standard_recovery,
        p.pricing.emergency_service,
    )
}

pub fn location_block(user_location: &str) -> String {
    let recommendation = directory::recommend(user_location);
    let cards: Vec<String> = recommendation.companies.iter().map(|p| partner_card(p)).collect();
    let mut block = format!("\n\n{}\n\n{}", recommendation.message, cards.join("\n---\n\n"));
    if let Some(local) = recommendation.local_info {
        block.push_str(&format!("\n\n📌 Local Information:\n{}", local));
    }
    if let Some(shipping) = recommendation.shipping_info {
        block.push_str(&format!("\n\n📦 Shipping Information:\n{}", shipping));
    }
    block
}

fn partner_contacts() -> String {
    let kc = directory::hard_drive_repair();
    let dallas = directory::twenty_four_hour_data();
    format!(
        "• Hard Drive Repair (Kansas City): {}\n  {}\n\n• 24 Hour Data (Dallas): {}\n  {}",
        kc.contact.phone, kc.contact.website, dallas.contact.phone, dallas.contact.website
    )
}

pub fn raid_block(table: &RateTable, raid: &RaidConfig, physical: bool) -> String {
    let quote = raid_quote(
        table,
        &RaidQuoteRequest {
            raid_level: raid.level.clone(),
            drive_count: raid.drives,
            is_physical_damage: physical,
        },
    );
    let level = raid.level.to_uppercase();
    format!(
        "\n\nRAID Recovery Estimate ({level}, {drives} drives):\n\
💰 Estimated Range: {range}\n\
⏱️ Expected Timeframe: {turnaround}\n\n\
📊 Configuration Details:\n\
• RAID Level: {level}\n\
• Number of Drives: {drives}\n\
• Risk Level: {risk}\n\
• Recovery Method: {recovery}\n\
• Success Rate: {success}\n\n\
🔧 Recovery Process:\n\
• Full system assessment\n\
• Drive imaging and verification\n\
• RAID reconstruction\n\
• Data extraction and validation\n\n\
⚠️ Important Notes:\n\
• Stop using the array immediately\n\
• Keep all drives in original configuration\n\
• Document any error messages\n\
• Maintain drive order if possible\n\n\
📞 Expert Consultation:\n{contacts}",
        level = level,
        drives = raid.drives,
        range = quote.range,
        turnaround = quote.turnaround,
        risk = quote.risk,
        recovery = quote.recovery,
        success = quote.success_rate,
        contacts = partner_contacts(),
    )
}

pub fn nas_block() -> String {
    format!(
        "\n\nFor NAS Devices, we need additional information to provide an accurate quote:\n\n\
📋 Required Information:\n\
• Number of drives\n\
• RAID configuration (if applicable)\n\
• Total storage capacity\n\
• Type of failure\n\n\
🔧 Common NAS Issues:\n\
• Multiple drive failures\n\
• Controller failure\n\
• Configuration loss\n\
• Operating system corruption\n\n\
📞 Contact our NAS specialists directly:\n{}",
        partner_contacts()
    )
}

pub fn generic_block(table: &RateTable, device: &str, capacity: &str, physical: bool) -> String {
    let quote = generic_quote(
        table,
        &QuoteRequest {
            device_type: device.to_string(),
            damage: if physical { "physical" } else { "logical" }.to_string(),
            urgency: "standard".to_string(),
            capacity: Some(capacity.to_string()),
        },
    );
    let list = |items: &[String]| {
        items
            .iter()
            .map(|i| format!("• {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "\n\nPricing Estimate for {}:\n💰 Estimated Range: {}\n⏱️ Expected Timeframe: {}\n\n📋 {}\n\n\
Key Recommendations:\n{}\n\n✅ Our Guarantees:\n{}\n\n📞 Get an Accurate Quote:\n{}",
        device.replacen('-', " ", 1),
        quote.range,
        quote.turnaround,
        quote.explanation,
        list(&quote.recommendations),
        list(&quote.guarantees),
        partner_contacts(),
    )
}

pub fn pricing_block(table: &RateTable, request: &ChatRequest, last_message: &str) -> String {
    let capacity = extract_capacity(last_message)
        .or_else(|| request.selected_capacity.clone().filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_CAPACITY.to_string());
    let physical = mentions_physical_damage(last_message);
    let device = request
        .selected_device_type
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DEVICE);
    debug!("Pricing block for {} / {} (physical: {})", device, capacity, physical);

    match (device, &request.raid_config) {
        ("raid", Some(raid)) => raid_block(table, raid, physical),
        ("nas", _) => nas_block(),
        _ => generic_block(table, device, &capacity, physical),
    }
}

/// Everything to append after the model's answer; empty when no intent matched.
pub fn augmentation(table: &RateTable, request: &ChatRequest) -> String {
    let last_message = match request.messages.last() {
        Some(m) => m.content.as_str(),
        None => return String::new(),
    };
    let intent = detect_intent(last_message);
    let mut extra = String::new();

    if intent.asks_location {
        if let Some(location) = request.user_location.as_deref().filter(|l| !l.trim().is_empty()) {
            extra.push_str(&location_block(location));
        }
    }
    // Appended after the location block, never in place of it.
    if intent.asks_price {
        extra.push_str(&pricing_block(table, request, last_message));
    }
    extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(message)],
            user_location: None,
            selected_device_type: None,
            selected_capacity: None,
            raid_config: None,
        }
    }

    #[test]
    fn intents_are_substring_matches() {
        assert!(detect_intent("How MUCH will this be?").asks_price);
        assert!(detect_intent("what's the cost").asks_price);
        assert!(detect_intent("any lab near me?").asks_location);
        assert_eq!(detect_intent("hello there"), ChatIntent::default());
    }

    #[test]
    fn capacity_is_read_from_the_message() {
        assert_eq!(extract_capacity("my 8 tb drive"), Some("8TB".to_string()));
        assert_eq!(extract_capacity("a 500GB disk"), Some("500GB".to_string()));
        assert_eq!(extract_capacity("a big disk"), None);
    }

    #[test]
    fn physical_keywords() {
        assert!(mentions_physical_damage("It started CLICKING"));
        assert!(mentions_physical_damage("the drive is not spinning"));
        assert!(!mentions_physical_damage("I deleted a folder"));
    }

    #[test]
    fn raid_pricing_question_gets_raid_estimate() {
        let mut req = request("how much to recover my array?");
        req.selected_device_type = Some("raid".to_string());
        req.raid_config = Some(RaidConfig {
            level: "raid5".to_string(),
            drives: 5,
        });
        let block = augmentation(&RateTable::standard(), &req);
        assert!(block.contains("RAID Recovery Estimate (RAID5, 5 drives)"));
        assert!(block.contains("$1500 - $3750"));
        assert!(block.contains("5-7 business days"));
        assert!(block.contains("816-421-5725"));
        assert!(block.contains("866-598-3282"));
    }

    #[test]
    fn nas_pricing_question_asks_for_details() {
        let mut req = request("what is the price?");
        req.selected_device_type = Some("nas".to_string());
        let block = augmentation(&RateTable::standard(), &req);
        assert!(block.contains("For NAS Devices"));
        assert!(block.contains("Number of drives"));
    }

    #[test]
    fn generic_pricing_uses_message_capacity_and_damage() {
        let mut req = request("price for my 8TB drive that is clicking?");
        req.selected_capacity = Some("2TB".to_string());
        let block = augmentation(&RateTable::standard(), &req);
        assert!(block.contains("Pricing Estimate for hard drive"));
        assert!(block.contains("$650 - $1560"));
        assert!(block.contains("This estimate is for a 8TB hard drive with physical damage."));
    }

    #[test]
    fn generic_pricing_defaults_to_two_terabyte_logical() {
        let mut req = request("what does it cost");
        req.selected_device_type = Some("flash-drive".to_string());
        let block = augmentation(&RateTable::standard(), &req);
        assert!(block.contains("Pricing Estimate for flash drive"));
        assert!(block.contains("$200 - $600"));
        assert!(block.contains("2-4 business days"));
    }

    #[test]
    fn location_question_lists_partners() {
        let mut req = request("is there a location near me?");
        req.user_location = Some("Overland Park, Kansas".to_string());
        let block = augmentation(&RateTable::standard(), &req);
        let kc = block.find("🏢 Hard Drive Repair").unwrap();
        let dallas = block.find("🏢 24 Hour Data").unwrap();
        assert!(kc < dallas);
        assert!(block.contains("📌 Local Information:"));
    }

    #[test]
    fn location_without_known_location_adds_nothing() {
        let block = augmentation(&RateTable::standard(), &request("any location near me?"));
        assert!(block.is_empty());
    }

    #[test]
    fn location_and_price_blocks_both_appear() {
        let mut req = request("how much at a location near me?");
        req.user_location = Some("Seattle".to_string());
        let block = augmentation(&RateTable::standard(), &req);
        let shipping = block.find("📦 Shipping Information:").unwrap();
        let pricing = block.find("Pricing Estimate for hard drive").unwrap();
        assert!(shipping < pricing);
    }
}
