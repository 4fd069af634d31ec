// src/services/pricing.rs
use log::warn;
use serde::{Deserialize, Serialize};

use super::rate_table::{DamageCategory, RateTable, UnknownInput, Urgency};

pub const QUOTE_FACTORS: [&str; 4] = [
    "Type and severity of damage",
    "Drive capacity and complexity",
    "Required turnaround time",
    "Current drive condition",
];

pub const QUOTE_GUARANTEES: [&str; 4] = [
    "Free evaluation",
    "No data, no charge policy",
    "Secure certified facilities",
    "Confidentiality guaranteed",
];

pub const QUOTE_RECOMMENDATIONS: [&str; 4] = [
    "Stop using the drive immediately to prevent further damage",
    "Don't attempt DIY recovery on physically damaged drives",
    "Choose emergency service only if time-critical",
    "Professional clean room required for physical damage",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub device_type: String,
    #[serde(default)]
    pub damage: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub capacity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub min_price: u64,
    pub max_price: u64,
    pub estimated: String,
    pub range: String,
    pub turnaround: String,
    pub explanation: String,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub guarantees: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_inputs: Vec<UnknownInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidQuoteRequest {
    pub raid_level: String,
    pub drive_count: u32,
    #[serde(default)]
    pub is_physical_damage: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidQuote {
    pub raid_level: String,
    pub drive_count: u32,
    pub min_price: u64,
    pub max_price: u64,
    pub range: String,
    pub turnaround: String,
    pub risk: String,
    pub recovery: String,
    pub success_rate: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_inputs: Vec<UnknownInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorRequest {
    pub device_type: String,
    pub failure_type: String,
    #[serde(default)]
    pub capacity_gb: f64,
    #[serde(default)]
    pub urgency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorQuote {
    pub min: u64,
    pub max: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_inputs: Vec<UnknownInput>,
}

fn round_price(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

fn dollar_range(min: u64, max: u64) -> String {
    format!("${} - ${}", min, max)
}

fn collect_unknown(found: impl IntoIterator<Item = Option<UnknownInput>>) -> Vec<UnknownInput> {
    let unknown: Vec<UnknownInput> = found.into_iter().flatten().collect();
    for u in &unknown {
        warn!("Quote fell back to a default value: {}", u);
    }
    unknown
}

/// Rate-table quote scaled by the capacity tier.
pub fn generic_quote(table: &RateTable, request: &QuoteRequest) -> QuoteResult {
    let device = request.device_type.trim();
    let damage = DamageCategory::from_issue(&request.damage);
    let urgency = Urgency::from_label(&request.urgency);
    let capacity = request.capacity.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let (entry, unknown_device) = table.rate(device, damage, urgency);
    let (multiplier, unknown_capacity) = table.capacity_multiplier(capacity);

    let min_price = round_price(entry.min_price as f64 * multiplier);
    let max_price = round_price(entry.max_price as f64 * multiplier);

    let mut subject = String::new();
    if let Some(capacity) = capacity {
        subject.push_str(capacity);
        subject.push(' ');
    }
    subject.push_str(&device.replacen('-', " ", 1));

    let mut explanation = vec![format!(
        "This estimate is for a {} with {} damage.",
        subject,
        damage.as_str()
    )];
    if multiplier > 1.0 {
        explanation.push("The price includes an adjustment for the larger drive capacity.".to_string());
    }
    explanation.push(
        match damage {
            DamageCategory::Physical => "Physical damage requires clean room work and specialized equipment.",
            DamageCategory::Logical => "Logical damage typically requires less intensive recovery methods.",
        }
        .to_string(),
    );

    QuoteResult {
        min_price,
        max_price,
        estimated: format!("{}-{}", min_price, max_price),
        range: dollar_range(min_price, max_price),
        turnaround: entry.turnaround.clone(),
        explanation: explanation.join(" "),
        factors: QUOTE_FACTORS.iter().map(|s| s.to_string()).collect(),
        recommendations: QUOTE_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        guarantees: QUOTE_GUARANTEES.iter().map(|s| s.to_string()).collect(),
        unknown_inputs: collect_unknown([unknown_device, unknown_capacity]),
    }
}

/// `max(1, (drives - baseline) * step)`; fewer drives than the baseline still
/// price at 1.
pub fn drive_multiplier(table: &RateTable, drive_count: u32) -> f64 {
    let raid = table.raid_pricing();
    let extra = drive_count as f64 - raid.baseline_drives as f64;
    (extra * raid.per_drive_step).max(1.0)
}

/// Drive counts are taken as given; minimums are enforced by callers.
pub fn raid_quote(table: &RateTable, request: &RaidQuoteRequest) -> RaidQuote {
    let raid = table.raid_pricing();
    let base = if request.is_physical_damage {
        raid.physical_base
    } else {
        raid.logical_base
    };
    let (assessment, unknown_level) = table.raid_assessment(&request.raid_level);

    let min_price = round_price(base * drive_multiplier(table, request.drive_count) * assessment.complexity);
    let max_price = round_price(min_price as f64 * raid.max_price_factor);
    let turnaround = if request.is_physical_damage {
        raid.physical_turnaround.clone()
    } else {
        raid.logical_turnaround.clone()
    };

    RaidQuote {
        raid_level: request.raid_level.clone(),
        drive_count: request.drive_count,
        min_price,
        max_price,
        range: dollar_range(min_price, max_price),
        turnaround,
        risk: assessment.risk,
        recovery: assessment.recovery,
        success_rate: assessment.success_rate,
        unknown_inputs: collect_unknown([unknown_level]),
    }
}

/// Capacity factor for the calculator page, a capped linear curve.
pub fn calculator_capacity_multiplier(table: &RateTable, capacity_gb: f64) -> f64 {
    let calc = table.calculator();
    let gb = if capacity_gb.is_finite() { capacity_gb.max(0.0) } else { 0.0 };
    (1.0 + gb / calc.capacity_reference_gb * calc.capacity_slope).min(calc.capacity_cap)
}

pub fn calculator_quote(table: &RateTable, request: &CalculatorRequest) -> CalculatorQuote {
    let (device, unknown_device) = table.calculator_device(request.device_type.trim());
    let (failure, unknown_failure) = table.failure_multiplier(request.failure_type.trim());
    let urgency = if request.urgency.trim().eq_ignore_ascii_case("urgent") {
        table.calculator().urgent_multiplier
    } else {
        1.0
    };
    let capacity = calculator_capacity_multiplier(table, request.capacity_gb);
    // base * failure * urgency * capacity, in that order, then rounded
    let bound = |base: u32| round_price(base as f64 * failure * urgency * capacity);

    CalculatorQuote {
        min: bound(device.min_price),
        max: bound(device.max_price),
        unknown_inputs: collect_unknown([unknown_device, unknown_failure]),
    }
}
