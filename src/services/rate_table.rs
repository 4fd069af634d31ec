// src/services/rate_table.rs
//! Static pricing tables and the lookups the quote calculators run against.
//!
//! Every table is plain data held in [`PricingTables`], which serializes to
//! the JSON accepted by `PRICING_TABLE_PATH`. [`RateTable`] indexes it once at
//! startup. Lookups never fail: a missing key resolves to the documented
//! default and reports an [`UnknownInput`] so callers can log it.
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    HardDrive,
    Ssd,
    Raid,
    Nas,
    FlashDrive,
    MemoryCard,
}

impl DeviceType {
    pub const ALL: [DeviceType; 6] = [
        DeviceType::HardDrive,
        DeviceType::Ssd,
        DeviceType::Raid,
        DeviceType::Nas,
        DeviceType::FlashDrive,
        DeviceType::MemoryCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::HardDrive => "hard-drive",
            DeviceType::Ssd => "ssd",
            DeviceType::Raid => "raid",
            DeviceType::Nas => "nas",
            DeviceType::FlashDrive => "flash-drive",
            DeviceType::MemoryCard => "memory-card",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        DeviceType::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageCategory {
    Physical,
    Logical,
}

impl DamageCategory {
    /// Free-text issue descriptions count as physical only when they say so.
    pub fn from_issue(issue: &str) -> Self {
        if issue.to_lowercase().contains("physical") {
            DamageCategory::Physical
        } else {
            DamageCategory::Logical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageCategory::Physical => "physical",
            DamageCategory::Logical => "logical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Standard,
    Emergency,
}

impl Urgency {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("emergency") {
            Urgency::Emergency
        } else {
            Urgency::Standard
        }
    }
}

/// An input the tables did not recognise and replaced with a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum UnknownInput {
    DeviceType(String),
    Capacity(String),
    RaidLevel(String),
    CalculatorDevice(String),
    FailureType(String),
}

impl fmt::Display for UnknownInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnknownInput::DeviceType(v) => write!(f, "unknown device type '{}'", v),
            UnknownInput::Capacity(v) => write!(f, "unknown capacity label '{}'", v),
            UnknownInput::RaidLevel(v) => write!(f, "unknown RAID level '{}'", v),
            UnknownInput::CalculatorDevice(v) => write!(f, "unknown calculator device '{}'", v),
            UnknownInput::FailureType(v) => write!(f, "unknown failure type '{}'", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub min_price: u32,
    pub max_price: u32,
    pub turnaround: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateKey {
    pub device: DeviceType,
    pub damage: DamageCategory,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRow {
    #[serde(flatten)]
    pub key: RateKey,
    #[serde(flatten)]
    pub entry: RateEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityTier {
    pub label: String,
    pub gigabytes: u32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidAssessment {
    pub complexity: f64,
    pub risk: String,
    pub recovery: String,
    pub success_rate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidLevelInfo {
    pub level: String,
    pub label: String,
    pub min_drives: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RaidAssessment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidPricing {
    pub physical_base: f64,
    pub logical_base: f64,
    pub baseline_drives: u32,
    pub per_drive_step: f64,
    pub max_price_factor: f64,
    pub physical_turnaround: String,
    pub logical_turnaround: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorDevice {
    pub id: String,
    pub name: String,
    pub min_price: u32,
    pub max_price: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureType {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorPricing {
    pub devices: Vec<CalculatorDevice>,
    pub fallback_device: String,
    pub failures: Vec<FailureType>,
    pub urgent_multiplier: f64,
    pub capacity_reference_gb: f64,
    pub capacity_slope: f64,
    pub capacity_cap: f64,
}

/// Every pricing constant the service uses, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTables {
    pub rates: Vec<RateRow>,
    pub default_rate: RateKey,
    pub capacity_tiers: Vec<CapacityTier>,
    pub raid_levels: Vec<RaidLevelInfo>,
    pub raid: RaidPricing,
    pub calculator: CalculatorPricing,
}

fn rate(
    device: DeviceType,
    damage: DamageCategory,
    urgency: Urgency,
    min_price: u32,
    max_price: u32,
    turnaround: &str,
) -> RateRow {
    RateRow {
        key: RateKey { device, damage, urgency },
        entry: RateEntry {
            min_price,
            max_price,
            turnaround: turnaround.to_string(),
        },
    }
}

fn tier(label: &str, gigabytes: u32, multiplier: f64) -> CapacityTier {
    CapacityTier {
        label: label.to_string(),
        gigabytes,
        multiplier,
    }
}

fn raid_level(
    level: &str,
    label: &str,
    min_drives: u32,
    assessment: Option<(f64, &str, &str, &str)>,
) -> RaidLevelInfo {
    RaidLevelInfo {
        level: level.to_string(),
        label: label.to_string(),
        min_drives,
        assessment: assessment.map(|(complexity, risk, recovery, success_rate)| RaidAssessment {
            complexity,
            risk: risk.to_string(),
            recovery: recovery.to_string(),
            success_rate: success_rate.to_string(),
        }),
    }
}

impl Default for PricingTables {
    fn default() -> Self {
        use DamageCategory::{Logical, Physical};
        use DeviceType::*;
        use Urgency::{Emergency, Standard};

        let rates = vec![
            rate(HardDrive, Physical, Standard, 500, 1200, "5-7 business days"),
            rate(HardDrive, Physical, Emergency, 1000, 2500, "24-48 hours"),
            rate(HardDrive, Logical, Standard, 300, 800, "3-5 business days"),
            rate(HardDrive, Logical, Emergency, 800, 2000, "24-48 hours"),
            rate(Ssd, Physical, Standard, 500, 1500, "5-7 business days"),
            rate(Ssd, Physical, Emergency, 1200, 2500, "24-48 hours"),
            rate(Ssd, Logical, Standard, 400, 900, "3-5 business days"),
            rate(Ssd, Logical, Emergency, 900, 2000, "24-48 hours"),
            rate(Raid, Physical, Standard, 1500, 3500, "7-10 business days"),
            rate(Raid, Physical, Emergency, 2500, 5000, "48-72 hours"),
            rate(Raid, Logical, Standard, 1000, 3000, "5-7 business days"),
            rate(Raid, Logical, Emergency, 2000, 4000, "48-72 hours"),
            rate(Nas, Physical, Standard, 1200, 3000, "7-10 business days"),
            rate(Nas, Physical, Emergency, 2000, 4500, "48-72 hours"),
            rate(Nas, Logical, Standard, 800, 2500, "5-7 business days"),
            rate(Nas, Logical, Emergency, 1800, 3500, "48-72 hours"),
            rate(FlashDrive, Physical, Standard, 500, 1000, "3-5 business days"),
            rate(FlashDrive, Physical, Emergency, 800, 1500, "24-48 hours"),
            rate(FlashDrive, Logical, Standard, 200, 600, "2-4 business days"),
            rate(FlashDrive, Logical, Emergency, 600, 1200, "24-48 hours"),
            rate(MemoryCard, Physical, Standard, 400, 900, "3-5 business days"),
            rate(MemoryCard, Physical, Emergency, 700, 1400, "24-48 hours"),
            rate(MemoryCard, Logical, Standard, 200, 500, "2-4 business days"),
            rate(MemoryCard, Logical, Emergency, 500, 1000, "24-48 hours"),
        ];

        let capacity_tiers = vec![
            tier("500GB", 500, 1.0),
            tier("1TB", 1_000, 1.0),
            tier("2TB", 2_000, 1.0),
            tier("4TB", 4_000, 1.0),
            tier("6TB", 6_000, 1.2),
            tier("8TB", 8_000, 1.3),
            tier("10TB", 10_000, 1.4),
            tier("12TB", 12_000, 1.5),
            tier("14TB", 14_000, 1.6),
            tier("16TB", 16_000, 1.7),
            tier("18TB", 18_000, 1.8),
            tier("20TB", 20_000, 2.0),
        ];

        let raid_levels = vec![
            raid_level(
                "raid0",
                "RAID 0 (Striping)",
                2,
                Some((1.0, "High risk - No redundancy", "Requires all drives to be functional", "70-80% success rate")),
            ),
            raid_level(
                "raid1",
                "RAID 1 (Mirroring)",
                2,
                Some((1.2, "Medium risk - Mirrored data", "Can recover from single drive failure", "85-95% success rate")),
            ),
            raid_level(
                "raid5",
                "RAID 5 (Single Parity)",
                3,
                Some((1.5, "Medium risk - Single parity", "Can recover from single drive failure", "80-90% success rate")),
            ),
            raid_level(
                "raid6",
                "RAID 6 (Double Parity)",
                4,
                Some((1.8, "Low risk - Double parity", "Can recover from up to two drive failures", "85-95% success rate")),
            ),
            raid_level(
                "raid10",
                "RAID 10 (Stripe + Mirror)",
                4,
                Some((1.6, "Low risk - Mirror + Stripe", "Can recover from multiple drive failures", "90-95% success rate")),
            ),
            raid_level("raid50", "RAID 50 (Stripe + Parity)", 6, None),
            raid_level("jbod", "JBOD (Just a Bunch of Disks)", 2, None),
            raid_level("custom", "Custom Configuration", 2, None),
        ];

        let calculator = CalculatorPricing {
            devices: vec![
                CalculatorDevice { id: "hdd".into(), name: "Hard Drive (HDD)".into(), min_price: 300, max_price: 800 },
                CalculatorDevice { id: "ssd".into(), name: "Solid State Drive (SSD)".into(), min_price: 400, max_price: 900 },
                CalculatorDevice { id: "usb".into(), name: "USB Flash Drive".into(), min_price: 200, max_price: 500 },
                CalculatorDevice { id: "raid".into(), name: "RAID Array".into(), min_price: 800, max_price: 2000 },
                CalculatorDevice { id: "other".into(), name: "Other Storage Device".into(), min_price: 300, max_price: 800 },
            ],
            fallback_device: "other".into(),
            failures: vec![
                FailureType { id: "physical".into(), name: "Physical Damage".into(), multiplier: 1.67 },
                FailureType { id: "logical".into(), name: "Logical Failure".into(), multiplier: 1.0 },
                FailureType { id: "water".into(), name: "Water Damage".into(), multiplier: 2.0 },
                FailureType { id: "fire".into(), name: "Fire Damage".into(), multiplier: 2.0 },
                FailureType { id: "not_spinning".into(), name: "Not Spinning".into(), multiplier: 1.67 },
                FailureType { id: "clicking".into(), name: "Clicking Sound".into(), multiplier: 1.67 },
                FailureType { id: "not_recognized".into(), name: "Not Recognized".into(), multiplier: 1.0 },
                FailureType { id: "other".into(), name: "Other Issue".into(), multiplier: 1.33 },
            ],
            urgent_multiplier: 1.5,
            capacity_reference_gb: 4000.0,
            capacity_slope: 0.5,
            capacity_cap: 1.5,
        };

        PricingTables {
            rates,
            default_rate: RateKey {
                device: HardDrive,
                damage: Physical,
                urgency: Standard,
            },
            capacity_tiers,
            raid_levels,
            raid: RaidPricing {
                physical_base: 1500.0,
                logical_base: 1000.0,
                baseline_drives: 2,
                per_drive_step: 0.3,
                max_price_factor: 2.5,
                physical_turnaround: "7-10 business days".into(),
                logical_turnaround: "5-7 business days".into(),
            },
            calculator,
        }
    }
}

impl PricingTables {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading pricing tables from {}", path.display()))?;
        let tables: PricingTables = serde_json::from_str(&raw)
            .with_context(|| format!("parsing pricing tables in {}", path.display()))?;
        Ok(tables)
    }

    /// Rejects tables that would break the quote invariants.
    pub fn validate(&self) -> Result<()> {
        for row in &self.rates {
            let RateEntry { min_price, max_price, .. } = &row.entry;
            if *min_price == 0 || *min_price > *max_price {
                bail!(
                    "rate {}/{}/{:?} has invalid range {}-{}",
                    row.key.device,
                    row.key.damage.as_str(),
                    row.key.urgency,
                    min_price,
                    max_price
                );
            }
        }
        if !self.rates.iter().any(|r| r.key == self.default_rate) {
            bail!("default rate {:?} is not present in the rate table", self.default_rate);
        }

        let mut tiers: Vec<&CapacityTier> = self.capacity_tiers.iter().collect();
        tiers.sort_by_key(|t| t.gigabytes);
        let mut previous = 1.0;
        for t in tiers {
            if t.multiplier < previous {
                bail!(
                    "capacity tier {} multiplier {} is below a smaller tier ({})",
                    t.label,
                    t.multiplier,
                    previous
                );
            }
            previous = t.multiplier;
        }

        for level in &self.raid_levels {
            if let Some(a) = &level.assessment {
                if a.complexity <= 0.0 {
                    bail!("RAID level {} has non-positive complexity", level.level);
                }
            }
        }
        if self.raid.physical_base <= 0.0 || self.raid.logical_base <= 0.0 || self.raid.max_price_factor < 1.0 {
            bail!("RAID base prices must be positive and the max factor at least 1");
        }

        let calc = &self.calculator;
        if !calc.devices.iter().any(|d| d.id == calc.fallback_device) {
            bail!("calculator fallback device '{}' is not defined", calc.fallback_device);
        }
        for d in &calc.devices {
            if d.min_price == 0 || d.min_price > d.max_price {
                bail!("calculator device {} has invalid range {}-{}", d.id, d.min_price, d.max_price);
            }
        }
        if calc.failures.iter().any(|f| f.multiplier <= 0.0) || calc.urgent_multiplier <= 0.0 {
            bail!("calculator multipliers must be positive");
        }
        if calc.capacity_reference_gb <= 0.0 || calc.capacity_cap < 1.0 {
            bail!("calculator capacity curve is invalid");
        }
        Ok(())
    }
}

/// "8 tb" and "8TB" name the same tier.
pub fn normalize_capacity_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Indexed, read-only view over [`PricingTables`].
#[derive(Debug, Clone)]
pub struct RateTable {
    tables: PricingTables,
    rates: HashMap<RateKey, RateEntry>,
    capacity: HashMap<String, f64>,
}

impl RateTable {
    pub fn from_tables(tables: PricingTables) -> Result<Self> {
        tables.validate()?;
        let rates = tables
            .rates
            .iter()
            .map(|row| (row.key, row.entry.clone()))
            .collect();
        let capacity = tables
            .capacity_tiers
            .iter()
            .map(|t| (normalize_capacity_label(&t.label), t.multiplier))
            .collect();
        Ok(RateTable { tables, rates, capacity })
    }

    /// The built-in tables.
    pub fn standard() -> Self {
        RateTable::from_tables(PricingTables::default()).expect("built-in pricing tables are valid")
    }

    pub fn tables(&self) -> &PricingTables {
        &self.tables
    }

    pub fn default_entry(&self) -> &RateEntry {
        &self.rates[&self.tables.default_rate]
    }

    pub fn rate(
        &self,
        device: &str,
        damage: DamageCategory,
        urgency: Urgency,
    ) -> (&RateEntry, Option<UnknownInput>) {
        let found = DeviceType::parse(device).and_then(|device| {
            self.rates.get(&RateKey { device, damage, urgency })
        });
        match found {
            Some(entry) => (entry, None),
            None => (self.default_entry(), Some(UnknownInput::DeviceType(device.to_string()))),
        }
    }

    /// Missing labels mean "no adjustment"; unrecognised ones are reported.
    pub fn capacity_multiplier(&self, label: Option<&str>) -> (f64, Option<UnknownInput>) {
        let label = match label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(label) => label,
            None => return (1.0, None),
        };
        match self.capacity.get(&normalize_capacity_label(label)) {
            Some(multiplier) => (*multiplier, None),
            None => (1.0, Some(UnknownInput::Capacity(label.to_string()))),
        }
    }

    pub fn raid_level(&self, level: &str) -> Option<&RaidLevelInfo> {
        let level = level.trim().to_lowercase();
        self.tables.raid_levels.iter().find(|l| l.level == level)
    }

    /// Drive minimum for a level; unknown levels need two drives.
    pub fn min_drives(&self, level: &str) -> u32 {
        self.raid_level(level).map(|l| l.min_drives).unwrap_or(2)
    }

    pub fn raid_assessment(&self, level: &str) -> (RaidAssessment, Option<UnknownInput>) {
        match self.raid_level(level).and_then(|l| l.assessment.clone()) {
            Some(assessment) => (assessment, None),
            None => (
                RaidAssessment {
                    complexity: 1.0,
                    risk: "Unknown".to_string(),
                    recovery: "Custom assessment needed".to_string(),
                    success_rate: "Varies".to_string(),
                },
                Some(UnknownInput::RaidLevel(level.to_string())),
            ),
        }
    }

    pub fn raid_pricing(&self) -> &RaidPricing {
        &self.tables.raid
    }

    pub fn calculator(&self) -> &CalculatorPricing {
        &self.tables.calculator
    }

    pub fn calculator_device(&self, id: &str) -> (&CalculatorDevice, Option<UnknownInput>) {
        let calc = &self.tables.calculator;
        if let Some(device) = calc.devices.iter().find(|d| d.id == id) {
            return (device, None);
        }
        let fallback = calc
            .devices
            .iter()
            .find(|d| d.id == calc.fallback_device)
            .unwrap_or(&calc.devices[0]);
        (fallback, Some(UnknownInput::CalculatorDevice(id.to_string())))
    }

    pub fn failure_multiplier(&self, id: &str) -> (f64, Option<UnknownInput>) {
        match self.tables.calculator.failures.iter().find(|f| f.id == id) {
            Some(f) => (f.multiplier, None),
            None => (1.0, Some(UnknownInput::FailureType(id.to_string()))),
        }
    }
}
