// src/services/directory.rs
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerContact {
    pub phone: &'static str,
    pub email: &'static str,
    pub website: &'static str,
    pub address: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPricing {
    pub diagnostic: &'static str,
    pub standard_recovery: &'static str,
    pub emergency_service: &'static str,
}

/// A recovery lab we route leads to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub name: &'static str,
    pub location: &'static str,
    pub specialties: &'static [&'static str],
    pub clean_room: &'static str,
    pub contact: PartnerContact,
    pub service_area: &'static [&'static str],
    pub pricing: PartnerPricing,
    pub features: &'static [&'static str],
    pub certifications: &'static [&'static str],
}

pub static PARTNERS: [Partner; 2] = [
    Partner {
        name: "Hard Drive Repair",
        location: "Kansas City, MO",
        specialties: &[
            "Hard Drive Recovery",
            "RAID Data Recovery",
            "SSD Recovery",
            "Flash Drive Recovery",
            "Server Recovery",
            "Mac Data Recovery",
        ],
        clean_room: "ISO 5 Class 100",
        contact: PartnerContact {
            phone: "816-421-5725",
            email: "support@harddriverepair.com",
            website: "https://www.harddriverepair.com",
            address: "1740 Jefferson St, Kansas City, MO 64108",
        },
        service_area: &["Kansas City", "Missouri", "Kansas", "National"],
        pricing: PartnerPricing {
            diagnostic: "Free",
            standard_recovery: "$300-$800",
            emergency_service: "$800-$2000",
        },
        features: &[
            "30+ years experience",
            "Free evaluations",
            "No recovery, no charge guarantee",
            "ISO 5 Class 100 clean room",
            "BBB A+ Rating",
            "Certified data recovery experts",
            "Same day emergency service",
            "Secure facility",
            "All storage devices supported",
            "Local drop-off available",
        ],
        certifications: &["ISO 5 Class 100 Clean Room", "BBB A+ Rating", "GSA Approved"],
    },
    Partner {
        name: "24 Hour Data",
        location: "Dallas, TX",
        specialties: &[
            "Hard Drive Recovery",
            "RAID Recovery",
            "SSD Recovery",
            "Server Recovery",
            "Database Recovery",
            "Laptop Data Recovery",
        ],
        clean_room: "ISO 5 Class 100",
        contact: PartnerContact {
            phone: "866-598-3282",
            email: "support@24hourdata.com",
            website: "https://www.24hourdata.com",
            address: "5068 W Plano Pkwy #300, Plano, TX 75093",
        },
        service_area: &["Dallas", "Plano", "Texas", "National"],
        pricing: PartnerPricing {
            diagnostic: "Free",
            standard_recovery: "$300-$900",
            emergency_service: "$900-$2000",
        },
        features: &[
            "24/7 emergency services",
            "Free evaluations",
            "No data, no charge policy",
            "ISO 5 Class 100 clean room",
            "Certified engineers",
            "Secure shipping available",
            "All brands supported",
            "Enterprise solutions",
            "Competitive pricing",
            "Fast turnaround options",
        ],
        certifications: &[
            "ISO 5 Class 100 Clean Room",
            "Certified Data Recovery Experts",
            "Secure Facility",
        ],
    },
];

pub fn hard_drive_repair() -> &'static Partner {
    &PARTNERS[0]
}

pub fn twenty_four_hour_data() -> &'static Partner {
    &PARTNERS[1]
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub message: &'static str,
    pub companies: Vec<&'static Partner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_info: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<&'static str>,
}

/// Orders partners by proximity to a free-text location.
pub fn recommend(user_location: &str) -> Recommendation {
    let location = user_location.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| location.contains(n));

    let nearby = PARTNERS
        .iter()
        .any(|p| p.service_area.iter().any(|area| location.contains(&area.to_lowercase())));

    if !nearby {
        return Recommendation {
            message: "While we don't have a physical location in your immediate area, both of our premier data recovery partners provide secure nationwide shipping services:",
            companies: PARTNERS.iter().collect(),
            local_info: None,
            shipping_info: Some("Both companies provide secure shipping materials and detailed packaging instructions. They handle all types of data recovery cases nationwide with the same high-quality service as local customers."),
        };
    }

    if mentions(&["kansas", "missouri"]) {
        return Recommendation {
            message: "Great news! You're near Hard Drive Repair, one of our top-recommended providers. They offer same-day service and local drop-off in Kansas City:",
            companies: vec![hard_drive_repair(), twenty_four_hour_data()],
            local_info: Some("Their facility is conveniently located in downtown Kansas City with easy access for drop-offs. They offer free parking and immediate assistance for emergency cases."),
            shipping_info: None,
        };
    }

    if mentions(&["texas", "dallas", "plano"]) {
        return Recommendation {
            message: "Great news! You're near 24 Hour Data, one of our top-recommended providers. They offer immediate service and local drop-off in the Dallas area:",
            companies: vec![twenty_four_hour_data(), hard_drive_repair()],
            local_info: Some("Their facility is located in Plano with easy access from Dallas and surrounding areas. They offer immediate assistance for emergency cases."),
            shipping_info: None,
        };
    }

    Recommendation {
        message: "Here are our recommended data recovery specialists, both offering nationwide service:",
        companies: PARTNERS.iter().collect(),
        local_info: None,
        shipping_info: Some("Both companies provide secure shipping materials and detailed packaging instructions for safe transport of your device."),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryListing {
    pub name: &'static str,
    pub website: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub rating: u8,
    pub featured: bool,
}

pub static DIRECTORY: [DirectoryListing; 5] = [
    DirectoryListing {
        name: "24 Hour Data",
        website: "www.24hourdata.com",
        description: "Emergency data recovery services available 24/7. Specializing in all types of data recovery needs.",
        features: &["24/7 Emergency Service", "All Storage Types", "Nationwide Service"],
        rating: 5,
        featured: true,
    },
    DirectoryListing {
        name: "Hard Drive Repair",
        website: "www.harddriverepair.com",
        description: "Expert hard drive repair and data recovery services. Professional clean room facility.",
        features: &["Clean Room Facility", "HDD Specialists", "Fast Turnaround"],
        rating: 5,
        featured: true,
    },
    DirectoryListing {
        name: "DriveSavers",
        website: "www.drivesavers.com",
        description: "Industry leader in data recovery, providing secure and certified services.",
        features: &["Certified Security", "Advanced Recovery", "All Device Types"],
        rating: 5,
        featured: false,
    },
    DirectoryListing {
        name: "Ontrack",
        website: "www.ontrack.com",
        description: "Global leader in data recovery with advanced proprietary technology.",
        features: &["Global Presence", "Proprietary Technology", "Enterprise Solutions"],
        rating: 5,
        featured: false,
    },
    DirectoryListing {
        name: "Secure Data Recovery",
        website: "www.securedatarecovery.com",
        description: "Secure and certified data recovery services with multiple security certifications.",
        features: &["Security Certified", "All Media Types", "Free Diagnostics"],
        rating: 5,
        featured: false,
    },
];

/// Case-insensitive match on name, description or any feature.
pub fn search_directory(term: &str) -> Vec<&'static DirectoryListing> {
    let term = term.trim().to_lowercase();
    DIRECTORY
        .iter()
        .filter(|c| {
            term.is_empty()
                || c.name.to_lowercase().contains(&term)
                || c.description.to_lowercase().contains(&term)
                || c.features.iter().any(|f| f.to_lowercase().contains(&term))
        })
        .collect()
}
