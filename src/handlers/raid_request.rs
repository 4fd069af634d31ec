// src/handlers/raid_request.rs
use chrono::Utc;
use log::{error, info};
use uuid::Uuid;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{NewLead, RaidRecoveryRequest, SubmissionResponse};
use crate::services::directory::{self, Partner};
use crate::state::AppState;

pub fn new_request_id() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(4).collect();
    format!("RR{}{}", Utc::now().timestamp_millis(), suffix)
}

/// Emergencies go to the 24/7 lab.
pub fn assigned_partner(request: &RaidRecoveryRequest) -> &'static Partner {
    if request.is_emergency {
        directory::twenty_four_hour_data()
    } else {
        directory::hard_drive_repair()
    }
}

fn is_custom(request: &RaidRecoveryRequest) -> bool {
    request.raid_level.eq_ignore_ascii_case("custom")
}

pub fn configuration_summary(request: &RaidRecoveryRequest) -> String {
    let raid_details = if is_custom(request) {
        format!(
            "Custom RAID Configuration: {}",
            request.custom_raid_config.as_deref().unwrap_or_default()
        )
    } else {
        format!("RAID Level: {}", request.raid_level.to_uppercase())
    };
    let mut lines = vec![
        "Configuration Details:".to_string(),
        format!("- {}", raid_details),
        format!("- Number of Drives: {}", request.num_drives),
        format!("- Array Type: {}", request.array_type),
        format!("- Data Type: {}", request.data_type),
        format!(
            "- Emergency Status: {}",
            if request.is_emergency { "YES - Priority Service" } else { "Standard Service" }
        ),
        String::new(),
        "Contact Information:".to_string(),
        format!("- Name: {}", request.name),
        format!("- Phone: {}", request.phone),
        format!("- Email: {}", request.email),
        format!("- Preferred Contact: {}", request.preferred_contact),
    ];
    if let Some(best_time) = request.best_time_to_call.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("- Best Time to Call: {}", best_time));
    }
    lines.push(String::new());
    lines.push("Failure Summary:".to_string());
    lines.push(request.failure_summary.clone());
    lines.join("\n")
}

pub fn confirmation_message(request: &RaidRecoveryRequest, partner: &Partner, request_id: &str) -> String {
    let when = if request.is_emergency {
        "immediately"
    } else {
        "within 1 business hour"
    };
    if is_custom(request) {
        format!(
            "Thank you for your custom RAID recovery request. Due to the specialized nature of your configuration, \
a senior recovery specialist from {} will contact you {} to discuss your case. Your request ID is {}.",
            partner.name, when, request_id
        )
    } else {
        format!(
            "Thank you for your {} recovery request. A recovery specialist from {} will contact you {}. Your request ID is {}.",
            request.raid_level.to_uppercase(),
            partner.name,
            when,
            request_id
        )
    }
}

pub async fn post_raid_request(request: RaidRecoveryRequest, state: AppState) -> Result<Json, Rejection> {
    info!("Handling RAID recovery request for {}", request.email);

    let required = [
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
        ("raidLevel", &request.raid_level),
        ("failureSummary", &request.failure_summary),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(warp::reject::custom(ApiError::bad_request(format!("{} is required", field))));
    }
    if is_custom(&request)
        && request
            .custom_raid_config
            .as_deref()
            .map_or(true, |c| c.trim().is_empty())
    {
        return Err(warp::reject::custom(ApiError::bad_request(
            "customRaidConfig is required for a custom configuration",
        )));
    }
    let min_drives = state.rates.min_drives(&request.raid_level);
    if request.num_drives < min_drives {
        return Err(warp::reject::custom(ApiError::bad_request(format!(
            "{} requires at least {} drives",
            request.raid_level.to_uppercase(),
            min_drives
        ))));
    }

    let request_id = new_request_id();
    let partner = assigned_partner(&request);
    info!(
        "New RAID recovery request {} assigned to {}:\n{}",
        request_id,
        partner.name,
        configuration_summary(&request)
    );

    let lead = NewLead {
        name: request.name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        company: None,
        device_type: "raid".to_string(),
        problem_description: request.failure_summary.clone(),
        urgency: if request.is_emergency { "emergency" } else { "standard" }.to_string(),
        preferred_contact: request.preferred_contact.to_string(),
        location: String::new(),
        estimated_price: None,
        source: Some("raid-request".to_string()),
    };
    state.leads.create(lead).await.map_err(|e| {
        error!("Error processing RAID recovery request: {}", e);
        warp::reject::custom(ApiError::internal(
            "An error occurred while processing your request. Please try again or contact us directly.",
        ))
    })?;

    Ok(warp::reply::json(&SubmissionResponse {
        success: true,
        message: confirmation_message(&request, partner, &request_id),
        request_id: Some(request_id),
    }))
}
