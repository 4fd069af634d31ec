// src/handlers/contact.rs
use log::{error, info};
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{ContactSubmission, NewLead, SubmissionResponse};
use crate::state::AppState;

pub async fn post_contact(submission: ContactSubmission, state: AppState) -> Result<Json, Rejection> {
    info!("New contact form submission: {:?}", submission);

    if submission.name.trim().is_empty() || submission.email.trim().is_empty() {
        return Err(warp::reject::custom(ApiError::bad_request("name and email are required")));
    }

    let lead = NewLead {
        name: submission.name,
        email: submission.email,
        phone: submission.phone,
        company: None,
        device_type: submission.device_type,
        problem_description: if submission.capacity.is_empty() {
            submission.message
        } else {
            format!("{} (capacity: {})", submission.message, submission.capacity)
        },
        urgency: if submission.is_urgent { "emergency" } else { "standard" }.to_string(),
        preferred_contact: "email".to_string(),
        location: String::new(),
        estimated_price: submission.estimated_price,
        source: Some("contact".to_string()),
    };

    state.leads.create(lead).await.map_err(|e| {
        error!("Failed to store contact submission: {}", e);
        warp::reject::custom(ApiError::internal("Failed to submit the contact form"))
    })?;

    Ok(warp::reply::json(&SubmissionResponse {
        success: true,
        message: "Form submitted successfully (test mode)".to_string(),
        request_id: None,
    }))
}
