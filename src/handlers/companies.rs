// src/handlers/companies.rs
use chrono::Utc;
use log::info;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::{with_status, Json};
use warp::Rejection;

use super::error::ApiError;
use crate::models::{DirectoryQuery, LocationQuery, VerificationRequest, VerificationResponse};
use crate::services::directory::{recommend, search_directory, PARTNERS};

pub async fn get_directory(query: DirectoryQuery) -> Result<Json, Rejection> {
    let term = query.search.unwrap_or_default();
    info!("Handling directory search for '{}'", term);
    Ok(warp::reply::json(&search_directory(&term)))
}

pub async fn get_partners() -> Result<Json, Rejection> {
    info!("Handling request for partner details");
    Ok(warp::reply::json(&PARTNERS))
}

pub async fn get_recommendation(query: LocationQuery) -> Result<Json, Rejection> {
    info!("Handling provider recommendation for '{}'", query.location);
    Ok(warp::reply::json(&recommend(&query.location)))
}

pub async fn post_verification(request: VerificationRequest) -> Result<impl warp::Reply, Rejection> {
    info!("Handling verification request from {}", request.company_name);

    let required = [
        ("companyName", &request.company_name),
        ("website", &request.website),
        ("contactName", &request.contact_name),
        ("email", &request.email),
        ("phone", &request.phone),
        ("address", &request.address),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(warp::reject::custom(ApiError::bad_request(format!("{} is required", field))));
    }
    if request.service_areas.iter().all(|a| a.trim().is_empty()) {
        return Err(warp::reject::custom(ApiError::bad_request(
            "at least one service area is required",
        )));
    }

    let response = VerificationResponse {
        id: format!("verification_{}", Uuid::new_v4().simple()),
        status: "pending",
        submitted_at: Utc::now(),
        request,
    };
    Ok(with_status(warp::reply::json(&response), StatusCode::CREATED))
}
