// src/handlers/quote.rs
use log::info;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::pricing::{
    calculator_quote, generic_quote, raid_quote, CalculatorRequest, QuoteRequest, RaidQuoteRequest,
};
use crate::state::AppState;

pub async fn post_quote(request: QuoteRequest, state: AppState) -> Result<Json, Rejection> {
    info!(
        "Handling quote request for {} ({}, {})",
        request.device_type, request.damage, request.urgency
    );
    let quote = generic_quote(&state.rates, &request);
    Ok(warp::reply::json(&quote))
}

pub async fn post_raid_quote(request: RaidQuoteRequest, state: AppState) -> Result<Json, Rejection> {
    info!(
        "Handling RAID quote request for {} with {} drives",
        request.raid_level, request.drive_count
    );
    let min_drives = state.rates.min_drives(&request.raid_level);
    if request.drive_count < min_drives {
        return Err(warp::reject::custom(ApiError::bad_request(format!(
            "{} requires at least {} drives",
            request.raid_level.to_uppercase(),
            min_drives
        ))));
    }
    let quote = raid_quote(&state.rates, &request);
    Ok(warp::reply::json(&quote))
}

pub async fn post_calculator_quote(request: CalculatorRequest, state: AppState) -> Result<Json, Rejection> {
    info!(
        "Handling calculator quote for {} / {} ({} GB)",
        request.device_type, request.failure_type, request.capacity_gb
    );
    let quote = calculator_quote(&state.rates, &request);
    Ok(warp::reply::json(&quote))
}

pub async fn get_pricing(state: AppState) -> Result<Json, Rejection> {
    info!("Handling request for the active pricing tables");
    Ok(warp::reply::json(state.rates.tables()))
}
