// src/routes.rs
use log::{error, info};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::chat::post_chat;
use crate::handlers::companies::{get_directory, get_partners, get_recommendation, post_verification};
use crate::handlers::contact::post_contact;
use crate::handlers::error::ApiError;
use crate::handlers::leads::{get_lead, list_leads, post_lead, post_lead_note, put_lead};
use crate::handlers::quote::{get_pricing, post_calculator_quote, post_quote, post_raid_quote};
use crate::handlers::raid_request::post_raid_request;
use crate::models::{DirectoryQuery, LeadQuery, LocationQuery};
use crate::state::AppState;

const MAX_BODY_BYTES: u64 = 64 * 1024;

// Map every rejection to a JSON error body
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {}", e);
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Payload too large".to_string();
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
        message = "Content-Type must be application/json".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method not allowed".to_string();
    } else {
        error!("Unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let health_route = warp::path!("api" / "health").and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    });

    let quote_route = warp::path!("api" / "quote")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_quote);

    let raid_quote_route = warp::path!("api" / "quote" / "raid")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_raid_quote);

    let calculator_route = warp::path!("api" / "quote" / "calculator")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_calculator_quote);

    let pricing_route = warp::path!("api" / "pricing")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_pricing);

    let chat_route = warp::path!("api" / "chat")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_chat);

    let contact_route = warp::path!("api" / "contact")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_contact);

    let raid_request_route = warp::path!("api" / "raid-recovery-request")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_raid_request);

    let create_lead_route = warp::path!("api" / "leads")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_lead);

    let list_leads_route = warp::path!("api" / "leads")
        .and(warp::get())
        .and(warp::query::<LeadQuery>())
        .and(state_filter.clone())
        .and_then(list_leads);

    let get_lead_route = warp::path!("api" / "leads" / String)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_lead);

    let update_lead_route = warp::path!("api" / "leads" / String)
        .and(warp::put())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(put_lead);

    let lead_note_route = warp::path!("api" / "leads" / String / "notes")
        .and(warp::post())
        .and(json_body())
        .and(state_filter.clone())
        .and_then(post_lead_note);

    let directory_route = warp::path!("api" / "companies")
        .and(warp::get())
        .and(warp::query::<DirectoryQuery>())
        .and_then(get_directory);

    let partners_route = warp::path!("api" / "companies" / "partners")
        .and(warp::get())
        .and_then(get_partners);

    let recommend_route = warp::path!("api" / "companies" / "recommend")
        .and(warp::get())
        .and(warp::query::<LocationQuery>())
        .and_then(get_recommendation);

    let verify_route = warp::path!("api" / "companies" / "verify")
        .and(warp::post())
        .and(json_body())
        .and_then(post_verification);

    info!("All routes configured successfully.");

    let quotes = quote_route
        .or(raid_quote_route)
        .or(calculator_route)
        .or(pricing_route)
        .boxed();

    let submissions = chat_route
        .or(contact_route)
        .or(raid_request_route)
        .boxed();

    let leads = create_lead_route
        .or(list_leads_route)
        .or(get_lead_route)
        .or(update_lead_route)
        .or(lead_note_route)
        .boxed();

    let companies = directory_route
        .or(partners_route)
        .or(recommend_route)
        .or(verify_route)
        .boxed();

    health_route
        .or(quotes)
        .or(submissions)
        .or(leads)
        .or(companies)
        .with(warp::log("recovery_quote_backend"))
        .recover(handle_rejection)
}
