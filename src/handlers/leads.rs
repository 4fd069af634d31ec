// src/handlers/leads.rs
use log::{error, info};
use warp::http::StatusCode;
use warp::reply::{with_status, Json};
use warp::Rejection;

use super::error::ApiError;
use crate::models::{LeadNote, LeadQuery, LeadUpdate, NewLead};
use crate::state::AppState;

fn store_error(context: &'static str) -> impl FnOnce(anyhow::Error) -> Rejection {
    move |e| {
        error!("{}: {}", context, e);
        warp::reject::custom(ApiError::internal(context))
    }
}

fn lead_not_found() -> Rejection {
    warp::reject::custom(ApiError::not_found("Lead not found"))
}

pub async fn post_lead(lead: NewLead, state: AppState) -> Result<impl warp::Reply, Rejection> {
    info!("Handling new lead from {}", lead.email);
    if lead.name.trim().is_empty() || lead.email.trim().is_empty() {
        return Err(warp::reject::custom(ApiError::bad_request("name and email are required")));
    }
    let created = state
        .leads
        .create(lead)
        .await
        .map_err(store_error("Failed to create lead"))?;
    Ok(with_status(warp::reply::json(&created), StatusCode::CREATED))
}

pub async fn list_leads(query: LeadQuery, state: AppState) -> Result<Json, Rejection> {
    info!("Handling request to list leads (status: {:?})", query.status);
    let leads = state
        .leads
        .list(query.status)
        .await
        .map_err(store_error("Failed to fetch leads"))?;
    Ok(warp::reply::json(&leads))
}

pub async fn get_lead(id: String, state: AppState) -> Result<Json, Rejection> {
    info!("Handling request for lead {}", id);
    let lead = state
        .leads
        .get(&id)
        .await
        .map_err(store_error("Failed to fetch lead"))?
        .ok_or_else(lead_not_found)?;
    Ok(warp::reply::json(&lead))
}

pub async fn put_lead(id: String, update: LeadUpdate, state: AppState) -> Result<Json, Rejection> {
    info!("Handling update for lead {}", id);
    let lead = state
        .leads
        .update(&id, update)
        .await
        .map_err(store_error("Failed to update lead"))?
        .ok_or_else(lead_not_found)?;
    Ok(warp::reply::json(&lead))
}

pub async fn post_lead_note(id: String, note: LeadNote, state: AppState) -> Result<Json, Rejection> {
    info!("Handling note for lead {}", id);
    if note.note.trim().is_empty() {
        return Err(warp::reject::custom(ApiError::bad_request("note must not be empty")));
    }
    let lead = state
        .leads
        .add_note(&id, note.note.trim())
        .await
        .map_err(store_error("Failed to update lead"))?
        .ok_or_else(lead_not_found)?;
    Ok(warp::reply::json(&lead))
}
