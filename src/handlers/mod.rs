// src/handlers/mod.rs
pub mod chat;
pub mod companies;
pub mod contact;
pub mod error;
pub mod leads;
pub mod quote;
pub mod raid_request;
