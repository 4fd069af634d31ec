// src/services/mod.rs
pub mod chat;
pub mod directory;
pub mod knowledge_base;
pub mod leads;
pub mod llm;
pub mod pricing;
pub mod rate_table;
