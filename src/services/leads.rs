// src/services/leads.rs
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Lead, LeadStatus, LeadUpdate, NewLead};

/// Storage for captured leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn create(&self, lead: NewLead) -> Result<Lead>;
    async fn get(&self, id: &str) -> Result<Option<Lead>>;
    /// Returns `None` when no lead has this id.
    async fn update(&self, id: &str, update: LeadUpdate) -> Result<Option<Lead>>;
    async fn add_note(&self, id: &str, note: &str) -> Result<Option<Lead>>;
    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>>;
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryLeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        InMemoryLeadStore::default()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn create(&self, lead: NewLead) -> Result<Lead> {
        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            details: lead,
            status: LeadStatus::New,
            created_at: Utc::now(),
            updated_at: None,
            assigned_to: None,
            notes: None,
        };
        self.leads.write().await.push(lead.clone());
        info!("Stored lead {} for {}", lead.id, lead.details.email);
        Ok(lead)
    }

    async fn get(&self, id: &str) -> Result<Option<Lead>> {
        Ok(self.leads.read().await.iter().find(|l| l.id == id).cloned())
    }

    async fn update(&self, id: &str, update: LeadUpdate) -> Result<Option<Lead>> {
        let mut leads = self.leads.write().await;
        let lead = match leads.iter_mut().find(|l| l.id == id) {
            Some(lead) => lead,
            None => return Ok(None),
        };
        if let Some(status) = update.status {
            debug!("Lead {} status {} -> {}", id, lead.status, status);
            lead.status = status;
        }
        if let Some(assigned_to) = update.assigned_to {
            lead.assigned_to = Some(assigned_to);
        }
        if let Some(notes) = update.notes {
            lead.notes = Some(notes);
        }
        lead.updated_at = Some(Utc::now());
        Ok(Some(lead.clone()))
    }

    async fn add_note(&self, id: &str, note: &str) -> Result<Option<Lead>> {
        let mut leads = self.leads.write().await;
        let lead = match leads.iter_mut().find(|l| l.id == id) {
            Some(lead) => lead,
            None => return Ok(None),
        };
        lead.notes = Some(match lead.notes.take() {
            Some(existing) => format!("{}\n{}", existing, note),
            None => note.to_string(),
        });
        lead.updated_at = Some(Utc::now());
        Ok(Some(lead.clone()))
    }

    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads
            .iter()
            .filter(|l| status.map_or(true, |s| l.status == s))
            .cloned()
            .collect())
    }
}
