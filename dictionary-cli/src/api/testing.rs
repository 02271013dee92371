//! In-memory stand-in for the dictionary server

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use super::{ApiError, ColumnUpdatePayload, DictionaryApi, Domain, SchemaDelta, TableDomainLink};

/// Scripted responses plus call counters for every endpoint
#[derive(Debug, Default)]
pub struct FakeApi {
    deltas: Mutex<VecDeque<Result<SchemaDelta, ApiError>>>,
    sync_result: Mutex<Option<Result<(), ApiError>>>,
    update_result: Mutex<Option<Result<(), ApiError>>>,
    sync_delay: Duration,
    first_check_gate: Option<Arc<Notify>>,
    pub domains: Mutex<Vec<Domain>>,
    pub links: Mutex<Vec<TableDomainLink>>,
    pub payloads: Mutex<Vec<ColumnUpdatePayload>>,
    pub check_calls: AtomicUsize,
    pub sync_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub domain_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer successive `check_changes` calls with these results
    pub fn with_deltas(deltas: Vec<Result<SchemaDelta, ApiError>>) -> Self {
        Self {
            deltas: Mutex::new(deltas.into()),
            ..Default::default()
        }
    }

    pub fn sync_result(self, result: Result<(), ApiError>) -> Self {
        *self.sync_result.lock().unwrap() = Some(result);
        self
    }

    pub fn update_result(self, result: Result<(), ApiError>) -> Self {
        *self.update_result.lock().unwrap() = Some(result);
        self
    }

    pub fn sync_delay(mut self, delay: Duration) -> Self {
        self.sync_delay = delay;
        self
    }

    /// Make the first `check_changes` call wait until the gate is notified
    pub fn hold_first_check(mut self, gate: Arc<Notify>) -> Self {
        self.first_check_gate = Some(gate);
        self
    }

    pub fn payloads(&self) -> Vec<ColumnUpdatePayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DictionaryApi for FakeApi {
    async fn check_changes(&self) -> Result<SchemaDelta, ApiError> {
        let call = self.check_calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .deltas
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SchemaDelta::default()));
        if call == 0 {
            if let Some(gate) = &self.first_check_gate {
                gate.notified().await;
            }
        }
        response
    }

    async fn sync_database(&self) -> Result<(), ApiError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if !self.sync_delay.is_zero() {
            tokio::time::sleep(self.sync_delay).await;
        }
        self.sync_result.lock().unwrap().clone().unwrap_or(Ok(()))
    }

    async fn update_dictionary(&self, payload: &ColumnUpdatePayload) -> Result<(), ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        self.update_result.lock().unwrap().clone().unwrap_or(Ok(()))
    }

    async fn get_domains(&self) -> Result<Vec<Domain>, ApiError> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.domains.lock().unwrap().clone())
    }

    async fn create_domain(&self, domain: &Domain) -> Result<(), ApiError> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        let mut domains = self.domains.lock().unwrap();
        if domains.iter().any(|d| d.name == domain.name) {
            return Err(ApiError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        domains.push(domain.clone());
        Ok(())
    }

    async fn link_table_with_domain(&self, link: &TableDomainLink) -> Result<(), ApiError> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        self.links.lock().unwrap().push(link.clone());
        Ok(())
    }
}
