//! Shared fixtures for integration tests
//!
//! [`MemoryDatabase`] stands in for both the olist source and the dwh
//! warehouse. Failures can be injected per relation, for schema resets and
//! for the event log.

#![allow(dead_code)]

use async_trait::async_trait;
use marketing_loader::adapters::database::{DatabaseClient, DatabaseClients, EventStore};
use marketing_loader::config::{
    secret_string, ApplicationConfig, EventPublisherKind, EventsConfig, LoadConfig, LoaderConfig,
    LoggingConfig, PostgreSQLConfig,
};
use marketing_loader::domain::{LoadEvent, LoaderError, Result, Row, TableData};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct State {
    relations: HashMap<String, Vec<Row>>,
    columns: HashMap<String, Vec<String>>,
    failing_relations: HashSet<String>,
    fetch_calls: HashMap<String, usize>,
    writes: HashMap<String, usize>,
    schema_resets: Vec<String>,
    events: Vec<Value>,
    fail_schema: bool,
    fail_events: bool,
    unhealthy: bool,
}

/// In-memory database
pub struct MemoryDatabase {
    name: String,
    state: Mutex<State>,
    fetch_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    closed: AtomicBool,
}

impl MemoryDatabase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(State::default()),
            fetch_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Adds a relation holding `rows` (each a JSON object)
    pub fn with_relation(self, relation: &str, rows: Vec<Value>) -> Self {
        let data = TableData::from_values(rows);
        self.state
            .lock()
            .unwrap()
            .relations
            .insert(relation.to_string(), data.rows().to_vec());
        self
    }

    /// Every read, count or write of `relation` fails
    pub fn with_failing_relation(self, relation: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_relations
            .insert(relation.to_string());
        self
    }

    pub fn with_failing_schema(self) -> Self {
        self.state.lock().unwrap().fail_schema = true;
        self
    }

    pub fn with_failing_events(self) -> Self {
        self.state.lock().unwrap().fail_events = true;
        self
    }

    pub fn unhealthy(self) -> Self {
        self.state.lock().unwrap().unhealthy = true;
        self
    }

    /// Number of successful `replace_rows` calls on `relation`
    pub fn writes(&self, relation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .writes
            .get(relation)
            .copied()
            .unwrap_or(0)
    }

    /// Each fetch sleeps for `delay`, so concurrent loads overlap
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn rows(&self, relation: &str) -> Option<Vec<Row>> {
        self.state.lock().unwrap().relations.get(relation).cloned()
    }

    pub fn fetch_calls(&self, relation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .fetch_calls
            .get(relation)
            .copied()
            .unwrap_or(0)
    }

    pub fn schema_resets(&self) -> Vec<String> {
        self.state.lock().unwrap().schema_resets.clone()
    }

    pub fn events(&self) -> Vec<Value> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check_relation(&self, relation: &str) -> Result<()> {
        if self
            .state
            .lock()
            .unwrap()
            .failing_relations
            .contains(relation)
        {
            return Err(LoaderError::Database(format!(
                "relation {relation} is unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DatabaseClient for MemoryDatabase {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn test_connection(&self) -> Result<()> {
        if self.state.lock().unwrap().unhealthy {
            return Err(LoaderError::Connection(format!(
                "{} refused the connection",
                self.name
            )));
        }
        Ok(())
    }

    async fn fetch_all(&self, relation: &str) -> Result<TableData> {
        *self
            .state
            .lock()
            .unwrap()
            .fetch_calls
            .entry(relation.to_string())
            .or_default() += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.check_relation(relation)?;
        let state = self.state.lock().unwrap();
        let rows = state.relations.get(relation).ok_or_else(|| {
            LoaderError::Database(format!("relation \"{relation}\" does not exist"))
        })?;
        Ok(TableData::new(rows.clone()))
    }

    async fn count_rows(&self, relation: &str) -> Result<i64> {
        self.check_relation(relation)?;
        let state = self.state.lock().unwrap();
        let rows = state.relations.get(relation).ok_or_else(|| {
            LoaderError::Database(format!("relation \"{relation}\" does not exist"))
        })?;
        Ok(rows.len() as i64)
    }

    async fn replace_rows(&self, relation: &str, data: &TableData) -> Result<u64> {
        self.check_relation(relation)?;
        let mut state = self.state.lock().unwrap();
        if !state.relations.contains_key(relation) {
            return Err(LoaderError::Database(format!(
                "relation \"{relation}\" does not exist"
            )));
        }
        if let Some(known) = state.columns.get(relation) {
            let unknown = data
                .columns()
                .into_iter()
                .find(|column| !known.iter().any(|k| k == column));
            if let Some(unknown) = unknown {
                return Err(LoaderError::Database(format!(
                    "column \"{unknown}\" of relation \"{relation}\" does not exist"
                )));
            }
        }
        state
            .relations
            .insert(relation.to_string(), data.rows().to_vec());
        *state.writes.entry(relation.to_string()).or_default() += 1;
        Ok(data.len() as u64)
    }

    async fn recreate_schema(&self, schema: &str, statements: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_schema {
            return Err(LoaderError::Database(format!(
                "permission denied for schema {schema}"
            )));
        }

        let prefix = format!("{schema}.");
        state.relations.retain(|name, _| !name.starts_with(&prefix));
        state.columns.retain(|name, _| !name.starts_with(&prefix));
        for statement in statements {
            // CREATE TABLE <relation> (
            //     <column> <type>,
            // )
            let mut lines = statement.lines();
            let Some(relation) = lines.next().and_then(|l| l.split_whitespace().nth(2)) else {
                continue;
            };
            let columns = lines
                .filter_map(|l| l.split_whitespace().next())
                .filter(|c| *c != ")")
                .map(str::to_string)
                .collect();
            state.relations.insert(relation.to_string(), Vec::new());
            state.columns.insert(relation.to_string(), columns);
        }
        state.schema_resets.push(schema.to_string());
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventStore for MemoryDatabase {
    async fn ensure_event_log(&self, relation: &str) -> Result<()> {
        if self.state.lock().unwrap().fail_events {
            return Err(LoaderError::Event(format!(
                "cannot create {relation}: disk full"
            )));
        }
        Ok(())
    }

    async fn append_event(&self, _relation: &str, event: &LoadEvent) -> Result<()> {
        let json = event.to_json()?;
        self.state.lock().unwrap().events.push(json);
        Ok(())
    }
}

/// Wires a source and a warehouse into loader clients
pub fn clients(source: &Arc<MemoryDatabase>, dwh: &Arc<MemoryDatabase>) -> DatabaseClients {
    DatabaseClients {
        source: source.clone() as Arc<dyn DatabaseClient>,
        destination: dwh.clone() as Arc<dyn DatabaseClient>,
        event_store: dwh.clone() as Arc<dyn EventStore>,
    }
}

fn pg(connection_string: &str) -> PostgreSQLConfig {
    PostgreSQLConfig {
        connection_string: secret_string(connection_string.to_string()),
        max_connections: 4,
        connection_timeout_seconds: 5,
        statement_timeout_seconds: 30,
        ssl_mode: "disable".to_string(),
    }
}

/// Configuration with the default tables, no retry delay and database events
pub fn test_config(retry_attempts: usize, max_parallel_tasks: usize) -> LoaderConfig {
    LoaderConfig {
        application: ApplicationConfig::default(),
        olist: pg("postgresql://root@localhost:5432/olist_ecommerce"),
        dwh: pg("postgresql://root@localhost:5432/example_project_1_dwh"),
        load: LoadConfig {
            retry_attempts,
            max_parallel_tasks,
            retry_delay_seconds: 0.0,
            ..LoadConfig::default()
        },
        events: EventsConfig {
            publisher: EventPublisherKind::Database,
            ..EventsConfig::default()
        },
        logging: LoggingConfig::console_only(),
    }
}

/// A source with three closed deals and no marketing qualified leads
pub fn olist_source() -> MemoryDatabase {
    MemoryDatabase::new("olist")
        .with_relation(
            "marketing.closed_deals",
            vec![
                serde_json::json!({"mql_id": "5f5b", "seller_id": "2c43", "business_segment": "pet"}),
                serde_json::json!({"mql_id": "a555", "seller_id": "bbb7", "business_segment": "car_accessories"}),
                serde_json::json!({"mql_id": "327b", "seller_id": "612b", "business_segment": null}),
            ],
        )
        .with_relation("marketing.marketing_qualified_leads", Vec::new())
}

