//! Warehouse table definitions
//!
//! Every table the loader can copy needs a column definition here; the
//! destination schema is rebuilt from these statements at the start of
//! each run.

use crate::domain::table::validate_identifier;
use crate::domain::{LoaderError, Result, TableSpec};

/// Name of the event log relation inside the target schema
pub const EVENT_LOG_TABLE: &str = "marketing_load_events";

const CLOSED_DEAL_COLUMNS: &[(&str, &str)] = &[
    ("mql_id", "TEXT"),
    ("seller_id", "TEXT"),
    ("sdr_id", "TEXT"),
    ("sr_id", "TEXT"),
    ("won_date", "TIMESTAMPTZ"),
    ("business_segment", "TEXT"),
    ("lead_type", "TEXT"),
    ("lead_behaviour_profile", "TEXT"),
    ("has_company", "TEXT"),
    ("has_gtin", "TEXT"),
    ("average_stock", "TEXT"),
    ("business_type", "TEXT"),
    ("declared_product_catalog_size", "DOUBLE PRECISION"),
    ("declared_monthly_revenue", "DOUBLE PRECISION"),
];

const MARKETING_QUALIFIED_LEAD_COLUMNS: &[(&str, &str)] = &[
    ("mql_id", "TEXT"),
    ("first_contact_date", "TIMESTAMPTZ"),
    ("landing_page_id", "TEXT"),
    ("origin", "TEXT"),
];

const DEFINITIONS: &[(&str, &[(&str, &str)])] = &[
    ("closed_deal", CLOSED_DEAL_COLUMNS),
    ("marketing_qualified_lead", MARKETING_QUALIFIED_LEAD_COLUMNS),
];

fn columns(table: &str) -> Option<&'static [(&'static str, &'static str)]> {
    DEFINITIONS
        .iter()
        .find(|(name, _)| *name == table)
        .map(|(_, columns)| *columns)
}

/// Returns true if a warehouse definition exists for `table`
pub fn has_definition(table: &str) -> bool {
    columns(table).is_some()
}

/// Names of all tables with a warehouse definition
pub fn known_tables() -> Vec<&'static str> {
    DEFINITIONS.iter().map(|(name, _)| *name).collect()
}

/// `CREATE TABLE` statement for one table
///
/// # Errors
///
/// Returns a schema error if no definition exists for the table
pub fn create_statement(spec: &TableSpec) -> Result<String> {
    let columns = columns(spec.name()).ok_or_else(|| {
        LoaderError::Schema(format!("No warehouse definition for table '{spec}'"))
    })?;

    let body = columns
        .iter()
        .map(|(column, sql_type)| format!("    {column} {sql_type}"))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        "CREATE TABLE {} (\n{}\n)",
        spec.destination_relation(),
        body
    ))
}

/// `CREATE TABLE` statements for all configured tables, in order
pub fn create_statements(specs: &[TableSpec]) -> Result<Vec<String>> {
    specs.iter().map(create_statement).collect()
}

/// Schema-qualified event log relation
pub fn event_log_relation(schema: &str) -> Result<String> {
    validate_identifier("event log schema", schema)?;
    Ok(format!("{schema}.{EVENT_LOG_TABLE}"))
}

/// `CREATE TABLE IF NOT EXISTS` statement for the event log
pub fn event_log_statement(relation: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {relation} (
    id SERIAL PRIMARY KEY,
    event_type TEXT NOT NULL,
    status TEXT NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL,
    event_data JSONB NOT NULL,
    created_at TIMESTAMPTZ DEFAULT NOW()
)"
    )
}
