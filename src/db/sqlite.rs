use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::DataSourceError;

/// Relations every warehouse must expose.
pub const REQUIRED_RELATIONS: [&str; 3] =
    ["health_anomalies", "inventory_health", "public_health_visits"];

/// Open an existing warehouse file read-only.
///
/// The dashboard never writes to the warehouse, so the connection is opened
/// with `SQLITE_OPEN_READ_ONLY` and the relations are checked up front.
pub fn open_warehouse(path: &Path) -> Result<Connection, DataSourceError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| DataSourceError::Unreachable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let missing = missing_relations(&conn)?;
    if !missing.is_empty() {
        return Err(DataSourceError::Unreachable {
            path: path.to_path_buf(),
            reason: format!("missing relations: {}", missing.join(", ")),
        });
    }

    tracing::info!(path = %path.display(), "Warehouse opened read-only");
    Ok(conn)
}

/// Open an in-memory warehouse with empty relations (tests and demos).
pub fn open_memory_warehouse() -> Result<Connection, DataSourceError> {
    let conn = Connection::open_in_memory()?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Create the warehouse relations if they are absent.
pub fn apply_schema(conn: &Connection) -> Result<(), DataSourceError> {
    let current_version = get_current_version(conn);

    let scripts: Vec<(i64, &str)> = vec![(
        1,
        include_str!("../../resources/schema/001_warehouse.sql"),
    )];

    for (version, sql) in scripts {
        if version > current_version {
            tracing::info!("Applying warehouse schema v{version}");
            conn.execute_batch(sql)
                .map_err(|e| DataSourceError::SchemaFailed {
                    version,
                    reason: e.to_string(),
                })?;
        }
    }

    Ok(())
}

/// Current schema version (0 when the bundled schema was never applied).
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

/// Names of required relations the connection does not expose.
pub fn missing_relations(conn: &Connection) -> Result<Vec<&'static str>, DataSourceError> {
    let mut missing = Vec::new();
    for relation in REQUIRED_RELATIONS {
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            [relation],
            |row| row.get(0),
        )?;
        if found == 0 {
            missing.push(relation);
        }
    }
    Ok(missing)
}
