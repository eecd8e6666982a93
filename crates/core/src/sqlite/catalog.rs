use rusqlite::{params, TransactionBehavior};

use super::{count_waiting, SqliteQueueStore};
use crate::catalog::{CatalogError, Service, ServiceCatalog, ServiceId, ServiceName};

fn db_err(e: rusqlite::Error) -> CatalogError {
    CatalogError::Database(e.to_string())
}

fn row_to_service(row: &rusqlite::Row) -> rusqlite::Result<Service> {
    Ok(Service {
        id: ServiceId(row.get(0)?),
        name: row.get(1)?,
    })
}

impl ServiceCatalog for SqliteQueueStore {
    fn create_service(&self, name: &ServiceName) -> Result<Service, CatalogError> {
        let conn = self.conn().map_err(CatalogError::Database)?;

        conn.execute("INSERT INTO services (name) VALUES (?)", params![name.as_str()])
            .map_err(db_err)?;

        Ok(Service {
            id: ServiceId(conn.last_insert_rowid()),
            name: name.as_str().to_string(),
        })
    }

    fn get_service(&self, id: ServiceId) -> Result<Option<Service>, CatalogError> {
        let conn = self.conn().map_err(CatalogError::Database)?;

        let result = conn.query_row(
            "SELECT id, name FROM services WHERE id = ?",
            params![id.0],
            row_to_service,
        );

        match result {
            Ok(service) => Ok(Some(service)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(db_err(e)),
        }
    }

    fn list_services(&self) -> Result<Vec<Service>, CatalogError> {
        let conn = self.conn().map_err(CatalogError::Database)?;

        let mut stmt = conn
            .prepare("SELECT id, name FROM services ORDER BY id ASC")
            .map_err(db_err)?;

        let rows = stmt.query_map([], row_to_service).map_err(db_err)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    fn delete_service(&self, id: ServiceId) -> Result<Service, CatalogError> {
        let mut conn = self.conn().map_err(CatalogError::Database)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        let service = match tx.query_row(
            "SELECT id, name FROM services WHERE id = ?",
            params![id.0],
            row_to_service,
        ) {
            Ok(service) => service,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Err(CatalogError::NotFound(id)),
            Err(e) => return Err(db_err(e)),
        };

        let waiting = count_waiting(&tx, id, None).map_err(db_err)?;
        if waiting > 0 {
            return Err(CatalogError::InUse {
                service_id: id,
                waiting,
            });
        }

        tx.execute("DELETE FROM services WHERE id = ?", params![id.0])
            .map_err(db_err)?;
        tx.commit().map_err(db_err)?;

        Ok(service)
    }
}
