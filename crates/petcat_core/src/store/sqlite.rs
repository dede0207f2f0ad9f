//! SQLite implementation of the pet storage backend.
//!
//! # Responsibility
//! - Translate store primitives into SQL over the `pets` table.
//! - Acquire the connection lazily on first use and keep it for the store
//!   lifetime.
//!
//! # Invariants
//! - The connection is opened at most once per store; migrations run before
//!   any data access.
//! - Constraint violations on insert map to the `None` sentinel.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::pet::{Gender, PetColumn, PetId, PetRow, PetValues, TABLE_PETS};
use crate::store::{Filter, PetStore, StoreError, StoreResult};
use log::error;
use once_cell::unsync::OnceCell;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, ErrorCode, Row};
use std::path::PathBuf;

enum Location {
    Memory,
    File(PathBuf),
}

/// SQLite-backed pet store with lazy, single-acquisition connection
/// handling. The handle is released when the store is dropped.
pub struct SqlitePetStore {
    location: Location,
    conn: OnceCell<Connection>,
}

impl SqlitePetStore {
    /// Store backed by a process-private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: OnceCell::new(),
        }
    }

    /// Store backed by a database file, created on first use if absent.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Returns whether the connection has been acquired yet.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    fn conn(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| match &self.location {
            Location::Memory => open_db_in_memory(),
            Location::File(path) => open_db(path),
        })
    }
}

impl PetStore for SqlitePetStore {
    fn query(
        &self,
        projection: &[PetColumn],
        filter: Option<&Filter>,
        order: Option<&str>,
    ) -> StoreResult<Vec<PetRow>> {
        let conn = self.conn()?;

        let columns: &[PetColumn] = if projection.is_empty() {
            &PetColumn::ALL
        } else {
            projection
        };
        let column_list = columns
            .iter()
            .map(|column| column.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("SELECT {column_list} FROM {TABLE_PETS}");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.clause);
            bind_values.extend(filter.args.iter().cloned());
        }

        if let Some(order) = order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut pets = Vec::new();

        while let Some(row) = rows.next()? {
            pets.push(parse_pet_row(columns, row)?);
        }

        Ok(pets)
    }

    fn insert(&self, values: &PetValues) -> StoreResult<Option<PetId>> {
        let conn = self.conn()?;
        let (columns, args) = write_columns(values);

        let sql = if columns.is_empty() {
            format!("INSERT INTO {TABLE_PETS} DEFAULT VALUES;")
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {TABLE_PETS} ({}) VALUES ({placeholders});",
                columns.join(", ")
            )
        };

        match conn.execute(&sql, params_from_iter(args)) {
            Ok(_) => Ok(Some(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(cause, message))
                if cause.code == ErrorCode::ConstraintViolation =>
            {
                // Backend contract: a rejected insert yields the sentinel,
                // not a transport error.
                error!(
                    "event=pet_insert module=store status=error error_code=constraint error={}",
                    message.as_deref().unwrap_or("constraint violation")
                );
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, values: &PetValues, filter: Option<&Filter>) -> StoreResult<usize> {
        let conn = self.conn()?;
        let (columns, mut args) = write_columns(values);

        if columns.is_empty() {
            return Ok(0);
        }

        let assignments = columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {TABLE_PETS} SET {assignments}");

        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.clause);
            args.extend(filter.args.iter().cloned());
        }
        sql.push(';');

        let changed = conn.execute(&sql, params_from_iter(args))?;
        Ok(changed)
    }

    fn delete(&self, filter: Option<&Filter>) -> StoreResult<usize> {
        let conn = self.conn()?;

        let mut sql = format!("DELETE FROM {TABLE_PETS}");
        let mut args: Vec<Value> = Vec::new();

        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.clause);
            args.extend(filter.args.iter().cloned());
        }
        sql.push(';');

        let removed = conn.execute(&sql, params_from_iter(args))?;
        Ok(removed)
    }
}

/// Decodes one result row positionally against the projected columns.
fn parse_pet_row(columns: &[PetColumn], row: &Row<'_>) -> StoreResult<PetRow> {
    let mut pet = PetRow::default();

    for (index, column) in columns.iter().enumerate() {
        match column {
            PetColumn::Id => pet.id = Some(row.get(index)?),
            PetColumn::Name => pet.name = Some(row.get(index)?),
            PetColumn::Breed => pet.breed = Some(row.get(index)?),
            PetColumn::Gender => {
                let code: i64 = row.get(index)?;
                let gender = Gender::from_db(code).ok_or_else(|| {
                    StoreError::InvalidData(format!(
                        "invalid gender code `{code}` in {TABLE_PETS}.gender"
                    ))
                })?;
                pet.gender = Some(gender);
            }
            PetColumn::Weight => pet.weight = Some(row.get(index)?),
        }
    }

    Ok(pet)
}

/// Flattens a partial payload into column names plus bind values, in
/// declaration order.
fn write_columns(values: &PetValues) -> (Vec<&'static str>, Vec<Value>) {
    let mut columns = Vec::new();
    let mut args = Vec::new();

    if let Some(name) = &values.name {
        columns.push(PetColumn::Name.as_str());
        args.push(Value::Text(name.clone()));
    }
    if let Some(breed) = &values.breed {
        columns.push(PetColumn::Breed.as_str());
        args.push(Value::Text(breed.clone()));
    }
    if let Some(gender) = values.gender {
        columns.push(PetColumn::Gender.as_str());
        args.push(Value::Integer(gender));
    }
    if let Some(weight) = values.weight {
        columns.push(PetColumn::Weight.as_str());
        args.push(Value::Integer(weight));
    }

    (columns, args)
}
