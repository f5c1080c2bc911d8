//! Hotel demo: a tiny application that migrates its own database on start.
//!
//! The schema below grew over two releases. The first release shipped the
//! sequences and the two tables; the second appended the `address` column.
//! A database created by the first release is upgraded by applying only
//! the last statement.

use anyhow::{Context, Result};
use sw_db::{with_transaction, Database, DbError, DbResult};
use sw_migrate::{MigrateConfig, SchemaDb};

use crate::cli::{GlobalArgs, HotelArgs};
use crate::config::resolve_descriptor;

/// Database used when `--db` is not given, relative to the project directory
const DEFAULT_HOTEL_DB: &str = "hotels.duckdb";

/// Append-only schema history of the demo
pub(crate) const HOTEL_SCHEMA: [&str; 5] = [
    "CREATE SEQUENCE hotel_ids START 1;",
    "CREATE TABLE hotels (id INTEGER DEFAULT nextval('hotel_ids'), name VARCHAR);",
    "CREATE SEQUENCE room_ids START 1;",
    "CREATE TABLE rooms (id INTEGER DEFAULT nextval('room_ids'), number INTEGER, hotel INTEGER);",
    "ALTER TABLE hotels ADD COLUMN address VARCHAR;",
];

/// Result of registering a hotel.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Registration {
    pub hotel_id: String,
    pub created: bool,
    pub rooms_added: usize,
}

/// Execute the hotel demo
pub(crate) fn execute(args: &HotelArgs, global: &GlobalArgs) -> Result<()> {
    let descriptor = resolve_descriptor(
        global.database.as_deref().unwrap_or(DEFAULT_HOTEL_DB),
        &global.project_dir,
    );
    let db = SchemaDb::initialize(&descriptor, HOTEL_SCHEMA, &MigrateConfig::default())
        .with_context(|| format!("Failed to initialize {descriptor}"))?;

    let registration = register(db.db(), &args.name, &args.address, &args.rooms)
        .context("Error creating hotel")?;

    if registration.created {
        println!("'{}' doesn't exist, created it", args.name);
    } else {
        println!("'{}' exists, updated its address", args.name);
    }
    if registration.rooms_added > 0 {
        println!(
            "Added {} room(s) to hotel #{}",
            registration.rooms_added, registration.hotel_id
        );
    }
    Ok(())
}

/// Create or update a hotel and attach rooms, in one transaction.
pub(crate) fn register<D: Database>(
    db: &D,
    name: &str,
    address: &str,
    rooms: &[i32],
) -> DbResult<Registration> {
    with_transaction(db, |db| {
        let (hotel_id, created) = match find_hotel(db, name) {
            Ok(id) => {
                db.execute(
                    "UPDATE hotels SET address = ? WHERE id = CAST(? AS INTEGER)",
                    &[address, id.as_str()],
                )?;
                (id, false)
            }
            Err(DbError::NotFound) => {
                log::debug!("'{name}' doesn't exist, creating...");
                db.execute(
                    "INSERT INTO hotels (name, address) VALUES (?, ?)",
                    &[name, address],
                )?;
                (find_hotel(db, name)?, true)
            }
            Err(e) => return Err(e),
        };

        for room in rooms {
            let number = room.to_string();
            db.execute(
                "INSERT INTO rooms (number, hotel) VALUES (CAST(? AS INTEGER), CAST(? AS INTEGER))",
                &[number.as_str(), hotel_id.as_str()],
            )?;
        }

        Ok(Registration {
            hotel_id,
            created,
            rooms_added: rooms.len(),
        })
    })
}

fn find_hotel<D: Database + ?Sized>(db: &D, name: &str) -> DbResult<String> {
    db.query_text(
        "SELECT CAST(id AS VARCHAR) FROM hotels WHERE name = ? ORDER BY id LIMIT 1",
        &[name],
    )
}

#[cfg(test)]
#[path = "hotel_test.rs"]
mod tests;
