// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use futures::TryStreamExt;
use iii_iv_core::db::sqlite::{map_sqlx_error, run_schema};
use iii_iv_core::db::{DbError, DbResult, Executor, check_one_row};
use iii_iv_geo::{Latitude, Longitude};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;


/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("sqlite.sql");

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    run_schema(ex, SCHEMA).await
}

impl TryFrom<SqliteRow> for Address {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let street: String = row.try_get("street").map_err(map_sqlx_error)?;
        let city: String = row.try_get("city").map_err(map_sqlx_error)?;
        let state: String = row.try_get("state").map_err(map_sqlx_error)?;
        let zip_code: String = row.try_get("zip_code").map_err(map_sqlx_error)?;
        let latitude: f64 = row.try_get("latitude").map_err(map_sqlx_error)?;
        let longitude: f64 = row.try_get("longitude").map_err(map_sqlx_error)?;

        let fields = AddressFields::new(
            name,
            street,
            city,
            state,
            zip_code,
            Latitude::new(latitude)?,
            Longitude::new(longitude)?,
        );
        Ok(Address::new(AddressId::new(id), fields))
    }
}

/// Inserts a new address with the given `fields` and returns its assigned identifier.
pub(crate) async fn create_address(
    ex: &mut Executor,
    fields: &AddressFields,
) -> DbResult<AddressId> {
    let query_str = "
        INSERT INTO addresses (name, street, city, state, zip_code, latitude, longitude)
        VALUES (?, ?, ?, ?, ?, ?, ?)
    ";
    let done = sqlx::query(query_str)
        .bind(fields.name())
        .bind(fields.street())
        .bind(fields.city())
        .bind(fields.state())
        .bind(fields.zip_code())
        .bind(fields.latitude().as_f64())
        .bind(fields.longitude().as_f64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(AddressId::new(done.last_insert_rowid()))
}

/// Gets the address identified by `id`.
pub(crate) async fn get_address(ex: &mut Executor, id: AddressId) -> DbResult<Address> {
    let query_str = "SELECT * FROM addresses WHERE id = ?";
    let row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Address::try_from(row)
}

/// Gets all addresses in storage order.
pub(crate) async fn get_addresses(ex: &mut Executor) -> DbResult<Vec<Address>> {
    let query_str = "SELECT * FROM addresses ORDER BY id";
    let mut rows = sqlx::query(query_str).fetch(ex.conn());

    let mut addresses = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        addresses.push(Address::try_from(row)?);
    }
    Ok(addresses)
}

/// Replaces all the fields of the address identified by `id` with `fields`.
pub(crate) async fn update_address(
    ex: &mut Executor,
    id: AddressId,
    fields: &AddressFields,
) -> DbResult<()> {
    let query_str = "
        UPDATE addresses
        SET name = ?, street = ?, city = ?, state = ?, zip_code = ?, latitude = ?, longitude = ?
        WHERE id = ?
    ";
    let done = sqlx::query(query_str)
        .bind(fields.name())
        .bind(fields.street())
        .bind(fields.city())
        .bind(fields.state())
        .bind(fields.zip_code())
        .bind(fields.latitude().as_f64())
        .bind(fields.longitude().as_f64())
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    check_one_row(done.rows_affected(), "Update")
}

/// Deletes the address identified by `id`.
pub(crate) async fn delete_address(ex: &mut Executor, id: AddressId) -> DbResult<()> {
    let query_str = "DELETE FROM addresses WHERE id = ?";
    let done = sqlx::query(query_str)
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    check_one_row(done.rows_affected(), "Deletion")
}
