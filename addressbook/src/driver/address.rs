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

//! Operations on individual addresses.

use crate::db;
use crate::driver::{ADDRESS_NOT_FOUND, Driver};
use crate::model::*;
use iii_iv_core::driver::{DbResultExt, DriverResult, warn_if_not_found};
use log::info;

impl Driver {
    /// Creates a new address from `fields`.
    pub(crate) async fn create_address(self, fields: AddressFields) -> DriverResult<Address> {
        info!("Creating address for {}", fields.name());
        let mut tx = self.db.begin().await?;
        let id = db::create_address(tx.ex(), &fields).await?;
        tx.commit().await?;
        info!("Created address {}", id);
        Ok(Address::new(id, fields))
    }

    /// Gets the address identified by `id`.
    pub(crate) async fn get_address(self, id: AddressId) -> DriverResult<Address> {
        let result = db::get_address(&mut self.db.ex().await?, id).await;
        warn_if_not_found(result.or_not_found(ADDRESS_NOT_FOUND), "Address", id)
    }

    /// Gets all addresses.
    pub(crate) async fn get_addresses(self) -> DriverResult<Vec<Address>> {
        let addresses = db::get_addresses(&mut self.db.ex().await?).await?;
        Ok(addresses)
    }

    /// Replaces all fields of the address identified by `id` with `fields`.
    pub(crate) async fn update_address(
        self,
        id: AddressId,
        fields: AddressFields,
    ) -> DriverResult<Address> {
        info!("Updating address {}", id);
        let mut tx = self.db.begin().await?;
        let result = db::update_address(tx.ex(), id, &fields).await;
        warn_if_not_found(result.or_not_found(ADDRESS_NOT_FOUND), "Address", id)?;
        tx.commit().await?;
        info!("Updated address {}", id);
        Ok(Address::new(id, fields))
    }

    /// Deletes the address identified by `id` and returns its last contents.
    pub(crate) async fn delete_address(self, id: AddressId) -> DriverResult<Address> {
        info!("Deleting address {}", id);
        let mut tx = self.db.begin().await?;
        let result = db::get_address(tx.ex(), id).await;
        let address = warn_if_not_found(result.or_not_found(ADDRESS_NOT_FOUND), "Address", id)?;
        db::delete_address(tx.ex(), id).await?;
        tx.commit().await?;
        info!("Deleted address {}", id);
        Ok(address)
    }
}
