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

//! Entry point to the book review service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use iii_iv_bookreview::db::init_schema;
use iii_iv_bookreview::serve;
use iii_iv_core::db::Db;
use iii_iv_core::db::sqlite::{SqliteOptions, connect_file};
use iii_iv_core::rest::ServerOptions;
use std::error::Error;
use std::sync::Arc;

/// Prefix of all the environment variables that configure this service.
const ENV_PREFIX: &str = "BOOKREVIEW";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let db_opts = SqliteOptions::from_env(&format!("{}_DB", ENV_PREFIX))?;
    let server_opts = ServerOptions::from_env(ENV_PREFIX)?;

    let db: Arc<dyn Db + Send + Sync> = Arc::new(connect_file(db_opts).await?);
    init_schema(&mut db.ex().await?).await?;

    let result = serve(server_opts, db.clone()).await;
    db.close().await;
    Ok(result?)
}
