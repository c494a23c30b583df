// Copyright 2025 Snowflake UDF Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! User-defined function resource
//!
//! Functions can be overloaded, so strictly the identity of a function is its
//! name plus its argument types. The persisted id only carries database,
//! schema and name; argument types come from the resource's own field set
//! whenever a signature is needed.

use tracing::{debug, info};

use crate::api::DatabaseOps;
use crate::core::{Error, Result};
use crate::ddl::UdfBuilder;

use super::data::ResourceData;
use super::id::{IdentifierCodec, UdfId};
use super::row::UdfRow;
use super::schema::UdfDefinition;
use super::Resource;

/// Lifecycle of a Snowflake user-defined function
#[derive(Debug, Clone, Copy, Default)]
pub struct UdfResource {
    codec: IdentifierCodec,
}

impl UdfResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `codec` for persisted ids instead of the pipe-delimited default
    pub fn with_codec(codec: IdentifierCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &IdentifierCodec {
        &self.codec
    }

    fn decode_id(&self, d: &ResourceData<UdfDefinition>) -> Result<UdfId> {
        self.codec.decode(d.id())
    }

    /// Builder addressing the function behind `id`, with the argument types
    /// needed for its signature
    fn scoped_builder(id: &UdfId, def: &UdfDefinition) -> UdfBuilder {
        UdfBuilder::new(&id.name)
            .with_db(&id.database_name)
            .with_schema(&id.schema_name)
            .with_arguments(def.arguments.clone())
    }
}

fn exec(db: &mut dyn DatabaseOps, sql: &str, context: impl FnOnce() -> String) -> Result<()> {
    debug!(sql = %sql, "executing");
    db.execute(sql)
        .map(|_| ())
        .map_err(|e| Error::execution(context(), e))
}

impl Resource for UdfResource {
    type Definition = UdfDefinition;

    fn create(&self, d: &mut ResourceData<UdfDefinition>, db: &mut dyn DatabaseOps) -> Result<()> {
        let def = d.get();
        let name = def.name.clone();

        let q = def.builder().create()?;
        exec(db, &q, || format!("error creating function {}", name))?;

        let id = UdfId::new(&def.database, &def.schema, &def.name);
        let encoded = self.codec.encode(&id)?;
        info!(id = %encoded, "created function");
        d.set_id(encoded);

        self.read(d, db)?;
        d.commit();
        Ok(())
    }

    fn read(&self, d: &mut ResourceData<UdfDefinition>, db: &mut dyn DatabaseOps) -> Result<()> {
        let id = self.decode_id(d)?;

        let q = UdfBuilder::new(&id.name)
            .with_db(&id.database_name)
            .with_schema(&id.schema_name)
            .show();
        debug!(sql = %q, "querying");

        // Several overloads can share a name; the first row is taken.
        let row = match db.query_row(&q) {
            Ok(row) => row,
            Err(e) if e.is_no_rows() => {
                debug!(id = d.id(), "function not found, clearing id");
                d.clear_id();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let v = UdfRow::scan(row)?;

        let def = d.get_mut();
        def.name = v.name.unwrap_or_default();
        def.is_secure = v.is_secure;
        def.language = v.language.unwrap_or_default();
        def.schema = v.schema_name.unwrap_or_default();
        def.database = v.database_name.unwrap_or_default();

        Ok(())
    }

    fn update(&self, d: &mut ResourceData<UdfDefinition>, db: &mut dyn DatabaseOps) -> Result<()> {
        let id = self.decode_id(d)?;
        let mut builder = Self::scoped_builder(&id, d.get());

        if d.has_change(|def| &def.name) {
            let new_name = d.get().name.clone();
            let q = builder.rename(&new_name)?;
            exec(db, &q, || format!("error renaming function {}", d.id()))?;

            let renamed = UdfId::new(&id.database_name, &id.schema_name, &new_name);
            let encoded = self.codec.encode(&renamed)?;
            info!(from = d.id(), to = %encoded, "renamed function");
            d.set_id(encoded);
        }

        if d.has_change(|def| &def.is_secure) {
            if d.get().is_secure {
                let q = builder.secure()?;
                exec(db, &q, || format!("error setting secure for function {}", d.id()))?;
            } else {
                let q = builder.unsecure()?;
                exec(db, &q, || {
                    format!("error unsetting secure for function {}", d.id())
                })?;
            }
        }

        self.read(d, db)?;
        d.commit();
        Ok(())
    }

    fn delete(&self, d: &mut ResourceData<UdfDefinition>, db: &mut dyn DatabaseOps) -> Result<()> {
        let id = self.decode_id(d)?;

        let q = Self::scoped_builder(&id, d.get()).drop()?;
        exec(db, &q, || format!("error deleting function {}", d.id()))?;

        info!(id = d.id(), "deleted function");
        d.clear_id();
        Ok(())
    }

    fn exists(&self, d: &ResourceData<UdfDefinition>, db: &mut dyn DatabaseOps) -> Result<bool> {
        let id = self.decode_id(d)?;

        let q = UdfBuilder::new(&id.name)
            .with_db(&id.database_name)
            .with_schema(&id.schema_name)
            .show();
        let rows = db.query(&q)?;

        Ok(!rows.is_empty())
    }

    fn import(&self, id: &str) -> Result<ResourceData<UdfDefinition>> {
        let decoded = self.codec.decode(id)?;
        let def = UdfDefinition {
            name: decoded.name,
            database: decoded.database_name,
            schema: decoded.schema_name,
            ..Default::default()
        };
        Ok(ResourceData::from_state(id, def))
    }
}
