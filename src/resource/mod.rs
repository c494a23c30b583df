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

//! Declarative resources
//!
//! A resource maps a declarative field set onto DDL. Each lifecycle call
//! renders its statements, runs them one at a time through a
//! [`DatabaseOps`], and copies what it reads back into [`ResourceData`].

pub mod data;
pub mod id;
pub mod row;
pub mod schema;
pub mod udf;

pub use data::ResourceData;
pub use id::{IdentifierCodec, UdfId, PIPE_ID_DELIMITER};
pub use row::UdfRow;
pub use schema::{
    body_diff_suppressed, field_schema, replacement_fields, requires_replacement, FieldKind,
    FieldSchema, UdfDefinition, UDF_SCHEMA,
};
pub use udf::UdfResource;

use crate::api::DatabaseOps;
use crate::core::Result;

/// Lifecycle operations of a resource kind
pub trait Resource {
    /// Declarative field set of the resource
    type Definition: Clone;

    /// Create the object, set the id, then read it back and commit the
    /// result as the applied state
    fn create(
        &self,
        d: &mut ResourceData<Self::Definition>,
        db: &mut dyn DatabaseOps,
    ) -> Result<()>;

    /// Refresh the planned field set from the warehouse. A missing object
    /// clears the id instead of failing.
    fn read(&self, d: &mut ResourceData<Self::Definition>, db: &mut dyn DatabaseOps)
        -> Result<()>;

    /// Apply in-place changes between prior and planned, then read back and
    /// commit the result as the applied state
    fn update(
        &self,
        d: &mut ResourceData<Self::Definition>,
        db: &mut dyn DatabaseOps,
    ) -> Result<()>;

    /// Drop the object and clear the id
    fn delete(
        &self,
        d: &mut ResourceData<Self::Definition>,
        db: &mut dyn DatabaseOps,
    ) -> Result<()>;

    /// Whether the object behind the id still exists
    fn exists(&self, d: &ResourceData<Self::Definition>, db: &mut dyn DatabaseOps)
        -> Result<bool>;

    /// Seed resource data from an existing id
    fn import(&self, id: &str) -> Result<ResourceData<Self::Definition>>;
}
