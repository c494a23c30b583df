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

//! Snowflake user-defined function resources
//!
//! Maps a declarative function description onto the DDL that creates, reads,
//! updates and deletes it.
//!
//! # Examples
//!
//! ```
//! use snowflake_udf::ddl::{Argument, UdfBuilder};
//!
//! let q = UdfBuilder::new("fn")
//!     .with_db("db")
//!     .with_schema("schema")
//!     .with_arguments(vec![Argument::new("arg1", "OBJECT")])
//!     .with_body("body text")
//!     .create()
//!     .unwrap();
//! assert_eq!(q, r#"CREATE FUNCTION "db"."schema"."fn" ("arg1" OBJECT) AS $$ body text $$"#);
//! ```

pub mod api;
pub mod core;
pub mod ddl;
pub mod logging;
pub mod resource;

pub use api::{DatabaseOps, RecordingDatabase, Row};
pub use crate::core::{Error, Result};
pub use ddl::{Argument, Arguments, UdfBuilder};
pub use resource::{IdentifierCodec, Resource, ResourceData, UdfDefinition, UdfId, UdfResource};
