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

//! Scanning `SHOW FUNCTIONS` rows

use serde::{Deserialize, Deserializer};

use crate::api::Row;
use crate::core::Result;

/// One row of `SHOW FUNCTIONS`, reduced to the columns the resource reads.
///
/// Columns the warehouse returns beyond these are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UdfRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default, alias = "catalog_name")]
    pub database_name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, alias = "description")]
    pub comment: Option<String>,
    /// Signature summary, e.g. `ADD_ONE(NUMBER) RETURN NUMBER`
    #[serde(default)]
    pub arguments: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_secure: bool,
}

impl UdfRow {
    /// Scan a result row
    pub fn scan(row: Row) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = row.into_iter().collect();
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }
}

/// Snowflake reports flags as `Y`/`N` text; drivers may also hand back real
/// booleans or `true`/`false` strings.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
        Null(()),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Null(()) => Ok(false),
        Flag::Text(s) => match s.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" | "TRUE" => Ok(true),
            "N" | "NO" | "FALSE" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid flag value: {}",
                other
            ))),
        },
    }
}
