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

//! UDF resource schema
//!
//! The declarative field set of a function resource, the metadata describing
//! each field, and the rules deciding whether a change can be applied in
//! place or needs the function to be re-created.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::ddl::{Arguments, UdfBuilder};

/// Value kind of a resource field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    List,
}

/// Metadata for one field of the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Changing the field drops and re-creates the function
    pub force_new: bool,
    pub description: &'static str,
}

/// Field metadata for the UDF resource, in declaration order
pub const UDF_SCHEMA: &[FieldSchema] = &[
    FieldSchema {
        key: "name",
        kind: FieldKind::String,
        required: true,
        force_new: false,
        description: "Specifies the identifier for the function; must be unique, in combination with parameters, for the schema in which the function is created. Don't use the | character.",
    },
    FieldSchema {
        key: "database",
        kind: FieldKind::String,
        required: true,
        force_new: true,
        description: "The database in which to create the function. Don't use the | character.",
    },
    FieldSchema {
        key: "schema",
        kind: FieldKind::String,
        required: true,
        force_new: true,
        description: "The schema in which to create the function. Don't use the | character.",
    },
    FieldSchema {
        key: "or_replace",
        kind: FieldKind::Bool,
        required: false,
        force_new: false,
        description: "Overwrites the function if it exists.",
    },
    FieldSchema {
        key: "is_secure",
        kind: FieldKind::Bool,
        required: false,
        force_new: false,
        description: "Specifies that the function is secure.",
    },
    FieldSchema {
        key: "return_type",
        kind: FieldKind::String,
        required: true,
        force_new: false,
        description: "Specifies return type of the udf.",
    },
    FieldSchema {
        key: "language",
        kind: FieldKind::String,
        required: false,
        force_new: false,
        description: "Specifies the language used in the body of the udf.",
    },
    FieldSchema {
        key: "argument",
        kind: FieldKind::List,
        required: true,
        force_new: true,
        description: "Definitions of an argument the function is able to receive.",
    },
    FieldSchema {
        key: "body",
        kind: FieldKind::String,
        required: true,
        force_new: true,
        description: "Specifies the query used to create the function.",
    },
];

/// Look up the metadata of a field by key
pub fn field_schema(key: &str) -> Option<&'static FieldSchema> {
    UDF_SCHEMA.iter().find(|f| f.key == key)
}

/// Declarative description of a user-defined function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfDefinition {
    pub name: String,
    pub database: String,
    pub schema: String,
    #[serde(default)]
    pub or_replace: bool,
    #[serde(default)]
    pub is_secure: bool,
    pub return_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, rename = "argument")]
    pub arguments: Arguments,
    pub body: String,
}

impl UdfDefinition {
    /// Load a definition from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidDefinition(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Parse a definition from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let def: UdfDefinition =
            serde_json::from_str(text).map_err(|e| Error::InvalidDefinition(e.to_string()))?;
        def.validate()?;
        Ok(def)
    }

    /// Check that every required string field is set
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("database", &self.database),
            ("schema", &self.schema),
            ("return_type", &self.return_type),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(Error::InvalidDefinition(format!("{} is required", key)));
            }
        }
        for arg in &self.arguments {
            if arg.name.is_empty() || arg.data_type.is_empty() {
                return Err(Error::InvalidDefinition(
                    "every argument needs a name and a type".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// A builder carrying every field of this definition
    pub fn builder(&self) -> UdfBuilder {
        UdfBuilder::new(&self.name)
            .with_db(&self.database)
            .with_schema(&self.schema)
            .with_arguments(self.arguments.clone())
            .with_replace(self.or_replace)
            .with_secure(self.is_secure)
            .with_return_type(&self.return_type)
            .with_language(&self.language)
            .with_body(&self.body)
    }
}

/// Whether two bodies are equal once line endings are normalized and trailing
/// `;`, `\r` and `\n` characters are dropped.
///
/// Snowflake does not hand bodies back byte for byte, so this is the
/// comparison used to decide whether a body changed.
pub fn body_diff_suppressed(old: &str, new: &str) -> bool {
    let old = old.replace("\r\n", "\n");
    let new = new.replace("\r\n", "\n");

    old.trim_end_matches([';', '\r', '\n']) == new.trim_end_matches([';', '\r', '\n'])
}

/// Force-new fields whose value differs between `prior` and `planned`
pub fn replacement_fields(prior: &UdfDefinition, planned: &UdfDefinition) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if prior.database != planned.database {
        changed.push("database");
    }
    if prior.schema != planned.schema {
        changed.push("schema");
    }
    if prior.arguments != planned.arguments {
        changed.push("argument");
    }
    if !body_diff_suppressed(&prior.body, &planned.body) {
        changed.push("body");
    }
    debug_assert!(changed
        .iter()
        .all(|key| field_schema(key).is_some_and(|f| f.force_new)));
    changed
}

/// Whether moving from `prior` to `planned` needs the function re-created
pub fn requires_replacement(prior: &UdfDefinition, planned: &UdfDefinition) -> bool {
    !replacement_fields(prior, planned).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::Argument;

    fn definition() -> UdfDefinition {
        UdfDefinition {
            name: "good_name".to_string(),
            database: "test_db".to_string(),
            schema: "test_schema".to_string(),
            return_type: "VARIANT".to_string(),
            language: "javascript".to_string(),
            arguments: vec![Argument::new("arg1", "OBJECT")].into(),
            body: "return 1;".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_schema_force_new_fields() {
        let force_new: Vec<&str> = UDF_SCHEMA
            .iter()
            .filter(|f| f.force_new)
            .map(|f| f.key)
            .collect();
        assert_eq!(force_new, vec!["database", "schema", "argument", "body"]);
        assert_eq!(field_schema("name").unwrap().kind, FieldKind::String);
        assert!(field_schema("comment").is_none());
    }

    #[test]
    fn test_from_json_defaults() {
        let def = UdfDefinition::from_json(
            r#"{
                "name": "good_name",
                "database": "test_db",
                "schema": "test_schema",
                "return_type": "VARIANT",
                "argument": [{"name": "arg1", "type": "OBJECT"}],
                "body": "return 1;"
            }"#,
        )
        .unwrap();
        assert!(!def.or_replace);
        assert!(!def.is_secure);
        assert!(def.language.is_empty());
        assert_eq!(def.arguments.len(), 1);
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut def = definition();
        def.return_type.clear();
        let err = def.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid function definition: return_type is required"
        );

        let mut def = definition();
        def.arguments = vec![Argument::new("", "OBJECT")].into();
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_builder_carries_definition() {
        let q = definition().builder().create().unwrap();
        assert_eq!(
            q,
            r#"CREATE FUNCTION "test_db"."test_schema"."good_name" ("arg1" OBJECT) RETURNS VARIANT LANGUAGE javascript AS $$ return 1; $$"#
        );
    }

    #[test]
    fn test_body_diff_suppression() {
        assert!(body_diff_suppressed("select 1;", "select 1"));
        assert!(body_diff_suppressed("a;\r\n", "a"));
        assert!(body_diff_suppressed("line1\r\nline2", "line1\nline2\n"));
        assert!(!body_diff_suppressed("a", "b"));
        assert!(!body_diff_suppressed("a b", "a  b"));
    }

    #[test]
    fn test_requires_replacement() {
        let prior = definition();

        let mut planned = prior.clone();
        planned.name = "renamed".to_string();
        planned.is_secure = true;
        assert!(!requires_replacement(&prior, &planned));

        planned.body = "return 1;\n".to_string();
        assert!(!requires_replacement(&prior, &planned));

        planned.body = "return 2;".to_string();
        planned.schema = "other".to_string();
        assert_eq!(replacement_fields(&prior, &planned), vec!["schema", "body"]);
    }
}
