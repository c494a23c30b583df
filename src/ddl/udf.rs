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

//! User-defined function DDL
//!
//! [`UdfBuilder`] renders the statements used to manage a function:
//! - CREATE [OR REPLACE] [SECURE] FUNCTION
//! - ALTER FUNCTION ... RENAME TO
//! - ALTER FUNCTION ... SET SECURE / UNSET SECURE
//! - SHOW FUNCTIONS
//! - DROP FUNCTION
//!
//! Setters never validate. Every render method checks its own preconditions,
//! so a builder missing its database or schema fails when a statement is
//! requested rather than when it is configured.

use crate::core::{Error, Result};

use super::argument::Arguments;
use super::escape::{escape_identifier, escape_string, quote_identifier};

/// Builder for user-defined function DDL statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UdfBuilder {
    name: String,
    db: String,
    schema: String,
    replace: bool,
    secure: bool,
    language: String,
    return_type: String,
    arguments: Arguments,
    body: String,
}

impl UdfBuilder {
    /// Create a builder for the function `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the owning database
    pub fn with_db(mut self, db: impl Into<String>) -> Self {
        self.db = db.into();
        self
    }

    /// Set the owning schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set the argument list
    pub fn with_arguments(mut self, arguments: impl Into<Arguments>) -> Self {
        self.arguments = arguments.into();
        self
    }

    /// Render `CREATE OR REPLACE` instead of `CREATE`
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Render a `SECURE` function
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the `RETURNS` type; empty means the clause is omitted
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Set the `LANGUAGE`; empty means the clause is omitted
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the function body. The body is rendered verbatim between `$$`
    /// delimiters, so it must not contain `$$` itself.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn db(&self) -> &str {
        &self.db
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// `"db"."schema"."name"`, each part escaped for a quoted identifier
    pub fn qualified_name(&self) -> Result<String> {
        if self.db.is_empty() || self.schema.is_empty() {
            return Err(Error::MissingScope);
        }

        Ok(format!(
            "{}.{}.{}",
            quote_identifier(&self.db),
            quote_identifier(&self.schema),
            quote_identifier(&self.name)
        ))
    }

    /// Render the CREATE FUNCTION statement
    pub fn create(&self) -> Result<String> {
        let qn = self.qualified_name()?;

        let mut q = String::from("CREATE");

        if self.replace {
            q.push_str(" OR REPLACE");
        }

        if self.secure {
            q.push_str(" SECURE");
        }

        q.push_str(&format!(" FUNCTION {}", qn));
        q.push_str(&format!(" {}", self.arguments.definitions()));

        if !self.return_type.is_empty() {
            q.push_str(&format!(" RETURNS {}", escape_string(&self.return_type)));
        }

        if !self.language.is_empty() {
            q.push_str(&format!(" LANGUAGE {}", escape_string(&self.language)));
        }

        q.push_str(&format!(" AS $$ {} $$", self.body));

        Ok(q)
    }

    /// Render the RENAME statement.
    ///
    /// The builder takes `new_name` as its own name, so statements rendered
    /// afterwards address the renamed function.
    pub fn rename(&mut self, new_name: impl Into<String>) -> Result<String> {
        let old_name = self.qualified_name()?;
        self.name = new_name.into();
        let qn = self.qualified_name()?;

        Ok(format!(
            "ALTER FUNCTION {} {} RENAME TO {}",
            old_name,
            self.arguments.type_definitions(),
            qn
        ))
    }

    /// Render the statement that makes the function secure
    pub fn secure(&self) -> Result<String> {
        Ok(format!(
            "ALTER FUNCTION {} {} SET SECURE",
            self.qualified_name()?,
            self.arguments.type_definitions()
        ))
    }

    /// Render the statement that makes the function a normal (non-secure) one
    pub fn unsecure(&self) -> Result<String> {
        Ok(format!(
            "ALTER FUNCTION {} {} UNSET SECURE",
            self.qualified_name()?,
            self.arguments.type_definitions()
        ))
    }

    /// Render the SHOW statement listing functions with this name.
    ///
    /// The LIKE pattern is the raw name; it is not escaped.
    pub fn show(&self) -> String {
        format!(
            "SHOW FUNCTIONS LIKE '{}' IN SCHEMA \"{}\".\"{}\"",
            self.name,
            escape_identifier(&self.db),
            escape_identifier(&self.schema)
        )
    }

    /// Render the DROP FUNCTION statement
    pub fn drop(&self) -> Result<String> {
        Ok(format!(
            "DROP FUNCTION {} {}",
            self.qualified_name()?,
            self.arguments.type_definitions()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::Argument;

    fn two_args() -> Vec<Argument> {
        vec![
            Argument::new("arg1", "OBJECT"),
            Argument::new("arg12", "VARCHAR"),
        ]
    }

    #[test]
    fn test_qualified_name() {
        let b = UdfBuilder::new("udf").with_db("db").with_schema("schema");
        assert_eq!(b.qualified_name().unwrap(), r#""db"."schema"."udf""#);
    }

    #[test]
    fn test_qualified_name_requires_scope() {
        let b = UdfBuilder::new("udf");
        assert!(matches!(b.qualified_name(), Err(Error::MissingScope)));

        let b = UdfBuilder::new("udf").with_db("db");
        assert!(matches!(b.qualified_name(), Err(Error::MissingScope)));

        let b = UdfBuilder::new("udf").with_schema("schema");
        assert!(matches!(b.qualified_name(), Err(Error::MissingScope)));
    }

    #[test]
    fn test_setters_do_not_validate() {
        let b = UdfBuilder::new("").with_db("").with_schema("");
        assert!(b.create().is_err());
        assert!(b.drop().is_err());
        assert!(b.secure().is_err());
        assert!(b.unsecure().is_err());
    }

    #[test]
    fn test_create_secure() {
        let b = UdfBuilder::new("test")
            .with_db("some_database")
            .with_schema("some_schema")
            .with_secure(true)
            .with_arguments(two_args())
            .with_return_type("VARIANT")
            .with_body("PARSE_JSON(BASE64_DECODE_STRING(parent:child::string))");

        assert_eq!(
            b.create().unwrap(),
            r#"CREATE SECURE FUNCTION "some_database"."some_schema"."test" ("arg1" OBJECT, "arg12" VARCHAR) RETURNS VARIANT AS $$ PARSE_JSON(BASE64_DECODE_STRING(parent:child::string)) $$"#
        );
    }

    #[test]
    fn test_create_or_replace_with_language() {
        let b = UdfBuilder::new("good_name")
            .with_db("test_db")
            .with_schema("test_schema")
            .with_replace(true)
            .with_arguments(vec![Argument::new("arg1", "OBJECT")])
            .with_return_type("VARIANT")
            .with_language("javascript")
            .with_body("return 1;");

        assert_eq!(
            b.create().unwrap(),
            r#"CREATE OR REPLACE FUNCTION "test_db"."test_schema"."good_name" ("arg1" OBJECT) RETURNS VARIANT LANGUAGE javascript AS $$ return 1; $$"#
        );
    }

    #[test]
    fn test_body_is_not_escaped() {
        let b = UdfBuilder::new("f")
            .with_db("db")
            .with_schema("s")
            .with_body(r#"return "it's";"#);

        assert_eq!(
            b.create().unwrap(),
            r#"CREATE FUNCTION "db"."s"."f" () AS $$ return "it's"; $$"#
        );
    }

    #[test]
    fn test_alter_statements_use_types_only() {
        let b = UdfBuilder::new("test")
            .with_db("some_database")
            .with_schema("some_schema")
            .with_arguments(two_args());

        assert_eq!(
            b.secure().unwrap(),
            r#"ALTER FUNCTION "some_database"."some_schema"."test" (OBJECT, VARCHAR) SET SECURE"#
        );
        assert_eq!(
            b.unsecure().unwrap(),
            r#"ALTER FUNCTION "some_database"."some_schema"."test" (OBJECT, VARCHAR) UNSET SECURE"#
        );
        assert_eq!(
            b.drop().unwrap(),
            r#"DROP FUNCTION "some_database"."some_schema"."test" (OBJECT, VARCHAR)"#
        );
    }

    #[test]
    fn test_rename_updates_name() {
        let mut b = UdfBuilder::new("test").with_db("db").with_schema("schema");

        assert_eq!(
            b.rename("test2").unwrap(),
            r#"ALTER FUNCTION "db"."schema"."test" () RENAME TO "db"."schema"."test2""#
        );
        assert_eq!(b.name(), "test2");

        let mut b = b.with_db("testDB");
        assert_eq!(
            b.rename("test3").unwrap(),
            r#"ALTER FUNCTION "testDB"."schema"."test2" () RENAME TO "testDB"."schema"."test3""#
        );
    }

    #[test]
    fn test_rename_without_scope_keeps_name() {
        let mut b = UdfBuilder::new("test");
        assert!(b.rename("other").is_err());
        assert_eq!(b.name(), "test");
    }

    #[test]
    fn test_show() {
        let b = UdfBuilder::new("test").with_db("mydb").with_schema("some_schema");
        assert_eq!(
            b.show(),
            r#"SHOW FUNCTIONS LIKE 'test' IN SCHEMA "mydb"."some_schema""#
        );
    }
}
