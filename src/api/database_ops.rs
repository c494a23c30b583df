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

//! Database operations trait for resource lifecycles
//!
//! Resources never talk to a driver directly. They render SQL and hand it to
//! a [`DatabaseOps`] implementation, which runs it synchronously and reports
//! back. Connection handling, pooling and deadlines belong to the
//! implementation, not to the callers.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::core::{Error, Result};

/// A result row: column name to value, in result-set column order
pub type Row = IndexMap<String, serde_json::Value>;

/// Trait for the database operations a resource needs
pub trait DatabaseOps {
    /// Execute a SQL statement and return number of affected rows
    fn execute(&mut self, sql: &str) -> Result<i64>;

    /// Execute a query and return all rows
    fn query(&mut self, sql: &str) -> Result<Vec<Row>>;

    /// Execute a query and return its first row.
    ///
    /// An empty result is reported as [`Error::NoRowsReturned`]; extra rows
    /// are ignored.
    fn query_row(&mut self, sql: &str) -> Result<Row> {
        self.query(sql)?
            .into_iter()
            .next()
            .ok_or(Error::NoRowsReturned)
    }
}

/// In-memory [`DatabaseOps`] that records every statement it receives.
///
/// Queries are answered from a queue of prepared results (an empty result
/// once the queue runs dry). Statements starting with a registered prefix
/// fail with the registered message. Used to plan statements without a
/// warehouse connection and to drive lifecycle tests.
#[derive(Debug, Default)]
pub struct RecordingDatabase {
    statements: Vec<String>,
    query_results: VecDeque<Vec<Row>>,
    failures: Vec<(String, String)>,
}

impl RecordingDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next query
    pub fn push_query_result(&mut self, rows: Vec<Row>) -> &mut Self {
        self.query_results.push_back(rows);
        self
    }

    /// Make every statement starting with `prefix` fail with `message`
    pub fn fail_on(&mut self, prefix: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.failures.push((prefix.into(), message.into()));
        self
    }

    /// Every statement received so far, in order
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Drain the recorded statements
    pub fn take_statements(&mut self) -> Vec<String> {
        std::mem::take(&mut self.statements)
    }

    fn record(&mut self, sql: &str) -> Result<()> {
        self.statements.push(sql.to_string());
        match self
            .failures
            .iter()
            .find(|(prefix, _)| sql.starts_with(prefix.as_str()))
        {
            Some((_, message)) => Err(Error::Database(message.clone())),
            None => Ok(()),
        }
    }
}

impl DatabaseOps for RecordingDatabase {
    fn execute(&mut self, sql: &str) -> Result<i64> {
        self.record(sql)?;
        Ok(0)
    }

    fn query(&mut self, sql: &str) -> Result<Vec<Row>> {
        self.record(sql)?;
        Ok(self.query_results.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> Row {
        let mut row = Row::new();
        row.insert("name".to_string(), serde_json::json!(name));
        row
    }

    #[test]
    fn test_query_row_returns_first_row() {
        let mut db = RecordingDatabase::new();
        db.push_query_result(vec![row("first"), row("second")]);

        let first = db.query_row("SHOW FUNCTIONS").unwrap();
        assert_eq!(first["name"], "first");
    }

    #[test]
    fn test_query_row_on_empty_result() {
        let mut db = RecordingDatabase::new();
        let err = db.query_row("SHOW FUNCTIONS").unwrap_err();
        assert!(err.is_no_rows());
    }

    #[test]
    fn test_records_statements_and_failures() {
        let mut db = RecordingDatabase::new();
        db.fail_on("DROP", "insufficient privileges");

        assert_eq!(db.execute("CREATE FUNCTION f").unwrap(), 0);
        let err = db.execute("DROP FUNCTION f").unwrap_err();
        assert_eq!(err.to_string(), "database error: insufficient privileges");
        assert_eq!(
            db.take_statements(),
            vec!["CREATE FUNCTION f".to_string(), "DROP FUNCTION f".to_string()]
        );
        assert!(db.statements().is_empty());
    }
}
