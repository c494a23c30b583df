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

//! Error types
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is the single [`Error`] enum below.

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rendering statements, handling identifiers or talking
/// to the warehouse
#[derive(Error, Debug)]
pub enum Error {
    /// A qualified name was requested before database and schema were set
    #[error("functions must specify a database and a schema")]
    MissingScope,

    /// A persisted identifier does not follow the `database|schema|name` grammar
    #[error("malformed function identifier {id:?}: {reason}")]
    MalformedIdentifier { id: String, reason: String },

    /// The CSV writer failed while encoding an identifier
    #[error("failed to encode function identifier: {0}")]
    IdentifierEncode(String),

    /// A statement failed on the warehouse
    #[error("{message}: {source}")]
    Execution {
        message: String,
        #[source]
        source: Box<Error>,
    },

    /// A single-row query came back empty
    #[error("no rows returned")]
    NoRowsReturned,

    /// Failure reported by the database driver
    #[error("database error: {0}")]
    Database(String),

    /// A result row could not be scanned into a record
    #[error("failed to scan row: {0}")]
    RowDecode(#[from] serde_json::Error),

    /// A resource definition is missing a required field or is otherwise unusable
    #[error("invalid function definition: {0}")]
    InvalidDefinition(String),
}

impl Error {
    /// Create a malformed identifier error
    pub fn malformed_identifier(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedIdentifier {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a driver failure with an operation-specific message
    pub fn execution(message: impl Into<String>, source: Error) -> Self {
        Error::Execution {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error signals that a single-row query matched nothing
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Error::NoRowsReturned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_keeps_context_and_source() {
        let err = Error::execution(
            "error creating function add_one",
            Error::Database("SQL compilation error".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "error creating function add_one: database error: SQL compilation error"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "database error: SQL compilation error");
    }

    #[test]
    fn test_is_no_rows() {
        assert!(Error::NoRowsReturned.is_no_rows());
        assert!(!Error::MissingScope.is_no_rows());
    }
}
