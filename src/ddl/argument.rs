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

//! Function arguments
//!
//! Arguments are part of a function's overload signature, so their order is
//! preserved everywhere they are rendered.

use serde::{Deserialize, Serialize};

use super::escape::{escape_string, quote_identifier};

/// A single named, typed function argument
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// `"name" TYPE`, as used in CREATE FUNCTION
    fn definition(&self) -> String {
        format!(
            "{} {}",
            quote_identifier(&self.name),
            escape_string(&self.data_type)
        )
    }

    /// `TYPE`, as used in the signature of ALTER and DROP
    fn type_definition(&self) -> String {
        escape_string(&self.data_type)
    }
}

/// Ordered argument list of a function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    pub fn new(args: Vec<Argument>) -> Self {
        Self(args)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parenthesized `"name" TYPE` pairs; `()` when empty
    pub fn definitions(&self) -> String {
        let defs: Vec<String> = self.0.iter().map(Argument::definition).collect();
        format!("({})", defs.join(", "))
    }

    /// Parenthesized argument types only; `()` when empty
    pub fn type_definitions(&self) -> String {
        let defs: Vec<String> = self.0.iter().map(Argument::type_definition).collect();
        format!("({})", defs.join(", "))
    }
}

impl From<Vec<Argument>> for Arguments {
    fn from(args: Vec<Argument>) -> Self {
        Self(args)
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
