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

//! Escaping for values interpolated into DDL text

/// Escape a value for use inside a double-quoted identifier.
///
/// Embedded double quotes are doubled, which is how Snowflake reads a literal
/// `"` inside a quoted identifier.
pub fn escape_identifier(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// Quote an identifier, escaping embedded double quotes
pub fn quote_identifier(s: &str) -> String {
    format!("\"{}\"", escape_identifier(s))
}

/// Escape a bare value or single-quoted literal.
///
/// Backslashes are escaped first so that the escape added in front of `'`
/// cannot itself be neutralized by a trailing backslash in the input.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("plain"), "plain");
        assert_eq!(escape_identifier(r#"my"db"#), r#"my""db"#);
        assert_eq!(quote_identifier(r#"a"b"#), r#""a""b""#);
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("VARCHAR"), "VARCHAR");
        assert_eq!(escape_string("bad' comment"), r"bad\' comment");
        assert_eq!(escape_string(r"trailing\"), r"trailing\\");
        assert_eq!(escape_string(r"\'"), r"\\\'");
    }
}
