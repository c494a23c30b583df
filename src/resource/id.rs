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

//! Persisted function identifiers
//!
//! A function is tracked by the string `database|schema|name`, written as a
//! single CSV record with `|` as the delimiter. CSV quoting keeps the
//! encoding reversible even when a component contains the delimiter or a
//! double quote.

use crate::core::{Error, Result};

/// Delimiter used by resource identifiers
pub const PIPE_ID_DELIMITER: u8 = b'|';

/// Database, schema and name of a previously created function
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UdfId {
    pub database_name: String,
    pub schema_name: String,
    pub name: String,
}

impl UdfId {
    pub fn new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            schema_name: schema_name.into(),
            name: name.into(),
        }
    }

    /// Encode with the default pipe-delimited codec
    pub fn encode(&self) -> Result<String> {
        IdentifierCodec::default().encode(self)
    }

    /// Decode with the default pipe-delimited codec
    pub fn decode(id: &str) -> Result<Self> {
        IdentifierCodec::default().decode(id)
    }
}

/// Encodes [`UdfId`] values to and from a single delimited CSV record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierCodec {
    delimiter: u8,
}

impl IdentifierCodec {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Encode `id` as one CSV record without its record terminator
    pub fn encode(&self, id: &UdfId) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record([&id.database_name, &id.schema_name, &id.name])
            .map_err(|e| Error::IdentifierEncode(e.to_string()))?;

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::IdentifierEncode(e.to_string()))?;
        let mut encoded =
            String::from_utf8(bytes).map_err(|e| Error::IdentifierEncode(e.to_string()))?;

        if encoded.ends_with('\n') {
            encoded.pop();
        }
        Ok(encoded)
    }

    /// Decode a string holding exactly one record of exactly three fields
    pub fn decode(&self, id: &str) -> Result<UdfId> {
        self.check_quoting(id)?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(id.as_bytes());

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                Error::malformed_identifier(id, format!("not CSV compatible: {}", e))
            })?;
            records.push(record);
        }

        if records.len() != 1 {
            return Err(Error::malformed_identifier(
                id,
                format!("expected 1 record, found {}", records.len()),
            ));
        }

        let record = &records[0];
        if record.len() != 3 {
            return Err(Error::malformed_identifier(
                id,
                format!("expected 3 fields, found {}", record.len()),
            ));
        }

        Ok(UdfId::new(&record[0], &record[1], &record[2]))
    }

    /// Reject quoting the reader would otherwise tolerate.
    ///
    /// A field is either unquoted and free of `"`, or fully quoted with inner
    /// quotes doubled and the closing quote right before a delimiter, a line
    /// break or the end of input.
    fn check_quoting(&self, id: &str) -> Result<()> {
        let bytes = id.as_bytes();
        let is_separator = |b: u8| b == self.delimiter || b == b'\n' || b == b'\r';
        let mut field_start = true;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            if field_start && b == b'"' {
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => {
                            return Err(Error::malformed_identifier(
                                id,
                                "not CSV compatible: unterminated quoted field",
                            ))
                        }
                        Some(b'"') if bytes.get(i + 1) == Some(&b'"') => i += 2,
                        Some(b'"') => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
                match bytes.get(i) {
                    None => return Ok(()),
                    Some(&c) if is_separator(c) => i += 1,
                    Some(_) => {
                        return Err(Error::malformed_identifier(
                            id,
                            "not CSV compatible: text after closing quote",
                        ))
                    }
                }
                field_start = true;
                continue;
            }
            if b == b'"' {
                return Err(Error::malformed_identifier(
                    id,
                    "not CSV compatible: bare quote in unquoted field",
                ));
            }
            field_start = is_separator(b);
            i += 1;
        }
        Ok(())
    }
}

impl Default for IdentifierCodec {
    fn default() -> Self {
        Self::new(PIPE_ID_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain() {
        let id = UdfId::new("test_db", "test_schema", "good_name");
        assert_eq!(id.encode().unwrap(), "test_db|test_schema|good_name");
    }

    #[test]
    fn test_decode_plain() {
        let id = UdfId::decode("test_db|test_schema|good_name").unwrap();
        assert_eq!(id, UdfId::new("test_db", "test_schema", "good_name"));
    }

    #[test]
    fn test_decode_wrong_field_count() {
        for bad in ["a|b", "a|b|c|d", "abc"] {
            let err = UdfId::decode(bad).unwrap_err();
            assert!(
                matches!(err, Error::MalformedIdentifier { .. }),
                "{} should be malformed, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_decode_multiple_records() {
        let err = UdfId::decode("a|b|c\nd|e|f").unwrap_err();
        assert!(err.to_string().contains("expected 1 record, found 2"));
    }

    #[test]
    fn test_decode_rejects_bad_quoting() {
        for bad in [r#"a|b"x|c"#, r#"a|b|"c"#, r#"a|b|"c"d"#] {
            let err = UdfId::decode(bad).unwrap_err();
            assert!(
                err.to_string().contains("not CSV compatible"),
                "{} should be rejected, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_decode_doubled_quotes() {
        let id = UdfId::decode(r#"a|"b""x"|c"#).unwrap();
        assert_eq!(id.schema_name, r#"b"x"#);
    }

    #[test]
    fn test_decode_empty() {
        let err = UdfId::decode("").unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_delimiter_inside_component_is_quoted() {
        let id = UdfId::new("db", "sch|ema", "name");
        let encoded = id.encode().unwrap();
        assert_eq!(encoded, r#"db|"sch|ema"|name"#);
        assert_eq!(UdfId::decode(&encoded).unwrap(), id);
    }

    #[test]
    fn test_custom_delimiter() {
        let codec = IdentifierCodec::new(b',');
        let id = UdfId::new("db", "schema", "name");
        let encoded = codec.encode(&id).unwrap();
        assert_eq!(encoded, "db,schema,name");
        assert_eq!(codec.decode(&encoded).unwrap(), id);
        assert!(codec.decode("db|schema|name").is_err());
    }
}
