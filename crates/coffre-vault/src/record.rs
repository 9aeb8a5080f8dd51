//! Credential records as stored inside the encrypted file and in exports.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Timestamp layout used on disk and in exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One saved credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Lookup key for delete and search.
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub description: String,
    /// Local time the record was saved.
    #[serde(rename = "date", with = "date_format")]
    pub created_at: NaiveDateTime,
}

impl CredentialRecord {
    /// Build a record stamped with the current local time (second precision).
    #[must_use]
    pub fn new(name: &str, password: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            password: password.to_string(),
            description: description.to_string(),
            created_at: now(),
        }
    }

    /// Copy with the password replaced by `*` per character.
    #[must_use]
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        masked.password = "*".repeat(self.password.chars().count());
        masked
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("name", &self.name)
            .field("password", &"***")
            .field("description", &self.description)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Drop for CredentialRecord {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Current local time truncated to whole seconds, matching [`DATE_FORMAT`].
pub(crate) fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde adapter for `"YYYY-MM-DD HH:MM:SS"` timestamps.
pub mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }

    /// Same layout for optional timestamps (`null` when absent).
    pub mod option {
        use super::DATE_FORMAT;
        use chrono::NaiveDateTime;
        use serde::Serializer;

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(ts) => s.collect_str(&ts.format(DATE_FORMAT)),
                None => s.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> CredentialRecord {
        CredentialRecord {
            name: "mail".into(),
            password: "pässword".into(),
            description: "work".into(),
            created_at: NaiveDateTime::parse_from_str("2024-03-01 09:15:42", DATE_FORMAT).unwrap(),
        }
    }

    #[test]
    fn json_uses_date_field() {
        let json = serde_json::to_value(fixed()).unwrap();
        assert_eq!(json["date"], "2024-03-01 09:15:42");
        assert_eq!(json["name"], "mail");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn json_roundtrip() {
        let json = serde_json::to_string(&fixed()).unwrap();
        let back: CredentialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fixed());
    }

    #[test]
    fn description_defaults_to_empty() {
        let record: CredentialRecord = serde_json::from_str(
            r#"{"name":"a","password":"b","date":"2024-01-01 00:00:00"}"#,
        )
        .unwrap();
        assert!(record.description.is_empty());
    }

    #[test]
    fn bad_date_rejected() {
        let parsed: Result<CredentialRecord, _> =
            serde_json::from_str(r#"{"name":"a","password":"b","date":"yesterday"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn masking_preserves_char_length() {
        let masked = fixed().masked();
        assert_eq!(masked.password, "********");
        assert_eq!(masked.name, "mail");
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", fixed());
        assert!(!debug.contains("pässword"));
        assert!(debug.contains("mail"));
    }

    #[test]
    fn new_record_has_whole_seconds() {
        let record = CredentialRecord::new("a", "b", "");
        assert_eq!(record.created_at.and_utc().timestamp_subsec_nanos(), 0);
    }
}
