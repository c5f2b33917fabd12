//! Work experience entries attached to a user profile.
//!
//! Entries are kept structured in the store. On the wire they travel as the
//! JSON text of the entry array, which is what the profile page reads and
//! writes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidationError;

/// Maximum number of entries a profile may hold.
pub const MAX_ENTRIES: usize = 2;

/// One prior role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub experience: String,
}

/// Ordered work experience entries of a [`super::User`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkHistory(Vec<WorkExperience>);

impl WorkHistory {
    /// Create a [`WorkHistory`] from entries.
    pub fn new(entries: Vec<WorkExperience>) -> Self {
        Self(entries)
    }

    /// Parse the JSON text form.
    ///
    /// Text that is not a JSON array of entries yields an empty history.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Vec<WorkExperience>>(text) {
            Ok(entries) => Self(entries),
            Err(err) => {
                tracing::debug!(error = %err, "malformed work experience, using empty list");
                Self::default()
            },
        }
    }

    /// Encode entries as JSON text.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    pub fn entries(&self) -> &[WorkExperience] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for WorkHistory {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = self.to_text().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHistory {
    Text(String),
    Entries(Vec<WorkExperience>),
}

impl<'de> Deserialize<'de> for WorkHistory {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        match RawHistory::deserialize(deserializer) {
            Ok(RawHistory::Text(text)) => Ok(Self::from_text(&text)),
            Ok(RawHistory::Entries(entries)) => Ok(Self(entries)),
            Err(_) => Err(D::Error::custom(
                "workExperience must be a string or an array of entries",
            )),
        }
    }
}

/// Reject histories with more than [`MAX_ENTRIES`] entries.
pub fn validate_history(history: &WorkHistory) -> Result<(), ValidationError> {
    if history.len() > MAX_ENTRIES {
        return Err(ValidationError::new("work_experience"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(domain: &str) -> WorkExperience {
        WorkExperience {
            domain: domain.into(),
            subdomain: "MERN Stack".into(),
            experience: "3-5".into(),
        }
    }

    #[test]
    fn test_text_is_the_json_array() {
        let history = WorkHistory::new(vec![entry("Technology")]);

        assert_eq!(
            history.to_text().unwrap(),
            r#"[{"domain":"Technology","subdomain":"MERN Stack","experience":"3-5"}]"#
        );
        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            serde_json::Value::String(history.to_text().unwrap())
        );
    }

    #[test]
    fn test_malformed_text_is_empty() {
        assert!(WorkHistory::from_text("").is_empty());
        assert!(WorkHistory::from_text("not json").is_empty());
        assert!(WorkHistory::from_text(r#"{"domain":"x"}"#).is_empty());
    }

    #[test]
    fn test_deserialize_accepts_text_and_array() {
        let from_text: WorkHistory = serde_json::from_value(serde_json::json!(
            r#"[{"domain":"Technology","subdomain":"MERN Stack","experience":"3-5"}]"#
        ))
        .unwrap();
        let from_array: WorkHistory = serde_json::from_value(serde_json::json!([
            { "domain": "Technology", "subdomain": "MERN Stack", "experience": "3-5" }
        ]))
        .unwrap();

        assert_eq!(from_text, from_array);
        assert_eq!(from_text.entries(), &[entry("Technology")]);
    }

    #[test]
    fn test_deserialize_rejects_other_types() {
        assert!(serde_json::from_value::<WorkHistory>(serde_json::json!(42)).is_err());
    }

    #[test]
    fn test_at_most_two_entries() {
        let two = WorkHistory::new(vec![entry("a"), entry("b")]);
        let three = WorkHistory::new(vec![entry("a"), entry("b"), entry("c")]);

        assert!(validate_history(&two).is_ok());
        assert!(validate_history(&three).is_err());
    }
}
