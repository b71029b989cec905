//! Point-in-time capture of a form's field values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SnapshotError;

/// Immutable mapping from field id to the value it held when captured.
///
/// A snapshot is built fresh for every validation attempt (on submit, on blur)
/// and never mutated afterwards. Fields that were not captured read as the
/// empty string.
///
/// ## Example
///
/// ```rust
/// use dokira_forms::FormSnapshot;
///
/// let snapshot = FormSnapshot::new()
///     .with("email", "a@b.com")
///     .with("password", "hunter22");
///
/// assert_eq!(snapshot.get("email"), "a@b.com");
/// assert_eq!(snapshot.get("telephone"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    values: BTreeMap<String, String>,
}

impl FormSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot that also holds `field = value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Parse `field=value` assignments, as typed on a command line.
    ///
    /// Only the first `=` separates the field from its value, so values may
    /// themselves contain `=`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        pairs
            .into_iter()
            .map(|pair| {
                let pair = pair.as_ref();
                pair.split_once('=')
                    .map(|(field, value)| (field.trim().to_string(), value.to_string()))
                    .filter(|(field, _)| !field.is_empty())
                    .ok_or_else(|| SnapshotError::MalformedPair(pair.to_string()))
            })
            .collect()
    }

    /// Value of `field`, or `""` if it was not captured.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Whether `field` was captured at all.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Captured fields in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Combine two snapshots; values in `other` win.
    pub fn merged(mut self, other: FormSnapshot) -> Self {
        self.values.extend(other.values);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_empty() {
        let snapshot = FormSnapshot::new().with("nom", "Diallo");
        assert_eq!(snapshot.get("nom"), "Diallo");
        assert_eq!(snapshot.get("prenom"), "");
        assert!(!snapshot.contains("prenom"));
    }

    #[test]
    fn from_pairs_splits_on_first_equals() {
        let snapshot = FormSnapshot::from_pairs(["email=a@b.com", "token=a=b"]).unwrap();
        assert_eq!(snapshot.get("email"), "a@b.com");
        assert_eq!(snapshot.get("token"), "a=b");
    }

    #[test]
    fn from_pairs_keeps_empty_values() {
        let snapshot = FormSnapshot::from_pairs(["telephone="]).unwrap();
        assert!(snapshot.contains("telephone"));
        assert_eq!(snapshot.get("telephone"), "");
    }

    #[test]
    fn from_pairs_rejects_missing_separator() {
        let err = FormSnapshot::from_pairs(["email"]).unwrap_err();
        assert_eq!(err, SnapshotError::MalformedPair("email".to_string()));

        let err = FormSnapshot::from_pairs(["=value"]).unwrap_err();
        assert_eq!(err, SnapshotError::MalformedPair("=value".to_string()));
    }

    #[test]
    fn deserializes_from_json_object() {
        let snapshot: FormSnapshot =
            serde_json::from_str(r#"{"medicament":"Doliprane","posologie":"1x/jour"}"#).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("posologie"), "1x/jour");
    }

    #[test]
    fn merged_prefers_right_hand_side() {
        let base = FormSnapshot::new().with("email", "old@b.com").with("nom", "A");
        let merged = base.merged(FormSnapshot::new().with("email", "new@b.com"));
        assert_eq!(merged.get("email"), "new@b.com");
        assert_eq!(merged.get("nom"), "A");
    }
}
