use serde::{Deserialize, Deserializer};

use crate::prediction::{derive_color_class, SizeClass, SizePolicy};

/// One published draw result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Draw {
    /// Round identifier (e.g., "20250101100010001")
    #[serde(rename = "issueNumber", deserialize_with = "string_or_number")]
    pub issue_number: String,

    /// Drawn digit, 0-9
    #[serde(deserialize_with = "digit")]
    pub number: u8,

    /// Raw color tags, comma separated (e.g., "red,violet")
    #[serde(default)]
    pub color: String,
}

impl Draw {
    pub fn new(issue_number: impl Into<String>, number: u8, color: impl Into<String>) -> Self {
        Self {
            issue_number: issue_number.into(),
            number,
            color: color.into(),
        }
    }

    /// Observed size of this draw. Always 5-9 Big; the configurable
    /// policy only applies to the prediction.
    pub fn size_class(&self) -> SizeClass {
        SizePolicy::BIG_AT_OR_ABOVE_FIVE.classify(self.number)
    }

    /// First color tag.
    pub fn primary_color(&self) -> &str {
        derive_color_class(&self.color)
    }
}

/// Ordered draws from one successful poll, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub draws: Vec<Draw>,
}

impl FeedSnapshot {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self { draws }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Most recent draw, if the feed had any.
    pub fn latest(&self) -> Option<&Draw> {
        self.draws.first()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }
}

// The feed has sent issue numbers both as strings and as bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => Ok(s),
        StringOrNumber::Num(n) => Ok(n.to_string()),
    }
}

fn digit<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => s.trim().parse::<u64>().map_err(serde::de::Error::custom)?,
        StringOrNumber::Num(n) => n,
    };
    u8::try_from(raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_fields() {
        let json = r#"{"issueNumber":"20250101100010001","number":"7","color":"red,violet"}"#;
        let draw: Draw = serde_json::from_str(json).unwrap();

        assert_eq!(draw.issue_number, "20250101100010001");
        assert_eq!(draw.number, 7);
        assert_eq!(draw.color, "red,violet");
    }

    #[test]
    fn test_deserialize_numeric_fields() {
        let json = r#"{"issueNumber":20250101100010001,"number":3,"color":"green"}"#;
        let draw: Draw = serde_json::from_str(json).unwrap();

        assert_eq!(draw.issue_number, "20250101100010001");
        assert_eq!(draw.number, 3);
    }

    #[test]
    fn test_missing_color_defaults_empty() {
        let json = r#"{"issueNumber":"1001","number":"0"}"#;
        let draw: Draw = serde_json::from_str(json).unwrap();
        assert_eq!(draw.color, "");
        assert_eq!(draw.primary_color(), "");
    }

    #[test]
    fn test_rejects_non_numeric_number() {
        let json = r#"{"issueNumber":"1001","number":"x","color":"red"}"#;
        assert!(serde_json::from_str::<Draw>(json).is_err());
    }

    #[test]
    fn test_primary_color() {
        let draw = Draw::new("1001", 5, "green,violet");
        assert_eq!(draw.primary_color(), "green");
    }

    #[test]
    fn test_size_class_is_observed_size() {
        assert_eq!(Draw::new("1001", 5, "green").size_class(), SizeClass::Big);
        assert_eq!(Draw::new("1001", 9, "red").size_class(), SizeClass::Big);
        assert_eq!(Draw::new("1001", 4, "red").size_class(), SizeClass::Small);
    }

    #[test]
    fn test_snapshot_latest() {
        let snap = FeedSnapshot::new(vec![Draw::new("1002", 1, "red"), Draw::new("1001", 2, "red")]);
        assert_eq!(snap.latest().unwrap().issue_number, "1002");
        assert_eq!(snap.len(), 2);
        assert!(FeedSnapshot::empty().latest().is_none());
    }
}
