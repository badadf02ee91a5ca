//! Feedback tag types — raw guest input and the aggregated review request.

use serde::{Deserialize, Serialize};

/// Server name used when the guest did not pick one.
pub const DEFAULT_SERVER_NAME: &str = "unknown server";

/// Visit reason used when the guest did not give one.
pub const DEFAULT_VISIT_REASON: &str = "a simple visit";

// ---------------------------------------------------------------------------
// FeedbackTag — one (category, value) pair as sent by the client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackTag {
    pub category: String,
    pub value: String,
}

impl FeedbackTag {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> TagCategory {
        TagCategory::parse(&self.category)
    }
}

// ---------------------------------------------------------------------------
// Tag category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    ServerName,
    ServiceQualities,
    ReasonForVisit,
    OccasionDetail,
    LikedDishes,
    Atmosphere,
    /// Anything the classifier does not know about. Dropped silently.
    Unknown,
}

impl TagCategory {
    /// Map a wire category string onto the closed set.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "server_name" => Self::ServerName,
            "service_qualities" => Self::ServiceQualities,
            "reason_for_visit" => Self::ReasonForVisit,
            "occasion_detail" | "birthday_details" => Self::OccasionDetail,
            "liked_dishes" => Self::LikedDishes,
            "atmosphere" => Self::Atmosphere,
            _ => Self::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// ReviewRequest — classified buckets, immutable once built
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRequest {
    pub server_name: String,
    #[serde(default)]
    pub service_qualities: Vec<String>,
    #[serde(default)]
    pub liked_dishes: Vec<String>,
    #[serde(default)]
    pub atmosphere_notes: Vec<String>,
    /// Reason for the visit with any occasion detail already appended.
    pub visit_reason: String,
    /// Raw occasion detail(s), comma-joined, if the guest gave any.
    #[serde(default)]
    pub occasion_detail: Option<String>,
}

impl Default for ReviewRequest {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.into(),
            service_qualities: Vec::new(),
            liked_dishes: Vec::new(),
            atmosphere_notes: Vec::new(),
            visit_reason: DEFAULT_VISIT_REASON.into(),
            occasion_detail: None,
        }
    }
}

impl ReviewRequest {
    /// Whether the guest named a server (only those visits are logged).
    pub fn has_named_server(&self) -> bool {
        self.server_name != DEFAULT_SERVER_NAME
    }

    /// Whether the visit carries an occasion worth mentioning: a reason
    /// other than the default, or any occasion detail.
    pub fn has_occasion(&self) -> bool {
        self.occasion_detail.is_some() || self.visit_reason != DEFAULT_VISIT_REASON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_alias_categories() {
        assert_eq!(TagCategory::parse("server_name"), TagCategory::ServerName);
        assert_eq!(
            TagCategory::parse("birthday_details"),
            TagCategory::OccasionDetail
        );
        assert_eq!(TagCategory::parse(" atmosphere "), TagCategory::Atmosphere);
        assert_eq!(TagCategory::parse("service_kewan"), TagCategory::Unknown);
    }

    #[test]
    fn default_request_has_sentinels() {
        let req = ReviewRequest::default();
        assert!(!req.has_named_server());
        assert!(!req.has_occasion());
        assert_eq!(req.visit_reason, "a simple visit");
    }

    #[test]
    fn occasion_detail_alone_counts_as_occasion() {
        let req = ReviewRequest {
            occasion_detail: Some("25 years".into()),
            ..Default::default()
        };
        assert!(req.has_occasion());
    }

    #[test]
    fn tag_deserializes_from_wire_shape() {
        let tag: FeedbackTag =
            serde_json::from_str(r#"{"category": "liked_dishes", "value": "Tiramisu"}"#).unwrap();
        assert_eq!(tag.kind(), TagCategory::LikedDishes);
        assert_eq!(tag.value, "Tiramisu");
    }
}
