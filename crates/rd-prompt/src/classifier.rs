//! Tag Classifier — folds raw feedback tags into a `ReviewRequest`.

use rd_core::tag::{FeedbackTag, ReviewRequest, TagCategory};

/// Partition tags into review buckets.
///
/// Accumulating buckets keep input order. `server_name` and
/// `reason_for_visit` are last-wins. Occasion details are appended to the
/// final visit reason as `" (detail)"`, so their position relative to the
/// reason tag does not matter.
pub fn classify(tags: &[FeedbackTag]) -> ReviewRequest {
    let mut request = ReviewRequest::default();
    let mut details: Vec<&str> = Vec::new();

    for tag in tags {
        let value = tag.value.trim();
        if value.is_empty() {
            continue;
        }

        match tag.kind() {
            TagCategory::ServerName => request.server_name = value.to_string(),
            TagCategory::ServiceQualities => request.service_qualities.push(value.to_string()),
            TagCategory::ReasonForVisit => request.visit_reason = value.to_string(),
            TagCategory::OccasionDetail => details.push(value),
            TagCategory::LikedDishes => request.liked_dishes.push(value.to_string()),
            TagCategory::Atmosphere => request.atmosphere_notes.push(value.to_string()),
            TagCategory::Unknown => {
                tracing::trace!(category = %tag.category, "ignoring unknown tag category");
            }
        }
    }

    for detail in &details {
        request.visit_reason.push_str(&format!(" ({detail})"));
    }
    if !details.is_empty() {
        request.occasion_detail = Some(details.join(", "));
    }

    request
}
