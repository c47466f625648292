//! Engagement metric rows: posting frequency, content performance, and the
//! summary strip.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Daily posting volume over the trailing 30 days.
#[derive(Debug, Clone, Serialize)]
pub struct PostFrequency {
  pub post_date:          NaiveDate,
  pub posts_created:      i64,
  pub active_users:       i64,
  pub avg_posts_per_user: f64,
}

/// Comment engagement per content type over the trailing 30 days.
#[derive(Debug, Clone, Serialize)]
pub struct PostEngagementRate {
  pub content_type:          String,
  pub total_posts:           i64,
  pub total_comments:        i64,
  pub unique_commenters:     i64,
  pub avg_comments_per_post: f64,
  pub engagement_rate_pct:   f64,
}

/// Volume and shape of each content type across all time.
#[derive(Debug, Clone, Serialize)]
pub struct ContentTypeBreakdown {
  pub content_type:       String,
  pub post_count:         i64,
  pub unique_authors:     i64,
  pub avg_content_length: f64,
  pub posts_with_links:   i64,
  pub posts_with_media:   i64,
  pub first_post:         NaiveDateTime,
  pub latest_post:        NaiveDateTime,
}

/// A top contributor, scored by weighted post and comment counts.
#[derive(Debug, Clone, Serialize)]
pub struct ActivePoster {
  pub name:                String,
  pub email:               String,
  pub post_count:          i64,
  pub comment_count:       i64,
  pub total_contributions: i64,
  pub engagement_score:    i64,
  pub user_tier:           String,
}

/// A top-performing post from the trailing 30 days.
#[derive(Debug, Clone, Serialize)]
pub struct PostReach {
  pub post_id:           String,
  pub post_preview:      String,
  pub author:            String,
  pub content_type:      String,
  pub comment_count:     i64,
  pub unique_commenters: i64,
  pub created_at:        NaiveDateTime,
  pub days_old:          i64,
  pub engagement_score:  i64,
}

/// One label/value pair on the summary strip. `value` is absent when the
/// underlying ratio has no denominator (e.g. no posts yet).
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetric {
  pub metric: String,
  pub value:  Option<String>,
}
