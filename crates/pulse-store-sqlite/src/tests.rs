//! Integration tests for the two stores against in-memory databases.

use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use pulse_core::{
  UNKNOWN_COUNTRY, monthly_active_by_country,
  reconcile::CountryDirectory,
  source::{EngagementSource, IdentitySource},
};

use crate::{EngagementDb, IdentityDb};

async fn engagement_db() -> EngagementDb {
  EngagementDb::open_in_memory()
    .await
    .expect("in-memory engagement db")
}

async fn identity_db() -> IdentityDb {
  IdentityDb::open_in_memory()
    .await
    .expect("in-memory identity db")
}

async fn seed_engagement(db: &EngagementDb, sql: String) {
  db.conn
    .call(move |conn| {
      conn.execute_batch(&sql)?;
      Ok(())
    })
    .await
    .unwrap();
}

async fn seed_identity(db: &IdentityDb, sql: String) {
  db.conn
    .call(move |conn| {
      conn.execute_batch(&sql)?;
      Ok(())
    })
    .await
    .unwrap();
}

fn today() -> NaiveDate {
  Utc::now().date_naive()
}

fn days_ago(n: i64) -> NaiveDate {
  today() - Duration::days(n)
}

/// Midday timestamp, clear of midnight-boundary races in window queries.
fn ts(date: NaiveDate) -> String {
  format!("{date} 12:00:00")
}

fn monday_of(date: NaiveDate) -> NaiveDate {
  date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn month_start(months_back: u32) -> NaiveDate {
  today().with_day(1).unwrap() - Months::new(months_back)
}

// ─── Engagement: activity aggregates ─────────────────────────────────────────

#[tokio::test]
async fn monthly_activity_groups_per_person_and_month() {
  let db = engagement_db().await;
  seed_engagement(
    &db,
    "INSERT INTO posts (id, person_id, type, content, created_at) VALUES
       ('p1', '1', 'text', 'one',   '2024-01-05 10:00:00'),
       ('p2', '1', 'text', 'two',   '2024-01-20 10:00:00'),
       ('p3', '2', 'text', 'three', '2024-02-03 10:00:00');
     INSERT INTO posts (id, person_id, type, content, created_at, deleted_at) VALUES
       ('p4', '3', 'text', 'gone',  '2024-01-09 10:00:00', '2024-01-10 00:00:00');
     INSERT INTO comments (id, post_id, person_id, created_at) VALUES
       ('c1', 'p1', '1', '2024-01-06 10:00:00');"
      .to_string(),
  )
  .await;

  let rows = db.monthly_activity().await.unwrap();

  assert_eq!(rows.len(), 2);
  // Months descend; the soft-deleted post contributes nothing.
  assert_eq!(rows[0].month, "2024-02-01".parse::<NaiveDate>().unwrap());
  assert_eq!(rows[0].person_id, "2");
  assert_eq!((rows[0].posts, rows[0].comments), (1, 0));

  assert_eq!(rows[1].month, "2024-01-01".parse::<NaiveDate>().unwrap());
  assert_eq!(rows[1].person_id, "1");
  assert_eq!((rows[1].posts, rows[1].comments), (2, 1));
}

#[tokio::test]
async fn daily_active_users_stays_inside_window() {
  let db = engagement_db().await;
  seed_engagement(
    &db,
    format!(
      "INSERT INTO posts (id, person_id, type, content, created_at) VALUES
         ('p1', '1', 'text', 'recent', '{}'),
         ('p2', '2', 'text', 'old',    '{}');
       INSERT INTO comments (id, post_id, person_id, created_at) VALUES
         ('c1', 'p1', '2', '{}');",
      ts(days_ago(2)),
      ts(days_ago(40)),
      ts(days_ago(2)),
    ),
  )
  .await;

  let rows = db.daily_active_users().await.unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].date, days_ago(2));
  assert_eq!(rows[0].active_users, 2);
  assert_eq!(rows[0].users_who_posted, 1);
  assert_eq!(rows[0].users_who_commented, 1);
}

#[tokio::test]
async fn weekly_active_users_buckets_on_monday() {
  let db = engagement_db().await;
  seed_engagement(
    &db,
    format!(
      "INSERT INTO posts (id, person_id, type, content, created_at) VALUES
         ('p1', '1', 'text', 'a', '{}'),
         ('p2', '2', 'text', 'b', '{}'),
         ('p3', '1', 'text', 'c', '{}');",
      ts(today()),
      ts(today()),
      ts(days_ago(60)),
    ),
  )
  .await;

  let rows = db.weekly_active_users().await.unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].week, monday_of(today()));
  assert_eq!(rows[0].active_users, 2);
  assert_eq!(rows[1].week, monday_of(days_ago(60)));
  assert_eq!(rows[1].active_users, 1);
}

#[tokio::test]
async fn post_frequency_averages_per_user() {
  let db = engagement_db().await;
  seed_engagement(
    &db,
    format!(
      "INSERT INTO posts (id, person_id, type, content, created_at) VALUES
         ('p1', '1', 'text', 'a', '{0}'),
         ('p2', '1', 'text', 'b', '{0}');",
      ts(days_ago(1)),
    ),
  )
  .await;

  let rows = db.post_frequency().await.unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].post_date, days_ago(1));
  assert_eq!(rows[0].posts_created, 2);
  assert_eq!(rows[0].active_users, 1);
  assert_eq!(rows[0].avg_posts_per_user, 2.0);
}

#[tokio::test]
async fn content_breakdown_shapes_per_type() {
  let db = engagement_db().await;
  seed_engagement(
    &db,
    "INSERT INTO posts (id, person_id, type, content, link_url, created_at) VALUES
       ('p1', '1', 'link', 'ab',   'https://x', '2024-03-01 10:00:00'),
       ('p2', '2', 'link', 'abcd', NULL,        '2024-03-02 10:00:00'),
       ('p3', '1', 'text', 'abc',  NULL,        '2024-03-03 10:00:00');"
      .to_string(),
  )
  .await;

  let rows = db.content_breakdown().await.unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].content_type, "link");
  assert_eq!(rows[0].post_count, 2);
  assert_eq!(rows[0].unique_authors, 2);
  assert_eq!(rows[0].avg_content_length, 3.0);
  assert_eq!(rows[0].posts_with_links, 1);
  assert_eq!(rows[0].posts_with_media, 0);

  assert_eq!(rows[1].content_type, "text");
  assert_eq!(rows[1].post_count, 1);
}

#[tokio::test]
async fn active_posters_scored_and_tiered() {
  let db = engagement_db().await;
  let posts: Vec<String> = (0..5i64)
    .map(|i| {
      format!("('p{i}', 'a', 'text', 'x', '{}')", ts(days_ago(i + 1)))
    })
    .collect();
  seed_engagement(
    &db,
    format!(
      "INSERT INTO persons (id, first_name, last_name, email) VALUES
         ('a', 'Ada', 'Park', 'ada@example.com'),
         ('b', 'Ben', 'Ruiz', 'ben@example.com'),
         ('c', 'Cle', 'Moss', 'cle@example.com');
       INSERT INTO posts (id, person_id, type, content, created_at) VALUES {};
       INSERT INTO comments (id, post_id, person_id, created_at) VALUES
         ('c1', 'p0', 'b', '{}');",
      posts.join(", "),
      ts(days_ago(1)),
    ),
  )
  .await;

  let rows = db.active_posters().await.unwrap();

  // 'c' never contributed and is filtered out.
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].name, "Ada Park");
  assert_eq!(rows[0].post_count, 5);
  assert_eq!(rows[0].engagement_score, 15);
  assert_eq!(rows[0].user_tier, "Regular User");

  assert_eq!(rows[1].name, "Ben Ruiz");
  assert_eq!(rows[1].comment_count, 1);
  assert_eq!(rows[1].engagement_score, 2);
  assert_eq!(rows[1].user_tier, "Casual User");
}

#[tokio::test]
async fn post_reach_truncates_preview_and_joins_author() {
  let db = engagement_db().await;
  let long_content = "x".repeat(150);
  seed_engagement(
    &db,
    format!(
      "INSERT INTO persons (id, first_name, last_name, email) VALUES
         ('a', 'Ada', 'Park', 'ada@example.com');
       INSERT INTO posts (id, person_id, type, content, created_at) VALUES
         ('p1', 'a', 'text', '{long_content}', '{}');
       INSERT INTO comments (id, post_id, person_id, created_at) VALUES
         ('c1', 'p1', 'b', '{}'),
         ('c2', 'p1', 'b', '{}');",
      ts(days_ago(3)),
      ts(days_ago(2)),
      ts(days_ago(1)),
    ),
  )
  .await;

  let rows = db.post_reach().await.unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].author, "Ada Park");
  assert_eq!(rows[0].post_preview.len(), 100);
  assert_eq!(rows[0].comment_count, 2);
  assert_eq!(rows[0].unique_commenters, 1);
  assert_eq!(rows[0].engagement_score, 25);
  // The fractional day truncates either side of noon.
  assert!((2..=3).contains(&rows[0].days_old));
}

#[tokio::test]
async fn summary_covers_all_metrics() {
  let db = engagement_db().await;
  seed_engagement(
    &db,
    format!(
      "INSERT INTO posts (id, person_id, type, content, created_at) VALUES
         ('p1', '1', 'text', 'a', '{0}'),
         ('p2', '2', 'text', 'b', '{0}');
       INSERT INTO comments (id, post_id, person_id, created_at) VALUES
         ('c1', 'p1', '2', '{0}');",
      ts(days_ago(1)),
    ),
  )
  .await;

  let rows = db.summary().await.unwrap();

  let labels: Vec<&str> = rows.iter().map(|m| m.metric.as_str()).collect();
  assert_eq!(labels, vec![
    "Total Posts (30d)",
    "Active Posters (30d)",
    "Total Comments (30d)",
    "Avg Posts/Day",
    "Avg Comments/Post",
  ]);
  assert_eq!(rows[0].value.as_deref(), Some("2"));
  assert_eq!(rows[1].value.as_deref(), Some("2"));
  assert_eq!(rows[2].value.as_deref(), Some("1"));
  assert_eq!(rows[4].value.as_deref(), Some("0.5"));
}

#[tokio::test]
async fn summary_ratio_absent_with_no_posts() {
  let db = engagement_db().await;

  let rows = db.summary().await.unwrap();

  assert_eq!(rows.len(), 5);
  assert!(rows[4].value.is_none(), "no posts means no ratio");
}

// ─── Identity: country lookup ────────────────────────────────────────────────

#[tokio::test]
async fn countries_for_scopes_to_requested_ids() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO locations (id, country) VALUES (10, 'US');
     INSERT INTO persons (id, first_name, last_name, email, location_id, created_at, updated_at) VALUES
       (1, 'Ada', 'Park', 'ada@example.com', 10,   '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'Ben', 'Ruiz', 'ben@example.com', NULL, '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (9, 'Ima', 'Else', 'ima@example.com', 10,   '2024-01-01 00:00:00', '2024-01-01 00:00:00');
     INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at, deleted_at) VALUES
       (3, 'Del', 'Eted', 'del@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00', '2024-02-01 00:00:00');"
      .to_string(),
  )
  .await;

  let ids: Vec<String> =
    ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
  let map = db.countries_for(&ids).await.unwrap();

  assert_eq!(map.len(), 2);
  assert_eq!(map.get("1").map(String::as_str), Some("US"));
  // Missing location defaults to the sentinel at the SQL boundary.
  assert_eq!(map.get("2").map(String::as_str), Some(UNKNOWN_COUNTRY));
  // Soft-deleted and never-existed ids are absent, not defaulted.
  assert!(!map.contains_key("3"));
  assert!(!map.contains_key("4"));
  // Id 9 exists but was not requested.
  assert!(!map.contains_key("9"));
}

#[tokio::test]
async fn countries_for_empty_input_is_empty() {
  let db = identity_db().await;
  let map = db.countries_for(&[]).await.unwrap();
  assert!(map.is_empty());
}

// ─── Cross-database reconciliation, end to end ───────────────────────────────

#[tokio::test]
async fn monthly_by_country_reconciles_across_stores() {
  let engagement = engagement_db().await;
  let identity = identity_db().await;

  // Person 1 posts and comments in January; person 2 only posts. Only
  // person 1 exists in the identity store.
  seed_engagement(
    &engagement,
    "INSERT INTO posts (id, person_id, type, content, created_at) VALUES
       ('p1', '1', 'text', 'a', '2024-01-05 10:00:00'),
       ('p2', '2', 'text', 'b', '2024-01-07 10:00:00');
     INSERT INTO comments (id, post_id, person_id, created_at) VALUES
       ('c1', 'p1', '1', '2024-01-06 10:00:00');"
      .to_string(),
  )
  .await;
  seed_identity(
    &identity,
    "INSERT INTO locations (id, country) VALUES (10, 'US');
     INSERT INTO persons (id, first_name, last_name, email, location_id, created_at, updated_at) VALUES
       (1, 'Ada', 'Park', 'ada@example.com', 10, '2024-01-01 00:00:00', '2024-01-01 00:00:00');"
      .to_string(),
  )
  .await;

  let activity = engagement.monthly_activity().await.unwrap();
  let rows = monthly_active_by_country(&identity, activity).await.unwrap();

  assert_eq!(rows.len(), 2);
  let january = "2024-01-01".parse::<NaiveDate>().unwrap();

  let us = rows.iter().find(|r| r.country == "US").unwrap();
  assert_eq!(us.month, january);
  assert_eq!(us.active_users, 1);
  assert_eq!(us.total_posts, 1);
  assert_eq!(us.total_comments, 1);
  assert_eq!(us.users_who_posted, 1);
  assert_eq!(us.users_who_commented, 1);

  let unknown = rows.iter().find(|r| r.country == UNKNOWN_COUNTRY).unwrap();
  assert_eq!(unknown.month, january);
  assert_eq!(unknown.active_users, 1);
  assert_eq!(unknown.total_posts, 1);
  assert_eq!(unknown.users_who_commented, 0);
}

// ─── Identity: growth aggregates ─────────────────────────────────────────────

#[tokio::test]
async fn new_users_today_excludes_yesterday() {
  let db = identity_db().await;
  seed_identity(
    &db,
    format!(
      "INSERT INTO persons (id, first_name, last_name, email, has_finder, created_at, updated_at) VALUES
         (1, 'Ada', 'Park', 'ada@example.com', 1, '{0}', '{0}'),
         (2, 'Ben', 'Ruiz', 'ben@example.com', 0, '{1}', '{1}');
       INSERT INTO experiences (id, person_id) VALUES (1, 1);
       INSERT INTO embeddings (id, person_id) VALUES (1, 1), (2, 1);",
      ts(today()),
      ts(days_ago(1)),
    ),
  )
  .await;

  let rows = db.new_users_today().await.unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].id, 1);
  assert_eq!(rows[0].full_name, "Ada Park");
  assert!(rows[0].has_finder);
  assert_eq!(rows[0].experience_count, 1);
  assert_eq!(rows[0].education_count, 0);
  assert_eq!(rows[0].embedding_count, 2);
}

#[tokio::test]
async fn weekly_signups_bucket_and_exclude_deleted() {
  let db = identity_db().await;
  seed_identity(
    &db,
    format!(
      "INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES
         (1, 'A', 'A', 'a@example.com', '{0}', '{0}'),
         (2, 'B', 'B', 'b@example.com', '{0}', '{0}'),
         (3, 'C', 'C', 'c@example.com', '{1}', '{1}');
       INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at, deleted_at) VALUES
         (4, 'D', 'D', 'd@example.com', '{0}', '{0}', '{0}');",
      ts(today()),
      ts(days_ago(60)),
    ),
  )
  .await;

  let rows = db.weekly_signups().await.unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].week, monday_of(today()));
  assert_eq!(rows[0].new_users, 2);
  assert_eq!(rows[1].new_users, 1);
}

#[tokio::test]
async fn monthly_growth_rate_compares_to_previous_bucket() {
  let db = identity_db().await;
  let current = month_start(0);
  let previous = month_start(1);
  let rows_sql: Vec<String> = (0..4)
    .map(|i| {
      let date = if i < 3 { current } else { previous };
      format!(
        "({}, 'P', '{i}', 'p{i}@example.com', '{}', '{}')",
        i + 1,
        ts(date),
        ts(date),
      )
    })
    .collect();
  seed_identity(
    &db,
    format!(
      "INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES {};",
      rows_sql.join(", "),
    ),
  )
  .await;

  let rows = db.monthly_growth_rate().await.unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].month, current);
  assert_eq!(rows[0].new_users, 3);
  assert_eq!(rows[0].prev_month, Some(1));
  assert_eq!(rows[0].growth_rate_pct, Some(200.0));

  // The earliest bucket has nothing to compare against.
  assert_eq!(rows[1].month, previous);
  assert_eq!(rows[1].prev_month, None);
  assert_eq!(rows[1].growth_rate_pct, None);
}

#[tokio::test]
async fn account_funnel_counts_completed_steps() {
  let db = identity_db().await;
  seed_identity(
    &db,
    format!(
      "INSERT INTO locations (id, country) VALUES (10, 'US');
       INSERT INTO companies (id, name) VALUES (20, 'Initech');
       INSERT INTO persons (id, first_name, last_name, email, headline_description,
                            linked_in_url, location_id, company_id, has_finder,
                            created_at, updated_at) VALUES
         (1, 'Ada', 'Park', 'ada@example.com', 'Writes all the dashboards',
          'https://linkedin.example/ada', 10, 20, 1, '{0}', '{0}'),
         (2, 'Ben', 'Ruiz', 'ben@example.com', NULL, NULL, NULL, NULL, 0, '{0}', '{0}');
       INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES
         (3, 'Old', 'Timer', 'old@example.com', '2020-01-01 00:00:00', '2020-01-01 00:00:00');",
      ts(today()),
    ),
  )
  .await;

  let rows = db.account_creation_funnel().await.unwrap();

  assert_eq!(rows.len(), 1);
  let funnel = &rows[0];
  assert_eq!(funnel.total_accounts, 2);
  assert_eq!(funnel.step_basic_info, 2);
  assert_eq!(funnel.step_headline, 1);
  assert_eq!(funnel.step_location, 1);
  assert_eq!(funnel.step_company, 1);
  assert_eq!(funnel.step_linkedin, 1);
  assert_eq!(funnel.step_finder_enabled, 1);
}

// ─── Identity: profile and talent aggregates ─────────────────────────────────

#[tokio::test]
async fn profile_completion_scores_and_classifies() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO locations (id, country) VALUES (10, 'US');
     INSERT INTO companies (id, name) VALUES (20, 'Initech');
     INSERT INTO persons (id, first_name, last_name, email, headline_description,
                          linked_in_url, location_id, company_id, has_finder,
                          created_at, updated_at) VALUES
       (1, 'Ada', 'Park', 'ada@example.com', 'Writes all the dashboards',
        'https://linkedin.example/ada', 10, 20, 1,
        '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'Ben', 'Ruiz', 'ben@example.com', NULL, NULL, NULL, NULL, 0,
        '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (3, 'Cle', 'Moss', 'cle@example.com', NULL, NULL, NULL, NULL, 0,
        '2024-01-01 00:00:00', '2024-01-01 00:00:00');
     INSERT INTO experiences (id, person_id) VALUES (1, 1);
     INSERT INTO degrees (id, name) VALUES (30, 'BSc');
     INSERT INTO education (id, person_id, degree_id, school_id) VALUES
       (1, 1, 30, 40), (2, 3, 30, 40);
     INSERT INTO person_languages (id, person_id) VALUES (1, 1);
     INSERT INTO embeddings (id, person_id) VALUES (1, 1);"
      .to_string(),
  )
  .await;

  let rows = db.profile_completion().await.unwrap();

  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].full_name, "Ada Park");
  assert_eq!(rows[0].profile_completeness_score, 7);
  assert_eq!(rows[0].profile_status, "FINDER_ENABLED");

  let builder = rows.iter().find(|r| r.full_name == "Cle Moss").unwrap();
  assert_eq!(builder.profile_completeness_score, 1);
  assert_eq!(builder.profile_status, "BUILDER_ONLY");

  let basic = rows.iter().find(|r| r.full_name == "Ben Ruiz").unwrap();
  assert_eq!(basic.profile_completeness_score, 0);
  assert_eq!(basic.profile_status, "BASIC_PROFILE");
}

#[tokio::test]
async fn profile_freshness_tiers_by_age() {
  let db = identity_db().await;
  seed_identity(
    &db,
    format!(
      "INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES
         (1, 'Ada', 'Park', 'ada@example.com', '{0}', '{0}'),
         (2, 'Ben', 'Ruiz', 'ben@example.com', '{1}', '{1}'),
         (3, 'Cle', 'Moss', 'cle@example.com', '{2}', '{2}');",
      ts(days_ago(200)),
      ts(days_ago(120)),
      ts(days_ago(10)),
    ),
  )
  .await;

  let rows = db.profile_freshness().await.unwrap();

  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].name, "Ada Park");
  assert_eq!(rows[0].profile_status, "STALE (6+ months)");
  assert_eq!(rows[1].profile_status, "AGING (3-6 months)");
  assert_eq!(rows[2].profile_status, "FRESH (< 3 months)");
}

#[tokio::test]
async fn top_companies_counts_users_and_experiences() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO locations (id, country) VALUES (10, 'US');
     INSERT INTO companies (id, name, location_id) VALUES
       (20, 'Initech', 10), (21, 'Empty Co', NULL);
     INSERT INTO persons (id, first_name, last_name, email, company_id, created_at, updated_at) VALUES
       (1, 'A', 'A', 'a@example.com', 20, '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'B', 'B', 'b@example.com', 20, '2024-01-01 00:00:00', '2024-01-01 00:00:00');
     INSERT INTO experiences (id, person_id, company_id) VALUES (1, 1, 20);"
      .to_string(),
  )
  .await;

  let rows = db.top_companies().await.unwrap();

  // Empty Co has neither employees nor experiences and is filtered out.
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].company_name, "Initech");
  assert_eq!(rows[0].user_count, 2);
  assert_eq!(rows[0].total_experiences, 1);
  assert_eq!(rows[0].countries.as_deref(), Some("US"));
}

#[tokio::test]
async fn top_roles_averages_tenure_years() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES
       (1, 'A', 'A', 'a@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'B', 'B', 'b@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00');
     INSERT INTO companies (id, name) VALUES (20, 'Initech'), (21, 'Globex');
     INSERT INTO roles (id, title) VALUES (30, 'Chemist');
     INSERT INTO experiences (id, person_id, company_id, role_id, start_date, end_date) VALUES
       (1, 1, 20, 30, '2018-03-01', '2020-03-01'),
       (2, 2, 21, 30, '2019-01-01', '2023-01-01');"
      .to_string(),
  )
  .await;

  let rows = db.top_roles().await.unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].role_title, "Chemist");
  assert_eq!(rows[0].user_count, 2);
  assert_eq!(rows[0].companies_count, 2);
  assert_eq!(rows[0].avg_years_in_role, Some(3.0));
}

#[tokio::test]
async fn degree_distribution_counts_people_and_schools() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES
       (1, 'A', 'A', 'a@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'B', 'B', 'b@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00');
     INSERT INTO degrees (id, name) VALUES (30, 'BSc'), (31, 'PhD');
     INSERT INTO education (id, person_id, degree_id, school_id) VALUES
       (1, 1, 30, 40), (2, 2, 30, 41), (3, 1, 31, 40);"
      .to_string(),
  )
  .await;

  let rows = db.degree_distribution().await.unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].degree_type, "BSc");
  assert_eq!(rows[0].user_count, 2);
  assert_eq!(rows[0].schools_count, 2);
  assert_eq!(rows[1].degree_type, "PhD");
  assert_eq!(rows[1].user_count, 1);
}

#[tokio::test]
async fn country_distribution_includes_unknown_share() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO locations (id, country) VALUES (10, 'US');
     INSERT INTO persons (id, first_name, last_name, email, location_id, created_at, updated_at) VALUES
       (1, 'A', 'A', 'a@example.com', 10,   '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'B', 'B', 'b@example.com', 10,   '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (3, 'C', 'C', 'c@example.com', NULL, '2024-01-01 00:00:00', '2024-01-01 00:00:00');"
      .to_string(),
  )
  .await;

  let rows = db.country_distribution().await.unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].country, "US");
  assert_eq!(rows[0].user_count, 2);
  assert_eq!(rows[0].percentage, 66.67);
  assert_eq!(rows[1].country, UNKNOWN_COUNTRY);
  assert_eq!(rows[1].user_count, 1);
  assert_eq!(rows[1].percentage, 33.33);
}

#[tokio::test]
async fn top_projects_requires_shared_names() {
  let db = identity_db().await;
  seed_identity(
    &db,
    "INSERT INTO persons (id, first_name, last_name, email, created_at, updated_at) VALUES
       (1, 'A', 'A', 'a@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00'),
       (2, 'B', 'B', 'b@example.com', '2024-01-01 00:00:00', '2024-01-01 00:00:00');
     INSERT INTO projects (id, person_id, name, description, start_date, end_date) VALUES
       (1, 1, 'Pilot Plant', 'shared effort', '2021-05-01', '2022-05-01'),
       (2, 2, 'Pilot Plant', 'shared effort', '2020-02-01', '2021-02-01'),
       (3, 1, 'Solo Thing',  'one person',    '2022-01-01', NULL);"
      .to_string(),
  )
  .await;

  let rows = db.top_projects().await.unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].project_name, "Pilot Plant");
  assert_eq!(rows[0].user_count, 2);
  assert_eq!(
    rows[0].first_project,
    Some("2020-02-01".parse::<NaiveDate>().unwrap())
  );
  assert_eq!(
    rows[0].last_project,
    Some("2022-05-01".parse::<NaiveDate>().unwrap())
  );
}
