//! [`EngagementDb`] — the SQLite implementation of
//! [`EngagementSource`].
//!
//! Activity queries union `posts` and `comments` into one stream of
//! `(person_id, activity_at, kind)` facts and aggregate over it, the same
//! shape for every time granularity.

use std::path::Path;

use pulse_core::{
  engagement::{
    ActivePoster, ContentTypeBreakdown, PostEngagementRate, PostFrequency,
    PostReach, SummaryMetric,
  },
  growth::{DailyActiveUsers, MonthlyActiveUsers, WeeklyActiveUsers},
  reconcile::MonthlyActivity,
  source::EngagementSource,
};

use crate::{Error, Result, schema::ENGAGEMENT_SCHEMA};

/// The union of non-deleted posts and comments as `(person_id,
/// activity_at, kind)` facts. Kept as a fragment so every activity query
/// aggregates over the identical stream.
const ACTIVITY_STREAM: &str = "
  SELECT person_id, created_at AS activity_at, 'post' AS kind
    FROM posts WHERE deleted_at IS NULL
  UNION ALL
  SELECT person_id, created_at, 'comment'
    FROM comments WHERE deleted_at IS NULL
";

// ─── Store ───────────────────────────────────────────────────────────────────

/// The engagement (social activity) database.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct EngagementDb {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl EngagementDb {
  /// Open (or create) the database at `path` and run schema
  /// initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let db = Self { conn };
    db.init_schema().await?;
    Ok(db)
  }

  /// Open an in-memory database — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let db = Self { conn };
    db.init_schema().await?;
    Ok(db)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(ENGAGEMENT_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── EngagementSource impl ───────────────────────────────────────────────────

impl EngagementSource for EngagementDb {
  type Error = Error;

  async fn daily_active_users(&self) -> Result<Vec<DailyActiveUsers>> {
    let sql = format!(
      "SELECT date(activity_at) AS date,
              COUNT(DISTINCT person_id) AS active_users,
              COUNT(CASE WHEN kind = 'post' THEN 1 END) AS users_who_posted,
              COUNT(CASE WHEN kind = 'comment' THEN 1 END) AS users_who_commented
       FROM ({ACTIVITY_STREAM})
       WHERE activity_at >= datetime('now', '-30 days')
       GROUP BY date
       ORDER BY date DESC"
    );
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map([], |row| {
              Ok(DailyActiveUsers {
                date:                row.get(0)?,
                active_users:        row.get(1)?,
                users_who_posted:    row.get(2)?,
                users_who_commented: row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn weekly_active_users(&self) -> Result<Vec<WeeklyActiveUsers>> {
    let sql = format!(
      "SELECT date(activity_at, '-6 days', 'weekday 1') AS week,
              COUNT(DISTINCT person_id) AS active_users
       FROM ({ACTIVITY_STREAM})
       GROUP BY week
       ORDER BY week DESC
       LIMIT 12"
    );
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map([], |row| {
              Ok(WeeklyActiveUsers {
                week:         row.get(0)?,
                active_users: row.get(1)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn monthly_active_users(&self) -> Result<Vec<MonthlyActiveUsers>> {
    let sql = format!(
      "SELECT date(activity_at, 'start of month') AS month,
              COUNT(DISTINCT person_id) AS active_users
       FROM ({ACTIVITY_STREAM})
       GROUP BY month
       ORDER BY month DESC
       LIMIT 12"
    );
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map([], |row| {
              Ok(MonthlyActiveUsers {
                month:        row.get(0)?,
                active_users: row.get(1)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn monthly_activity(&self) -> Result<Vec<MonthlyActivity>> {
    let sql = format!(
      "SELECT date(activity_at, 'start of month') AS month,
              person_id,
              COUNT(CASE WHEN kind = 'post' THEN 1 END) AS posts,
              COUNT(CASE WHEN kind = 'comment' THEN 1 END) AS comments
       FROM ({ACTIVITY_STREAM})
       GROUP BY month, person_id
       ORDER BY month DESC"
    );
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map([], |row| {
              Ok(MonthlyActivity {
                month:     row.get(0)?,
                person_id: row.get(1)?,
                posts:     row.get(2)?,
                comments:  row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn post_frequency(&self) -> Result<Vec<PostFrequency>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT date(created_at) AS post_date,
                    COUNT(*) AS posts_created,
                    COUNT(DISTINCT person_id) AS active_users,
                    ROUND(CAST(COUNT(*) AS REAL)
                          / COUNT(DISTINCT person_id), 2) AS avg_posts_per_user
             FROM posts
             WHERE deleted_at IS NULL
               AND created_at >= datetime('now', '-30 days')
             GROUP BY post_date
             ORDER BY post_date DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(PostFrequency {
                post_date:          row.get(0)?,
                posts_created:      row.get(1)?,
                active_users:       row.get(2)?,
                avg_posts_per_user: row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn post_engagement_rate(&self) -> Result<Vec<PostEngagementRate>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT p.type AS content_type,
                    COUNT(DISTINCT p.id) AS total_posts,
                    COUNT(DISTINCT c.id) AS total_comments,
                    COUNT(DISTINCT c.person_id) AS unique_commenters,
                    ROUND(CAST(COUNT(DISTINCT c.id) AS REAL)
                          / COUNT(DISTINCT p.id), 2) AS avg_comments_per_post,
                    ROUND(CAST(COUNT(DISTINCT c.person_id) AS REAL)
                          / COUNT(DISTINCT p.id) * 100, 2) AS engagement_rate_pct
             FROM posts p
             LEFT JOIN comments c ON c.post_id = p.id AND c.deleted_at IS NULL
             WHERE p.deleted_at IS NULL
               AND p.created_at >= datetime('now', '-30 days')
             GROUP BY p.type
             ORDER BY engagement_rate_pct DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(PostEngagementRate {
                content_type:          row.get(0)?,
                total_posts:           row.get(1)?,
                total_comments:        row.get(2)?,
                unique_commenters:     row.get(3)?,
                avg_comments_per_post: row.get(4)?,
                engagement_rate_pct:   row.get(5)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn content_breakdown(&self) -> Result<Vec<ContentTypeBreakdown>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT p.type AS content_type,
                    COUNT(*) AS post_count,
                    COUNT(DISTINCT p.person_id) AS unique_authors,
                    AVG(LENGTH(p.content)) AS avg_content_length,
                    COUNT(CASE WHEN p.link_url IS NOT NULL THEN 1 END) AS posts_with_links,
                    COUNT(CASE WHEN p.media_keys IS NOT NULL THEN 1 END) AS posts_with_media,
                    MIN(p.created_at) AS first_post,
                    MAX(p.created_at) AS latest_post
             FROM posts p
             WHERE p.deleted_at IS NULL
             GROUP BY p.type
             ORDER BY post_count DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(ContentTypeBreakdown {
                content_type:       row.get(0)?,
                post_count:         row.get(1)?,
                unique_authors:     row.get(2)?,
                avg_content_length: row.get(3)?,
                posts_with_links:   row.get(4)?,
                posts_with_media:   row.get(5)?,
                first_post:         row.get(6)?,
                latest_post:        row.get(7)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn active_posters(&self) -> Result<Vec<ActivePoster>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT pe.first_name || ' ' || pe.last_name AS name,
                    pe.email,
                    COUNT(DISTINCT po.id) AS post_count,
                    COUNT(DISTINCT c.id) AS comment_count,
                    COUNT(DISTINCT po.id) + COUNT(DISTINCT c.id) AS total_contributions,
                    COUNT(DISTINCT po.id) * 3 + COUNT(DISTINCT c.id) * 2 AS engagement_score,
                    CASE
                      WHEN COUNT(DISTINCT po.id) >= 20 THEN 'Power User'
                      WHEN COUNT(DISTINCT po.id) >= 10 THEN 'Active User'
                      WHEN COUNT(DISTINCT po.id) >= 5 THEN 'Regular User'
                      ELSE 'Casual User'
                    END AS user_tier
             FROM persons pe
             LEFT JOIN posts po ON po.person_id = pe.id AND po.deleted_at IS NULL
             LEFT JOIN comments c ON c.person_id = pe.id AND c.deleted_at IS NULL
             WHERE pe.deleted_at IS NULL
             GROUP BY pe.id
             HAVING COUNT(DISTINCT po.id) > 0 OR COUNT(DISTINCT c.id) > 0
             ORDER BY engagement_score DESC, post_count DESC
             LIMIT 20",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(ActivePoster {
                name:                row.get(0)?,
                email:               row.get(1)?,
                post_count:          row.get(2)?,
                comment_count:       row.get(3)?,
                total_contributions: row.get(4)?,
                engagement_score:    row.get(5)?,
                user_tier:           row.get(6)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn post_reach(&self) -> Result<Vec<PostReach>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT p.id AS post_id,
                    SUBSTR(p.content, 1, 100) AS post_preview,
                    a.first_name || ' ' || a.last_name AS author,
                    p.type AS content_type,
                    COUNT(DISTINCT c.id) AS comment_count,
                    COUNT(DISTINCT c.person_id) AS unique_commenters,
                    p.created_at,
                    CAST(julianday('now') - julianday(p.created_at) AS INTEGER) AS days_old,
                    COUNT(DISTINCT c.id) * 10 + COUNT(DISTINCT c.person_id) * 5 AS engagement_score
             FROM posts p
             JOIN persons a ON a.id = p.person_id
             LEFT JOIN comments c ON c.post_id = p.id AND c.deleted_at IS NULL
             WHERE p.deleted_at IS NULL
               AND p.created_at >= datetime('now', '-30 days')
             GROUP BY p.id
             ORDER BY engagement_score DESC, comment_count DESC, p.created_at DESC
             LIMIT 20",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(PostReach {
                post_id:           row.get(0)?,
                post_preview:      row.get(1)?,
                author:            row.get(2)?,
                content_type:      row.get(3)?,
                comment_count:     row.get(4)?,
                unique_commenters: row.get(5)?,
                created_at:        row.get(6)?,
                days_old:          row.get(7)?,
                engagement_score:  row.get(8)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn summary(&self) -> Result<Vec<SummaryMetric>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT 'Total Posts (30d)' AS metric, CAST(COUNT(*) AS TEXT) AS value
             FROM posts
             WHERE deleted_at IS NULL AND created_at >= datetime('now', '-30 days')

             UNION ALL

             SELECT 'Active Posters (30d)', CAST(COUNT(DISTINCT person_id) AS TEXT)
             FROM posts
             WHERE deleted_at IS NULL AND created_at >= datetime('now', '-30 days')

             UNION ALL

             SELECT 'Total Comments (30d)', CAST(COUNT(*) AS TEXT)
             FROM comments
             WHERE deleted_at IS NULL AND created_at >= datetime('now', '-30 days')

             UNION ALL

             SELECT 'Avg Posts/Day', CAST(ROUND(COUNT(*) / 30.0, 1) AS TEXT)
             FROM posts
             WHERE deleted_at IS NULL AND created_at >= datetime('now', '-30 days')

             UNION ALL

             SELECT 'Avg Comments/Post',
                    CAST(ROUND(
                      CAST((SELECT COUNT(*) FROM comments WHERE deleted_at IS NULL) AS REAL)
                      / NULLIF((SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL), 0),
                    2) AS TEXT)",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(SummaryMetric {
                metric: row.get(0)?,
                value:  row.get(1)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }
}
