//! [`IdentityDb`] — the SQLite implementation of [`IdentitySource`] and
//! [`CountryDirectory`].
//!
//! The identity database keys persons numerically; every query that feeds
//! the cross-database join casts the key to text so both stores compare
//! identifiers in the same normalized form.

use std::{collections::HashMap, path::Path};

use pulse_core::{
  growth::{
    AccountCreationFunnel, MonthlyGrowthRate, MonthlySignups, NewUserSignup,
    WeeklyGrowthRate, WeeklySignups,
  },
  profile::{ProfileCompletion, ProfileFreshness},
  reconcile::CountryDirectory,
  source::IdentitySource,
  talent::{
    CompanyPresence, CountryDistribution, DegreeDistribution,
    ProjectPresence, RolePresence,
  },
};

use crate::{Error, Result, schema::IDENTITY_SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The identity (profile) database.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct IdentityDb {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl IdentityDb {
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
        conn.execute_batch(IDENTITY_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CountryDirectory impl ───────────────────────────────────────────────────

impl CountryDirectory for IdentityDb {
  type Error = Error;

  /// One query, scoped to exactly the given identifier set via a bound
  /// parameter list. An empty set returns an empty map without touching
  /// the database — there is no well-formed `IN ()` query to issue.
  async fn countries_for(
    &self,
    person_ids: &[String],
  ) -> Result<HashMap<String, String>> {
    if person_ids.is_empty() {
      return Ok(HashMap::new());
    }

    let ids = person_ids.to_vec();
    Ok(
      self
        .conn
        .call(move |conn| {
          let placeholders = vec!["?"; ids.len()].join(", ");
          let sql = format!(
            "SELECT CAST(p.id AS TEXT) AS person_id,
                    COALESCE(l.country, 'Unknown') AS country
             FROM persons p
             LEFT JOIN locations l ON l.id = p.location_id
             WHERE p.deleted_at IS NULL
               AND CAST(p.id AS TEXT) IN ({placeholders})"
          );
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map(rusqlite::params_from_iter(ids.iter()), |row| {
              Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows.into_iter().collect::<HashMap<_, _>>())
        })
        .await?,
    )
  }
}

// ─── IdentitySource impl ─────────────────────────────────────────────────────

impl IdentitySource for IdentityDb {
  async fn new_users_today(&self) -> Result<Vec<NewUserSignup>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT p.id,
                    p.first_name || ' ' || p.last_name AS full_name,
                    p.email,
                    p.has_finder,
                    (SELECT COUNT(*) FROM experiences e
                      WHERE e.person_id = p.id AND e.deleted_at IS NULL) AS experience_count,
                    (SELECT COUNT(*) FROM education ed
                      WHERE ed.person_id = p.id AND ed.deleted_at IS NULL) AS education_count,
                    (SELECT COUNT(*) FROM embeddings em
                      WHERE em.person_id = p.id AND em.deleted_at IS NULL) AS embedding_count,
                    p.created_at
             FROM persons p
             WHERE p.deleted_at IS NULL
               AND date(p.created_at) = date('now')
             ORDER BY p.created_at DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(NewUserSignup {
                id:               row.get(0)?,
                full_name:        row.get(1)?,
                email:            row.get(2)?,
                has_finder:       row.get(3)?,
                experience_count: row.get(4)?,
                education_count:  row.get(5)?,
                embedding_count:  row.get(6)?,
                created_at:       row.get(7)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn weekly_signups(&self) -> Result<Vec<WeeklySignups>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT date(created_at, '-6 days', 'weekday 1') AS week,
                    COUNT(*) AS new_users
             FROM persons
             WHERE deleted_at IS NULL
             GROUP BY week
             ORDER BY week DESC
             LIMIT 12",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(WeeklySignups {
                week:      row.get(0)?,
                new_users: row.get(1)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn monthly_signups(&self) -> Result<Vec<MonthlySignups>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT date(created_at, 'start of month') AS month,
                    COUNT(*) AS new_users
             FROM persons
             WHERE deleted_at IS NULL
               AND created_at >= date('now', 'start of month', '-11 months')
             GROUP BY month
             ORDER BY month DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(MonthlySignups {
                month:     row.get(0)?,
                new_users: row.get(1)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn weekly_growth_rate(&self) -> Result<Vec<WeeklyGrowthRate>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "WITH weekly_users AS (
               SELECT date(created_at, '-6 days', 'weekday 1') AS week,
                      COUNT(*) AS new_users
               FROM persons
               WHERE deleted_at IS NULL
               GROUP BY week
             )
             SELECT week,
                    new_users,
                    LAG(new_users) OVER (ORDER BY week) AS prev_week,
                    ROUND((new_users - LAG(new_users) OVER (ORDER BY week)) * 100.0
                          / NULLIF(LAG(new_users) OVER (ORDER BY week), 0), 2) AS growth_rate_pct
             FROM weekly_users
             ORDER BY week DESC
             LIMIT 12",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(WeeklyGrowthRate {
                week:            row.get(0)?,
                new_users:       row.get(1)?,
                prev_week:       row.get(2)?,
                growth_rate_pct: row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn monthly_growth_rate(&self) -> Result<Vec<MonthlyGrowthRate>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "WITH monthly_users AS (
               SELECT date(created_at, 'start of month') AS month,
                      COUNT(*) AS new_users
               FROM persons
               WHERE deleted_at IS NULL
                 AND created_at >= date('now', 'start of month', '-11 months')
               GROUP BY month
             )
             SELECT month,
                    new_users,
                    LAG(new_users) OVER (ORDER BY month) AS prev_month,
                    ROUND((new_users - LAG(new_users) OVER (ORDER BY month)) * 100.0
                          / NULLIF(LAG(new_users) OVER (ORDER BY month), 0), 2) AS growth_rate_pct
             FROM monthly_users
             ORDER BY month DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(MonthlyGrowthRate {
                month:           row.get(0)?,
                new_users:       row.get(1)?,
                prev_month:      row.get(2)?,
                growth_rate_pct: row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn profile_completion(&self) -> Result<Vec<ProfileCompletion>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "WITH profile_completeness AS (
               SELECT p.id,
                      p.first_name || ' ' || p.last_name AS full_name,
                      p.email,
                      CASE WHEN p.headline_description IS NOT NULL
                            AND LENGTH(p.headline_description) > 10
                           THEN 1 ELSE 0 END AS has_headline,
                      CASE WHEN p.linked_in_url IS NOT NULL THEN 1 ELSE 0 END AS has_linkedin,
                      CASE WHEN p.location_id IS NOT NULL THEN 1 ELSE 0 END AS has_location,
                      CASE WHEN p.company_id IS NOT NULL THEN 1 ELSE 0 END AS has_company,
                      (SELECT COUNT(*) FROM experiences e
                        WHERE e.person_id = p.id AND e.deleted_at IS NULL) AS experience_count,
                      (SELECT COUNT(*) FROM education ed
                        WHERE ed.person_id = p.id AND ed.deleted_at IS NULL) AS education_count,
                      (SELECT COUNT(*) FROM person_languages pl
                        WHERE pl.person_id = p.id AND pl.deleted_at IS NULL) AS language_count,
                      (SELECT COUNT(*) FROM embeddings em
                        WHERE em.person_id = p.id AND em.deleted_at IS NULL) AS embedding_count,
                      p.has_finder
               FROM persons p
               WHERE p.deleted_at IS NULL
             )
             SELECT full_name,
                    email,
                    has_headline + has_linkedin + has_location + has_company
                      + CASE WHEN experience_count > 0 THEN 1 ELSE 0 END
                      + CASE WHEN education_count > 0 THEN 1 ELSE 0 END
                      + CASE WHEN language_count > 0 THEN 1 ELSE 0 END
                      AS profile_completeness_score,
                    experience_count,
                    education_count,
                    language_count,
                    embedding_count,
                    has_finder,
                    CASE
                      WHEN embedding_count > 0 THEN 'FINDER_ENABLED'
                      WHEN experience_count > 0 OR education_count > 0 THEN 'BUILDER_ONLY'
                      ELSE 'BASIC_PROFILE'
                    END AS profile_status
             FROM profile_completeness
             ORDER BY profile_completeness_score DESC, embedding_count DESC
             LIMIT 50",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(ProfileCompletion {
                full_name:                  row.get(0)?,
                email:                      row.get(1)?,
                profile_completeness_score: row.get(2)?,
                experience_count:           row.get(3)?,
                education_count:            row.get(4)?,
                language_count:             row.get(5)?,
                embedding_count:            row.get(6)?,
                has_finder:                 row.get(7)?,
                profile_status:             row.get(8)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn profile_freshness(&self) -> Result<Vec<ProfileFreshness>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT id,
                    first_name || ' ' || last_name AS name,
                    updated_at AS last_profile_update,
                    CAST(julianday('now') - julianday(updated_at) AS INTEGER) AS days_since_update,
                    CASE
                      WHEN julianday('now') - julianday(updated_at) > 180 THEN 'STALE (6+ months)'
                      WHEN julianday('now') - julianday(updated_at) > 90 THEN 'AGING (3-6 months)'
                      ELSE 'FRESH (< 3 months)'
                    END AS profile_status
             FROM persons
             WHERE deleted_at IS NULL
             ORDER BY days_since_update DESC
             LIMIT 50",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(ProfileFreshness {
                id:                  row.get(0)?,
                name:                row.get(1)?,
                last_profile_update: row.get(2)?,
                days_since_update:   row.get(3)?,
                profile_status:      row.get(4)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn top_companies(&self) -> Result<Vec<CompanyPresence>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT c.name AS company_name,
                    COUNT(DISTINCT p.id) AS user_count,
                    COUNT(DISTINCT e.id) AS total_experiences,
                    GROUP_CONCAT(DISTINCT l.country) AS countries
             FROM companies c
             LEFT JOIN persons p ON p.company_id = c.id AND p.deleted_at IS NULL
             LEFT JOIN experiences e ON e.company_id = c.id AND e.deleted_at IS NULL
             LEFT JOIN locations l ON l.id = c.location_id
             WHERE c.deleted_at IS NULL
               AND (p.id IS NOT NULL OR e.id IS NOT NULL)
             GROUP BY c.id
             ORDER BY user_count DESC, total_experiences DESC
             LIMIT 20",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(CompanyPresence {
                company_name:      row.get(0)?,
                user_count:        row.get(1)?,
                total_experiences: row.get(2)?,
                countries:         row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn top_roles(&self) -> Result<Vec<RolePresence>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT r.title AS role_title,
                    COUNT(DISTINCT e.person_id) AS user_count,
                    COUNT(DISTINCT e.company_id) AS companies_count,
                    ROUND(AVG(
                      CAST(strftime('%Y', COALESCE(e.end_date, date('now'))) AS INTEGER)
                      - CAST(strftime('%Y', e.start_date) AS INTEGER)
                    ), 1) AS avg_years_in_role
             FROM roles r
             JOIN experiences e ON e.role_id = r.id
             WHERE r.deleted_at IS NULL
               AND e.deleted_at IS NULL
             GROUP BY r.id
             ORDER BY user_count DESC
             LIMIT 20",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(RolePresence {
                role_title:        row.get(0)?,
                user_count:        row.get(1)?,
                companies_count:   row.get(2)?,
                avg_years_in_role: row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn degree_distribution(&self) -> Result<Vec<DegreeDistribution>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT d.name AS degree_type,
                    COUNT(DISTINCT ed.person_id) AS user_count,
                    COUNT(DISTINCT ed.school_id) AS schools_count
             FROM degrees d
             JOIN education ed ON ed.degree_id = d.id
             WHERE d.deleted_at IS NULL
               AND ed.deleted_at IS NULL
             GROUP BY d.id
             ORDER BY user_count DESC",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(DegreeDistribution {
                degree_type:   row.get(0)?,
                user_count:    row.get(1)?,
                schools_count: row.get(2)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn country_distribution(&self) -> Result<Vec<CountryDistribution>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT COALESCE(l.country, 'Unknown') AS country,
                    COUNT(DISTINCT p.id) AS user_count,
                    COUNT(DISTINCT p.company_id) AS companies_count,
                    ROUND(COUNT(DISTINCT p.id) * 100.0
                          / (SELECT COUNT(*) FROM persons
                             WHERE deleted_at IS NULL), 2) AS percentage
             FROM persons p
             LEFT JOIN locations l ON l.id = p.location_id
             WHERE p.deleted_at IS NULL
             GROUP BY l.country
             ORDER BY user_count DESC
             LIMIT 15",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(CountryDistribution {
                country:         row.get(0)?,
                user_count:      row.get(1)?,
                companies_count: row.get(2)?,
                percentage:      row.get(3)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn top_projects(&self) -> Result<Vec<ProjectPresence>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT pr.name AS project_name,
                    SUBSTR(pr.description, 1, 100) AS project_description,
                    COUNT(DISTINCT pr.person_id) AS user_count,
                    MIN(pr.start_date) AS first_project,
                    MAX(COALESCE(pr.end_date, date('now'))) AS last_project
             FROM projects pr
             WHERE pr.deleted_at IS NULL
               AND pr.name IS NOT NULL
             GROUP BY pr.name, pr.description
             HAVING COUNT(DISTINCT pr.person_id) > 1
             ORDER BY user_count DESC
             LIMIT 20",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(ProjectPresence {
                project_name:        row.get(0)?,
                project_description: row.get(1)?,
                user_count:          row.get(2)?,
                first_project:       row.get(3)?,
                last_project:        row.get(4)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn account_creation_funnel(&self) -> Result<Vec<AccountCreationFunnel>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT COUNT(*) AS total_accounts,
                    COUNT(*) FILTER (WHERE first_name IS NOT NULL
                                       AND last_name IS NOT NULL) AS step_basic_info,
                    COUNT(*) FILTER (WHERE headline_description IS NOT NULL) AS step_headline,
                    COUNT(*) FILTER (WHERE location_id IS NOT NULL) AS step_location,
                    COUNT(*) FILTER (WHERE company_id IS NOT NULL) AS step_company,
                    COUNT(*) FILTER (WHERE linked_in_url IS NOT NULL) AS step_linkedin,
                    COUNT(*) FILTER (WHERE has_finder = 1) AS step_finder_enabled
             FROM persons
             WHERE deleted_at IS NULL
               AND created_at >= date('now', 'start of year')",
          )?;
          let rows = stmt
            .query_map([], |row| {
              Ok(AccountCreationFunnel {
                total_accounts:      row.get(0)?,
                step_basic_info:     row.get(1)?,
                step_headline:       row.get(2)?,
                step_location:       row.get(3)?,
                step_company:        row.get(4)?,
                step_linkedin:       row.get(5)?,
                step_finder_enabled: row.get(6)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }
}
