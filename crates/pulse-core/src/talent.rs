//! Talent-marketplace metric rows: companies, roles, education, geography,
//! and projects.

use chrono::NaiveDate;
use serde::Serialize;

/// A company ranked by how many users it employs.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyPresence {
  pub company_name:      String,
  pub user_count:        i64,
  pub total_experiences: i64,
  /// Comma-separated distinct countries, absent when the company has no
  /// location on file.
  pub countries:         Option<String>,
}

/// A role ranked by how many users have held it.
#[derive(Debug, Clone, Serialize)]
pub struct RolePresence {
  pub role_title:        String,
  pub user_count:        i64,
  pub companies_count:   i64,
  pub avg_years_in_role: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DegreeDistribution {
  pub degree_type:   String,
  pub user_count:    i64,
  pub schools_count: i64,
}

/// User distribution by country, with share of the whole user base.
#[derive(Debug, Clone, Serialize)]
pub struct CountryDistribution {
  pub country:         String,
  pub user_count:      i64,
  pub companies_count: i64,
  pub percentage:      f64,
}

/// A project name shared by more than one user.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPresence {
  pub project_name:        String,
  pub project_description: Option<String>,
  pub user_count:          i64,
  pub first_project:       Option<NaiveDate>,
  pub last_project:        Option<NaiveDate>,
}
