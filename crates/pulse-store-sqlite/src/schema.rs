//! SQL schemas for the two Pulse databases.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. All timestamps are stored as
//! `YYYY-MM-DD HH:MM:SS` UTC text so SQLite's date functions and plain
//! lexicographic comparison agree; dates are `YYYY-MM-DD`.
//!
//! Soft deletion is uniform: a row with `deleted_at IS NOT NULL` is
//! invisible to every query in this crate.

/// Schema for the engagement (social activity) database.
///
/// `persons` here is a thin mirror used only for author attribution; the
/// authoritative person record lives in the identity database under an
/// independent key, which is why activity tables carry `person_id` as
/// opaque text with no foreign key.
pub const ENGAGEMENT_SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id         TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    email      TEXT NOT NULL,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS posts (
    id         TEXT PRIMARY KEY,
    person_id  TEXT NOT NULL,
    type       TEXT NOT NULL,    -- 'text' | 'link' | 'media'
    content    TEXT NOT NULL,
    link_url   TEXT,
    media_keys TEXT,
    created_at TEXT NOT NULL,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS comments (
    id         TEXT PRIMARY KEY,
    post_id    TEXT NOT NULL REFERENCES posts(id),
    person_id  TEXT NOT NULL,
    created_at TEXT NOT NULL,
    deleted_at TEXT
);

CREATE INDEX IF NOT EXISTS posts_person_idx    ON posts(person_id);
CREATE INDEX IF NOT EXISTS posts_created_idx   ON posts(created_at);
CREATE INDEX IF NOT EXISTS comments_post_idx   ON comments(post_id);
CREATE INDEX IF NOT EXISTS comments_person_idx ON comments(person_id);
";

/// Schema for the identity (profile) database. `persons.id` is numeric
/// here; queries that feed the cross-database join cast it to text at the
/// SQL boundary.
pub const IDENTITY_SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS locations (
    id      INTEGER PRIMARY KEY,
    country TEXT
);

CREATE TABLE IF NOT EXISTS companies (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    location_id INTEGER REFERENCES locations(id),
    deleted_at  TEXT
);

CREATE TABLE IF NOT EXISTS persons (
    id                   INTEGER PRIMARY KEY,
    first_name           TEXT NOT NULL,
    last_name            TEXT NOT NULL,
    email                TEXT NOT NULL,
    headline_description TEXT,
    linked_in_url        TEXT,
    location_id          INTEGER REFERENCES locations(id),
    company_id           INTEGER REFERENCES companies(id),
    has_finder           INTEGER NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL,
    updated_at           TEXT NOT NULL,
    deleted_at           TEXT
);

CREATE TABLE IF NOT EXISTS roles (
    id         INTEGER PRIMARY KEY,
    title      TEXT NOT NULL,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS experiences (
    id         INTEGER PRIMARY KEY,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    company_id INTEGER REFERENCES companies(id),
    role_id    INTEGER REFERENCES roles(id),
    start_date TEXT,
    end_date   TEXT,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS degrees (
    id         INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS education (
    id         INTEGER PRIMARY KEY,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    degree_id  INTEGER REFERENCES degrees(id),
    school_id  INTEGER,
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY,
    person_id   INTEGER NOT NULL REFERENCES persons(id),
    name        TEXT,
    description TEXT,
    start_date  TEXT,
    end_date    TEXT,
    deleted_at  TEXT
);

CREATE TABLE IF NOT EXISTS person_languages (
    id         INTEGER PRIMARY KEY,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS embeddings (
    id         INTEGER PRIMARY KEY,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    deleted_at TEXT
);

CREATE INDEX IF NOT EXISTS persons_location_idx    ON persons(location_id);
CREATE INDEX IF NOT EXISTS persons_company_idx     ON persons(company_id);
CREATE INDEX IF NOT EXISTS persons_created_idx     ON persons(created_at);
CREATE INDEX IF NOT EXISTS experiences_person_idx  ON experiences(person_id);
CREATE INDEX IF NOT EXISTS experiences_company_idx ON experiences(company_id);
CREATE INDEX IF NOT EXISTS education_person_idx    ON education(person_id);
CREATE INDEX IF NOT EXISTS projects_person_idx     ON projects(person_id);
";
