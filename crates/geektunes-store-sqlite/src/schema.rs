//! SQL schema for the GeekTunes SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,       -- argon2 PHC string
    email       TEXT,
    first_name  TEXT,
    last_name   TEXT,
    is_admin    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,       -- RFC 3339 UTC
    updated_at  TEXT NOT NULL
);

-- Only the SHA-256 digest of a bearer token is stored.
CREATE TABLE IF NOT EXISTS sessions (
    token_hash  TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(id),
    created_at  TEXT NOT NULL,
    expires_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS artists (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    avatar          TEXT NOT NULL DEFAULT '',
    description     TEXT NOT NULL DEFAULT '',
    roles           TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    social_links    TEXT NOT NULL DEFAULT '{}',   -- JSON object name -> url
    music_url       TEXT,
    is_active       INTEGER NOT NULL DEFAULT 1,
    musical_styles  TEXT NOT NULL DEFAULT '[]',
    artist_types    TEXT NOT NULL DEFAULT '[]',
    likes           INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS likes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL REFERENCES users(id),
    artist_id   INTEGER NOT NULL REFERENCES artists(id),
    created_at  TEXT NOT NULL,
    UNIQUE (user_id, artist_id)
);

CREATE TABLE IF NOT EXISTS projects (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    name               TEXT NOT NULL,
    cover_image        TEXT NOT NULL DEFAULT '',
    description        TEXT NOT NULL DEFAULT '',
    genres             TEXT NOT NULL DEFAULT '[]',
    collaborators      TEXT NOT NULL DEFAULT '[]',   -- JSON array of artist ids
    preview_audio_url  TEXT,
    preview_video_url  TEXT,
    status             TEXT NOT NULL DEFAULT 'em_desenvolvimento'
                       CHECK (status IN ('em_desenvolvimento', 'finalizado', 'lancado')),
    release_date       TEXT,                          -- YYYY-MM-DD
    created_at         TEXT NOT NULL,
    is_active          INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS notifications (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    message     TEXT NOT NULL,
    kind        TEXT NOT NULL DEFAULT 'info',
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS chat_messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL REFERENCES users(id),
    username    TEXT NOT NULL,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS likes_user_idx       ON likes(user_id);
CREATE INDEX IF NOT EXISTS sessions_user_idx    ON sessions(user_id);
CREATE INDEX IF NOT EXISTS artists_active_idx   ON artists(is_active);

PRAGMA user_version = 1;
";
