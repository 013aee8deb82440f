//! SQL schema for the StreamWise star schema.
//!
//! In production the schema is deployed separately; this DDL is applied only
//! when `database.init_schema` is enabled (and by the tests). Idempotent
//! thanks to `CREATE TABLE IF NOT EXISTS`.

/// Pragmas applied to every connection on open.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS dim_Devices (
    DeviceID       INTEGER PRIMARY KEY AUTOINCREMENT,
    Platform       TEXT NOT NULL,
    AppVersion     TEXT NOT NULL,
    ConnectionType TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_MediaContent (
    ContentID          INTEGER PRIMARY KEY AUTOINCREMENT,
    Title              TEXT NOT NULL,
    Category           TEXT NOT NULL,
    SubGenre           TEXT NOT NULL,
    ProductionCost_USD REAL NOT NULL CHECK (ProductionCost_USD > 0),
    Rating_IMDB        REAL NOT NULL CHECK (Rating_IMDB BETWEEN 0 AND 10),
    TargetAudience     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_UserBase (
    UserID            INTEGER PRIMARY KEY AUTOINCREMENT,
    AgeGroup          TEXT NOT NULL,
    Gender            TEXT NOT NULL CHECK (Gender IN ('M', 'F')),
    Tier              TEXT NOT NULL CHECK (Tier IN ('Free', 'Voyo', 'Premium')),
    Country           TEXT NOT NULL,
    AcquisitionSource TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS fact_Engagement (
    EngagementID         INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID               INTEGER NOT NULL REFERENCES dim_UserBase(UserID),
    ContentID            INTEGER NOT NULL REFERENCES dim_MediaContent(ContentID),
    DeviceID             INTEGER NOT NULL REFERENCES dim_Devices(DeviceID),
    StreamStartTimestamp TEXT    NOT NULL,   -- 'YYYY-MM-DD HH:MM:SS', local time
    WatchTimeMinutes     INTEGER NOT NULL CHECK (WatchTimeMinutes > 0),
    IsInterrupted        INTEGER NOT NULL CHECK (IsInterrupted IN (0, 1)),
    BufferingEvents      INTEGER NOT NULL CHECK (BufferingEvents >= 0)
);

-- Cleared on every reset; populated by a separate ad-serving feed.
CREATE TABLE IF NOT EXISTS fact_AdImpressions (
    ImpressionID        INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID              INTEGER NOT NULL REFERENCES dim_UserBase(UserID),
    ContentID           INTEGER NOT NULL REFERENCES dim_MediaContent(ContentID),
    ImpressionTimestamp TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS engagement_user_idx    ON fact_Engagement(UserID);
CREATE INDEX IF NOT EXISTS engagement_content_idx ON fact_Engagement(ContentID);
CREATE INDEX IF NOT EXISTS engagement_start_idx   ON fact_Engagement(StreamStartTimestamp);

PRAGMA user_version = 1;
";
