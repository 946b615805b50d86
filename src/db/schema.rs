//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `ships` table (one vessel per row)
/// - `crew_members` table, each row owned by one ship and removed with it
///
/// CHECK constraints mirror the write-time validation rules.
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Ships
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS ships (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL CHECK (length(name) >= 3),
    displacement INTEGER NOT NULL CHECK (displacement >= 51)
);

-- ---------------------------------------------------------------------------
-- Crew members (many per ship, cascade on ship delete)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS crew_members (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL CHECK (length(name) >= 5),
    role TEXT NOT NULL CHECK (role IN ('CAPTAIN', 'BOATSWAIN', 'DECKHAND')),
    ship_id INTEGER NOT NULL REFERENCES ships(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_crew_members_ship_id ON crew_members(ship_id);
"#;

/// Destructive reset: drops every table so `SQLITE_INIT` can recreate them empty.
pub const SQLITE_DROP: &str = r#"
DROP TABLE IF EXISTS crew_members;
DROP TABLE IF EXISTS ships;
"#;
