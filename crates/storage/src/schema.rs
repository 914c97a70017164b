use sqlx::PgPool;

use crate::error::Result;

const CREATE_PLAYERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS players (
  id INT PRIMARY KEY,
  firstname TEXT NOT NULL,
  lastname TEXT NOT NULL,
  shortname TEXT NOT NULL,
  sex CHAR(1) NOT NULL,
  rank INT,
  points INT,
  weight INT,
  height INT,
  age INT,
  last JSONB,
  countrycode TEXT,
  countrypicture TEXT,
  picture TEXT
)
"#;

/// Statements that tighten the `players` table: NOT NULLs, value checks,
/// the shortname uniqueness rule, the ranking index and the audit
/// timestamps with their update trigger.
///
/// Postgres has no `ADD CONSTRAINT IF NOT EXISTS`, so constraints are
/// dropped and re-added; every statement here is safe to re-run. Adding a
/// constraint fails if existing rows already violate it.
const INTEGRITY_STATEMENTS: &[&str] = &[
    r#"
    ALTER TABLE players
    ALTER COLUMN rank  SET NOT NULL,
    ALTER COLUMN points SET NOT NULL,
    ALTER COLUMN weight SET NOT NULL,
    ALTER COLUMN height SET NOT NULL,
    ALTER COLUMN age   SET NOT NULL,
    ALTER COLUMN last  SET NOT NULL,
    ALTER COLUMN countrycode SET NOT NULL,
    ALTER COLUMN countrypicture SET NOT NULL,
    ALTER COLUMN picture SET NOT NULL
    "#,
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_sex_chk",
    "ALTER TABLE players ADD CONSTRAINT players_sex_chk CHECK (sex IN ('M','F'))",
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_rank_chk",
    "ALTER TABLE players ADD CONSTRAINT players_rank_chk CHECK (rank >= 1)",
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_points_chk",
    "ALTER TABLE players ADD CONSTRAINT players_points_chk CHECK (points >= 0)",
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_weight_chk",
    // weight is stored in grams
    "ALTER TABLE players ADD CONSTRAINT players_weight_chk CHECK (weight > 0)",
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_height_chk",
    // height is stored in centimeters
    "ALTER TABLE players ADD CONSTRAINT players_height_chk CHECK (height > 0)",
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_age_chk",
    "ALTER TABLE players ADD CONSTRAINT players_age_chk CHECK (age > 0)",
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_countrycode_chk",
    r#"
    ALTER TABLE players ADD CONSTRAINT players_countrycode_chk
    CHECK (char_length(countrycode) = 3 AND countrycode = upper(countrycode))
    "#,
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_last_type_chk",
    r#"
    ALTER TABLE players ADD CONSTRAINT players_last_type_chk
    CHECK (jsonb_typeof(last) = 'array')
    "#,
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_last_values_chk",
    r#"
    ALTER TABLE players ADD CONSTRAINT players_last_values_chk
    CHECK (NOT jsonb_path_exists(last, '$[*] ? (@ != 0 && @ != 1)'))
    "#,
    "ALTER TABLE players DROP CONSTRAINT IF EXISTS players_shortname_uk",
    "ALTER TABLE players ADD CONSTRAINT players_shortname_uk UNIQUE (shortname)",
    r#"
    CREATE INDEX IF NOT EXISTS players_rank_points_idx
    ON players (rank ASC, points DESC)
    "#,
    r#"
    ALTER TABLE players
    ADD COLUMN IF NOT EXISTS created_at timestamptz DEFAULT now(),
    ADD COLUMN IF NOT EXISTS updated_at timestamptz DEFAULT now()
    "#,
    r#"
    CREATE OR REPLACE FUNCTION set_updated_at() RETURNS trigger AS $$
    BEGIN NEW.updated_at = now(); RETURN NEW; END;
    $$ LANGUAGE plpgsql
    "#,
    "DROP TRIGGER IF EXISTS trg_players_updated_at ON players",
    r#"
    CREATE TRIGGER trg_players_updated_at
    BEFORE UPDATE ON players
    FOR EACH ROW EXECUTE FUNCTION set_updated_at()
    "#,
];

/// Create the `players` table if it does not exist yet.
pub async fn ensure_players_table(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_PLAYERS_TABLE).execute(pool).await?;

    Ok(())
}

/// Apply the integrity layer on top of the base table.
pub async fn apply_integrity_schema(pool: &PgPool) -> Result<()> {
    for statement in INTEGRITY_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
