//! Store operations: master data upserts, snapshot writes, latest lookup

use crate::schema::{LatestForecastRow, RegionRow, SnapshotRow, WeatherCodeRow};
use crate::{DbError, DbResult, SnapshotStore};
use chrono::Utc;
use sqlx::{Row, Sqlite, Transaction};
use tenki_core::{
    is_known_code, match_color_in, resolve_phrase, to_display_tokens, DailyEntry, Region,
    CODE_BG_COLOR, DEFAULT_CODE_COLOR,
};
use tracing::{debug, info, instrument};

const UPSERT_CODE: &str = r#"
    INSERT INTO weather_codes
        (weather_code, description, icon, color_code, memo, bg_color_code)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT(weather_code) DO UPDATE SET
        description = excluded.description,
        icon = excluded.icon,
        color_code = excluded.color_code,
        memo = excluded.memo,
        bg_color_code = excluded.bg_color_code
"#;

impl SnapshotStore {
    /// Upsert a definition for every `(code, phrase)` pair.
    ///
    /// The color is the first `color_table` keyword found in the phrase,
    /// gray when none is. Safe to run on every start.
    #[instrument(skip(self, codes, color_table))]
    pub async fn seed_code_definitions<'a, I>(
        &self,
        codes: I,
        color_table: &[(&str, &str)],
    ) -> DbResult<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tx = self.pool().begin().await?;
        let mut seeded = 0;

        for (code, phrase) in codes {
            let color = match_color_in(phrase, color_table).unwrap_or(DEFAULT_CODE_COLOR);
            sqlx::query(UPSERT_CODE)
                .bind(code)
                .bind(phrase)
                .bind(to_display_tokens(phrase).primary().icon)
                .bind(color)
                .bind("")
                .bind(CODE_BG_COLOR)
                .execute(&mut *tx)
                .await?;
            seeded += 1;
        }

        tx.commit().await?;
        info!("Seeded {} weather code definitions", seeded);
        Ok(seeded)
    }

    /// Insert or replace a region by code
    #[instrument(skip(self, region), fields(region = %region.code))]
    pub async fn upsert_region(&self, region: &Region) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO areas (area_id, area_name, center_id, center_name)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(area_id) DO UPDATE SET
                area_name = excluded.area_name,
                center_id = excluded.center_id,
                center_name = excluded.center_name
            "#,
        )
        .bind(&region.code)
        .bind(&region.name)
        .bind(&region.center_code)
        .bind(&region.center_name)
        .execute(self.pool())
        .await?;

        debug!("Upserted region {} ({})", region.code, region.name);
        Ok(())
    }

    /// Append one snapshot (header plus one row per day) atomically.
    ///
    /// Returns the new snapshot id. Nothing is written if any row fails.
    #[instrument(skip(self, days), fields(days = days.len()))]
    pub async fn save_snapshot(
        &self,
        region_code: &str,
        source_office_code: &str,
        days: &[DailyEntry],
    ) -> DbResult<i64> {
        if days.is_empty() {
            return Err(DbError::EmptySnapshot(region_code.to_string()));
        }

        let mut tx = self.pool().begin().await?;

        let forecast_id = sqlx::query(
            r#"
            INSERT INTO forecasts (datetime, office_code, area_id)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(Utc::now())
        .bind(source_office_code)
        .bind(region_code)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for day in days {
            if !is_known_code(&day.weather_code) {
                insert_fallback_code(&mut tx, &day.weather_code).await?;
            }

            sqlx::query(
                r#"
                INSERT INTO daily_forecasts
                    (date, temp_min, temp_max, forecast_id, weather_code)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(day.date)
            .bind(day.temp_min)
            .bind(day.temp_max)
            .bind(forecast_id)
            .bind(&day.weather_code)
            .execute(&mut *tx)
            .await
            .map_err(|e| constraint_error(e, format!("duplicate date {}", day.date)))?;
        }

        tx.commit().await?;

        info!(
            "Saved snapshot {} for region {} ({} days)",
            forecast_id,
            region_code,
            days.len()
        );
        Ok(forecast_id)
    }

    /// Daily rows of the newest snapshot for a region, by date.
    ///
    /// Empty when the region has never been saved.
    #[instrument(skip(self))]
    pub async fn get_latest(&self, region_code: &str) -> DbResult<Vec<LatestForecastRow>> {
        let rows = sqlx::query_as::<_, LatestForecastRow>(
            r#"
            SELECT
                df.daily_forecast_id, df.date, df.temp_min, df.temp_max,
                df.forecast_id, df.weather_code,
                wc.description, wc.icon, wc.color_code
            FROM daily_forecasts df
            JOIN weather_codes wc ON df.weather_code = wc.weather_code
            WHERE df.forecast_id = (
                SELECT MAX(forecast_id) FROM forecasts WHERE area_id = ?
            )
            ORDER BY df.date ASC
            "#,
        )
        .bind(region_code)
        .fetch_all(self.pool())
        .await?;

        debug!("Latest forecast for {}: {} rows", region_code, rows.len());
        Ok(rows)
    }

    /// Header of the newest snapshot for a region
    #[instrument(skip(self))]
    pub async fn latest_snapshot(&self, region_code: &str) -> DbResult<Option<SnapshotRow>> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT forecast_id, datetime, office_code, area_id
            FROM forecasts
            WHERE area_id = ?
            ORDER BY forecast_id DESC
            LIMIT 1
            "#,
        )
        .bind(region_code)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn get_region(&self, code: &str) -> DbResult<Option<RegionRow>> {
        let row = sqlx::query_as::<_, RegionRow>(
            "SELECT area_id, area_name, center_id, center_name FROM areas WHERE area_id = ?",
        )
        .bind(code)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn get_code_definition(&self, code: &str) -> DbResult<Option<WeatherCodeRow>> {
        let row = sqlx::query_as::<_, WeatherCodeRow>(
            r#"
            SELECT weather_code, description, icon, color_code, memo, bg_color_code
            FROM weather_codes
            WHERE weather_code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    /// Number of snapshots stored for a region
    #[instrument(skip(self))]
    pub async fn count_snapshots(&self, region_code: &str) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM forecasts WHERE area_id = ?")
            .bind(region_code)
            .fetch_one(self.pool())
            .await?;

        Ok(row.get("count"))
    }
}

/// Give a code outside the dictionary a definition so the daily row's
/// foreign key holds. An existing definition is left alone.
async fn insert_fallback_code(tx: &mut Transaction<'_, Sqlite>, code: &str) -> DbResult<()> {
    let phrase = resolve_phrase(code);
    sqlx::query(
        r#"
        INSERT INTO weather_codes
            (weather_code, description, icon, color_code, memo, bg_color_code)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(weather_code) DO NOTHING
        "#,
    )
    .bind(code)
    .bind(phrase)
    .bind(to_display_tokens(phrase).primary().icon)
    .bind(tenki_core::primary_color(phrase))
    .bind("unknown code")
    .bind(CODE_BG_COLOR)
    .execute(&mut **tx)
    .await?;

    debug!("Added fallback definition for unknown code {}", code);
    Ok(())
}

/// Unique-key failures become `ConstraintViolation`, anything else stays a database error
fn constraint_error(e: sqlx::Error, detail: String) -> DbError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DbError::ConstraintViolation(detail)
        }
        _ => DbError::Database(e),
    }
}
