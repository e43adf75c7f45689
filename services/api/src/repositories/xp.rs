//! XP repository: per-day experience rows and leaderboard aggregation
//!
//! XP is stored one row per user per UTC day. Submitting XP twice on the
//! same day collapses into one row via an atomic in-place increment, so
//! concurrent submissions never lose points.

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::models::{LeaderboardEntry, XpEntry};

/// XP repository
#[derive(Clone)]
pub struct XpRepository {
    pool: PgPool,
}

/// Midnight UTC of the day containing `now`
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// The half-open UTC week window `[monday, next monday)` containing `now`
pub fn current_week_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = start_of_day(now);
    let monday = today - Duration::days(now.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(7))
}

impl XpRepository {
    /// Create a new XP repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add XP to the user's row for the current UTC day
    ///
    /// Increments today's row in place when one exists, otherwise inserts
    /// a fresh row. The increment is a single UPDATE so concurrent adds
    /// both land, and it targets exactly one `xp_id`: should duplicate
    /// same-day rows ever exist, only the oldest one accumulates.
    pub async fn add(&self, user_id: i64, amount: i32) -> Result<XpEntry> {
        let today = start_of_day(Utc::now());
        let tomorrow = today + Duration::days(1);

        let updated = sqlx::query_as::<_, XpEntry>(
            r#"
            UPDATE xp
            SET xp_count = xp_count + $2
            WHERE xp_id = (
                SELECT xp_id
                FROM xp
                WHERE user_id = $1
                  AND is_deleted = FALSE
                  AND created >= $3 AND created < $4
                ORDER BY xp_id
                LIMIT 1
            )
            RETURNING xp_id, user_id, xp_count, created
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(today)
        .bind(tomorrow)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(entry) = updated {
            return Ok(entry);
        }

        info!("Opening new XP row for user id {}", user_id);

        let entry = sqlx::query_as::<_, XpEntry>(
            r#"
            INSERT INTO xp (user_id, xp_count)
            VALUES ($1, $2)
            RETURNING xp_id, user_id, xp_count, created
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Total XP for a user, optionally bounded to `[start, end)`
    pub async fn sum(
        &self,
        user_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<i64> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(xp_count), 0)::BIGINT
            FROM xp
            WHERE user_id = $1
              AND is_deleted = FALSE
              AND ($2::timestamptz IS NULL OR created >= $2)
              AND ($3::timestamptz IS NULL OR created < $3)
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-day XP rows for a user within `[start, end)`, oldest first
    pub async fn entries_in_window(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<XpEntry>> {
        let entries = sqlx::query_as::<_, XpEntry>(
            r#"
            SELECT xp_id, user_id, xp_count, created
            FROM xp
            WHERE user_id = $1
              AND is_deleted = FALSE
              AND created >= $2 AND created < $3
            ORDER BY created ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Weekly XP totals for the users connected to `user_id`
    ///
    /// Connected users are found through friend requests naming the user
    /// as sender or receiver; with `accepted_only` the match is restricted
    /// to accepted ones. The connected set is deduplicated before joining
    /// XP, so mutual or repeated request rows between the same pair never
    /// multiply a user's sum. The caller is not in the result and is
    /// ranked by the handler alongside their own total.
    pub async fn leaderboard(
        &self,
        user_id: i64,
        accepted_only: bool,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.user_uuid, u.user_name, u.random_id,
                   COALESCE(SUM(x.xp_count), 0)::BIGINT AS xp_count
            FROM (
                SELECT DISTINCT CASE
                    WHEN fr.sender_user_id = $1 THEN fr.receiver_user_id
                    ELSE fr.sender_user_id
                END AS user_id
                FROM friend_requests AS fr
                WHERE (fr.sender_user_id = $1 OR fr.receiver_user_id = $1)
                  AND ($2 = FALSE OR fr.is_accepted = TRUE)
                  AND fr.is_deleted = FALSE
            ) AS connected
            INNER JOIN users AS u
                ON u.user_id = connected.user_id AND u.is_deleted = FALSE
            LEFT JOIN xp AS x
                ON x.user_id = u.user_id
                AND x.is_deleted = FALSE
                AND x.created >= $3 AND x.created < $4
            GROUP BY u.user_uuid, u.user_name, u.random_id
            ORDER BY xp_count DESC
            "#,
        )
        .bind(user_id)
        .bind(accepted_only)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_day_truncates_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 17, 42, 9).unwrap();
        let start = start_of_day(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_is_idempotent() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(start_of_day(midnight), midnight);
    }

    #[test]
    fn test_week_window_aligns_to_monday() {
        // 2024-03-15 is a Friday
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let (start, end) = current_week_window(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_week_window_on_monday_starts_today() {
        let monday = Utc.with_ymd_and_hms(2024, 3, 11, 8, 30, 0).unwrap();
        let (start, end) = current_week_window(monday);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(end - start, Duration::days(7));
    }

    #[test]
    fn test_week_window_spans_month_boundary() {
        // 2024-05-01 is a Wednesday; the Monday is still in April
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        let (start, _) = current_week_window(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 4, 29, 0, 0, 0).unwrap());
    }
}
