//! Teacher repository
//!
//! Reads teachers with their nested reviews and writes reviews while
//! keeping `avg_rating` equal to the mean of the teacher's ratings:
//! - create: teacher + first review in one transaction
//! - add_review: insert + recompute + update in one transaction
//! - list: single LEFT JOIN folded into nested records (no N+1)

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::DbError;
use crate::models::{NewReview, NewTeacher, TeacherId};

/// Review as shown inside a teacher listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub rating: i64,
    pub reason: String,
    pub date: NaiveDate,
}

/// Teacher with all of its reviews, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherWithReviews {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub avg_rating: f64,
    pub created_at: DateTime<Utc>,
    pub reviews: Vec<ReviewSummary>,
}

impl TeacherWithReviews {
    pub fn review_count(&self) -> i64 {
        self.reviews.len() as i64
    }
}

/// Teacher repository
pub struct TeacherRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TeacherRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every teacher with nested reviews, highest average first.
    ///
    /// Ties on `avg_rating` keep creation order.
    pub async fn list(&self) -> Result<Vec<TeacherWithReviews>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                t.id,
                t.name,
                t.description,
                t.avg_rating,
                t.created_at,
                r.rating,
                r.reason,
                r.date
            FROM teachers t
            LEFT JOIN reviews r ON r.teacher_id = t.id
            ORDER BY t.avg_rating DESC, t.id ASC, r.id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut teachers: Vec<TeacherWithReviews> = Vec::new();
        for row in rows {
            let id: i64 = row.try_get("id")?;

            // Rows arrive grouped by teacher; start a new entry on id change
            if teachers.last().map(|t| t.id) != Some(id) {
                teachers.push(TeacherWithReviews {
                    id,
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    avg_rating: row.try_get("avg_rating")?,
                    created_at: row.try_get("created_at")?,
                    reviews: Vec::new(),
                });
            }

            let rating: Option<i64> = row.try_get("rating")?;
            if let (Some(rating), Some(teacher)) = (rating, teachers.last_mut()) {
                teacher.reviews.push(ReviewSummary {
                    rating,
                    reason: row.try_get("reason")?,
                    date: row.try_get("date")?,
                });
            }
        }

        Ok(teachers)
    }

    /// Create a teacher together with its first review (atomic).
    ///
    /// The name check and the insert are a single conditional statement;
    /// a case-insensitive match returns [`DbError::Duplicate`] with the
    /// existing id and nothing is written.
    pub async fn create_with_review(
        &self,
        new: NewTeacher,
        today: NaiveDate,
    ) -> Result<TeacherWithReviews, DbError> {
        let mut tx = self.pool.begin().await?;
        let created_at = Utc::now();
        let rating = new.first_review.rating;
        let key = new.name.key();

        // A single review's average is the rating itself
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO teachers (name, name_key, description, avg_rating, created_at)
            SELECT ?1, ?2, ?3, ?4, ?5
            WHERE NOT EXISTS (
                SELECT 1 FROM teachers WHERE name_key = ?2
            )
            RETURNING id
            "#,
        )
        .bind(new.name.as_str())
        .bind(&key)
        .bind(new.description.as_str())
        .bind(rating.as_f64())
        .bind(created_at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = inserted else {
            let existing: i64 = sqlx::query_scalar(
                "SELECT id FROM teachers WHERE name_key = ?1 ORDER BY id LIMIT 1",
            )
            .bind(&key)
            .fetch_one(&mut *tx)
            .await?;

            tracing::debug!(name = new.name.as_str(), existing, "duplicate teacher name");
            return Err(DbError::Duplicate { id: existing });
        };

        sqlx::query(
            r#"
            INSERT INTO reviews (teacher_id, rating, reason, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(id)
        .bind(i64::from(rating.get()))
        .bind(new.first_review.reason.as_str())
        .bind(today)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(id, name = new.name.as_str(), "teacher created");

        Ok(TeacherWithReviews {
            id,
            name: new.name.as_str().to_owned(),
            description: new.description.as_str().to_owned(),
            avg_rating: rating.as_f64(),
            created_at,
            reviews: vec![ReviewSummary {
                rating: i64::from(rating.get()),
                reason: new.first_review.reason.as_str().to_owned(),
                date: today,
            }],
        })
    }

    /// Append a review and recompute the teacher's average (atomic).
    ///
    /// Returns the new average. An unknown teacher yields
    /// [`DbError::NotFound`] and no review is written.
    pub async fn add_review(
        &self,
        teacher_id: TeacherId,
        review: NewReview,
        today: NaiveDate,
    ) -> Result<f64, DbError> {
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction takes the write lock up front
        let inserted = sqlx::query(
            r#"
            INSERT INTO reviews (teacher_id, rating, reason, date, created_at)
            SELECT ?1, ?2, ?3, ?4, ?5
            WHERE EXISTS (SELECT 1 FROM teachers WHERE id = ?1)
            "#,
        )
        .bind(teacher_id.get())
        .bind(i64::from(review.rating.get()))
        .bind(review.reason.as_str())
        .bind(today)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "teacher",
                id: teacher_id.to_string(),
            });
        }

        // Full recompute from the review table, never incremental
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating) FROM reviews WHERE teacher_id = ?1")
                .bind(teacher_id.get())
                .fetch_one(&mut *tx)
                .await?;
        let avg = avg.unwrap_or(0.0);

        sqlx::query("UPDATE teachers SET avg_rating = ?1 WHERE id = ?2")
            .bind(avg)
            .bind(teacher_id.get())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(teacher_id = teacher_id.get(), new_avg = avg, "review added");

        Ok(avg)
    }
}
