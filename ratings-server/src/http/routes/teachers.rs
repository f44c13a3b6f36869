//! Teacher and review endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::db::repos::{ReviewSummary, TeacherRepo, TeacherWithReviews};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidTeacherId};
use crate::http::server::AppState;
use crate::models::{Description, NewReview, NewTeacher, RatingInput, Reason, TeacherName};

/// Create teacher request (teacher plus first review)
#[derive(Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub description: String,
    pub rating: RatingInput,
    pub reason: String,
}

/// Append review request
#[derive(Deserialize)]
pub struct AddReviewRequest {
    pub rating: RatingInput,
    pub reason: String,
}

/// Teacher response
///
/// `reviewCount` is only present in listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub avg_rating: f64,
    pub reviews: Vec<ReviewSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
}

impl TeacherResponse {
    fn listed(t: TeacherWithReviews) -> Self {
        let count = t.review_count();
        Self {
            review_count: Some(count),
            ..Self::from(t)
        }
    }
}

impl From<TeacherWithReviews> for TeacherResponse {
    fn from(t: TeacherWithReviews) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            avg_rating: t.avg_rating,
            reviews: t.reviews,
            review_count: None,
        }
    }
}

/// Append review response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewResponse {
    pub success: bool,
    pub new_avg: f64,
}

impl CreateTeacherRequest {
    fn validate(self) -> Result<NewTeacher, ApiError> {
        Ok(NewTeacher {
            name: TeacherName::new(&self.name)?,
            description: Description::new(&self.description)?,
            first_review: NewReview {
                rating: self.rating.parse()?,
                reason: Reason::new(&self.reason)?,
            },
        })
    }
}

impl AddReviewRequest {
    fn validate(self) -> Result<NewReview, ApiError> {
        Ok(NewReview {
            rating: self.rating.parse()?,
            reason: Reason::new(&self.reason)?,
        })
    }
}

/// GET /api/teachers - all teachers with nested reviews, best first
async fn list_teachers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeacherResponse>>, ApiError> {
    let teachers = TeacherRepo::new(&state.pool).list().await?;
    Ok(Json(
        teachers.into_iter().map(TeacherResponse::listed).collect(),
    ))
}

/// POST /api/teachers - create a teacher with its first review
async fn create_teacher(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTeacherRequest>,
) -> Result<Json<TeacherResponse>, ApiError> {
    let new = req.validate()?;
    let teacher = TeacherRepo::new(&state.pool)
        .create_with_review(new, Local::now().date_naive())
        .await?;

    Ok(Json(TeacherResponse::from(teacher)))
}

/// POST /api/teachers/{id}/reviews - append a review, return the new average
async fn add_review(
    State(state): State<Arc<AppState>>,
    ValidTeacherId(teacher_id): ValidTeacherId,
    ValidJson(req): ValidJson<AddReviewRequest>,
) -> Result<Json<AddReviewResponse>, ApiError> {
    let review = req.validate()?;
    let new_avg = TeacherRepo::new(&state.pool)
        .add_review(teacher_id, review, Local::now().date_naive())
        .await?;

    Ok(Json(AddReviewResponse {
        success: true,
        new_avg,
    }))
}

/// Teacher routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teachers", get(list_teachers).post(create_teacher))
        .route("/api/teachers/{id}/reviews", post(add_review))
}
