use sqlx::PgPool;
use uuid::Uuid;

use crate::guest_types::*;

const FEEDBACK_COLUMNS: &str = "id, name, email, feedback, flag, created_at";

/// Service for handling feedback operations, including moderation
pub struct FeedbackService {
    pool: PgPool,
}

impl FeedbackService {
    /// Creates a new instance of `FeedbackService` with the provided database connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores new feedback. Feedback starts unapproved.
    pub async fn create_feedback(&self, request: &FeedbackRequest) -> Result<Feedback, GuestError> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            r#"
            INSERT INTO feedbacks (id, name, email, feedback)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            FEEDBACK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.email)
        .bind(&request.feedback)
        .fetch_one(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Lists all feedback, newest first
    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, GuestError> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {} FROM feedbacks ORDER BY created_at DESC",
            FEEDBACK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Lists feedback an admin approved for display, newest first
    pub async fn list_approved_feedback(&self) -> Result<Vec<Feedback>, GuestError> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {} FROM feedbacks WHERE flag = TRUE ORDER BY created_at DESC",
            FEEDBACK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Gets a single feedback entry
    pub async fn get_feedback(&self, feedback_id: &Uuid) -> Result<Feedback, GuestError> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {} FROM feedbacks WHERE id = $1",
            FEEDBACK_COLUMNS
        ))
        .bind(feedback_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GuestError::FeedbackNotFound)
    }

    /// Counts stored feedback
    pub async fn count_feedback(&self) -> Result<i64, GuestError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedbacks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Replaces the name, email and text of a feedback entry
    pub async fn update_feedback(
        &self,
        feedback_id: &Uuid,
        request: &FeedbackRequest,
    ) -> Result<Feedback, GuestError> {
        sqlx::query_as::<_, Feedback>(&format!(
            r#"
            UPDATE feedbacks
            SET name = $1, email = $2, feedback = $3
            WHERE id = $4
            RETURNING {}
            "#,
            FEEDBACK_COLUMNS
        ))
        .bind(request.name.trim())
        .bind(&request.email)
        .bind(&request.feedback)
        .bind(feedback_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GuestError::FeedbackNotFound)
    }

    /// Flips the approval flag and returns the updated entry
    pub async fn toggle_approval(&self, feedback_id: &Uuid) -> Result<Feedback, GuestError> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "UPDATE feedbacks SET flag = NOT flag WHERE id = $1 RETURNING {}",
            FEEDBACK_COLUMNS
        ))
        .bind(feedback_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GuestError::FeedbackNotFound)?;

        log::info!(
            "✅ Feedback {} is now {}",
            feedback.id,
            if feedback.flag { "approved" } else { "hidden" }
        );
        Ok(feedback)
    }

    /// Deletes a feedback entry and returns what was removed
    pub async fn delete_feedback(&self, feedback_id: &Uuid) -> Result<Feedback, GuestError> {
        sqlx::query_as::<_, Feedback>(&format!(
            "DELETE FROM feedbacks WHERE id = $1 RETURNING {}",
            FEEDBACK_COLUMNS
        ))
        .bind(feedback_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GuestError::FeedbackNotFound)
    }
}
