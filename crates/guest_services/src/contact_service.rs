use sqlx::PgPool;
use uuid::Uuid;

use crate::guest_types::*;

const CONTACT_COLUMNS: &str = "id, name, email, mobile, message, created_at";

/// Service for handling contact form messages
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    /// Creates a new instance of `ContactService` with the provided database connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores a contact form message
    pub async fn create_contact(&self, request: &CreateContactRequest) -> Result<Contact, GuestError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            INSERT INTO contacts (id, name, email, mobile, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.email)
        .bind(request.mobile.trim())
        .bind(request.message.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Lists all contact messages, newest first
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, GuestError> {
        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {} FROM contacts ORDER BY created_at DESC",
            CONTACT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    /// Deletes a contact message and returns what was removed
    pub async fn delete_contact(&self, contact_id: &Uuid) -> Result<Contact, GuestError> {
        sqlx::query_as::<_, Contact>(&format!(
            "DELETE FROM contacts WHERE id = $1 RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GuestError::ContactNotFound)
    }
}
