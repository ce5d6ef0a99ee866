//! Diesel row models for message persistence.

use super::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning conversation identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub conversation_id: uuid::Uuid,
    /// Authoring user identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub sender_id: uuid::Uuid,
    /// Message body.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub text: String,
    /// Tag set.
    #[diesel(sql_type = diesel::sql_types::Array<diesel::sql_types::Text>)]
    pub tags: Vec<String>,
    /// Users who liked the message.
    #[diesel(sql_type = diesel::sql_types::Array<diesel::sql_types::Uuid>)]
    pub likes: Vec<uuid::Uuid>,
    /// Reaction records.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub reactions: Value,
    /// Resolution flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub resolved: bool,
    /// Soft-delete flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub deleted: bool,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Owning conversation identifier.
    pub conversation_id: uuid::Uuid,
    /// Authoring user identifier.
    pub sender_id: uuid::Uuid,
    /// Message body.
    pub text: String,
    /// Tag set.
    pub tags: Vec<String>,
    /// Users who liked the message.
    pub likes: Vec<uuid::Uuid>,
    /// Reaction records.
    pub reactions: Value,
    /// Resolution flag.
    pub resolved: bool,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
