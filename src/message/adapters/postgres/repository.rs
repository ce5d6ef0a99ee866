//! `PostgreSQL` repository implementation for message storage.

use super::{
    models::{MessageRow, NewMessageRow},
    schema::messages,
};
use crate::message::{
    domain::{
        ConversationId, Message, MessageId, MessageText, PersistedMessageData, Reaction, TagSet,
        UserId,
    },
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

/// `PostgreSQL` connection pool type used by message adapters.
pub type MessagePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed message repository.
///
/// Tag search uses the array overlap operator (`&&`), which the migration
/// backs with a GIN index.
///
/// # Example
///
/// ```ignore
/// use colloquy::message::adapters::postgres::{PostgresMessageRepository, PostgresStoreConfig};
///
/// let config = PostgresStoreConfig::from_env()?;
/// let repo = PostgresMessageRepository::new(config.build_pool()?);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMessageRepository {
    pool: MessagePgPool,
}

impl PostgresMessageRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MessagePgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &MessagePgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> MessageRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MessageRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MessageRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MessageRepositoryError::persistence)?
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        let message_id = message.id();
        let new_row = to_new_row(message)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(messages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        warn!(%message_id, "duplicate message insert rejected");
                        MessageRepositoryError::DuplicateMessage(message_id)
                    }
                    _ => MessageRepositoryError::persistence(err),
                })?;
            debug!(%message_id, "message row inserted");
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        self.run_blocking(move |connection| {
            let row = messages::table
                .filter(messages::id.eq(id.into_inner()))
                .select(MessageRow::as_select())
                .first::<MessageRow>(connection)
                .optional()
                .map_err(MessageRepositoryError::persistence)?;
            row.map(row_to_message).transpose()
        })
        .await
    }

    async fn update(&self, message: &Message) -> MessageRepositoryResult<()> {
        let message_id = message.id();
        let tags = message.tags().to_strings();
        let deleted = message.is_deleted();
        let updated_at = message.updated_at();

        self.run_blocking(move |connection| {
            let target = messages::table.filter(messages::id.eq(message_id.into_inner()));
            // The flag is only ever written as true, so a stale writer cannot
            // undo a soft delete.
            let result = if deleted {
                diesel::update(target)
                    .set((
                        messages::tags.eq(tags),
                        messages::deleted.eq(true),
                        messages::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
            } else {
                diesel::update(target)
                    .set((
                        messages::tags.eq(tags),
                        messages::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
            };
            let affected = result.map_err(MessageRepositoryError::persistence)?;

            if affected == 0 {
                return Err(MessageRepositoryError::NotFound(message_id));
            }
            debug!(%message_id, deleted, "message row updated");
            Ok(())
        })
        .await
    }

    async fn find_by_any_tag(&self, tags: &TagSet) -> MessageRepositoryResult<Vec<Message>> {
        let query_tags = tags.to_strings();
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT id, conversation_id, sender_id, text, tags, likes, reactions, ",
                "resolved, deleted, created_at, updated_at FROM messages ",
                "WHERE tags && $1 ",
                "ORDER BY created_at, id",
            ))
            .bind::<diesel::sql_types::Array<diesel::sql_types::Text>, _>(query_tags)
            .load::<MessageRow>(connection)
            .map_err(MessageRepositoryError::persistence)?;
            debug!(rows = rows.len(), "tag overlap query completed");

            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }
}

fn to_new_row(message: &Message) -> MessageRepositoryResult<NewMessageRow> {
    let reactions =
        serde_json::to_value(message.reactions()).map_err(MessageRepositoryError::persistence)?;

    Ok(NewMessageRow {
        id: message.id().into_inner(),
        conversation_id: message.conversation_id().into_inner(),
        sender_id: message.sender_id().into_inner(),
        text: message.text().as_str().to_owned(),
        tags: message.tags().to_strings(),
        likes: message
            .likes()
            .iter()
            .map(|user_id| user_id.into_inner())
            .collect(),
        reactions,
        resolved: message.is_resolved(),
        deleted: message.is_deleted(),
        created_at: message.created_at(),
        updated_at: message.updated_at(),
    })
}

fn row_to_message(row: MessageRow) -> MessageRepositoryResult<Message> {
    let MessageRow {
        id,
        conversation_id,
        sender_id,
        text: persisted_text,
        tags: persisted_tags,
        likes,
        reactions: persisted_reactions,
        resolved,
        deleted,
        created_at,
        updated_at,
    } = row;

    let text = MessageText::new(persisted_text).map_err(MessageRepositoryError::persistence)?;
    let tags = TagSet::parse(persisted_tags).map_err(MessageRepositoryError::persistence)?;
    let reactions = serde_json::from_value::<Vec<Reaction>>(persisted_reactions)
        .map_err(MessageRepositoryError::persistence)?;

    let data = PersistedMessageData {
        id: MessageId::from_uuid(id),
        conversation_id: ConversationId::from_uuid(conversation_id),
        sender_id: UserId::from_uuid(sender_id),
        text,
        tags,
        likes: likes.into_iter().map(UserId::from_uuid).collect(),
        reactions,
        resolved,
        deleted,
        created_at,
        updated_at,
    };
    Ok(Message::from_persisted(data))
}
