//! Message store service tests over the `PostgreSQL` repository.

use std::sync::Arc;

use crate::postgres::helpers::{PgTestContext, pg_context};
use colloquy::message::{
    domain::{ConversationId, UserId},
    services::{CreateMessageRequest, MessageStore, MessageStoreError, TagMessageRequest},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn tag_lifecycle_round_trips_through_postgres(pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let store = MessageStore::new(Arc::new(context.repo.clone()), Arc::new(DefaultClock));
    let conversation = ConversationId::new();

    context.rt.block_on(async {
        let created = store
            .create(CreateMessageRequest::new(conversation, "Hello world"), UserId::new())
            .await
            .expect("message creation should succeed");
        store
            .add_tags_to_message(TagMessageRequest::new(
                created.id(),
                conversation,
                ["tag1", "tag2"],
            ))
            .await
            .expect("add should succeed");
        let replaced = store
            .update_tags_on_message(TagMessageRequest::new(
                created.id(),
                conversation,
                ["tag3", "tag4"],
            ))
            .await
            .expect("replace should succeed");
        let conflict = store
            .add_tags_to_message(TagMessageRequest::new(
                created.id(),
                ConversationId::new(),
                ["nope"],
            ))
            .await;
        let deleted = store
            .delete(created.id())
            .await
            .expect("delete should succeed");
        let fetched = store
            .get_message(&created.id().to_string())
            .await
            .expect("lookup should succeed");

        assert_eq!(replaced.tags().to_strings(), vec!["tag3", "tag4"]);
        assert!(matches!(conflict, Err(MessageStoreError::Conflict { .. })));
        assert_eq!(fetched, deleted);
        assert!(fetched.is_deleted());
    });
}

#[rstest]
fn pool_is_scoped_to_the_test_schema(pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };

    assert!(context.config.database_url().contains("search_path"));
    assert_eq!(context.config.max_pool_size(), 2);
    assert!(context.repo.pool().max_size() >= 1);
}
