//! Store, lookup, and update tests for the `PostgreSQL` message repository.

use crate::postgres::helpers::{PgTestContext, clock, create_test_message, pg_context, tags};
use colloquy::message::{
    domain::{ConversationId, MessageId},
    ports::{MessageRepository, MessageRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn store_and_retrieve_message(clock: DefaultClock, pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let message =
        create_test_message(&clock, ConversationId::new(), "Persisted").expect("test message");

    context
        .rt
        .block_on(context.repo.store(&message))
        .expect("store should succeed");
    let retrieved = context
        .rt
        .block_on(context.repo.find_by_id(message.id()))
        .expect("find_by_id should succeed")
        .expect("message should exist");

    assert_eq!(retrieved, message);
}

#[rstest]
fn find_missing_message_returns_none(pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };

    let result = context
        .rt
        .block_on(context.repo.find_by_id(MessageId::new()))
        .expect("find_by_id should succeed");

    assert!(result.is_none());
}

#[rstest]
fn duplicate_store_is_rejected(clock: DefaultClock, pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let message =
        create_test_message(&clock, ConversationId::new(), "Only once").expect("test message");
    context
        .rt
        .block_on(context.repo.store(&message))
        .expect("first store should succeed");

    let result = context.rt.block_on(context.repo.store(&message));

    assert!(matches!(
        result,
        Err(MessageRepositoryError::DuplicateMessage(id)) if id == message.id()
    ));
}

#[rstest]
fn update_persists_tags_and_deleted_flag(clock: DefaultClock, pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let mut message =
        create_test_message(&clock, ConversationId::new(), "Mutable").expect("test message");
    context
        .rt
        .block_on(context.repo.store(&message))
        .expect("store should succeed");

    message.add_tags(&tags(&["b", "a"]), &clock);
    message.mark_deleted(&clock);
    context
        .rt
        .block_on(context.repo.update(&message))
        .expect("update should succeed");
    let retrieved = context
        .rt
        .block_on(context.repo.find_by_id(message.id()))
        .expect("find_by_id should succeed")
        .expect("message should exist");

    assert_eq!(retrieved, message);
    assert_eq!(retrieved.tags().to_strings(), vec!["a", "b"]);
}

#[rstest]
fn stale_update_cannot_clear_deleted(clock: DefaultClock, pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let original =
        create_test_message(&clock, ConversationId::new(), "Contested").expect("test message");
    context
        .rt
        .block_on(context.repo.store(&original))
        .expect("store should succeed");

    let mut deleter = original.clone();
    deleter.mark_deleted(&clock);
    context
        .rt
        .block_on(context.repo.update(&deleter))
        .expect("delete should persist");
    let mut stale = original;
    stale.add_tags(&tags(&["late"]), &clock);
    context
        .rt
        .block_on(context.repo.update(&stale))
        .expect("stale update should persist");

    let retrieved = context
        .rt
        .block_on(context.repo.find_by_id(deleter.id()))
        .expect("find_by_id should succeed")
        .expect("message should exist");
    assert!(retrieved.is_deleted());
    assert!(retrieved.tags().contains("late"));
}

#[rstest]
fn update_of_missing_message_is_not_found(clock: DefaultClock, pg_context: Option<PgTestContext>) {
    let Some(context) = pg_context else {
        return;
    };
    let message =
        create_test_message(&clock, ConversationId::new(), "Never stored").expect("test message");

    let result = context.rt.block_on(context.repo.update(&message));

    assert!(matches!(
        result,
        Err(MessageRepositoryError::NotFound(id)) if id == message.id()
    ));
}
