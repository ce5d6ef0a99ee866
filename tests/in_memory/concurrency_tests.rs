//! In-memory integration tests for interleaved writers.

use super::helpers::{TestStore, add_tags, conversation_id, post, store};
use colloquy::message::domain::ConversationId;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_delete_and_tag_never_resurrects(
    store: TestStore,
    conversation_id: ConversationId,
) {
    let created = post(&store, conversation_id, "Raced")
        .await
        .expect("message creation should succeed");
    let id = created.id();

    let (deleted, tagged) = tokio::join!(
        store.delete(id),
        add_tags(&store, id, conversation_id, &["race"]),
    );
    deleted.expect("delete should succeed");
    tagged.expect("tagging should succeed");

    let stored = store
        .get_message(&id.to_string())
        .await
        .expect("lookup should succeed");
    assert!(stored.is_deleted());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_adds_keep_a_consistent_record(
    store: TestStore,
    conversation_id: ConversationId,
) {
    let created = post(&store, conversation_id, "Contended")
        .await
        .expect("message creation should succeed");
    let id = created.id();

    let (first, second) = tokio::join!(
        add_tags(&store, id, conversation_id, &["left"]),
        add_tags(&store, id, conversation_id, &["right"]),
    );
    first.expect("first add should succeed");
    second.expect("second add should succeed");

    // Last writer wins: at least one of the two tags survives, never neither.
    let stored = store
        .get_message(&id.to_string())
        .await
        .expect("lookup should succeed");
    assert!(stored.tags().contains("left") || stored.tags().contains("right"));
    assert_eq!(stored.text(), created.text());
}
