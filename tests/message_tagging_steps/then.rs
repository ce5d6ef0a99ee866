//! Then steps for message tagging BDD scenarios.

use super::world::{MessageTaggingWorld, run_async, split_tags};
use colloquy::message::services::MessageStoreError;
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(r#"the message has tags "{tags}""#)]
fn message_has_tags(world: &MessageTaggingWorld, tags: String) -> Result<(), eyre::Report> {
    let actual = world.current_message()?.tags().to_strings();
    let expected = split_tags(&tags);
    eyre::ensure!(
        actual == expected,
        "expected tags {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the stored message has tags "{tags}""#)]
fn stored_message_has_tags(world: &MessageTaggingWorld, tags: String) -> Result<(), eyre::Report> {
    let id = world.current_message()?.id().to_string();
    let stored = run_async(world.store.get_message(&id)).wrap_err("reload message")?;
    let actual = stored.tags().to_strings();
    let expected = split_tags(&tags);
    eyre::ensure!(
        actual == expected,
        "expected stored tags {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the tag operation fails with a conflict")]
fn tag_operation_conflicts(world: &MessageTaggingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    if !matches!(result, Err(MessageStoreError::Conflict { .. })) {
        return Err(eyre::eyre!("expected Conflict error, got {result:?}"));
    }
    Ok(())
}

#[then("the stored message is marked deleted")]
fn stored_message_is_deleted(world: &MessageTaggingWorld) -> Result<(), eyre::Report> {
    let id = world.current_message()?.id().to_string();
    let stored = run_async(world.store.get_message(&id)).wrap_err("reload message")?;
    eyre::ensure!(stored.is_deleted(), "expected message to be deleted");
    Ok(())
}

#[then("{count:usize} messages are found")]
fn messages_found(world: &MessageTaggingWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world
        .last_search
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing search result"))?;
    eyre::ensure!(
        found.len() == count,
        "expected {count} messages, found {}",
        found.len()
    );
    Ok(())
}
