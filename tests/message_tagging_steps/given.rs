//! Given steps for message tagging BDD scenarios.

use super::world::{MessageTaggingWorld, run_async, split_tags};
use colloquy::message::{
    domain::UserId,
    services::{CreateMessageRequest, TagMessageRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a message "{text}" in the conversation"#)]
fn message_in_conversation(
    world: &mut MessageTaggingWorld,
    text: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.store.create(
        CreateMessageRequest::new(world.conversation_id, text),
        UserId::new(),
    ))
    .wrap_err("create message for scenario")?;
    world.last_message = Some(created);
    Ok(())
}

#[given(r#"a message tagged "{tags}""#)]
fn message_tagged(world: &mut MessageTaggingWorld, tags: String) -> Result<(), eyre::Report> {
    let created = run_async(world.store.create(
        CreateMessageRequest::new(world.conversation_id, format!("tagged {tags}")),
        UserId::new(),
    ))
    .wrap_err("create message for scenario")?;
    let tagged = run_async(world.store.add_tags_to_message(TagMessageRequest::new(
        created.id(),
        world.conversation_id,
        split_tags(&tags),
    )))
    .wrap_err("tag message for scenario")?;
    world.last_message = Some(tagged);
    Ok(())
}
