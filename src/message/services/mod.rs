//! Application services for message storage and tagging.

mod store;

pub use store::{
    CreateMessageRequest, MessageStore, MessageStoreError, MessageStoreResult, TagMessageRequest,
};
