//! Unit tests for the message module.
//!
//! Tests are organised by layer: domain values, the store service over the
//! in-memory adapter, the service against a mocked repository, and the client
//! view.

pub(crate) mod support;
