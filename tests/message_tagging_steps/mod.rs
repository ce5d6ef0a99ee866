//! Step definitions for message tagging behaviour tests.

pub mod given;
pub mod then;
pub mod world;
