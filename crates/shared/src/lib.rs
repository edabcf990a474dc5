pub mod domain;
pub mod error;
pub mod messages;
pub mod presentation;
pub mod protocol;
