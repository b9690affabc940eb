//! # Inkpost Shared
//!
//! Request payloads shared between the server and anything that talks to it
//! (tests, scripted clients).

pub mod dto;

pub use dto::{CredentialsForm, PostForm};
