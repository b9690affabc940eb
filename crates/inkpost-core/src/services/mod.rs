//! Application services - the auth and blog workflows, written against ports only.

pub mod auth;
pub mod blog;

#[cfg(test)]
mod fakes;
