//! SeaORM entities for the `user` and `post` tables.

pub mod post;
pub mod user;
