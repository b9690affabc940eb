//! Domain entities - the core business objects.

mod user;

mod post;

pub use post::{NewPost, Post, PostWithAuthor};
pub use user::{NewUser, User};
