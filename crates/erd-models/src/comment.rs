//! The `comment` entity.
//!
//! `post_id` is stored as a plain integer: unlike every other join column in
//! the registry it carries no foreign key constraint, so nothing at this layer
//! guarantees it points at an existing post.

use serde::{Deserialize, Serialize};

use erd_core::{
    record::Record,
    schema::{Entity, Field},
};

use crate::{post::Post, user::User};

/// A comment left by a user on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub comment_text: String,
    pub user_id: i64,
    pub post_id: i64,
}

impl Record for Comment {
    const ENTITY: &'static str = "comment";
}

pub(crate) fn entity() -> Entity {
    Entity::new(Comment::ENTITY)
        .with_field(Field::integer("id").primary_key())
        .with_field(Field::varchar("comment_text"))
        .with_field(Field::integer("user_id").references(User::ENTITY, "id"))
        .with_field(Field::integer("post_id"))
}

impl Comment {
    /// The user who wrote this comment, if present in `users`.
    pub fn author<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        users.iter().find(|user| user.id == self.user_id)
    }

    /// The post this comment refers to. `None` when `post_id` dangles.
    pub fn post<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        posts.iter().find(|post| post.id == self.post_id)
    }
}
