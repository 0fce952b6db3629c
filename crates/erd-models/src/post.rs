//! The `post` entity.

use serde::{Deserialize, Serialize};

use erd_core::{
    record::Record,
    schema::{Entity, Field},
};

use crate::{comment::Comment, media::Media, user::User};

/// A post published by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
}

impl Record for Post {
    const ENTITY: &'static str = "post";
}

pub(crate) fn entity() -> Entity {
    Entity::new(Post::ENTITY)
        .with_field(Field::integer("id").primary_key())
        .with_field(Field::integer("user_id").references(User::ENTITY, "id"))
}

impl Post {
    /// The user owning this post, if present in `users`.
    pub fn author<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        users.iter().find(|user| user.id == self.user_id)
    }

    /// Comments attached to this post.
    pub fn comments<'a>(&self, comments: &'a [Comment]) -> impl Iterator<Item = &'a Comment> {
        let id = self.id;
        comments.iter().filter(move |comment| comment.post_id == id)
    }

    /// Media attached to this post.
    pub fn media<'a>(&self, media: &'a [Media]) -> impl Iterator<Item = &'a Media> {
        let id = self.id;
        media.iter().filter(move |item| item.post_id == id)
    }
}
