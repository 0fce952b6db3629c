//! The `media` entity.

use serde::{Deserialize, Serialize};

use erd_core::{
    record::Record,
    schema::{Entity, Field},
};

use crate::post::Post;

/// A media attachment of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub post_id: i64,
}

impl Record for Media {
    const ENTITY: &'static str = "media";
}

pub(crate) fn entity() -> Entity {
    Entity::new(Media::ENTITY)
        .with_field(Field::integer("id").primary_key())
        .with_field(Field::varchar("type"))
        .with_field(Field::varchar("url"))
        .with_field(Field::integer("post_id").references(Post::ENTITY, "id"))
}

impl Media {
    /// The post this item is attached to, if present in `posts`.
    pub fn post<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        posts.iter().find(|post| post.id == self.post_id)
    }
}
