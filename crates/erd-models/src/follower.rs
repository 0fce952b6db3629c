//! The `follower` join entity.

use serde::{Deserialize, Serialize};

use erd_core::{
    record::Record,
    schema::{Entity, Field},
};

use crate::user::User;

/// A directed follow edge from `user_from_ID` (the follower) to
/// `user_to_ID` (the followee).
///
/// The pair forms a composite primary key. A user following themselves is
/// a valid row at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follower {
    #[serde(rename = "user_from_ID")]
    pub user_from_id: i64,
    #[serde(rename = "user_to_ID")]
    pub user_to_id: i64,
}

impl Record for Follower {
    const ENTITY: &'static str = "follower";
}

pub(crate) fn entity() -> Entity {
    Entity::new(Follower::ENTITY)
        .with_field(
            Field::integer("user_from_ID")
                .primary_key()
                .references(User::ENTITY, "id"),
        )
        .with_field(
            Field::integer("user_to_ID")
                .primary_key()
                .references(User::ENTITY, "id"),
        )
}

impl Follower {
    /// Edge in which `user_from_id` follows `user_to_id`.
    pub fn new(user_from_id: i64, user_to_id: i64) -> Self {
        Self {
            user_from_id,
            user_to_id,
        }
    }

    /// The composite key of this edge.
    pub fn key(&self) -> (i64, i64) {
        (self.user_from_id, self.user_to_id)
    }

    /// Whether a user follows themselves.
    pub fn is_self_follow(&self) -> bool {
        self.user_from_id == self.user_to_id
    }

    /// The following user.
    pub fn user_from<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        users.iter().find(|user| user.id == self.user_from_id)
    }

    /// The followed user.
    pub fn user_to<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        users.iter().find(|user| user.id == self.user_to_id)
    }
}
