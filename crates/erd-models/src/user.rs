//! The `user` entity.

use serde::{Deserialize, Serialize};

use erd_core::{
    record::Record,
    schema::{Entity, Field},
};

use crate::{comment::Comment, follower::Follower, post::Post};

/// A registered account.
///
/// `email` is unique and `username` is indexed; both are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub address1: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl Record for User {
    const ENTITY: &'static str = "user";
}

pub(crate) fn entity() -> Entity {
    Entity::new(User::ENTITY)
        .with_field(Field::integer("id").primary_key())
        .with_field(Field::varchar("username").indexed())
        .with_field(Field::varchar("address1"))
        .with_field(Field::varchar("firstname"))
        .with_field(Field::varchar("lastname"))
        .with_field(Field::varchar("email").unique())
}

impl User {
    /// Posts owned by this user.
    pub fn posts<'a>(&self, posts: &'a [Post]) -> impl Iterator<Item = &'a Post> {
        let id = self.id;
        posts.iter().filter(move |post| post.user_id == id)
    }

    /// Comments written by this user.
    pub fn comments<'a>(&self, comments: &'a [Comment]) -> impl Iterator<Item = &'a Comment> {
        let id = self.id;
        comments.iter().filter(move |comment| comment.user_id == id)
    }

    /// Follow edges where this user is the follower.
    pub fn following<'a>(&self, edges: &'a [Follower]) -> impl Iterator<Item = &'a Follower> {
        let id = self.id;
        edges.iter().filter(move |edge| edge.user_from_id == id)
    }

    /// Follow edges where this user is the one being followed.
    pub fn followers<'a>(&self, edges: &'a [Follower]) -> impl Iterator<Item = &'a Follower> {
        let id = self.id;
        edges.iter().filter(move |edge| edge.user_to_id == id)
    }

    /// Users this user follows, resolved through the follow edges.
    pub fn followed_users<'a>(
        &self,
        edges: &'a [Follower],
        users: &'a [User],
    ) -> impl Iterator<Item = &'a User> {
        self.following(edges)
            .filter_map(move |edge| edge.user_to(users))
    }

    /// Users following this user, resolved through the follow edges.
    pub fn follower_users<'a>(
        &self,
        edges: &'a [Follower],
        users: &'a [User],
    ) -> impl Iterator<Item = &'a User> {
        self.followers(edges)
            .filter_map(move |edge| edge.user_from(users))
    }
}
