//! The social network data model.
//!
//! Five record types, [`User`], [`Post`], [`Comment`], [`Media`] and
//! [`Follower`], and the schema registry describing them. Each record module
//! declares its entity next to the struct; [`schema`] assembles those
//! declarations and the relationships between them.
//!
//! The registry is meant to be built once at startup and passed by reference
//! to its consumers:
//!
//! ```
//! use erd_core::schema::Cardinality;
//!
//! let schema = erd_models::schema().expect("built-in schema is valid");
//!
//! let user = schema.entity("user").unwrap();
//! assert!(user.field("email").unwrap().is_unique());
//!
//! let follows = schema
//!     .relationships()
//!     .find(|rel| rel.cardinality() == Cardinality::ManyToMany)
//!     .unwrap();
//! assert_eq!(follows.name(), "followed_users");
//! ```

mod comment;
mod follower;
mod media;
mod post;
mod user;

pub use comment::Comment;
pub use follower::Follower;
pub use media::Media;
pub use post::Post;
pub use user::User;

use erd_core::{
    record::Record,
    schema::{Relationship, Schema, SchemaError},
};

/// Builds the schema registry of the social data model.
///
/// `comment.post_id` is joined to `post` without a foreign key constraint;
/// the registry keeps that relationship and reports it through
/// [`Schema::unenforced_relationships`].
///
/// # Errors
///
/// Returns a [`SchemaError`] if the declarations are inconsistent.
pub fn schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .entity(user::entity())
        .entity(post::entity())
        .entity(comment::entity())
        .entity(media::entity())
        .entity(follower::entity())
        .relationship(
            Relationship::one_to_many(User::ENTITY, Post::ENTITY, "user_id").named("posts", "user"),
        )
        .relationship(
            Relationship::one_to_many(User::ENTITY, Comment::ENTITY, "user_id")
                .named("comments", "user"),
        )
        .relationship(
            Relationship::one_to_many(Post::ENTITY, Comment::ENTITY, "post_id")
                .named("comments", "post"),
        )
        .relationship(
            Relationship::one_to_many(Post::ENTITY, Media::ENTITY, "post_id")
                .named("media", "post"),
        )
        .relationship(
            Relationship::one_to_many(User::ENTITY, Follower::ENTITY, "user_from_ID")
                .named("following", "user_from"),
        )
        .relationship(
            Relationship::one_to_many(User::ENTITY, Follower::ENTITY, "user_to_ID")
                .named("followers", "user_to"),
        )
        .relationship(
            Relationship::many_to_many(
                User::ENTITY,
                User::ENTITY,
                Follower::ENTITY,
                "user_from_ID",
                "user_to_ID",
            )
            .named("followed_users", "follower_users"),
        )
        .build()
}
