//! Ownership checks shared by post and comment mutations.
//!
//! The helper only answers "is this actor the owner". What a failure means is
//! decided by the caller: comment flows answer `Forbidden`, post flows redirect
//! back to the post.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Comment, Post};

/// An entity with a single owning user.
pub trait Owned {
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    const ENTITY: &'static str = "Post";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for Comment {
    const ENTITY: &'static str = "Comment";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{entity} {id} is not owned by user {actor}")]
pub struct NotOwner {
    pub entity: &'static str,
    pub id: Uuid,
    pub actor: Uuid,
}

pub fn assert_owner<E: Owned>(entity: &E, actor: Uuid) -> Result<(), NotOwner> {
    if entity.owner_id() == actor {
        Ok(())
    } else {
        Err(NotOwner {
            entity: E::ENTITY,
            id: entity.id(),
            actor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_owner_passes() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "t".into(), "x".into(), Utc::now());
        let comment = Comment::new(post.id, author, "hi".into());

        assert!(assert_owner(&post, author).is_ok());
        assert!(assert_owner(&comment, author).is_ok());
    }

    #[test]
    fn test_stranger_is_rejected() {
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let comment = Comment::new(Uuid::new_v4(), author, "hi".into());

        let err = assert_owner(&comment, stranger).unwrap_err();
        assert_eq!(
            err,
            NotOwner {
                entity: "Comment",
                id: comment.id,
                actor: stranger,
            }
        );
    }
}
