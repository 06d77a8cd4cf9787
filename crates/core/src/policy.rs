//! Ownership policy.
//!
//! Reading and creating posts is open to any authenticated user; updating
//! and deleting a post is reserved for the user who created it.

use crate::error::CoreError;
use crate::types::DbId;

/// Anything with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> DbId;
}

/// Whether `actor_id` may update or delete `resource`.
pub fn can_modify<R: Owned + ?Sized>(actor_id: DbId, resource: &R) -> bool {
    resource.owner_id() == actor_id
}

/// [`can_modify`] as a `Result`, for use with `?` in handlers.
pub fn authorize_modify<R: Owned + ?Sized>(actor_id: DbId, resource: &R) -> Result<(), CoreError> {
    if can_modify(actor_id, resource) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "user {actor_id} does not own a resource owned by user {}",
            resource.owner_id()
        )))
    }
}
