//! Repository structs providing async CRUD operations.
//!
//! Each repository is a zero-sized struct with `async fn` methods
//! that accept a `&PgPool` and return `Result<_, sqlx::Error>`.

pub mod access_token_repo;
pub mod category_repo;
pub mod post_repo;
pub mod user_repo;

pub use access_token_repo::AccessTokenRepo;
pub use category_repo::CategoryRepo;
pub use post_repo::PostRepo;
pub use user_repo::UserRepo;
