//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories fill in
//! unique defaults so tests only spell out the fields they care about.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let work = factory::create_work(&db, user.id).await?;
//!
//! let private = factory::work::WorkFactory::new(&db, user.id)
//!     .visibility("private")
//!     .build()
//!     .await?;
//! ```

pub mod asset;
pub mod comment;
pub mod favorite;
pub mod helpers;
pub mod refresh_token;
pub mod tag;
pub mod user;
pub mod work;

pub use asset::create_asset;
pub use comment::create_comment;
pub use favorite::create_favorite;
pub use refresh_token::create_refresh_token;
pub use tag::{create_tag, tag_work};
pub use user::create_user;
pub use work::create_work;
