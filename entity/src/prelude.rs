pub use super::asset::Entity as Asset;
pub use super::comment::Entity as Comment;
pub use super::favorite::Entity as Favorite;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::tag::Entity as Tag;
pub use super::user::Entity as User;
pub use super::work::Entity as Work;
pub use super::work_tag::Entity as WorkTag;
