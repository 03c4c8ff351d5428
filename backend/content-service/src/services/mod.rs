/// Business logic layer for content-service
///
/// Services are cheap to build per request: each holds the shared repository
/// handle plus whatever else its operations need.
pub mod assets;
pub mod categories;
pub mod comments;
pub mod likes;
pub mod paging;
pub mod posts;
pub mod users;

pub use assets::AssetStore;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use likes::LikeService;
pub use paging::PageWindow;
pub use posts::{PostInput, PostService};
pub use users::{AccountInput, UserService};
