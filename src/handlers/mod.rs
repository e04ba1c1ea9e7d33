pub mod collections;
pub mod contact;
pub mod health;

pub use collections::{get_blog, list_blogs, list_experience, list_projects};
pub use contact::submit_contact;
pub use health::{health_check, root};
