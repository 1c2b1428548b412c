mod comment;
mod reply;
mod thread;
mod user;

pub use comment::*;
pub use reply::*;
pub use thread::*;
pub use user::*;
