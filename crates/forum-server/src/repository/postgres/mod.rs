//! PostgreSQL-backed repositories. Every method is a single statement.

mod comments;
mod replies;
mod threads;

pub use comments::PgCommentRepository;
pub use replies::PgReplyRepository;
pub use threads::PgThreadRepository;
