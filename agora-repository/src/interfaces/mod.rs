//! This module defines and re-exports the interfaces for the agora
//! repositories. It serves as a central point for accessing traits related
//! to data interaction.
mod comments;
mod posts;
mod sessions;
mod subs;
mod trending;
mod users;
mod votes;

pub use comments::CommentRepository;
pub use posts::PostRepository;
pub use sessions::SessionRepository;
pub use subs::SubRepository;
pub use trending::TrendingRepository;
pub use users::UserRepository;
pub use votes::VoteRepository;
