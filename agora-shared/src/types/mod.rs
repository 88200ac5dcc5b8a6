mod comment;
mod post;
mod sub;
mod user;
mod vote;
mod vote_counts;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, UpdatePost};
pub use sub::{NewSub, Sub};
pub use user::User;
pub use vote::{CountDelta, LedgerWrite, TargetKind, TargetRef, VoteChange, VoteValue};
pub use vote_counts::VoteCounts;
