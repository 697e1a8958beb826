//! Volatile repositories. State lives only as long as the repository value;
//! dropping it discards every record and nothing survives a restart.

pub(crate) mod post_repository;
mod seed;
pub(crate) mod user_repository;
