pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod user;
pub(crate) mod variant;
