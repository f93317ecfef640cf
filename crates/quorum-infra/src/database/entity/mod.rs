//! SeaORM entities mirroring the domain model.

pub mod board;
pub mod post;
pub mod topic;
pub mod user;
