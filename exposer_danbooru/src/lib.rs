mod error;
mod mapper;
mod repository;

pub use mapper::{map_artist, map_post, map_tag};
pub use repository::*;
