pub mod criteria;
pub mod domain;
pub mod error;
pub mod repository;

pub use criteria::*;
pub use domain::*;
pub use error::*;
pub use repository::PostRepository;
