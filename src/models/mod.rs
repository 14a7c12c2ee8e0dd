pub mod issue;
pub mod repository;

pub use issue::*;
pub use repository::Repository;
