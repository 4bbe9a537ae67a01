pub mod tmdb;
pub mod traits;

pub use tmdb::TmdbProvider;
pub use traits::{LookupError, MetadataProvider};
