// Core algorithm exports
pub mod extract;
pub mod filters;
pub mod matcher;

pub use extract::{PayloadExtractor, ExtractError, DEFAULT_MARKER};
pub use filters::{name_matches, location_matches};
pub use matcher::Matcher;
