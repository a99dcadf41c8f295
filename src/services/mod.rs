// Service exports
pub mod lookup;
pub mod obituary;

pub use lookup::IdentityMatcher;
pub use obituary::{ObituaryClient, SearchError};
