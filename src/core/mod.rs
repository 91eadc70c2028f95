// Core algorithm exports
pub mod assembler;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod ranking;

pub use assembler::ResultAssembler;
pub use distance::{distance_between, haversine_distance, round_distance};
pub use filters::{provider_covers_request, provider_matches_search};
pub use matcher::Matcher;
pub use ranking::rank_by_distance;
