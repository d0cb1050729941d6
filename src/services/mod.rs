pub mod providers;
pub mod recommendations;

pub use recommendations::{Recommender, DEFAULT_RECOMMENDATION_COUNT};
