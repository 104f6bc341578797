pub mod aggregator;
pub mod backend;
pub mod errors;
pub mod factory;
pub mod local;
pub mod source_state;
pub mod sources;

pub use aggregator::SearchResults;
pub use factory::AppFactory;
