pub mod backend;
pub mod config;
pub mod error;
pub mod lookup;


pub use backend::{LookupBackend, SearchResponse, WbSearchClient};
pub use config::Config;
pub use error::SuggestError;
pub use lookup::{LookupCoordinator, LookupOutcome, LookupSettings};
