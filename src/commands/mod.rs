pub mod common;
pub mod configuration;
pub mod history;
pub mod refine;
pub mod statistics;
pub mod strip;

pub use configuration::handle_config;
pub use history::handle_history;
pub use refine::handle_refine;
pub use statistics::handle_stats;
pub use strip::handle_strip;
