pub mod ai_format;
pub mod build;
pub mod calculate;
pub mod evaluate;
pub mod preview;
pub mod response_types;
pub mod strategies;
