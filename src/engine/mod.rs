pub mod analysis;
pub mod bounds;
pub mod domain;
pub mod error;
pub mod expected_move;
pub mod payoff;
pub mod resolver;
pub mod stats;
pub mod types;
pub mod validate;
