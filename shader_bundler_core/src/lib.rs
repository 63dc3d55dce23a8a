pub mod bundle;
pub mod config;
pub mod emit;
pub mod logger;
pub mod prelude;
pub mod stage;
