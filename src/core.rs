pub mod definitions;
pub mod engine;
pub mod game;
pub mod notation;
pub mod utils;
