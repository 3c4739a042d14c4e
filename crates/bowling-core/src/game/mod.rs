pub mod generator;

pub use generator::{GameGenerator, arrange};
