pub mod adapter;
pub mod applier;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod hud;
pub mod range;
pub mod scale;

pub use adapter::*;
pub use applier::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use form::*;
pub use hud::*;
pub use range::*;
pub use scale::*;
