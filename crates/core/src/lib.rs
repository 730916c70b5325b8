//! Supply generation engine. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod nemesis;
pub mod patterns;
pub mod request;
pub mod rng;
pub mod slot;
pub mod store;
pub mod substitution;
pub mod supply;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use nemesis::*;
pub use patterns::*;
pub use request::*;
pub use rng::*;
pub use slot::*;
pub use store::*;
pub use substitution::*;
pub use supply::*;
