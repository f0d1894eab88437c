//! Stock module containing bulk intake, batch movements, and the session
//! orchestrator

pub mod core;
pub mod intake;
pub mod movement;

pub use self::core::*;
pub use self::intake::*;
pub use self::movement::*;
