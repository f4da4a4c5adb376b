mod production;
mod traits;

#[cfg(any(test, feature = "dev"))]
pub mod dev;

pub use production::ProductionParams;
pub use traits::DlnParams;
