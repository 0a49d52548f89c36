//! Microgrid component models.

/// Battery energy storage model.
pub mod battery;
/// Dispatchable generator model.
pub mod generator;
pub mod microgrid;
/// Solar photovoltaic plant model.
pub mod photovoltaic;
/// Wind power model.
pub mod wind;

// Re-export the main types for convenience
pub use battery::Battery;
pub use generator::DispatchableGenerator;
pub use microgrid::Microgrid;
pub use microgrid::Project;
pub use photovoltaic::Photovoltaic;
pub use wind::WindPower;
