// Domain layer: models and ports. No HTTP or filesystem access here.

pub mod model;
pub mod ports;
