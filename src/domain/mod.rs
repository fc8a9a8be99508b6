// Domain layer: merge models and ports (interfaces).

pub mod model;
pub mod ports;
