// Domain layer: page routing models and the ports the core talks through.

pub mod model;
pub mod ports;
