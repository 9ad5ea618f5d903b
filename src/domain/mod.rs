// Domain layer: request/response models, normalized records and the ports the core depends on.

pub mod model;
pub mod ports;
