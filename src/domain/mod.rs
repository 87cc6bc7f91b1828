// Domain layer: value types, ports, and the pure numerology services.
// Nothing here performs I/O.

pub mod model;
pub mod ports;

pub mod services;
