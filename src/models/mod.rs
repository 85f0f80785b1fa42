//! Domain model types for TSP instances.

mod city;

pub use city::City;
