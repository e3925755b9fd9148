//! Ferrous Route Application Layer
pub mod ports;
pub mod services;
