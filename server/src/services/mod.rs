//! Services that sit between HTTP handlers and the core crates.

pub mod notifier;
pub mod qr;
