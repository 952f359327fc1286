// Payment protocol types (x402 facilitator registry)

pub mod x402;

pub use x402::*;
