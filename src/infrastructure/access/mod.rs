//! Access control infrastructure

mod gate;

pub use gate::AccessGate;
