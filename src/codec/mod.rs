// Codec module - Scalar values with a wire text form
pub mod address;
pub mod timestamp;

pub use address::{Address, AddressList};
pub use timestamp::Timestamp;
