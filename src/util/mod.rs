pub mod human;
pub mod latest;
pub mod logging;
pub mod ring_buffer;
