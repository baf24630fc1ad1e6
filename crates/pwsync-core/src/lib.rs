pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod manifest;
pub mod storage;
pub mod sync;
pub mod transport;
