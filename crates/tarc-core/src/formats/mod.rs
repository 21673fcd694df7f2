//! Archive name handling and codec streams.

pub mod bare;
pub mod codec;
pub mod compression;
pub mod detect;
