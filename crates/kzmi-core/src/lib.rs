pub mod config;
pub mod logging;

pub mod mapper;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod retry;
pub mod sink;
pub mod source;
