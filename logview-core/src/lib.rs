pub mod cli;
pub mod conf;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod response;
pub mod server;
pub mod source;
