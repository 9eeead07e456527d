pub mod conf;
mod htmlify;

pub use htmlify::htmlify;
