pub mod config;
pub mod logger;
pub mod scanner;
pub mod server;
pub mod util;
