pub mod config;
pub mod meet;
pub mod output;
pub mod scoring;
pub mod stderr_buffer;
