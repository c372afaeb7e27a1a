pub mod app;
pub mod config;
pub mod domains;
pub mod extractors;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use utils::error::AppError;
