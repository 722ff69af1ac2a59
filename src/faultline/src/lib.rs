pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod daemon;
pub mod integration;
pub mod logging;
pub mod report;

#[cfg(test)]
pub(crate) mod test_utils;
