//! Gridfall server binary.
//!
//! Boots logging, parses runtime configuration, and hands off to the
//! serving layer. Scores flush on clean shutdown.

use clap::Parser;

#[tokio::main]
async fn main() {
    gfl_core::log();
    let config = gfl_server::Config::parse();
    gfl_server::run(config).await.unwrap();
}
