//! ume-quote - cotizador de cobros con tarjeta
//!
//! Runs the payment form of a treatment record from the command line and
//! prints the subtotal, commission, IVA and total it would show.
//!
//! ```text
//! ume-quote/src/
//! ├── cli.rs      # flags, quote building, rendering
//! ├── config.rs   # environment configuration
//! └── logger.rs   # tracing subscriber
//! ```

pub mod cli;
pub mod config;
pub mod logger;

pub use cli::{Cli, Quote, build_form, quote, render_lines, run};
pub use config::Config;
pub use logger::init_logger_with_file;

/// Read `.env`, load configuration and start logging
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
