//! System-level modules
//!
//! - Logging initialisation
//! - Launching the platform browser for resolved links

pub mod browser;
pub mod logging;

pub use browser::BrowserOpener;
pub use logging::init_logging;
