mod ledger;
mod loader;
mod logging;
mod report;
mod types;
mod validator;

pub use ledger::LedgerConfig;
pub use loader::{load_from_path, load_from_str};
pub use logging::LoggingConfig;
pub use report::{ReportConfig, ReportFormat};
pub use types::Config;
pub use validator::validate;
