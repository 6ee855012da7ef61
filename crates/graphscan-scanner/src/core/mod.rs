/// Core scanning functionality
pub mod options;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod scanner;
pub mod work;

pub use options::ScannerOptions;
pub use scanner::ObjectScanner;
pub use work::{IdentitySet, WorkItem};
