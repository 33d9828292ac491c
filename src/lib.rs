pub mod config;
pub mod enum_set;
pub mod location;
pub mod paths;
pub mod report;
pub mod resolve;

pub use config::{Config, Constants};
pub use location::{FileIndex, LocationRegistry, SourceLocation};
pub use report::{Directive, Report, ReportHook, ReportKind};
pub use resolve::ModuleResolver;
