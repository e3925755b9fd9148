pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod router;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::{ResolverConfig, StaticRcode};
pub use root::{CliOverrides, Config};
pub use router::{RouteConfig, RouterConfig};
