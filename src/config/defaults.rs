//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default Mapbox region bias (ISO 3166 alpha-2)
pub const DEFAULT_COUNTRY: &str = "ae";

/// Default per-call timeout for outbound requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default search radius in meters
pub const DEFAULT_RADIUS: f64 = 15_000.0;

/// Default maximum number of results
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default travel mode
pub const DEFAULT_MODE: &str = "driving";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "career-geo";
