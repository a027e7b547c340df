//! System-wide constants and defaults.

/// Separator between namespace segments in a service identifier.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Marker attached to types the container is responsible for.
pub const SERVICE_MARKER: &str = "service";

/// Extension of service declaration files recognised by discovery.
pub const DEFAULT_SOURCE_EXTENSION: &str = "svc";

/// Default source root scanned by discovery.
pub const DEFAULT_SOURCE_ROOT: &str = "services";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "wirebox.yaml";
