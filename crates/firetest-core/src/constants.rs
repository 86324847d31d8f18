/// Route component constants shared across crates
pub const V1_ROUTE_COMPONENT: &str = "v1";
pub const V1_ROUTE_PREFIX: &str = const_str::concat!("/", V1_ROUTE_COMPONENT);

pub const EMULATOR_ROUTE_COMPONENT: &str = "emulator/v1";
pub const EMULATOR_ROUTE_PREFIX: &str = const_str::concat!("/", EMULATOR_ROUTE_COMPONENT);

pub const PROJECTS_ROUTE_COMPONENT: &str = "projects";

/// Path suffix addressing the default database's document root, relative to
/// a project resource name.
pub const DEFAULT_DATABASE_DOCUMENTS_COMPONENT: &str = "databases/(default)/documents";

/// Bearer token the emulator treats as the privileged bypass identity.
pub const OWNER_BEARER_TOKEN: &str = "owner";
