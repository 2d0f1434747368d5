//! Fixed constants from spec §6.

/// Base container port assigned to the first server streamlet in
/// blueprint-declared order (spec §4.6 step 2, §8 S7).
pub const MINIMUM_ENDPOINT_CONTAINER_PORT: u16 = 3000;

/// Maximum length of a normalized application id (spec §4.1).
pub const MAX_APP_ID: usize = 63;

/// Maximum length of a derived secret name (spec §4.1).
pub const MAX_SECRET_NAME: usize = 253;

/// Maximum length of a volume mount name (spec §3, DNS-1123 label).
pub const MAX_VOLUME_MOUNT_NAME: usize = 63;

/// Schema version stamped on every emitted [`crate::build::ApplicationDescriptor`].
pub const DESCRIPTOR_VERSION: u32 = 1;
