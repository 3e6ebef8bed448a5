/// Maximum number of zone files loaded from one directory
pub const MAX_FILES_PER_IMPORT: usize = 500;
/// Maximum size of a single zone file in bytes
pub const MAX_FILE_BYTES: usize = 4 * 1024 * 1024;       // 4 MB per YAML
/// Maximum total size of all zone files in bytes
pub const MAX_TOTAL_BYTES: usize = 64 * 1024 * 1024;     // 64 MB per import
/// Whether symlinked zone files are followed
pub const ALLOW_SYMLINKS: bool = false;
