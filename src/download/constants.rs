//! Constants for the download module (timeouts, buffering).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default per-read idle timeout (5 minutes). Applies between body chunks,
/// not to the whole transfer, so long recordings are not cut off.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Write buffer size for streaming response bodies to disk (256 KiB).
pub const WRITE_BUFFER_BYTES: usize = 256 * 1024;
