//! Common utilities

/// Number of leading bytes inspected when sniffing for binary content
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Heuristic binary check: a NUL byte near the start
pub fn looks_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}
