/// Number of id characters shown when ids are truncated.
pub const SHORT_ID_LEN: usize = 12;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with decimal (1000-based) units and one fractional digit.
///
/// Anything past terabytes stays expressed in TB.
pub fn human_size(raw: u64) -> String {
    let mut value = raw as f64;
    let mut unit = 0;

    while value >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    format!("{:.1} {}", value, SIZE_UNITS[unit])
}

/// Returns the first [`SHORT_ID_LEN`] characters of an id.
///
/// Ids shorter than that come back unchanged.
pub fn truncate_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
