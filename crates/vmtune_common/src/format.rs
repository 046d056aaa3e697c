//! Human-readable sizes and percentages
//!
//! Both helpers truncate. 1.9 MB prints as "1 MB", 99.9% prints as "99".

/// Format a kB magnitude as whole GB, MB or KB (1024-based)
pub fn format_kb(kb: u64) -> String {
    let mb = kb / 1024;
    let gb = mb / 1024;

    if gb >= 1 {
        format!("{} GB", gb)
    } else if mb >= 1 {
        format!("{} MB", mb)
    } else {
        format!("{} KB", kb)
    }
}

/// Whole-number percentage of `part` in `whole`, 0 for an empty whole
pub fn percent(part: u64, whole: u64) -> u32 {
    truncate_percent(if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    })
}

pub fn truncate_percent(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kb_units() {
        assert_eq!(format_kb(0), "0 KB");
        assert_eq!(format_kb(1023), "1023 KB");
        assert_eq!(format_kb(1024), "1 MB");
        assert_eq!(format_kb(1024 * 1024), "1 GB");
        assert_eq!(format_kb(16384000), "15 GB");
    }

    #[test]
    fn test_format_kb_truncates() {
        assert_eq!(format_kb(1536), "1 MB");
        // 1.9 MB
        assert_eq!(format_kb(1946), "1 MB");
        assert_eq!(format_kb(1024 * 1024 - 1), "1023 MB");
        assert_eq!(format_kb(2 * 1024 * 1024 - 1), "1 GB");
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(percent(999, 1000), 99);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(1000, 1000), 100);
        assert_eq!(percent(5, 0), 0);
    }
}
