use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `BIDTRACK_QUIET=1` (or `true`) silences banners and status lines
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("BIDTRACK_QUIET")
            .map(|v| quiet_value(&v))
            .unwrap_or(false)
    })
}

fn quiet_value(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_values() {
        assert!(quiet_value("1"));
        assert!(quiet_value("TRUE"));
        assert!(!quiet_value("0"));
        assert!(!quiet_value(""));
    }
}
