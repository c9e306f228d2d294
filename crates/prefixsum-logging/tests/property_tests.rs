//! Property tests for prefixsum-logging

use prefixsum_logging::{LogLevel, LoggingConfig};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = LogLevel> {
    proptest::sample::select(LogLevel::ALL.to_vec())
}

proptest! {
    /// Display output parses back to the same level
    #[test]
    fn prop_level_display_round_trip(level in level()) {
        prop_assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
    }

    /// Parsing ignores case and surrounding whitespace
    #[test]
    fn prop_level_parse_case_insensitive(level in level(), upper in any::<bool>(), pad in 0usize..3) {
        let name = if upper { level.as_str().to_uppercase() } else { level.as_str().to_string() };
        let padded = format!("{}{name}{}", " ".repeat(pad), " ".repeat(pad));
        prop_assert_eq!(padded.parse::<LogLevel>().unwrap(), level);
    }

    /// A component without an override uses the global level
    #[test]
    fn prop_effective_level_falls_back(global in level(), replay in level(), other in "[a-z]{1,8}") {
        prop_assume!(other != "replay");
        let config = LoggingConfig::new()
            .with_level(global)
            .with_component_level("replay", replay);
        prop_assert_eq!(config.effective_level(Some("replay")), replay);
        prop_assert_eq!(config.effective_level(Some(&other)), global);
    }
}
