use serde::Serialize;

use crate::logging::LogLevel;

const DEFAULT_NAVBAR_THRESHOLD_PX: u32 = 100;
const DEFAULT_SECTION_MARKER_PX: u32 = 100;
const DEFAULT_PARTICLE_INTERVAL_MS: u32 = 3_000;
const DEFAULT_PARTICLE_LIFETIME_MS: u32 = 7_000;
const DEFAULT_INTEREST_STAGGER_MS: u32 = 100;
const DEFAULT_TIMELINE_STAGGER_MS: u32 = 200;
const DEFAULT_HERO_INTRO_DELAY_MS: u32 = 500;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const NAVBAR_THRESHOLD_PX_BOUNDS: (u32, u32) = (0, 2_000);
const SECTION_MARKER_PX_BOUNDS: (u32, u32) = (0, 2_000);
const PARTICLE_INTERVAL_MS_BOUNDS: (u32, u32) = (250, 60_000);
const PARTICLE_LIFETIME_MS_BOUNDS: (u32, u32) = (1_000, 60_000);
const STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const HERO_INTRO_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractionConfig {
    pub navbar_threshold_px: u32,
    pub section_marker_px: u32,
    pub particle_interval_ms: u32,
    pub particle_lifetime_ms: u32,
    pub interest_stagger_ms: u32,
    pub timeline_stagger_ms: u32,
    pub hero_intro_delay_ms: u32,
    pub particles_enabled: bool,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            navbar_threshold_px: DEFAULT_NAVBAR_THRESHOLD_PX,
            section_marker_px: DEFAULT_SECTION_MARKER_PX,
            particle_interval_ms: DEFAULT_PARTICLE_INTERVAL_MS,
            particle_lifetime_ms: DEFAULT_PARTICLE_LIFETIME_MS,
            interest_stagger_ms: DEFAULT_INTEREST_STAGGER_MS,
            timeline_stagger_ms: DEFAULT_TIMELINE_STAGGER_MS,
            hero_intro_delay_ms: DEFAULT_HERO_INTRO_DELAY_MS,
            particles_enabled: true,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read_u32 = |name: &str, default: u32, bounds: (u32, u32)| {
            parse_u32_with_bounds(lookup(name).as_deref(), default, bounds)
        };

        Self {
            navbar_threshold_px: read_u32(
                "data-navbar-threshold-px",
                DEFAULT_NAVBAR_THRESHOLD_PX,
                NAVBAR_THRESHOLD_PX_BOUNDS,
            ),
            section_marker_px: read_u32(
                "data-section-marker-px",
                DEFAULT_SECTION_MARKER_PX,
                SECTION_MARKER_PX_BOUNDS,
            ),
            particle_interval_ms: read_u32(
                "data-particle-interval-ms",
                DEFAULT_PARTICLE_INTERVAL_MS,
                PARTICLE_INTERVAL_MS_BOUNDS,
            ),
            particle_lifetime_ms: read_u32(
                "data-particle-lifetime-ms",
                DEFAULT_PARTICLE_LIFETIME_MS,
                PARTICLE_LIFETIME_MS_BOUNDS,
            ),
            interest_stagger_ms: read_u32(
                "data-interest-stagger-ms",
                DEFAULT_INTEREST_STAGGER_MS,
                STAGGER_MS_BOUNDS,
            ),
            timeline_stagger_ms: read_u32(
                "data-timeline-stagger-ms",
                DEFAULT_TIMELINE_STAGGER_MS,
                STAGGER_MS_BOUNDS,
            ),
            hero_intro_delay_ms: read_u32(
                "data-hero-intro-delay-ms",
                DEFAULT_HERO_INTRO_DELAY_MS,
                HERO_INTRO_DELAY_MS_BOUNDS,
            ),
            particles_enabled: parse_flag(lookup("data-particles").as_deref(), true),
            log_level: parse_log_level(lookup("data-log-level").as_deref(), DEFAULT_LOG_LEVEL),
        }
    }

    pub fn navbar_threshold(&self) -> f64 {
        f64::from(self.navbar_threshold_px)
    }

    pub fn section_marker(&self) -> f64 {
        f64::from(self.section_marker_px)
    }
}

fn parse_non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
}

fn parse_u32_with_bounds(raw: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match parse_non_empty(raw).as_deref() {
        Some("on" | "true" | "1") => true,
        Some("off" | "false" | "0") => false,
        _ => default,
    }
}

fn parse_log_level(raw: Option<&str>, default: LogLevel) -> LogLevel {
    match parse_non_empty(raw).as_deref() {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        Some("warn") => LogLevel::Warn,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> InteractionConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        InteractionConfig::from_attributes(|name| attributes.get(name).cloned())
    }

    #[test]
    fn missing_attributes_fall_back_to_defaults() {
        assert_eq!(config_from(&[]), InteractionConfig::default());
    }

    #[test]
    fn in_bounds_attributes_override_defaults() {
        let config = config_from(&[
            ("data-particle-interval-ms", " 1500 "),
            ("data-navbar-threshold-px", "64"),
            ("data-timeline-stagger-ms", "0"),
        ]);

        assert_eq!(config.particle_interval_ms, 1_500);
        assert_eq!(config.navbar_threshold_px, 64);
        assert_eq!(config.timeline_stagger_ms, 0);
        assert_eq!(config.section_marker_px, DEFAULT_SECTION_MARKER_PX);
    }

    #[test]
    fn out_of_bounds_or_malformed_values_are_ignored() {
        let config = config_from(&[
            ("data-particle-interval-ms", "10"),
            ("data-particle-lifetime-ms", "seven"),
            ("data-hero-intro-delay-ms", "-5"),
        ]);

        assert_eq!(config.particle_interval_ms, DEFAULT_PARTICLE_INTERVAL_MS);
        assert_eq!(config.particle_lifetime_ms, DEFAULT_PARTICLE_LIFETIME_MS);
        assert_eq!(config.hero_intro_delay_ms, DEFAULT_HERO_INTRO_DELAY_MS);
    }

    #[test]
    fn particles_flag_accepts_common_spellings() {
        assert!(!config_from(&[("data-particles", "OFF")]).particles_enabled);
        assert!(!config_from(&[("data-particles", "0")]).particles_enabled);
        assert!(config_from(&[("data-particles", "true")]).particles_enabled);
        assert!(config_from(&[("data-particles", "maybe")]).particles_enabled);
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!(config_from(&[("data-log-level", "Debug")]).log_level, LogLevel::Debug);
        assert_eq!(config_from(&[("data-log-level", "warn")]).log_level, LogLevel::Warn);
        assert_eq!(config_from(&[("data-log-level", "trace")]).log_level, LogLevel::Info);
    }
}
