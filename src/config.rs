use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DAILY_SUBJECTS, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TTL_SECS,
    DEFAULT_SESSION_SWEEP_INTERVAL_SECS, MAX_DAILY_SUBJECTS, MAX_HORIZON_DAYS, MAX_PICK_ATTEMPTS,
    MAX_SUBJECTS_PER_SESSION,
};
use crate::planner::{MoveCapacityPolicy, SessionSettings};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub cors_origin: String,
    pub planner: PlannerConfig,
    pub max_sessions: usize,
    pub session_idle_ttl_secs: u64,
    pub session_sweep_interval_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub default_daily_subjects: u32,
    pub max_daily_subjects: u32,
    pub max_horizon_days: u32,
    pub max_pick_attempts: u32,
    pub max_subjects_per_session: usize,
    pub enforce_capacity_on_move: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_daily_subjects: DEFAULT_DAILY_SUBJECTS,
            max_daily_subjects: MAX_DAILY_SUBJECTS,
            max_horizon_days: MAX_HORIZON_DAYS,
            max_pick_attempts: MAX_PICK_ATTEMPTS,
            max_subjects_per_session: MAX_SUBJECTS_PER_SESSION,
            enforce_capacity_on_move: false,
        }
    }
}

impl PlannerConfig {
    /// Session defaults; a session may still override the move policy on creation.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            max_pick_attempts: self.max_pick_attempts,
            max_subjects: self.max_subjects_per_session,
            move_policy: if self.enforce_capacity_on_move {
                MoveCapacityPolicy::Enforce
            } else {
                MoveCapacityPolicy::Unbounded
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            planner: PlannerConfig {
                default_daily_subjects: env_or_parse(
                    "PLANNER_DEFAULT_DAILY_SUBJECTS",
                    DEFAULT_DAILY_SUBJECTS,
                ),
                max_daily_subjects: env_or_parse("PLANNER_MAX_DAILY_SUBJECTS", MAX_DAILY_SUBJECTS),
                max_horizon_days: env_or_parse("PLANNER_MAX_HORIZON_DAYS", MAX_HORIZON_DAYS),
                max_pick_attempts: env_or_parse("PLANNER_MAX_PICK_ATTEMPTS", MAX_PICK_ATTEMPTS),
                max_subjects_per_session: env_or_parse(
                    "PLANNER_MAX_SUBJECTS_PER_SESSION",
                    MAX_SUBJECTS_PER_SESSION,
                ),
                enforce_capacity_on_move: env_or_bool("PLANNER_ENFORCE_CAPACITY_ON_MOVE", false),
            },
            max_sessions: env_or_parse("MAX_SESSIONS", DEFAULT_MAX_SESSIONS),
            session_idle_ttl_secs: env_or_parse(
                "SESSION_IDLE_TTL_SECS",
                DEFAULT_SESSION_IDLE_TTL_SECS,
            ),
            session_sweep_interval_secs: env_or_parse(
                "SESSION_SWEEP_INTERVAL_SECS",
                DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
            ),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "HOST",
            "PORT",
            "RUST_LOG",
            "PLANNER_DEFAULT_DAILY_SUBJECTS",
            "PLANNER_MAX_PICK_ATTEMPTS",
            "PLANNER_ENFORCE_CAPACITY_ON_MOVE",
            "PLANNER_MAX_SUBJECTS_PER_SESSION",
            "MAX_SESSIONS",
            "SESSION_IDLE_TTL_SECS",
            "SESSION_SWEEP_INTERVAL_SECS",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.planner.default_daily_subjects, 3);
        assert_eq!(cfg.planner.max_pick_attempts, 10);
        assert_eq!(cfg.max_sessions, 10_000);
        assert_eq!(cfg.session_idle_ttl_secs, 6 * 60 * 60);
        assert_eq!(cfg.planner.max_subjects_per_session, 50);
        assert_eq!(
            cfg.planner.session_settings().move_policy,
            MoveCapacityPolicy::Unbounded
        );
    }

    #[test]
    fn parses_numeric_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "4000");
        env::set_var("PLANNER_DEFAULT_DAILY_SUBJECTS", "5");
        env::set_var("MAX_SESSIONS", "12");
        env::set_var("SESSION_IDLE_TTL_SECS", "90");
        env::set_var("PLANNER_MAX_SUBJECTS_PER_SESSION", "8");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.planner.default_daily_subjects, 5);
        assert_eq!(cfg.max_sessions, 12);
        assert_eq!(cfg.session_idle_ttl_secs, 90);
        assert_eq!(cfg.planner.session_settings().max_subjects, 8);
        clear_keys(managed_keys());
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "bad");
        env::set_var("PLANNER_MAX_PICK_ATTEMPTS", "-3");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.planner.max_pick_attempts, 10);
        clear_keys(managed_keys());
    }

    #[test]
    fn capacity_enforcement_flag() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PLANNER_ENFORCE_CAPACITY_ON_MOVE", "yes");

        let cfg = Config::from_env();
        assert!(cfg.planner.enforce_capacity_on_move);
        assert_eq!(
            cfg.planner.session_settings().move_policy,
            MoveCapacityPolicy::Enforce
        );
        clear_keys(managed_keys());
    }
}
