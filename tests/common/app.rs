use axum::Router;

use study_planner::config::{Config, PlannerConfig};
use study_planner::routes::build_router;
use study_planner::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

// 直接构造 Config，避免 set_var 在并行测试中产生竞态
pub fn test_config(max_sessions: usize) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        planner: PlannerConfig::default(),
        max_sessions,
        session_idle_ttl_secs: 3600,
        session_sweep_interval_secs: 60,
    }
}

pub fn spawn_with_config(config: Config) -> TestApp {
    let state = AppState::new(&config);
    let app = build_router(state.clone());

    TestApp { app, state, config }
}

pub fn spawn_test_app() -> TestApp {
    spawn_with_config(test_config(100))
}
