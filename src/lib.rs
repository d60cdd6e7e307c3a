pub mod config;
pub mod constants;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod planner;
pub mod response;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod validation;
pub mod workers;
