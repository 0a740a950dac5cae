//! Configuration module for the cashier console.

use std::env;

use dotenvy::dotenv;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct CashierConfig {
    pub service_name: String,
    pub log_level: String,
    pub api: HospitalApiConfig,
    pub roster_window: RosterWindowConfig,
}

#[derive(Debug, Clone)]
pub struct HospitalApiConfig {
    /// Base host for all collaborator calls. Fixed for the life of the
    /// process.
    pub base_url: String,
}

/// The `{start}/{stop}` window segments of the roster endpoint path.
#[derive(Debug, Clone)]
pub struct RosterWindowConfig {
    pub start: u32,
    pub stop: u32,
}

impl CashierConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        Ok(Self {
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "cashier-console".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api: HospitalApiConfig {
                base_url: env::var("HOSPITAL_API_BASE_URL")
                    .unwrap_or_else(|_| "https://hospital-api.example.com".to_string()),
            },
            roster_window: RosterWindowConfig {
                start: env::var("ROSTER_WINDOW_START")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
                stop: env::var("ROSTER_WINDOW_STOP")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(100),
            },
        })
    }
}
