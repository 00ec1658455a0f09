use serde::Deserialize;
use std::env;

use crate::models::Section;

// Top-level configuration container
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub seating: SeatingConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Seat universe per section, fixed at startup
#[derive(Debug, Clone, Deserialize)]
pub struct SeatingConfig {
    pub section_a_seats: u32,
    pub section_b_seats: u32,
}

impl SeatingConfig {
    pub fn capacity(&self, section: Section) -> u32 {
        match section {
            Section::A => self.section_a_seats,
            Section::B => self.section_b_seats,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "train_ticket_system=debug,tower_http=debug".to_string()),
            },
            seating: SeatingConfig {
                section_a_seats: env::var("SECTION_A_SEATS")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse()
                    .expect("SECTION_A_SEATS must be a valid number"),
                section_b_seats: env::var("SECTION_B_SEATS")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse()
                    .expect("SECTION_B_SEATS must be a valid number"),
            },
        }
    }
}
