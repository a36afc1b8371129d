//! Configuration module
//!
//! This module provides the runtime configuration for the conversion service:
//! server settings, per-request limits, and processing knobs. Everything is
//! read from environment variables with sensible defaults.

use std::env;

// Common constants
const MAX_FILE_SIZE_MB: usize = 25;
const MAX_FILES_PER_BATCH: usize = 20;
const COMBINE_MAX_TOTAL_MB: usize = 100;
const BATCH_CONCURRENCY: usize = 5;
const RASTER_MAX_DIMENSION: u32 = 1024;
const DECODE_CACHE_ENTRIES: usize = 100;

/// Application configuration for the conversion service.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Per-file size ceiling in bytes.
    pub max_file_size_bytes: usize,
    /// Per-request file count ceiling.
    pub max_files_per_batch: usize,
    /// Aggregate size ceiling for Combine mode, in bytes.
    pub combine_max_total_bytes: usize,
    /// Number of files transformed concurrently within one batch.
    pub batch_concurrency: usize,
    /// Longest-edge cap for PDF page rasterization, in pixels.
    pub raster_max_dimension: u32,
    /// Capacity of the decode memoization cache (entries, not bytes).
    pub decode_cache_entries: usize,
    /// Scratch directory for per-request temporary artifacts.
    pub scratch_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            max_file_size_bytes: env::var("MAX_FILE_SIZE_MB")
                .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_FILE_SIZE_MB)
                * 1024
                * 1024,
            max_files_per_batch: env::var("MAX_FILES_PER_BATCH")
                .unwrap_or_else(|_| MAX_FILES_PER_BATCH.to_string())
                .parse()
                .unwrap_or(MAX_FILES_PER_BATCH),
            combine_max_total_bytes: env::var("COMBINE_MAX_TOTAL_MB")
                .unwrap_or_else(|_| COMBINE_MAX_TOTAL_MB.to_string())
                .parse::<usize>()
                .unwrap_or(COMBINE_MAX_TOTAL_MB)
                * 1024
                * 1024,
            batch_concurrency: env::var("BATCH_CONCURRENCY")
                .unwrap_or_else(|_| BATCH_CONCURRENCY.to_string())
                .parse()
                .unwrap_or(BATCH_CONCURRENCY),
            raster_max_dimension: env::var("RASTER_MAX_DIMENSION")
                .unwrap_or_else(|_| RASTER_MAX_DIMENSION.to_string())
                .parse()
                .unwrap_or(RASTER_MAX_DIMENSION),
            decode_cache_entries: env::var("DECODE_CACHE_ENTRIES")
                .unwrap_or_else(|_| DECODE_CACHE_ENTRIES.to_string())
                .parse()
                .unwrap_or(DECODE_CACHE_ENTRIES),
            scratch_dir: env::var("SCRATCH_DIR")
                .unwrap_or_else(|_| env::temp_dir().to_string_lossy().into_owned()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_files_per_batch == 0 {
            return Err(anyhow::anyhow!("MAX_FILES_PER_BATCH must be greater than 0"));
        }
        if self.batch_concurrency == 0 {
            return Err(anyhow::anyhow!("BATCH_CONCURRENCY must be greater than 0"));
        }
        if self.raster_max_dimension < 16 {
            return Err(anyhow::anyhow!("RASTER_MAX_DIMENSION must be at least 16"));
        }
        if self.combine_max_total_bytes < self.max_file_size_bytes {
            return Err(anyhow::anyhow!(
                "COMBINE_MAX_TOTAL_MB must be at least MAX_FILE_SIZE_MB"
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: 4000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_files_per_batch: MAX_FILES_PER_BATCH,
            combine_max_total_bytes: COMBINE_MAX_TOTAL_MB * 1024 * 1024,
            batch_concurrency: BATCH_CONCURRENCY,
            raster_max_dimension: RASTER_MAX_DIMENSION,
            decode_cache_entries: DECODE_CACHE_ENTRIES,
            scratch_dir: env::temp_dir().to_string_lossy().into_owned(),
        }
    }
}
