//! Command-line and environment configuration.

use admission_core::config::{DEFAULT_DB_PATH, DEFAULT_UPLOAD_DIR};
use admission_core::{
    default_log_level, parse_fee_override, AdmissionConfig, Fee, FeeTableError, RatingStore,
    SubjectFeeTable,
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_RATINGS_PATH: &str = "submissions.json";

/// Student admission form server.
#[derive(Debug, Clone, Parser)]
#[command(name = "admission-server", version, about)]
pub struct Args {
    /// Address to listen on.
    #[arg(long, env = "ADMISSION_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// SQLite database file holding admissions.
    #[arg(long, env = "ADMISSION_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Directory uploaded photos are written to.
    #[arg(long, env = "ADMISSION_UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,

    /// JSON file holding rating submissions.
    #[arg(long, env = "ADMISSION_RATINGS_PATH", default_value = DEFAULT_RATINGS_PATH)]
    pub ratings_path: PathBuf,

    /// Directory for rolling log files; relative paths resolve against the
    /// working directory.
    #[arg(long, env = "ADMISSION_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "ADMISSION_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Largest accepted request body, photo included.
    #[arg(long, env = "ADMISSION_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Adds or replaces a subject price; repeatable.
    #[arg(long = "subject-fee", value_name = "NAME=PRICE", value_parser = parse_fee_override)]
    pub subject_fees: Vec<(String, Fee)>,
}

impl Args {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    pub fn resolved_log_dir(&self) -> std::io::Result<PathBuf> {
        std::path::absolute(&self.log_dir)
    }

    /// Standard prices with every `--subject-fee` applied in order.
    pub fn fee_table(&self) -> Result<SubjectFeeTable, FeeTableError> {
        self.subject_fees
            .iter()
            .try_fold(SubjectFeeTable::standard(), |table, (name, price)| {
                table.with_price(name, *price)
            })
    }

    pub fn admission_config(&self) -> Result<AdmissionConfig, FeeTableError> {
        Ok(AdmissionConfig::new(
            &self.db_path,
            &self.upload_dir,
            self.fee_table()?,
        ))
    }

    pub fn rating_store(&self) -> RatingStore {
        RatingStore::new(&self.ratings_path)
    }
}
