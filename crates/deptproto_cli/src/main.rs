//! CLI smoke entry point.
//!
//! Usage: `deptproto_cli [DB_PATH] [LOG_DIR]`
//!
//! Opens (or seeds) the catalog at `DB_PATH` and prints collection counts.
//! `LOG_DIR` must be absolute when given.

use deptproto_core::config::DEFAULT_DB_FILE_NAME;
use deptproto_core::{
    core_version, default_seed, init_logging, open_connection, open_store, StoreConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let db_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    let mut config = StoreConfig::new(db_path);
    if let Some(log_dir) = args.next() {
        let level = config.log_level.clone();
        config = config.with_logging(level, log_dir);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("deptproto_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &StoreConfig) -> Result<(), String> {
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = open_connection(config).map_err(|err| err.to_string())?;
    let store = open_store(&conn, config, &default_seed()).map_err(|err| err.to_string())?;
    log::info!("event=cli_probe module=cli status=ok");

    println!("deptproto_core version={}", core_version());
    println!(
        "departments={} protocols={} edges={}",
        store.departments().len(),
        store.protocols().len(),
        store.graph().edges().len()
    );
    Ok(())
}
