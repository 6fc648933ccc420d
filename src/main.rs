use std::process::ExitCode;

use log::{debug, info};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();

    info!("Starting weekly worklog report");

    match weeklog_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Report failed: {:?}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
