use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Personal memories timeline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// First day shown on the timeline strip (YYYY-MM-DD)
    #[arg(long = "start", value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Last day shown on the timeline strip (YYYY-MM-DD)
    #[arg(long = "end", value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Record service base URL (overrides config file and environment)
    #[arg(long = "service-url", value_name = "URL")]
    pub service_url: Option<String>,

    /// Enable debug logging to file (default: memoria.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
