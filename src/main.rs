//! # sobr-print CLI
//!
//! Serves the HTTPS print endpoint until interrupted.
//!
//! ## Usage
//!
//! ```bash
//! # Listen on the default port (8888)
//! sobr-print
//!
//! # Listen on 9999
//! sobr-print 9999
//!
//! # Test certificate, explicit device node
//! sobr-print 8443 --cert cert.pem --key key.pem --device /dev/usb/lp0
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use sobr_print::{
    DeviceProfile, Printer, SobrError,
    logging,
    server::{
        DEFAULT_CERT_PATH, DEFAULT_KEY_PATH, DEFAULT_PORT, Server, ServerConfig, shutdown_signal,
    },
};

/// sobr-print - print text received over HTTPS on a USB receipt printer
#[derive(Parser, Debug)]
#[command(name = "sobr-print")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TCP port to listen on (all interfaces)
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// TLS certificate chain (PEM)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CERT_PATH)]
    cert: PathBuf,

    /// TLS private key (PEM)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_KEY_PATH)]
    key: PathBuf,

    /// Printer device profile
    #[arg(long, default_value = "POS-5890")]
    profile: String,

    /// Printer device node (skips USB discovery)
    #[arg(long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Requests handled concurrently
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

/// How long runtime shutdown waits for blocking threads (a stuck printer write)
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

fn main() {
    let cli = Cli::parse();

    let result = tokio::runtime::Runtime::new()
        .map_err(SobrError::from)
        .and_then(|runtime| {
            let result = runtime.block_on(run(cli));
            runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
            result
        });

    if let Err(e) = result {
        error!(error = %e, "Startup failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), SobrError> {
    let sink = logging::init()?;
    info!(?sink, "Logging initialized");

    let profile = DeviceProfile::by_name(&cli.profile)?;
    let printer = Printer::open_usb(profile, cli.device.as_deref())?;

    let config = ServerConfig {
        port: cli.port,
        cert_path: cli.cert,
        key_path: cli.key,
        max_in_flight: cli.workers.max(1),
        ..Default::default()
    };

    let server = Server::bind(config).await?;
    server.run(printer, shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_port() {
        let cli = Cli::try_parse_from(["sobr-print"]).unwrap();
        assert_eq!(cli.port, 8888);
        assert_eq!(cli.cert, PathBuf::from(DEFAULT_CERT_PATH));
        assert_eq!(cli.workers, 1);
        assert!(cli.device.is_none());
    }

    #[test]
    fn test_port_argument() {
        let cli = Cli::try_parse_from(["sobr-print", "9999"]).unwrap();
        assert_eq!(cli.port, 9999);
    }

    #[test]
    fn test_non_numeric_port_rejected() {
        assert!(Cli::try_parse_from(["sobr-print", "http"]).is_err());
    }
}
