//! # Print Worker
//!
//! A blocking thread that owns the [`Printer`] and prints jobs one at a
//! time, in the order handlers submit them. Handlers only hold a
//! [`PrinterHandle`].
//!
//! The job channel has room for a single job, so a handler submitting while
//! one job is printing and another is waiting will wait too.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::Printer;
use crate::error::SobrError;

/// Printed after every job body: two newlines, i.e. a blank-line gap.
pub const JOB_SEPARATOR: &str = "\n\n";

/// Capacity of the job channel
const JOB_QUEUE_DEPTH: usize = 1;

/// One POST body waiting to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub text: String,
}

/// Cloneable handle used to submit jobs to the print worker.
#[derive(Debug, Clone)]
pub struct PrinterHandle {
    tx: mpsc::Sender<PrintJob>,
}

impl PrinterHandle {
    /// Hand `text` over to the print worker.
    pub async fn submit(&self, text: String) -> Result<(), SobrError> {
        self.tx
            .send(PrintJob { text })
            .await
            .map_err(|_| SobrError::DeviceUnavailable("print worker has stopped".to_string()))
    }
}

/// Start the print worker.
///
/// The worker exits once every [`PrinterHandle`] is dropped and the pending
/// job is printed; await the returned handle to wait for that.
pub fn spawn(printer: Printer) -> (PrinterHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(JOB_QUEUE_DEPTH);
    let worker = tokio::task::spawn_blocking(move || run(printer, rx));
    (PrinterHandle { tx }, worker)
}

fn run(mut printer: Printer, mut rx: mpsc::Receiver<PrintJob>) {
    while let Some(job) = rx.blocking_recv() {
        print_job(&mut printer, &job);
    }
    debug!("Print worker stopped");
}

/// Print the job body, then the separator. Failures are logged only: the
/// HTTP response for the job has already been produced.
fn print_job(printer: &mut Printer, job: &PrintJob) {
    for text in [job.text.as_str(), JOB_SEPARATOR] {
        if let Err(e) = printer.print_text(text) {
            error!(error = %e, "Failed to print job");
            return;
        }
    }
    debug!(bytes = job.text.len(), "Printed job");
}
