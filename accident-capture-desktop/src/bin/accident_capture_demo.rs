//! Fill in one accident report end to end against the desktop backend.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossbeam_channel::{Receiver, Sender};

use accident_capture_core::{
    AccidentType, AcquirerState, CaptureDelegate, CaptureError, CaptureKind, CaptureOrchestrator,
    CaptureResult, CommittedReport,
};
use accident_capture_desktop::{platform, DesktopConfig, DesktopError};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Crash,
    Collision,
    RunOver,
}

impl From<TypeArg> for AccidentType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Crash => AccidentType::Crash,
            TypeArg::Collision => AccidentType::Collision,
            TypeArg::RunOver => AccidentType::RunOver,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "accident-capture-demo", version, about = "Record one accident report")]
struct Cli {
    /// Desktop backend configuration (JSON). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = TypeArg::Crash)]
    accident_type: TypeArg,

    #[arg(long, default_value = "")]
    date: String,

    #[arg(long, default_value = "")]
    plate: String,

    #[arg(long, default_value = "")]
    driver_name: String,

    /// Non-digit characters are dropped.
    #[arg(long, default_value = "")]
    driver_id: String,

    #[arg(long, default_value = "")]
    notes: String,

    /// How long to wait for each capture to finish, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

/// Forwards merged results to the main thread.
struct ChannelDelegate {
    merged: Sender<(CaptureKind, CaptureResult)>,
}

impl CaptureDelegate for ChannelDelegate {
    fn on_state_changed(&self, kind: CaptureKind, state: &AcquirerState) {
        log::debug!("{} acquirer: {:?}", kind, state);
    }

    fn on_result_merged(&self, kind: CaptureKind, result: &CaptureResult) {
        let _ = self.merged.send((kind, result.clone()));
    }

    fn on_status(&self, message: &str) {
        println!("{}", message);
    }

    fn on_error(&self, error: &CaptureError) {
        log::warn!("{}", error);
    }

    fn on_committed(&self, report: &CommittedReport) {
        log::info!("committed report {}", report.id);
    }
}

fn wait_for(
    rx: &Receiver<(CaptureKind, CaptureResult)>,
    kind: CaptureKind,
    timeout: Duration,
) -> Option<CaptureResult> {
    while let Ok((merged_kind, result)) = rx.recv_timeout(timeout) {
        if merged_kind == kind {
            return Some(result);
        }
    }
    None
}

fn run(cli: Cli) -> Result<(), DesktopError> {
    let config = match cli.config {
        Some(ref path) => DesktopConfig::load(path)?,
        None => DesktopConfig::default(),
    };
    let orchestrator = CaptureOrchestrator::new(platform(&config)?, config.capture.clone())?;

    let (tx, rx) = crossbeam_channel::unbounded();
    orchestrator.set_delegate(Arc::new(ChannelDelegate { merged: tx }));

    orchestrator.edit(|form| {
        form.set_accident_type(cli.accident_type.into());
        form.set_date(cli.date.as_str());
        form.set_plate(cli.plate.as_str());
        form.set_driver_name(cli.driver_name.as_str());
        form.set_driver_id(&cli.driver_id);
        form.set_notes(cli.notes.as_str());
    });

    let timeout = Duration::from_secs(cli.timeout);
    for kind in [CaptureKind::Photo, CaptureKind::LocationFix] {
        if orchestrator.launch(kind).is_err() {
            continue;
        }
        if wait_for(&rx, kind, timeout) == Some(CaptureResult::PermissionDenied) {
            orchestrator.request_permission(kind);
            orchestrator.launch(kind)?;
            wait_for(&rx, kind, timeout);
        }
        if orchestrator.is_in_flight(kind) {
            log::warn!("{} capture timed out", kind);
            orchestrator.cancel(kind);
        }
    }

    let committed = orchestrator.commit()?;
    println!("{}", committed.to_json()?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
