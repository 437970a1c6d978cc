use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, SangerError};
use crate::trace::{TraceDecoder, TraceFiles};

///
/// Runs an external trace decoder (TraceTuner's `ttuner` command line) over
/// the directory holding the trace.
///
/// The program path comes from configuration. The decoder processes every
/// trace in the directory, so one invocation serves all traces in it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTraceDecoder {
    program: PathBuf,
}

impl ExternalTraceDecoder {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        ExternalTraceDecoder {
            program: program.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(&self, files: &TraceFiles, output_flag: &str, extra: &[&str]) -> Result<()> {
        let directory = files.directory();
        let mut command = Command::new(&self.program);
        command
            .arg(output_flag)
            .arg(&directory)
            .arg("-id")
            .arg(&directory)
            .args(extra);
        log::debug!("Running {:?}", command);

        let output = command.output().map_err(|e| SangerError::TraceDecoder {
            trace: files.trace.clone(),
            reason: format!("could not run {}: {}", self.program.display(), e),
        })?;

        if !output.status.success() {
            return Err(SangerError::TraceDecoder {
                trace: files.trace.clone(),
                reason: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

impl TraceDecoder for ExternalTraceDecoder {
    /// `<program> -sd <dir> -id <dir>`
    fn decode_basecalls(&self, files: &TraceFiles) -> Result<()> {
        self.run(files, "-sd", &[])
    }

    /// `<program> -tabd <dir> -id <dir> -mix`
    fn decode_call_table(&self, files: &TraceFiles) -> Result<()> {
        self.run(files, "-tabd", &["-mix"])
    }
}
