//! `<style>` compression through an external command.

use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{CssCommandConfig, DEFAULT_CSS_TIMEOUT_MS};
use crate::error::CssError;

/// Compresses the text of one `<style>` element.
///
/// Errors are recoverable: the serializer logs them and keeps the original text.
pub trait CssCompressor: Send + Sync {
    fn compress(&self, css: &str) -> Result<String, CssError>;
}

/// Pipes CSS through a program's stdin/stdout, e.g. `csso` or `lightningcss --minify`.
#[derive(Clone, Debug)]
pub struct ExternalCompressor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ExternalCompressor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_millis(DEFAULT_CSS_TIMEOUT_MS),
        }
    }

    pub fn from_config(config: &CssCommandConfig) -> Self {
        Self::new(config.program.clone())
            .with_args(config.args.iter().cloned())
            .with_timeout(config.timeout())
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn(&self) -> Result<Child, CssError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => CssError::NotFound {
                    program: self.program.clone(),
                },
                _ => CssError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })
    }

    /// Kill a child that ran past the timeout.
    fn kill(&self, child: &mut Child) -> CssError {
        log::trace!(target: "minify.css", "killing `{}` after {:?}", self.program, self.timeout);
        let _ = child.kill();
        let _ = child.wait();
        CssError::Timeout {
            program: self.program.clone(),
            timeout: self.timeout,
        }
    }

    fn io_error(&self, source: io::Error) -> CssError {
        CssError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Wait for `child` to exit, giving up at `deadline`.
fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(EXIT_POLL_INTERVAL.min(deadline - now));
    }
}

fn missing_pipe(name: &str) -> io::Error {
    io::Error::other(format!("child {name} was not captured"))
}

impl CssCompressor for ExternalCompressor {
    fn compress(&self, css: &str) -> Result<String, CssError> {
        let mut child = self.spawn()?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.io_error(missing_pipe("stdin")))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.io_error(missing_pipe("stdout")))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| self.io_error(missing_pipe("stderr")))?;

        // Stdin is written on its own thread; the child may fill stdout before reading it all.
        let input = css.to_owned();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));
        let errors = thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).map(|_| buf)
        });
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = stdout.read_to_end(&mut buf).map(|_| buf);
            let _ = tx.send(result);
        });

        // One deadline covers both the output and the exit.
        let deadline = Instant::now() + self.timeout;
        let output = match rx.recv_timeout(self.timeout) {
            Ok(result) => result.map_err(|e| self.io_error(e))?,
            Err(_) => return Err(self.kill(&mut child)),
        };
        let status = match wait_until(&mut child, deadline).map_err(|e| self.io_error(e))? {
            Some(status) => status,
            None => return Err(self.kill(&mut child)),
        };

        match writer.join() {
            Ok(Ok(())) => {}
            // The child may exit without reading everything; its status decides.
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(self.io_error(e)),
            Err(_) => return Err(self.io_error(io::Error::other("stdin writer panicked"))),
        }
        let stderr = match errors.join() {
            Ok(Ok(buf)) => String::from_utf8_lossy(&buf).trim().to_string(),
            _ => String::new(),
        };

        if !status.success() {
            return Err(CssError::Failed {
                program: self.program.clone(),
                status,
                stderr,
            });
        }
        String::from_utf8(output).map_err(|_| CssError::InvalidUtf8 {
            program: self.program.clone(),
        })
    }
}
