//! Named-pipe strategy
//!
//! Each side is streamed into its own FIFO by a dedicated writer thread while
//! the external program reads the two FIFO paths. Neither text touches disk.

use lineset_core::errors::{LineSetError, Result};

use crate::config::BridgeConfig;
use crate::strategy::{AlignedDiff, AlignedDiffStrategy, SourceText};

/// Aligned diff through two FIFOs and an external program
#[derive(Debug, Clone, Default)]
pub struct FifoDiff {
    config: BridgeConfig,
}

impl FifoDiff {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl AlignedDiffStrategy for FifoDiff {
    fn name(&self) -> &str {
        "fifo"
    }

    fn aligned(&self, a: &SourceText, b: &SourceText) -> Result<AlignedDiff> {
        #[cfg(unix)]
        {
            unix::run(&self.config, a, b)
        }
        #[cfg(not(unix))]
        {
            let _ = (a, b);
            Err(failure(
                &self.config,
                "named pipes are not supported on this platform".to_string(),
            ))
        }
    }
}

fn failure(config: &BridgeConfig, message: String) -> LineSetError {
    LineSetError::BridgeProcessFailure {
        program: config.program.clone(),
        message,
    }
}

#[cfg(unix)]
mod unix {
    use std::fs::OpenOptions;
    use std::io::{self, Read, Write};
    use std::os::unix::fs::OpenOptionsExt;
    use std::os::unix::process::CommandExt;
    use std::path::PathBuf;
    use std::process::{Child, Command, ExitStatus, Stdio};
    use std::thread::{self, JoinHandle};
    use std::time::{Duration, Instant};

    use lineset_core::errors::{LineSetError, Result};
    use nix::errno::Errno;
    use nix::fcntl::OFlag;
    use nix::sys::signal::{killpg, Signal};
    use nix::sys::stat::Mode;
    use nix::unistd::{mkfifo, Pid};
    use tempfile::TempDir;

    use super::failure;
    use crate::config::BridgeConfig;
    use crate::strategy::{AlignedDiff, SourceText};

    const POLL_INTERVAL: Duration = Duration::from_millis(10);
    const RELEASE_INTERVAL: Duration = Duration::from_millis(1);
    const RELEASE_ATTEMPTS: usize = 1000;

    type WriterHandle = JoinHandle<io::Result<u64>>;

    /// Scoped pipe directory plus the writer threads feeding it
    ///
    /// Dropping the session releases and joins every writer, then removes the
    /// directory together with both FIFOs.
    struct PipeSession {
        // Dropped after `Drop::drop` has joined the writers
        dir: TempDir,
        paths: [PathBuf; 2],
        writers: Vec<WriterHandle>,
    }

    impl PipeSession {
        fn create(config: &BridgeConfig) -> Result<Self> {
            let mut builder = tempfile::Builder::new();
            builder.prefix("lineset-pipes-");
            let dir = match &config.pipe_parent {
                Some(parent) => builder.tempdir_in(parent),
                None => builder.tempdir(),
            }
            .map_err(|e| LineSetError::io("create_pipe_dir", e))?;

            let paths = [dir.path().join("a"), dir.path().join("b")];
            for path in &paths {
                mkfifo(path, Mode::S_IRUSR | Mode::S_IWUSR)
                    .map_err(|e| LineSetError::io("mkfifo", io::Error::from(e)))?;
            }
            tracing::debug!(dir = %dir.path().display(), "created pipe directory");

            Ok(Self {
                dir,
                paths,
                writers: Vec::with_capacity(2),
            })
        }

        fn start_writers(&mut self, texts: [&str; 2], chunk_size: usize) {
            for (path, text) in self.paths.iter().zip(texts) {
                self.writers
                    .push(spawn_writer(path.clone(), text.to_owned(), chunk_size));
            }
        }

        /// Wait for every writer, unblocking any that is stuck on a pipe the
        /// program never opened or stopped reading
        fn finish(&mut self) -> Vec<io::Result<u64>> {
            let mut results = Vec::with_capacity(self.writers.len());
            let writers: Vec<WriterHandle> = self.writers.drain(..).collect();
            for (path, handle) in self.paths.iter().zip(writers) {
                let mut attempts = 0;
                while !handle.is_finished() && attempts < RELEASE_ATTEMPTS {
                    // A reader appearing wakes a blocked open(); once it is
                    // dropped, further writes fail with a broken pipe.
                    if let Ok(reader) = OpenOptions::new()
                        .read(true)
                        .custom_flags(OFlag::O_NONBLOCK.bits())
                        .open(path)
                    {
                        drop(reader);
                    }
                    thread::sleep(RELEASE_INTERVAL);
                    attempts += 1;
                }

                if handle.is_finished() {
                    results.push(handle.join().unwrap_or_else(|_| {
                        Err(io::Error::new(io::ErrorKind::Other, "pipe writer panicked"))
                    }));
                } else {
                    tracing::warn!(path = %path.display(), "pipe writer still blocked, detaching");
                    results.push(Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "pipe writer did not finish",
                    )));
                }
            }
            results
        }
    }

    impl Drop for PipeSession {
        fn drop(&mut self) {
            if !self.writers.is_empty() {
                let _ = self.finish();
            }
            tracing::debug!(dir = %self.dir.path().display(), "removing pipe directory");
        }
    }

    fn spawn_writer(path: PathBuf, text: String, chunk_size: usize) -> WriterHandle {
        thread::spawn(move || {
            // Blocks until the program opens the other end
            let mut fifo = OpenOptions::new().write(true).open(&path)?;
            let mut written = 0u64;
            for chunk in text.as_bytes().chunks(chunk_size.max(1)) {
                fifo.write_all(chunk)?;
                written += chunk.len() as u64;
            }
            fifo.flush()?;
            Ok(written)
        })
    }

    fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
        stream.map(|mut stream| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stream.read_to_end(&mut buf);
                buf
            })
        })
    }

    fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
        handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
    }

    enum Waited {
        Exited(ExitStatus),
        TimedOut,
    }

    /// SIGKILL the child's process group, so descendants still holding the
    /// output pipes go with it
    ///
    /// The child leads its own group (spawned with `process_group(0)`).
    fn kill_process_group(child: &mut Child) {
        let pid = match i32::try_from(child.id()) {
            Ok(pid) => pid,
            Err(_) => {
                let _ = child.kill();
                return;
            }
        };
        match killpg(Pid::from_raw(pid), Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => {
                tracing::warn!(pid, error = %e, "killpg failed, killing child only");
                let _ = child.kill();
            }
        }
    }

    /// Poll the child until it exits or `timeout` passes; a timed-out child
    /// is killed with its process group and reaped
    fn wait_with_timeout(child: &mut Child, timeout: Duration) -> io::Result<Waited> {
        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Waited::Exited(status)),
                Ok(None) if start.elapsed() >= timeout => {
                    kill_process_group(child);
                    let _ = child.wait();
                    return Ok(Waited::TimedOut);
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    kill_process_group(child);
                    let _ = child.wait();
                    return Err(e);
                }
            }
        }
    }

    pub(super) fn run(config: &BridgeConfig, a: &SourceText, b: &SourceText) -> Result<AlignedDiff> {
        let mut session = PipeSession::create(config)?;
        session.start_writers([a.text.as_str(), b.text.as_str()], config.chunk_size);

        let mut child = Command::new(&config.program)
            .args(&config.args)
            .arg(&session.paths[0])
            .arg(&session.paths[1])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .spawn()
            .map_err(|e| failure(config, format!("failed to start: {}", e)))?;
        tracing::debug!(program = %config.program, pid = child.id(), "started diff process");

        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let waited = wait_with_timeout(&mut child, config.timeout);
        // Background descendants left behind would hold the output pipes open
        if matches!(waited, Ok(Waited::Exited(_))) {
            kill_process_group(&mut child);
        }

        // Output is final only once both producers are done
        let writer_results = session.finish();
        let stdout = join_reader(stdout);
        let stderr = join_reader(stderr);

        let status = match waited {
            Ok(Waited::Exited(status)) => status,
            Ok(Waited::TimedOut) => {
                return Err(LineSetError::BridgeTimeout {
                    program: config.program.clone(),
                    timeout_ms: config.timeout.as_millis() as u64,
                })
            }
            Err(e) => return Err(failure(config, format!("wait failed: {}", e))),
        };

        if !config.accepts(status.code()) {
            let stderr_text = String::from_utf8_lossy(&stderr);
            return Err(failure(
                config,
                format!("{}: {}", status, stderr_text.trim()),
            ));
        }

        for (side, result) in ["a", "b"].into_iter().zip(writer_results) {
            match result {
                Ok(bytes) => tracing::debug!(side, bytes, "pipe writer finished"),
                // The program stopped reading this side
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!(side, "pipe closed by reader before end of input")
                }
                Err(e) => {
                    return Err(failure(
                        config,
                        format!("pipe writer for side {} failed: {}", side, e),
                    ))
                }
            }
        }

        let mut output = stdout;
        output.extend_from_slice(&stderr);
        Ok(AlignedDiff {
            strategy: "fifo".to_string(),
            exit_code: status.code(),
            output: String::from_utf8_lossy(&output).into_owned(),
        })
    }
}
