use crate::error::{ReelError, Result};
use log::{debug, warn};
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// 輪詢子程序狀態的間隔
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// 執行外部程式並等待結束，`timeout` 為 `None` 時不設時限
///
/// stdout/stderr 由背景執行緒讀取，避免管線緩衝區塞滿導致子程序卡住。
/// 超時會終止子程序並回傳 [`ReelError::ProbeTimeout`]。
pub fn run_with_timeout(
    mut command: Command,
    subject: &Path,
    timeout: Option<Duration>,
) -> Result<ProcessOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| ReelError::Spawn {
        program: program.clone(),
        source,
    })?;
    debug!("啟動 {program} [{}]: {}", child.id(), subject.display());

    let stdout_reader = drain(child.stdout.take());
    let stderr_reader = drain(child.stderr.take());

    let deadline = timeout.map(|limit| (Instant::now() + limit, limit));
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        if let Some((deadline, limit)) = deadline
            && Instant::now() >= deadline
        {
            warn!("{program} 超過 {}s 未結束，終止程序: {}", limit.as_secs(), subject.display());
            if let Err(e) = child.kill() {
                warn!("無法終止 {program}: {e}");
            }
            let _ = child.wait();
            return Err(ReelError::ProbeTimeout {
                program,
                path: subject.to_path_buf(),
                timeout: limit,
            });
        }

        thread::sleep(POLL_INTERVAL);
    };

    Ok(ProcessOutput {
        status,
        stdout: stdout_reader.join().unwrap_or_default(),
        stderr: stderr_reader.join().unwrap_or_default(),
    })
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut reader) = reader {
            let _ = reader.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo hello; echo oops >&2"]);

        let output = run_with_timeout(command, Path::new("sh"), Some(Duration::from_secs(5)))
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_run_reports_failure_status() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 3"]);

        let output = run_with_timeout(command, Path::new("sh"), None).unwrap();
        assert!(!output.success());
    }

    #[test]
    fn test_run_times_out() {
        let mut command = Command::new("sleep");
        command.arg("5");

        let started = Instant::now();
        let result = run_with_timeout(
            command,
            Path::new("clip.mp4"),
            Some(Duration::from_millis(100)),
        );

        assert!(matches!(result, Err(ReelError::ProbeTimeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_run_missing_program() {
        let command = Command::new("definitely-not-a-real-binary-4f2a");
        let result = run_with_timeout(command, Path::new("clip.mp4"), None);
        assert!(matches!(result, Err(ReelError::Spawn { .. })));
    }
}
