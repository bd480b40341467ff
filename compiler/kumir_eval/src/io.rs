//! I/O shell: where `вывод` text goes and where `ввод` lines come from.
//!
//! Hosts pick a [`ShellImpl`] variant. A terminal runner uses `Stdio`, a web
//! front end or a test uses `Buffer` with scripted input, and anything more
//! exotic plugs in through the [`IoShell`] trait as `Custom`.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Failure of the host stream behind the shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("не удалось прочитать строку: {0}")]
    Read(#[source] std::io::Error),
    #[error("не удалось вывести текст: {0}")]
    Write(#[source] std::io::Error),
}

/// Host-provided shell.
pub trait IoShell: Send + Sync {
    /// Read one line without its terminator. End of stream is `Ok("")`.
    fn read_line(&self, prompt: &str) -> Result<String, ShellError>;

    fn write(&self, text: &str) -> Result<(), ShellError>;
}

/// Process stdin/stdout.
#[derive(Default)]
pub struct StdioShell;

impl IoShell for StdioShell {
    fn read_line(&self, prompt: &str) -> Result<String, ShellError> {
        if !prompt.is_empty() {
            self.write(prompt)?;
        }
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(ShellError::Read)?;
        Ok(strip_terminator(line))
    }

    fn write(&self, text: &str) -> Result<(), ShellError> {
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes()).map_err(ShellError::Write)?;
        out.flush().map_err(ShellError::Write)
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Scripted input and captured output.
#[derive(Default)]
pub struct BufferShell {
    input: Mutex<VecDeque<String>>,
    output: Mutex<String>,
}

impl BufferShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shell whose `read_line` calls return `lines` in order, then `""`.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferShell {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            output: Mutex::new(String::new()),
        }
    }

    pub fn push_input(&self, line: impl Into<String>) {
        self.input.lock().push_back(line.into());
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
    }
}

impl IoShell for BufferShell {
    fn read_line(&self, _prompt: &str) -> Result<String, ShellError> {
        Ok(self.input.lock().pop_front().unwrap_or_default())
    }

    fn write(&self, text: &str) -> Result<(), ShellError> {
        self.output.lock().push_str(text);
        Ok(())
    }
}

/// Shell dispatch by enum; `Custom` is the escape hatch for host shells.
pub enum ShellImpl {
    Stdio(StdioShell),
    Buffer(BufferShell),
    /// Discards output; every read is end-of-stream.
    Silent,
    Custom(Box<dyn IoShell>),
}

impl ShellImpl {
    /// Captured output of a `Buffer` shell, empty for the others.
    pub fn captured(&self) -> String {
        match self {
            Self::Buffer(shell) => shell.output(),
            Self::Stdio(_) | Self::Silent | Self::Custom(_) => String::new(),
        }
    }
}

impl IoShell for ShellImpl {
    fn read_line(&self, prompt: &str) -> Result<String, ShellError> {
        match self {
            Self::Stdio(shell) => shell.read_line(prompt),
            Self::Buffer(shell) => shell.read_line(prompt),
            Self::Silent => Ok(String::new()),
            Self::Custom(shell) => shell.read_line(prompt),
        }
    }

    fn write(&self, text: &str) -> Result<(), ShellError> {
        match self {
            Self::Stdio(shell) => shell.write(text),
            Self::Buffer(shell) => shell.write(text),
            Self::Silent => Ok(()),
            Self::Custom(shell) => shell.write(text),
        }
    }
}

pub type SharedIoShell = Arc<ShellImpl>;

pub fn stdio_shell() -> SharedIoShell {
    Arc::new(ShellImpl::Stdio(StdioShell))
}

pub fn buffer_shell<I, S>(input: I) -> SharedIoShell
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(ShellImpl::Buffer(BufferShell::with_input(input)))
}

pub fn silent_shell() -> SharedIoShell {
    Arc::new(ShellImpl::Silent)
}

pub fn custom_shell(shell: impl IoShell + 'static) -> SharedIoShell {
    Arc::new(ShellImpl::Custom(Box::new(shell)))
}

#[cfg(test)]
mod tests;
