use anyhow::{anyhow, Context, Result};
use backtrace::Backtrace;
use log::{Level, LevelFilter};
use std::{
    fmt::Debug,
    io::{BufRead, BufReader, Seek, SeekFrom},
    path::Path,
};

use crate::dirs::log_file_path;

/// Log files are trimmed to this size (from the front) on startup.
pub const MAX_LOG_FILE_LEN: usize = 1024 * 1024;

pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    }
}

/// Sends log records to `~/.heapkit/log/<name>.log` and logs panics with a
/// trimmed backtrace.
pub fn install_logger(name: &str, level: Option<LevelFilter>) -> Result<()> {
    let path = log_file_path(name)?;
    if path.exists() {
        shrink_file(&path, MAX_LOG_FILE_LEN)
            .with_context(|| format!("failed to shrink {}", path.display()))?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{color_start}[{filename}:{lineno}] {prefix}{color_end}{message}\x1b[0m",
                color_start = match record.level() {
                    Level::Error => "\x1b[1;31m",
                    Level::Warn => "\x1b[1;33m",
                    _ => "\x1b[34m",
                },
                color_end = match record.level() {
                    Level::Error => "\x1b[1;31m",
                    Level::Warn => "\x1b[1;33m",
                    _ => "\x1b[0m",
                },
                prefix = match record.level() {
                    Level::Error => "Error: ",
                    Level::Warn => "Warn: ",
                    _ => "",
                },
                filename = record.file().unwrap_or_else(|| record.target()),
                lineno = record.line().unwrap_or(0),
                message = message
            ))
        })
        .level(level.unwrap_or_else(default_level))
        .chain(
            fern::log_file(&path)
                .with_context(|| format!("failed to open {}", path.display()))?,
        )
        .apply()
        .map_err(|err| anyhow!("failed to initialize the logger: {}", err))?;

    std::panic::set_hook(Box::new(|info| {
        error!("{}", info);
        prettify_backtrace(Backtrace::new());
    }));

    Ok(())
}

fn is_library_frame(filename: &str) -> bool {
    ["/.rustup/", "/.cargo/"]
        .iter()
        .any(|dir| filename.contains(dir))
        || filename.starts_with("/rustc/")
}

/// Source locations in `backtrace` outside of the toolchain and registry
/// sources, formatted as `#<frame> <file>:<line>, col <col>`.
pub fn user_frames(backtrace: &Backtrace) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, frame) in backtrace.frames().iter().enumerate() {
        for symbol in frame.symbols() {
            let filename = match symbol.filename() {
                Some(path) => path.to_string_lossy(),
                None => continue,
            };

            if !is_library_frame(&filename) {
                lines.push(format!(
                    "#{} {}:{}, col {}",
                    i,
                    filename,
                    symbol.lineno().unwrap_or(0),
                    symbol.colno().unwrap_or(0)
                ));
            }
        }
    }
    lines
}

pub fn prettify_backtrace(backtrace: Backtrace) {
    for line in user_frames(&backtrace) {
        error!("    {}", line);
    }
}

/// Drops lines from the front of `path` until it's at most `max_len` bytes.
pub fn shrink_file(path: &Path, max_len: usize) -> Result<()> {
    let meta = std::fs::metadata(path)?;
    let current_len: usize = meta.len().try_into()?;
    if current_len <= max_len {
        return Ok(());
    }

    let new_len = current_len - max_len;

    // Look for the nearest newline character.
    let mut file = std::fs::OpenOptions::new().read(true).open(path)?;
    file.seek(SeekFrom::Start(new_len.try_into()?))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;

    // Copy contents after the newline character and replace the old file.
    // The temporary file lives next to `path` so that persisting it is a rename.
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut new_file = tempfile::NamedTempFile::new_in(dir)?;
    std::io::copy(&mut reader, &mut new_file)?;
    new_file.persist(path)?;

    Ok(())
}

pub fn backtrace() {
    prettify_backtrace(Backtrace::new());
}

/// Logs an error instead of propagating it. The caller opts in explicitly
/// at each call site.
pub trait OopsExt: Sized {
    fn oops_with_reason(self, reason: &str);

    fn oops(self) {
        self.oops_with_reason("");
    }

    fn oops_with<F: FnOnce() -> String>(self, reason: F) {
        self.oops_with_reason(&reason())
    }
}

impl<T, E: Debug> OopsExt for std::result::Result<T, E> {
    fn oops_with_reason(self, reason: &str) {
        if let Err(err) = self {
            let separator = if reason.is_empty() { "" } else { ": " };
            warn!("oops: {}{}{:?}", reason, separator, err);
            backtrace();
        }
    }
}

/// `warn!` in debug builds only.
#[macro_export]
macro_rules! debug_warn {
    ($($arg:tt)*) => {{
        if cfg!(debug_assertions) {
            ::log::warn!($($arg)*);
        }
    }}
}

/// `warn!` that fires only the first time this call site is reached.
#[macro_export]
macro_rules! warn_once {
    ($($arg:tt)*) => {{
        static WARNED: ::std::sync::Once = ::std::sync::Once::new();
        WARNED.call_once(|| ::log::warn!($($arg)*));
    }}
}
