use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

use crate::terminal::colors;

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Keeps the spinner on screen until dropped.
pub struct SpinnerHandle {
    spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn set_message(&self, msg: String) {
        self.spinner.set_message(msg);
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
        ACTIVE.lock().take();
    }
}

/// Starts the spinner. Nothing is drawn at quiet level 2 and above.
pub fn start(msg: &str, q_level: u8) -> SpinnerHandle {
    let pb = if q_level > 1 {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };

    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(msg.to_string());

    *ACTIVE.lock() = Some(pb.clone());
    SpinnerHandle { spinner: pb }
}

pub fn report_loading_progress(handle: &SpinnerHandle, done: usize, total: usize) {
    handle.set_message(
        format!(
            "Loaded {} of {total} fact files...",
            done.to_string().green().bold()
        )
        .color(colors::TEXT_DEFAULT)
        .to_string(),
    );
}

/// Log writer that prints above the spinner while one is running.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match ACTIVE.lock().as_ref() {
            Some(pb) => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
            }
            None => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
