use colored::*;
use intake_core::hostname;

use crate::terminal::{Console, print};

pub fn normalize(text: &str, console: Console) -> anyhow::Result<()> {
    let normalized = hostname::normalize(text)?;

    if console.quiet > 0 {
        print::print(&normalized);
        return Ok(());
    }
    print::fields(&[
        ("Input", text.normal()),
        ("Hostname", normalized.bright_green().bold()),
    ]);
    Ok(())
}
