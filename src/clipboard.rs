//! System clipboard access.
//!
//! On Linux, X11 selections are served by the process that owns them, so the
//! text is lost when the CLI exits unless a clipboard manager takes it over.
//! There the copy is handed to a detached copy of this binary that keeps
//! ownership until another application replaces the clipboard contents.

use anyhow::{Context, Result};
use std::io::Read;
use tracing::debug;

/// Set in the environment of the background clipboard holder.
pub const HOLDER_ENV: &str = "CATALOG_XREF_CLIPBOARD_HOLDER";

/// Places `text` on the system clipboard.
#[cfg(not(target_os = "linux"))]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to open system clipboard")?;
    clipboard.set_text(text.to_owned()).context("Failed to copy to clipboard")?;
    debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Places `text` on the system clipboard.
///
/// The text is piped to a background holder process so the selection outlives
/// this process.
#[cfg(target_os = "linux")]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    // Fail here rather than in the holder when there is no display.
    drop(arboard::Clipboard::new().context("Failed to open system clipboard")?);

    let exe = std::env::current_exe().context("Failed to locate current executable")?;
    let mut child = Command::new(exe)
        .env(HOLDER_ENV, "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to start clipboard holder")?;

    let mut stdin = child.stdin.take().context("Clipboard holder has no stdin")?;
    stdin.write_all(text.as_bytes()).context("Failed to send text to clipboard holder")?;

    debug!("Handed {} bytes to clipboard holder (pid {})", text.len(), child.id());
    Ok(())
}

/// Whether this process was started as the background clipboard holder.
pub fn is_holder() -> bool {
    std::env::var_os(HOLDER_ENV).is_some()
}

/// Runs the clipboard holder: reads the text from stdin and owns the
/// clipboard until another application takes it.
pub fn run_holder() -> Result<()> {
    let text = read_payload(std::io::stdin().lock())?;
    hold(text)
}

#[cfg(target_os = "linux")]
fn hold(text: String) -> Result<()> {
    use arboard::SetExtLinux;

    arboard::Clipboard::new()
        .context("Failed to open system clipboard")?
        .set()
        .wait()
        .text(text)
        .context("Failed to copy to clipboard")
}

#[cfg(not(target_os = "linux"))]
fn hold(text: String) -> Result<()> {
    arboard::Clipboard::new()
        .context("Failed to open system clipboard")?
        .set_text(text)
        .context("Failed to copy to clipboard")
}

fn read_payload(mut reader: impl Read) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text).context("Failed to read clipboard text")?;
    Ok(text)
}
