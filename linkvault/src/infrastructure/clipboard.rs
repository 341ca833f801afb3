// src/infrastructure/clipboard.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::services::clipboard::ClipboardService;
#[cfg(target_os = "linux")]
use tracing::debug;
use tracing::instrument;

#[cfg(not(target_os = "linux"))]
use arboard::Clipboard;

/// Reads the system clipboard.
///
/// On Linux the clipboard belongs to whichever process set it, and Wayland
/// compositors often refuse the protocol `arboard` speaks, so the text is
/// read through `wl-paste` (Wayland) or `xclip`/`xsel` (X11). Other platforms
/// use `arboard` directly.
#[derive(Debug)]
pub struct ClipboardServiceImpl;

impl Default for ClipboardServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardServiceImpl {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardService for ClipboardServiceImpl {
    #[instrument(level = "trace")]
    fn read_text(&self) -> DomainResult<String> {
        #[cfg(target_os = "linux")]
        {
            self.read_linux()
        }

        #[cfg(not(target_os = "linux"))]
        {
            self.read_arboard()
        }
    }
}

impl ClipboardServiceImpl {
    #[cfg(not(target_os = "linux"))]
    fn read_arboard(&self) -> DomainResult<String> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| DomainError::Clipboard(format!("Failed to initialize clipboard: {}", e)))?;
        clipboard
            .get_text()
            .map_err(|e| DomainError::Clipboard(format!("Failed to read clipboard text: {}", e)))
    }

    #[cfg(target_os = "linux")]
    #[instrument(skip_all, level = "debug")]
    fn read_linux(&self) -> DomainResult<String> {
        if std::env::var("WAYLAND_DISPLAY").is_ok() {
            debug!("Wayland detected, using wl-paste");
            return Self::run_reader("wl-paste", &["--no-newline"]).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DomainError::Clipboard(
                        "wl-paste not found. Install wl-clipboard for clipboard support on Wayland."
                            .to_string(),
                    )
                } else {
                    DomainError::Clipboard(format!("wl-paste failed: {}", e))
                }
            });
        }

        debug!("X11 detected, using xclip");
        match Self::run_reader("xclip", &["-selection", "clipboard", "-o"]) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("xclip not found, falling back to xsel");
                Self::run_reader("xsel", &["--clipboard", "--output"]).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        DomainError::Clipboard(
                            "No X11 clipboard tool found. Install xclip or xsel.".to_string(),
                        )
                    } else {
                        DomainError::Clipboard(format!("xsel failed: {}", e))
                    }
                })
            }
            Err(e) => Err(DomainError::Clipboard(format!("xclip failed: {}", e))),
        }
    }

    /// Run a clipboard tool and capture stdout. `io::Result` keeps NotFound distinguishable.
    #[cfg(target_os = "linux")]
    fn run_reader(program: &str, args: &[&str]) -> std::io::Result<String> {
        use std::process::{Command, Stdio};

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        if output.status.success() {
            debug!("Read {} bytes from clipboard", output.stdout.len());
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{} exited with status: {}", program, output.status),
            ))
        }
    }
}

/// Clipboard stand-in that always returns the same text
#[derive(Debug, Default)]
pub struct StaticClipboardService {
    text: String,
}

impl StaticClipboardService {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl ClipboardService for StaticClipboardService {
    fn read_text(&self) -> DomainResult<String> {
        Ok(self.text.clone())
    }
}
