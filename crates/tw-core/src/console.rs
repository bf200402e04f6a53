//! Console host adapters.
//!
//! Concrete implementations of the host trait seams for the `tripwatch`
//! binary: the overlay is rendered as an ANSI alert block on stderr, a
//! "screenshot" is a text rendering of the current alert written to the
//! requested path, and reveal shells out to the platform opener. stdout
//! stays reserved for command payloads.

use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};

use tw_common::{Error, Result};

use crate::hosts::{
    CaptureHost, LogStream, OverlayHost, RevealHost, ScrimStyle, SurfaceId, TextStyle,
};

/// Shared "screen" contents between the overlay and capture adapters.
///
/// Holds the alert text while the overlay is visible, mirroring what a
/// real screenshot of the host viewport would show.
pub type Screen = Arc<Mutex<Option<String>>>;

/// Log-stream adapter for the stdin-driven session.
///
/// The stdin reader is the delivery mechanism; this adapter only tracks
/// whether the subscription is active so the invariant is observable.
#[derive(Debug, Default)]
pub struct ConsoleLogStream {
    active: bool,
}

impl ConsoleLogStream {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl LogStream for ConsoleLogStream {
    fn subscribe(&mut self) {
        self.active = true;
    }

    fn unsubscribe(&mut self) {
        self.active = false;
    }
}

/// Overlay adapter rendering the alert block to a writer (stderr in the
/// binary).
pub struct ConsoleOverlayHost<W: Write> {
    writer: W,
    screen: Screen,
    next_id: u64,
    use_color: bool,
}

impl ConsoleOverlayHost<std::io::Stderr> {
    pub fn stderr(screen: Screen, use_color: bool) -> Self {
        Self::new(std::io::stderr(), screen, use_color)
    }
}

impl<W: Write> ConsoleOverlayHost<W> {
    pub fn new(writer: W, screen: Screen, use_color: bool) -> Self {
        Self {
            writer,
            screen,
            next_id: 0,
            use_color,
        }
    }

    fn next_surface(&mut self) -> SurfaceId {
        self.next_id += 1;
        SurfaceId(self.next_id)
    }
}

impl<W: Write> OverlayHost for ConsoleOverlayHost<W> {
    fn create_root(&mut self) -> Result<SurfaceId> {
        Ok(self.next_surface())
    }

    fn create_scrim(&mut self, _parent: SurfaceId, _style: &ScrimStyle) -> Result<SurfaceId> {
        // A terminal has no translucent fill; the banner below stands in.
        Ok(self.next_surface())
    }

    fn create_text(
        &mut self,
        _parent: SurfaceId,
        _style: &TextStyle,
        content: &str,
    ) -> Result<SurfaceId> {
        let (red, bold, reset) = if self.use_color {
            ("\x1b[41;97m", "\x1b[1m", "\x1b[0m")
        } else {
            ("", "", "")
        };
        writeln!(
            self.writer,
            "{red}{bold}================ PANIC DETECTED ================{reset}"
        )
        .and_then(|_| writeln!(self.writer, "{}", content))
        .and_then(|_| {
            writeln!(
                self.writer,
                "{red}{bold}================================================{reset}"
            )
        })
        .map_err(|e| Error::SurfaceCreate(e.to_string()))?;

        *self.screen.lock().unwrap() = Some(content.to_string());
        Ok(self.next_surface())
    }

    fn destroy(&mut self, _surface: SurfaceId) -> Result<()> {
        // Terminal output cannot be withdrawn; clearing the screen
        // buffer releases the artifact.
        *self.screen.lock().unwrap() = None;
        Ok(())
    }
}

/// Capture adapter writing a text rendering of the screen.
#[derive(Debug)]
pub struct ConsoleCaptureHost {
    screen: Screen,
}

impl ConsoleCaptureHost {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }
}

impl CaptureHost for ConsoleCaptureHost {
    fn capture_screen_to_file(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::CaptureFailed(format!("{}: {}", parent.display(), e)))?;
        }
        let contents = self
            .screen
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "<no alert visible>".to_string());
        std::fs::write(path, contents)
            .map_err(|e| Error::CaptureFailed(format!("{}: {}", path.display(), e)))
    }
}

/// Reveal adapter shelling out to the platform file browser.
#[derive(Debug, Default)]
pub struct ConsoleRevealHost;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

impl RevealHost for ConsoleRevealHost {
    fn open_directory(&self, path: &Path) -> Result<()> {
        Command::new(OPENER).arg(path).spawn()?;
        Ok(())
    }
}

/// Build the console host set for one session, sharing a screen buffer
/// between the overlay and the capture adapter.
pub fn console_hosts(
    use_color: bool,
) -> (
    ConsoleLogStream,
    ConsoleOverlayHost<std::io::Stderr>,
    ConsoleCaptureHost,
) {
    let screen: Screen = Arc::new(Mutex::new(None));
    (
        ConsoleLogStream::default(),
        ConsoleOverlayHost::stderr(Arc::clone(&screen), use_color),
        ConsoleCaptureHost::new(screen),
    )
}
