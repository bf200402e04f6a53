//! Trait seams for host facilities.
//!
//! Everything the monitor needs from its host is expressed as a small
//! trait so tests can substitute doubles: the log-stream subscription,
//! the overlay renderer, the screenshot writer, and the file-browser
//! reveal command. The core never depends on a concrete host.

use std::path::Path;

use tw_common::Result;

/// Opaque handle to a visual surface owned by the overlay host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Scrim fill color, RGBA components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrimStyle {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Horizontal text layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalWrap {
    Wrap,
    Overflow,
}

/// Vertical text layout when content exceeds the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalOverflow {
    Truncate,
    Overflow,
}

/// Text anchor within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    TopLeft,
    Center,
}

/// Layout options for an overlay text surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: u32,
    pub wrap: HorizontalWrap,
    pub overflow: VerticalOverflow,
    pub align: Alignment,
    /// Whether the surface intercepts input. The alert overlay never
    /// does.
    pub interactive: bool,
}

/// Log-stream subscription toggled by the state machine.
///
/// `subscribe` while already subscribed and `unsubscribe` while not
/// subscribed must both be no-ops; the state machine relies on that for
/// idempotent redundant signals.
pub trait LogStream {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Host-side overlay rendering.
///
/// `destroy` tears down a surface and all of its children synchronously.
pub trait OverlayHost {
    fn create_root(&mut self) -> Result<SurfaceId>;
    fn create_scrim(&mut self, parent: SurfaceId, style: &ScrimStyle) -> Result<SurfaceId>;
    fn create_text(
        &mut self,
        parent: SurfaceId,
        style: &TextStyle,
        content: &str,
    ) -> Result<SurfaceId>;
    fn destroy(&mut self, surface: SurfaceId) -> Result<()>;
}

/// Host-side screenshot facility.
pub trait CaptureHost {
    fn capture_screen_to_file(&mut self, path: &Path) -> Result<()>;
}

/// Host-side file-browser reveal, best-effort.
pub trait RevealHost {
    fn open_directory(&self, path: &Path) -> Result<()>;
}
