//! Alert presenter.
//!
//! Owns the lifetime of the on-screen alert artifact: one root surface
//! with a full-viewport translucent scrim and a full-viewport text
//! block. The state machine is the only caller; the presenter still
//! defensively destroys any prior artifact before creating a new one so
//! a double `show` cannot leak surfaces.

use tracing::warn;
use tw_common::Result;

use crate::hosts::{
    Alignment, HorizontalWrap, OverlayHost, ScrimStyle, SurfaceId, TextStyle, VerticalOverflow,
};

/// Translucent blue scrim behind the alert text.
pub const SCRIM_STYLE: ScrimStyle = ScrimStyle {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 0.5,
};

/// Fixed readable layout for the alert text.
pub const ALERT_TEXT_STYLE: TextStyle = TextStyle {
    font_size: 22,
    wrap: HorizontalWrap::Wrap,
    overflow: VerticalOverflow::Truncate,
    align: Alignment::TopLeft,
    interactive: false,
};

/// Constructs and tears down the alert overlay.
#[derive(Debug)]
pub struct AlertPresenter<O: OverlayHost> {
    host: O,
    root: Option<SurfaceId>,
}

impl<O: OverlayHost> AlertPresenter<O> {
    pub fn new(host: O) -> Self {
        Self { host, root: None }
    }

    /// Whether an alert artifact currently exists.
    pub fn is_visible(&self) -> bool {
        self.root.is_some()
    }

    /// Access the underlying overlay host.
    pub fn host(&self) -> &O {
        &self.host
    }

    /// Create the alert artifact showing `message` and `stack_trace`.
    ///
    /// On a partial construction failure the root is destroyed again so
    /// no orphaned surfaces survive the error.
    pub fn show(&mut self, message: &str, stack_trace: &str) -> Result<()> {
        if self.root.is_some() {
            warn!("alert already visible; replacing prior artifact");
            self.hide()?;
        }

        let root = self.host.create_root()?;
        let content = format!("{}\n{}", message, stack_trace);

        let built = self
            .host
            .create_scrim(root, &SCRIM_STYLE)
            .and_then(|_| self.host.create_text(root, &ALERT_TEXT_STYLE, &content));

        match built {
            Ok(_) => {
                self.root = Some(root);
                Ok(())
            }
            Err(err) => {
                if let Err(destroy_err) = self.host.destroy(root) {
                    warn!(error = %destroy_err, "failed to roll back partial alert");
                }
                Err(err)
            }
        }
    }

    /// Destroy the alert artifact and all children, synchronously.
    ///
    /// No-op when nothing is shown.
    pub fn hide(&mut self) -> Result<()> {
        if let Some(root) = self.root.take() {
            self.host.destroy(root)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_common::Error;

    /// Overlay host double recording surface lifecycles.
    #[derive(Debug, Default)]
    struct FakeOverlay {
        next_id: u64,
        live_roots: Vec<SurfaceId>,
        texts: Vec<String>,
        fail_text: bool,
    }

    impl OverlayHost for FakeOverlay {
        fn create_root(&mut self) -> Result<SurfaceId> {
            self.next_id += 1;
            let id = SurfaceId(self.next_id);
            self.live_roots.push(id);
            Ok(id)
        }

        fn create_scrim(&mut self, _parent: SurfaceId, _style: &ScrimStyle) -> Result<SurfaceId> {
            self.next_id += 1;
            Ok(SurfaceId(self.next_id))
        }

        fn create_text(
            &mut self,
            _parent: SurfaceId,
            _style: &TextStyle,
            content: &str,
        ) -> Result<SurfaceId> {
            if self.fail_text {
                return Err(Error::SurfaceCreate("text surface".into()));
            }
            self.texts.push(content.to_string());
            self.next_id += 1;
            Ok(SurfaceId(self.next_id))
        }

        fn destroy(&mut self, surface: SurfaceId) -> Result<()> {
            self.live_roots.retain(|s| *s != surface);
            Ok(())
        }
    }

    #[test]
    fn show_builds_alert_text() {
        let mut presenter = AlertPresenter::new(FakeOverlay::default());
        presenter.show("NullRef", "at Foo.Bar").unwrap();

        assert!(presenter.is_visible());
        assert_eq!(presenter.host.texts, vec!["NullRef\nat Foo.Bar"]);
        assert_eq!(presenter.host.live_roots.len(), 1);
    }

    #[test]
    fn hide_is_idempotent() {
        let mut presenter = AlertPresenter::new(FakeOverlay::default());
        presenter.show("boom", "").unwrap();

        presenter.hide().unwrap();
        assert!(!presenter.is_visible());
        assert!(presenter.host.live_roots.is_empty());

        // Second hide with nothing shown is a no-op.
        presenter.hide().unwrap();
        assert!(!presenter.is_visible());
    }

    #[test]
    fn double_show_never_leaks_prior_artifact() {
        let mut presenter = AlertPresenter::new(FakeOverlay::default());
        presenter.show("first", "t1").unwrap();
        presenter.show("second", "t2").unwrap();

        // Exactly one live root: the first artifact was destroyed.
        assert_eq!(presenter.host.live_roots.len(), 1);
    }

    #[test]
    fn partial_failure_rolls_back_root() {
        let mut presenter = AlertPresenter::new(FakeOverlay {
            fail_text: true,
            ..FakeOverlay::default()
        });

        assert!(presenter.show("boom", "trace").is_err());
        assert!(!presenter.is_visible());
        assert!(presenter.host.live_roots.is_empty());
    }

    #[test]
    fn alert_style_is_non_interactive_top_left() {
        assert!(!ALERT_TEXT_STYLE.interactive);
        assert_eq!(ALERT_TEXT_STYLE.align, Alignment::TopLeft);
        assert_eq!(ALERT_TEXT_STYLE.wrap, HorizontalWrap::Wrap);
        assert_eq!(ALERT_TEXT_STYLE.overflow, VerticalOverflow::Truncate);
    }
}
