//! Detection state machine.
//!
//! The monitor owns the session state and is the sole authority for
//! when a panic is declared. The log-stream subscription is toggled as
//! a side effect of the transition function itself: active if and only
//! if the state is `Monitoring`. At most one alert artifact exists at
//! any time, and exactly one panic is surfaced per session.
//!
//! Failure semantics: if the overlay host fails to build the alert, or
//! the capture host fails to write the screenshot, the monitor stays
//! `Tripped` and logs the failure. Detection already happened; the
//! monitor's own malfunction must never crash the host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tw_common::{DetectionLevel, LogEvent, TripRecord};

use crate::capture::ArtifactCapturer;
use crate::classify::is_panic;
use crate::hosts::{CaptureHost, LogStream, OverlayHost};
use crate::overlay::AlertPresenter;

/// Session state, scoped to one run cycle of the monitored application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session active; nothing observed.
    #[default]
    Idle,
    /// Session active; log stream subscribed, events evaluated.
    Monitoring,
    /// Panic surfaced; log stream unsubscribed, alert on screen.
    Tripped,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Monitoring => write!(f, "monitoring"),
            SessionState::Tripped => write!(f, "tripped"),
        }
    }
}

/// The detection state machine.
///
/// Dependencies are injected so transitions can be unit-tested with
/// doubles instead of a real host.
#[derive(Debug)]
pub struct Monitor<S, O, C>
where
    S: LogStream,
    O: OverlayHost,
    C: CaptureHost,
{
    state: SessionState,
    level: DetectionLevel,
    stream: S,
    presenter: AlertPresenter<O>,
    capturer: ArtifactCapturer<C>,
    trip: Option<TripRecord>,
    artifact: Option<PathBuf>,
}

impl<S, O, C> Monitor<S, O, C>
where
    S: LogStream,
    O: OverlayHost,
    C: CaptureHost,
{
    pub fn new(stream: S, presenter: AlertPresenter<O>, capturer: ArtifactCapturer<C>) -> Self {
        Self {
            state: SessionState::Idle,
            level: DetectionLevel::default(),
            stream,
            presenter,
            capturer,
            trip: None,
            artifact: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Level cached at session start; changes mid-session do not apply.
    pub fn level(&self) -> DetectionLevel {
        self.level
    }

    /// The retained record of the event that tripped this session.
    pub fn trip(&self) -> Option<&TripRecord> {
        self.trip.as_ref()
    }

    /// Path of the capture request issued on trip, if any.
    pub fn artifact(&self) -> Option<&PathBuf> {
        self.artifact.as_ref()
    }

    /// External signal: the monitored session has started.
    ///
    /// Idempotent: a repeated start while already `Monitoring` (or
    /// `Tripped` without an intervening end) is a no-op and must not
    /// double-subscribe.
    pub fn session_start(&mut self, level: DetectionLevel) {
        if self.state != SessionState::Idle {
            debug!(state = %self.state, "session_start ignored; session already active");
            return;
        }
        self.level = level;
        info!(level = %level, "session started; monitoring log stream");
        self.transition(SessionState::Monitoring);
    }

    /// External signal: the monitored session has ended.
    ///
    /// Safe from any state, at any time; redundant signals are no-ops.
    /// Releases the alert artifact and resets the retained trip.
    pub fn session_end(&mut self) {
        if self.state == SessionState::Idle {
            debug!("session_end ignored; already idle");
            return;
        }
        info!(state = %self.state, "session ended");
        self.transition(SessionState::Idle);
    }

    /// Log-stream callback: evaluate one delivered event.
    ///
    /// Events are processed strictly in delivery order; the first event
    /// classified as a panic wins. After the trip the unsubscribe has
    /// already happened, and the state guard here ensures an event
    /// delivered late is never evaluated.
    pub fn handle_event(&mut self, event: &LogEvent) {
        if self.state != SessionState::Monitoring {
            return;
        }
        if !is_panic(self.level, event.severity) {
            return;
        }

        warn!(severity = %event.severity, message = %event.message, "panic detected");
        self.trip = Some(TripRecord::from(event));

        // Unsubscribe before any further dispatch.
        self.transition(SessionState::Tripped);

        if let Err(err) = self.presenter.show(&event.message, &event.stack_trace) {
            // Detection stands; the alert just could not be drawn.
            warn!(error = %err, code = err.code(), "alert presentation failed");
        }

        match self.capturer.capture() {
            Ok(path) => {
                info!(path = %path.display(), "screenshot capture requested");
                self.artifact = Some(path);
            }
            Err(err) => {
                warn!(error = %err, code = err.code(), "screenshot capture failed");
            }
        }
    }

    /// Apply a state transition and its subscription/overlay side
    /// effects. All subscribe/unsubscribe calls live here.
    fn transition(&mut self, next: SessionState) {
        self.state = next;
        match next {
            SessionState::Idle => {
                self.stream.unsubscribe();
                if let Err(err) = self.presenter.hide() {
                    warn!(error = %err, "alert teardown failed");
                }
                self.trip = None;
                self.artifact = None;
            }
            SessionState::Monitoring => {
                self.stream.subscribe();
            }
            SessionState::Tripped => {
                self.stream.unsubscribe();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::{ScrimStyle, SurfaceId, TextStyle};
    use std::path::Path;
    use tw_common::{Error, Result, Severity};

    /// Stream double counting active subscriptions.
    #[derive(Debug, Default)]
    struct FakeStream {
        active: u32,
        subscribes: u32,
        unsubscribes: u32,
    }

    impl LogStream for FakeStream {
        fn subscribe(&mut self) {
            if self.active == 0 {
                self.active += 1;
            }
            self.subscribes += 1;
        }

        fn unsubscribe(&mut self) {
            self.active = 0;
            self.unsubscribes += 1;
        }
    }

    #[derive(Debug, Default)]
    struct FakeOverlay {
        next_id: u64,
        live_roots: Vec<SurfaceId>,
        texts: Vec<String>,
        fail_create: bool,
    }

    impl OverlayHost for FakeOverlay {
        fn create_root(&mut self) -> Result<SurfaceId> {
            if self.fail_create {
                return Err(Error::SurfaceCreate("root".into()));
            }
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
            self.texts.push(content.to_string());
            self.next_id += 1;
            Ok(SurfaceId(self.next_id))
        }

        fn destroy(&mut self, surface: SurfaceId) -> Result<()> {
            self.live_roots.retain(|s| *s != surface);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakeCapture {
        requests: Vec<std::path::PathBuf>,
        fail: bool,
    }

    impl CaptureHost for FakeCapture {
        fn capture_screen_to_file(&mut self, path: &Path) -> Result<()> {
            if self.fail {
                return Err(Error::CaptureFailed("denied".into()));
            }
            self.requests.push(path.to_path_buf());
            Ok(())
        }
    }

    type TestMonitor = Monitor<FakeStream, FakeOverlay, FakeCapture>;

    fn monitor() -> TestMonitor {
        Monitor::new(
            FakeStream::default(),
            AlertPresenter::new(FakeOverlay::default()),
            ArtifactCapturer::new(FakeCapture::default(), "/tmp/shots"),
        )
    }

    fn event(severity: Severity) -> LogEvent {
        LogEvent::new("NullRef", "at Foo.Bar", severity)
    }

    #[test]
    fn starts_idle_with_no_subscription() {
        let m = monitor();
        assert_eq!(m.state(), SessionState::Idle);
        assert_eq!(m.stream.active, 0);
    }

    #[test]
    fn session_start_subscribes_and_monitors() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Hard);
        assert_eq!(m.state(), SessionState::Monitoring);
        assert_eq!(m.stream.active, 1);
        assert_eq!(m.level(), DetectionLevel::Hard);
    }

    #[test]
    fn repeated_session_start_does_not_double_subscribe() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Hard);
        m.session_start(DetectionLevel::Soft);

        assert_eq!(m.stream.subscribes, 1);
        assert_eq!(m.stream.active, 1);
        // The first start's level stays cached for the session.
        assert_eq!(m.level(), DetectionLevel::Hard);
    }

    #[test]
    fn first_panic_trips_and_unsubscribes() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Hard);
        m.handle_event(&event(Severity::Error));

        assert_eq!(m.state(), SessionState::Tripped);
        assert_eq!(m.stream.active, 0);
        assert_eq!(m.trip().unwrap().message, "NullRef");
        assert_eq!(m.presenter.host().texts, &["NullRef\nat Foo.Bar"]);
        assert_eq!(m.capturer.host().requests.len(), 1);
    }

    #[test]
    fn events_after_trip_are_not_evaluated() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Hard);
        m.handle_event(&event(Severity::Error));
        m.handle_event(&LogEvent::new("second", "t", Severity::Exception));

        // Still the first trip, one alert, one capture.
        assert_eq!(m.trip().unwrap().message, "NullRef");
        assert_eq!(m.presenter.host().texts.len(), 1);
        assert_eq!(m.capturer.host().requests.len(), 1);
    }

    #[test]
    fn non_panic_events_keep_monitoring() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Hard);
        m.handle_event(&event(Severity::Warning));

        assert_eq!(m.state(), SessionState::Monitoring);
        assert!(m.trip().is_none());
        assert_eq!(m.stream.active, 1);
    }

    #[test]
    fn clean_session_ends_idle_with_no_artifact() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Hard);
        m.session_end();

        assert_eq!(m.state(), SessionState::Idle);
        assert_eq!(m.stream.active, 0);
        assert!(!m.presenter.is_visible());
        assert!(m.trip().is_none());
    }

    #[test]
    fn session_end_after_trip_destroys_alert_and_resets() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Soft);
        m.handle_event(&event(Severity::Exception));
        assert!(m.presenter.is_visible());

        m.session_end();
        assert_eq!(m.state(), SessionState::Idle);
        assert!(!m.presenter.is_visible());
        assert!(m.trip().is_none());
        assert!(m.artifact().is_none());
    }

    #[test]
    fn redundant_session_end_is_a_no_op() {
        let mut m = monitor();
        m.session_end();
        assert_eq!(m.state(), SessionState::Idle);

        m.session_start(DetectionLevel::Hard);
        m.session_end();
        let unsubscribes = m.stream.unsubscribes;
        m.session_end();
        assert_eq!(m.stream.unsubscribes, unsubscribes);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let mut m = monitor();
        m.handle_event(&event(Severity::Exception));
        assert_eq!(m.state(), SessionState::Idle);
        assert!(m.trip().is_none());
    }

    #[test]
    fn presentation_failure_still_trips() {
        let mut m = Monitor::new(
            FakeStream::default(),
            AlertPresenter::new(FakeOverlay {
                fail_create: true,
                ..FakeOverlay::default()
            }),
            ArtifactCapturer::new(FakeCapture::default(), "/tmp/shots"),
        );
        m.session_start(DetectionLevel::Hard);
        m.handle_event(&event(Severity::Error));

        assert_eq!(m.state(), SessionState::Tripped);
        assert!(m.trip().is_some());
        // Capture still issued despite the overlay failure.
        assert_eq!(m.capturer.host().requests.len(), 1);
    }

    #[test]
    fn capture_failure_keeps_trip_and_alert() {
        let mut m = Monitor::new(
            FakeStream::default(),
            AlertPresenter::new(FakeOverlay::default()),
            ArtifactCapturer::new(
                FakeCapture {
                    fail: true,
                    ..FakeCapture::default()
                },
                "/tmp/shots",
            ),
        );
        m.session_start(DetectionLevel::Hard);
        m.handle_event(&event(Severity::Error));

        assert_eq!(m.state(), SessionState::Tripped);
        assert!(m.presenter.is_visible());
        assert!(m.artifact().is_none());
    }

    #[test]
    fn next_session_starts_fresh_after_trip() {
        let mut m = monitor();
        m.session_start(DetectionLevel::Soft);
        m.handle_event(&event(Severity::Exception));
        m.session_end();

        m.session_start(DetectionLevel::Soft);
        assert_eq!(m.state(), SessionState::Monitoring);
        assert_eq!(m.stream.active, 1);
        assert!(m.trip().is_none());

        m.handle_event(&event(Severity::Exception));
        assert_eq!(m.state(), SessionState::Tripped);
        // One alert per trip across both sessions.
        assert_eq!(m.presenter.host().texts.len(), 2);
    }
}
