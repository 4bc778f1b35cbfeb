use std::time::Duration;

use crate::{
    capture::provider::{CaptureProvider, CaptureUnavailable, CapturedImage},
    catalog::frames::Frame,
    composite::compositor::{Compositor, StripImage},
    config::booth::BoothConfig,
    foundation::core::ShotIndex,
    output::sink::OutputSink,
    session::{
        shots::Shots,
        state::{Countdown, PreviewOrigin, SessionState, StateKind, Transition},
        timer::{TickId, TickScheduler},
    },
};

/// Options controlling session timing and download naming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOpts {
    /// First countdown value.
    pub countdown_from: u8,
    /// Delay between countdown ticks.
    pub tick_interval: Duration,
    /// Filename suggested to the output sink.
    pub download_filename: String,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self::from(&BoothConfig::default())
    }
}

impl From<&BoothConfig> for SessionOpts {
    fn from(cfg: &BoothConfig) -> Self {
        Self {
            countdown_from: cfg.countdown_from.max(1),
            tick_interval: cfg.tick_interval(),
            download_filename: cfg.download_filename.clone(),
        }
    }
}

/// One interactive capture session: frame choice, four capture/decide cycles, review, strip.
///
/// Every operation is a guarded transition. Calling one outside its source state returns
/// [`Transition::Ignored`] and changes nothing. Collaborators (camera, compositor, sink) are passed
/// in per call; the countdown timer is owned.
///
/// Entering any state cancels the armed countdown tick; only entering a counting-down
/// [`SessionState::Live`] arms a new one.
pub struct Session {
    state: SessionState,
    frame: Option<Frame>,
    shots: Shots,
    // Origin the next capture's preview will carry; survives the Live phase of a review retake.
    pending_origin: PreviewOrigin,
    capture_error: Option<CaptureUnavailable>,
    composite_error: Option<String>,

    opts: SessionOpts,
    scheduler: Box<dyn TickScheduler>,
    armed: Option<TickId>,
    next_tick: u64,
}

impl Session {
    /// New session in [`SessionState::FrameSelection`].
    pub fn new(opts: SessionOpts, scheduler: impl TickScheduler + 'static) -> Self {
        Self {
            state: SessionState::FrameSelection,
            frame: None,
            shots: Shots::new(),
            pending_origin: PreviewOrigin::Forward,
            capture_error: None,
            composite_error: None,
            opts,
            scheduler: Box::new(scheduler),
            armed: None,
            next_tick: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Tag of the current state.
    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// Selected frame, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Committed shots.
    pub fn shots(&self) -> &Shots {
        &self.shots
    }

    /// Shot being captured or previewed; `None` outside the capture phase.
    pub fn current_shot(&self) -> Option<ShotIndex> {
        self.state.shot()
    }

    /// Active countdown value.
    pub fn countdown(&self) -> Option<Countdown> {
        match &self.state {
            SessionState::Live { countdown, .. } => *countdown,
            _ => None,
        }
    }

    /// Captured but undecided image.
    pub fn pending_capture(&self) -> Option<&CapturedImage> {
        match &self.state {
            SessionState::Previewing { image, .. } => Some(image),
            _ => None,
        }
    }

    /// Origin of the current preview.
    pub fn preview_origin(&self) -> Option<PreviewOrigin> {
        match &self.state {
            SessionState::Previewing { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Merged strip, once composited.
    pub fn strip(&self) -> Option<&StripImage> {
        match &self.state {
            SessionState::Composited { strip } => Some(strip),
            _ => None,
        }
    }

    /// Persistent camera failure, shown verbatim until the session restarts.
    pub fn capture_error(&self) -> Option<&CaptureUnavailable> {
        self.capture_error.as_ref()
    }

    /// Last compositing failure; cleared by the next successful strip or a restart.
    pub fn composite_error(&self) -> Option<&str> {
        self.composite_error.as_deref()
    }

    /// Tick the session is waiting for, if counting down.
    pub fn armed_tick(&self) -> Option<TickId> {
        self.armed
    }

    /// Session options.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// `FrameSelection -> Live(0)`.
    pub fn select_frame(&mut self, frame: Frame) -> Transition {
        if self.state != SessionState::FrameSelection {
            return self.ignored("select_frame");
        }
        tracing::info!(frame_id = %frame.id, "frame selected");
        self.frame = Some(frame);
        self.pending_origin = PreviewOrigin::Forward;
        self.enter(SessionState::Live {
            shot: ShotIndex::FIRST,
            countdown: None,
        });
        Transition::Applied
    }

    /// Begin the countdown for the current live shot.
    ///
    /// Ignored while a countdown is already running, outside `Live`, or while the camera is
    /// reported unavailable.
    pub fn start_countdown(&mut self) -> Transition {
        let SessionState::Live {
            shot,
            countdown: None,
        } = self.state
        else {
            return self.ignored("start_countdown");
        };
        if self.capture_error.is_some() {
            return self.ignored("start_countdown");
        }
        self.enter(SessionState::Live {
            shot,
            countdown: Some(Countdown(self.opts.countdown_from)),
        });
        Transition::Applied
    }

    /// Deliver an expired countdown tick.
    ///
    /// Stale ids (cancelled or superseded) are ignored. The tick that takes the count from `1`
    /// to zero captures from `camera` in the same call.
    pub fn on_tick(&mut self, id: TickId, camera: &mut dyn CaptureProvider) -> Transition {
        if self.armed != Some(id) {
            tracing::debug!(tick = id.0, "stale tick ignored");
            return Transition::Ignored;
        }
        self.armed = None;

        let SessionState::Live {
            shot,
            countdown: Some(countdown),
        } = self.state
        else {
            return self.ignored("on_tick");
        };
        match countdown.tick() {
            Some(next) => {
                tracing::debug!(shot = shot.get(), remaining = next.remaining(), "countdown");
                self.enter(SessionState::Live {
                    shot,
                    countdown: Some(next),
                });
                Transition::Applied
            }
            None => self.capture(camera),
        }
    }

    /// Take a still for the current live shot right away.
    ///
    /// On success the session previews the image. On failure it stays live without a countdown
    /// and records the reason; nothing is retried.
    pub fn capture(&mut self, camera: &mut dyn CaptureProvider) -> Transition {
        let SessionState::Live { shot, .. } = self.state else {
            return self.ignored("capture");
        };
        if self.capture_error.is_some() {
            return self.ignored("capture");
        }

        match camera.request_still() {
            Ok(image) => {
                tracing::debug!(shot = shot.get(), "still captured");
                self.enter(SessionState::Previewing {
                    shot,
                    image,
                    origin: self.pending_origin,
                });
                Transition::Applied
            }
            Err(e) => {
                tracing::warn!(reason = %e.reason, "capture unavailable");
                self.capture_error = Some(e);
                self.enter(SessionState::Live {
                    shot,
                    countdown: None,
                });
                Transition::Failed
            }
        }
    }

    /// Record that the camera became unavailable outside of a capture request.
    pub fn report_capture_unavailable(&mut self, reason: impl Into<String>) {
        let e = CaptureUnavailable::new(reason);
        tracing::warn!(reason = %e.reason, "capture unavailable");
        self.capture_error = Some(e);
        if let SessionState::Live {
            shot,
            countdown: Some(_),
        } = self.state
        {
            self.enter(SessionState::Live {
                shot,
                countdown: None,
            });
        }
    }

    /// Discard the pending image and count down again for the same shot.
    ///
    /// The preview origin carries over to the next capture, so a review retake keeps patching.
    pub fn retake(&mut self) -> Transition {
        let SessionState::Previewing { shot, origin, .. } = self.state else {
            return self.ignored("retake");
        };
        self.pending_origin = origin;
        self.enter(SessionState::Live {
            shot,
            countdown: Some(Countdown(self.opts.countdown_from)),
        });
        Transition::Applied
    }

    /// Forward flow: commit the preview and move to the next shot, or to review after the last.
    pub fn keep_and_next(&mut self) -> Transition {
        let SessionState::Previewing {
            shot,
            ref image,
            origin: PreviewOrigin::Forward,
        } = self.state
        else {
            return self.ignored("keep_and_next");
        };
        let image = image.clone();
        self.commit(shot, image);

        match shot.next() {
            Some(next) => self.enter(SessionState::Live {
                shot: next,
                countdown: Some(Countdown(self.opts.countdown_from)),
            }),
            None => self.enter(SessionState::Reviewing),
        }
        Transition::Applied
    }

    /// Review flow: commit the preview into its shot and return to review.
    pub fn keep(&mut self) -> Transition {
        let SessionState::Previewing {
            shot,
            ref image,
            origin: PreviewOrigin::FromReview,
        } = self.state
        else {
            return self.ignored("keep");
        };
        let image = image.clone();
        self.commit(shot, image);
        self.pending_origin = PreviewOrigin::Forward;
        self.enter(SessionState::Reviewing);
        Transition::Applied
    }

    /// Re-open a committed shot from review.
    pub fn select_shot_to_retake(&mut self, shot: ShotIndex) -> Transition {
        if self.state != SessionState::Reviewing {
            return self.ignored("select_shot_to_retake");
        }
        let Some(image) = self.shots.get(shot).cloned() else {
            return self.ignored("select_shot_to_retake");
        };
        self.pending_origin = PreviewOrigin::FromReview;
        self.enter(SessionState::Previewing {
            shot,
            image,
            origin: PreviewOrigin::FromReview,
        });
        Transition::Applied
    }

    /// Leave review for frame selection.
    ///
    /// Drops the frame choice but keeps the four captured images.
    pub fn exit_review(&mut self) -> Transition {
        if self.state != SessionState::Reviewing {
            return self.ignored("exit_review");
        }
        self.frame = None;
        self.pending_origin = PreviewOrigin::Forward;
        self.enter(SessionState::FrameSelection);
        Transition::Applied
    }

    /// Start over from frame selection with nothing kept. Legal from every state.
    pub fn restart_session(&mut self) -> Transition {
        tracing::info!(from = %self.state.kind(), "session restarted");
        self.shots.clear();
        self.frame = None;
        self.pending_origin = PreviewOrigin::Forward;
        self.capture_error = None;
        self.composite_error = None;
        self.enter(SessionState::FrameSelection);
        Transition::Applied
    }

    /// Merge the four shots into the selected frame.
    ///
    /// On failure the session stays in review and records the reason; calling again retries.
    pub fn create_strip(&mut self, compositor: &Compositor) -> Transition {
        if self.state != SessionState::Reviewing {
            return self.ignored("create_strip");
        }
        let Some(frame) = self.frame.as_ref() else {
            return self.composite_failed("no frame selected".to_string());
        };

        match compositor.composite(frame, self.shots.as_array()) {
            Ok(strip) => {
                self.composite_error = None;
                self.enter(SessionState::Composited { strip });
                Transition::Applied
            }
            Err(e) => self.composite_failed(e.to_string()),
        }
    }

    /// Hand the strip to `sink`. Does not change state.
    pub fn download(&self, sink: &mut dyn OutputSink) -> Transition {
        let SessionState::Composited { strip } = &self.state else {
            return self.ignored("download");
        };
        tracing::info!(filename = %self.opts.download_filename, "strip download");
        sink.save(strip, &self.opts.download_filename);
        Transition::Applied
    }

    fn commit(&mut self, shot: ShotIndex, image: CapturedImage) {
        tracing::info!(shot = shot.get(), "shot kept");
        self.shots.commit(shot, image);
    }

    fn composite_failed(&mut self, reason: String) -> Transition {
        tracing::warn!(%reason, "strip composite failed");
        self.composite_error = Some(reason);
        Transition::Failed
    }

    fn ignored(&self, op: &'static str) -> Transition {
        tracing::debug!(op, state = %self.state.kind(), "transition ignored");
        Transition::Ignored
    }

    fn enter(&mut self, next: SessionState) {
        self.disarm();
        self.state = next;
        if matches!(
            self.state,
            SessionState::Live {
                countdown: Some(_),
                ..
            }
        ) {
            self.arm();
        }
    }

    fn arm(&mut self) {
        let id = TickId(self.next_tick);
        self.next_tick += 1;
        self.scheduler.schedule(id, self.opts.tick_interval);
        self.armed = Some(id);
    }

    fn disarm(&mut self) {
        if let Some(id) = self.armed.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("frame", &self.frame)
            .field("shots", &self.shots.filled())
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/machine.rs"]
mod tests;
