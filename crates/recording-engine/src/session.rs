//! Recording session management.
//!
//! The session owns the loaded floor plan, the loaded video (which doubles as
//! the playback clock) and every recorded path. Operations invoked outside
//! their valid state are ignored rather than treated as errors: pressing
//! fast-forward at the end of a video or saving an empty path are ordinary
//! user actions. Only loading can fail, and a failed load changes nothing.

use mondrian_common::clock::{fix_decimals, time_label, SAMPLE_TIME_DECIMALS};
use mondrian_common::config::SessionDefaults;
use mondrian_common::error::{MondrianError, MondrianResult};
use mondrian_media_core::{ClockSource, FloorPlan, PointerSource};
use mondrian_path_model::{export_file_name, Path, PathStore, PathTable, Point};

use crate::export::{ExportRecord, ExportSink};
use crate::sampling::SamplingPolicy;

/// Parameters for a recording session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Seconds moved by rewind and fast-forward.
    pub jump_interval_secs: f64,

    /// When a tick becomes a recorded point.
    pub sampling: SamplingPolicy,

    /// Stroke weight for new paths.
    pub stroke_weight: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&SessionDefaults::default())
    }
}

impl From<&SessionDefaults> for SessionConfig {
    fn from(defaults: &SessionDefaults) -> Self {
        Self {
            jump_interval_secs: defaults.jump_interval_secs,
            sampling: SamplingPolicy::from(defaults),
            stroke_weight: defaults.stroke_weight,
        }
    }
}

/// Coarse state of a recording session. The info overlay is tracked
/// separately and can show in any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Floor plan, video, or both still missing.
    Idle,
    /// Both sources loaded, not recording.
    Ready,
    /// Video playing and pointer being sampled.
    Recording,
}

/// What the rendering shell should repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Redraw {
    /// The current video frame and time label.
    Frame,
    /// Floor plan, video frame and every path.
    Full,
}

/// A recording session that keeps the video clock and path data in step.
pub struct RecordingSession<V> {
    config: SessionConfig,
    floor_plan: Option<FloorPlan>,
    video: Option<V>,
    store: PathStore,
    is_recording: bool,
    is_info_showing: bool,
    pending_redraw: Option<Redraw>,
}

impl<V: ClockSource> RecordingSession<V> {
    /// Create an idle session. The info overlay starts visible.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            floor_plan: None,
            video: None,
            store: PathStore::new(config.stroke_weight),
            is_recording: false,
            is_info_showing: true,
            pending_redraw: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        if !self.all_loaded() {
            SessionState::Idle
        } else if self.is_recording {
            SessionState::Recording
        } else {
            SessionState::Ready
        }
    }

    // Loading

    /// Accept a resolved floor plan, or report why it could not be resolved.
    ///
    /// On failure nothing changes and the error is returned to the caller.
    pub fn load_floor_plan(&mut self, resolved: MondrianResult<FloorPlan>) -> MondrianResult<()> {
        let plan = resolved.map_err(|e| {
            tracing::warn!(error = %e, "Floor plan failed to load");
            e
        })?;

        tracing::info!(
            source = %plan.source().display(),
            width = plan.width(),
            height = plan.height(),
            "New floor plan loaded"
        );
        self.floor_plan = Some(plan);
        self.on_sources_changed();
        Ok(())
    }

    /// Accept a resolved video, or report why it could not be resolved.
    ///
    /// A video without a positive, finite duration is rejected. On failure
    /// nothing changes, including any previously loaded video.
    pub fn load_video(&mut self, resolved: MondrianResult<V>) -> MondrianResult<()> {
        let video = resolved
            .and_then(|video| {
                let duration = video.duration();
                if duration.is_finite() && duration > 0.0 {
                    Ok(video)
                } else {
                    Err(MondrianError::load_failure(format!(
                        "Video has no usable duration ({duration})"
                    )))
                }
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "Video failed to load");
                e
            })?;

        tracing::info!(duration_secs = video.duration(), "New video loaded");
        self.video = Some(video);
        self.on_sources_changed();
        Ok(())
    }

    /// Paths recorded against the previous sources no longer line up with
    /// the new ones.
    fn on_sources_changed(&mut self) {
        self.store.clear_all();
        if let Some(video) = self.video.as_mut() {
            video.stop();
        }
        self.is_recording = false;
        self.request_redraw(Redraw::Full);
        if self.all_loaded() {
            tracing::info!("Floor plan and video loaded; session ready");
        }
    }

    // Transport

    /// Start recording from Ready, or pause from Recording.
    pub fn toggle_play_pause(&mut self) -> bool {
        if !self.all_loaded() {
            tracing::debug!("Play/pause ignored: sources not loaded");
            return false;
        }
        let Some(video) = self.video.as_mut() else {
            return false;
        };
        if self.is_recording {
            video.pause();
            self.is_recording = false;
            tracing::info!(time = video.current_time(), "Recording paused");
        } else {
            video.play();
            self.is_recording = true;
            tracing::info!(time = video.current_time(), "Recording started");
        }
        true
    }

    /// Advance one frame while recording. Returns whether a point was added.
    pub fn tick<P: PointerSource + ?Sized>(&mut self, pointer: &P) -> bool {
        if self.state() != SessionState::Recording {
            return false;
        }
        let (Some(video), Some(plan)) = (self.video.as_ref(), self.floor_plan.as_ref()) else {
            return false;
        };

        let clock_time = video.current_time();
        let (width, height) = (plan.width_f64(), plan.height_f64());
        self.request_redraw(Redraw::Frame);

        if !self
            .config
            .sampling
            .should_sample(self.store.current(), pointer.moved(), clock_time)
        {
            return false;
        }

        let (x, y) = pointer.scale_to_reference(width, height);
        let t = fix_decimals(clock_time, SAMPLE_TIME_DECIMALS);
        self.store.add_point(Point::new(x, y, t))
    }

    /// Stop the video, discard the current path and redraw everything.
    /// Completed paths are kept.
    pub fn reset(&mut self) -> bool {
        if !self.all_loaded() {
            tracing::debug!("Reset ignored: sources not loaded");
            return false;
        }
        if let Some(video) = self.video.as_mut() {
            video.stop();
        }
        self.is_recording = false;
        self.store.clear_current();
        self.request_redraw(Redraw::Full);
        tracing::info!("Current recording reset");
        true
    }

    /// Step back one jump interval from the last recorded point.
    ///
    /// Recording is paused first, the video seeks to the target, and every
    /// current-path point after the target is dropped. Returns the target, or
    /// `None` when there was nothing to rewind.
    pub fn rewind(&mut self) -> Option<f64> {
        let Some(last) = self.store.current().last_time() else {
            tracing::debug!("Rewind ignored: current path is empty");
            return None;
        };
        self.video.as_ref()?;

        let target = last - self.config.jump_interval_secs;
        if self.is_recording {
            self.toggle_play_pause();
        }
        if let Some(video) = self.video.as_mut() {
            video.seek(target);
        }
        let removed = self.store.rewind_to(target);
        self.request_redraw(Redraw::Full);

        tracing::info!(target, removed, "Rewound recording");
        Some(target)
    }

    /// Jump the video forward one interval. Allowed only after playback has
    /// started and while a full interval remains before the end. No points
    /// are created for the skipped time.
    pub fn fast_forward(&mut self) -> bool {
        let jump = self.config.jump_interval_secs;
        let Some(video) = self.video.as_mut() else {
            return false;
        };

        let now = video.current_time();
        if !(now > 0.0 && now < video.duration() - jump) {
            tracing::debug!(now, duration = video.duration(), "Fast-forward ignored");
            return false;
        }

        video.jump(jump);
        tracing::info!(from = now, to = video.current_time(), "Fast-forwarded");
        self.request_redraw(Redraw::Frame);
        true
    }

    /// Export the current path through `sink` as `Path_<index>.csv`.
    ///
    /// With an empty current path (or sources missing) this does nothing and
    /// returns `Ok(None)`. If the sink fails, the error is returned and the
    /// session is left exactly as it was.
    pub fn export(&mut self, sink: &mut dyn ExportSink) -> MondrianResult<Option<ExportRecord>> {
        if !self.all_loaded() || self.store.current().is_empty() {
            tracing::debug!("Export ignored: nothing recorded");
            return Ok(None);
        }

        let index = self.store.next_file_index();
        let file_name = export_file_name(index);
        let table = PathTable::from_path(self.store.current());
        let location = sink.save_table(&file_name, &table)?;

        self.store.commit_current();
        if let Some(video) = self.video.as_mut() {
            video.pause();
        }
        self.is_recording = false;
        self.request_redraw(Redraw::Full);

        tracing::info!(index, rows = table.len(), file = %file_name, "Path exported");
        Ok(Some(ExportRecord {
            index,
            file_name,
            rows: table.len(),
            location,
        }))
    }

    /// Show or hide the info overlay. Hiding it with both sources loaded
    /// first requests a full redraw so the scene underneath is current.
    pub fn toggle_info_overlay(&mut self) {
        if self.is_info_showing && self.all_loaded() {
            self.request_redraw(Redraw::Full);
        }
        self.is_info_showing = !self.is_info_showing;
    }

    // Queries

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn is_info_showing(&self) -> bool {
        self.is_info_showing
    }

    pub fn is_floor_plan_loaded(&self) -> bool {
        self.floor_plan.is_some()
    }

    pub fn is_video_loaded(&self) -> bool {
        self.video.is_some()
    }

    pub fn all_loaded(&self) -> bool {
        self.is_floor_plan_loaded() && self.is_video_loaded()
    }

    pub fn floor_plan(&self) -> Option<&FloorPlan> {
        self.floor_plan.as_ref()
    }

    pub fn video(&self) -> Option<&V> {
        self.video.as_ref()
    }

    /// Mutable access for the shell that drives playback (advancing a
    /// simulated clock, for instance).
    pub fn video_mut(&mut self) -> Option<&mut V> {
        self.video.as_mut()
    }

    /// The path being recorded.
    pub fn current_path(&self) -> &Path {
        self.store.current()
    }

    /// Exported paths, in export order.
    pub fn completed_paths(&self) -> &[Path] {
        self.store.completed()
    }

    /// Index the next export will use.
    pub fn next_file_index(&self) -> u32 {
        self.store.next_file_index()
    }

    /// Label for the video's current time, if a video is loaded.
    pub fn time_label(&self) -> Option<String> {
        self.video.as_ref().map(|v| time_label(v.current_time()))
    }

    /// Take the pending repaint request, if any.
    pub fn take_redraw(&mut self) -> Option<Redraw> {
        self.pending_redraw.take()
    }

    fn request_redraw(&mut self, redraw: Redraw) {
        self.pending_redraw = Some(self.pending_redraw.map_or(redraw, |p| p.max(redraw)));
    }
}

impl<V: ClockSource> Default for RecordingSession<V> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
