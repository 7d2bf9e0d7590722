//! Touch state machine driving the dial.
//!
//! Every pointer event is processed to completion (offset, ticks, cursors, label,
//! notification) before the next one, so a draw always sees a consistent state.

use crate::cursor::CursorPair;
use crate::geometry::{self, Point};
use crate::label::DegreeLabel;
use crate::layout::{self, DEFAULT_CURSOR_GAP, Layout, Padding, TextMetrics};
use crate::theme::{Theme, ThemeColors};
use crate::ticks::TickRegistry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RANGE: i32 = 45;

/// Observer of drag cycles: start, any number of progress updates, stop.
pub trait WheelListener {
    fn on_start_tracking_touch(&mut self) {}
    fn on_progress_changed(&mut self, _progress: f64, _from_user: bool) {}
    fn on_stop_tracking_touch(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelOptions {
    /// Symmetric range `[-range, range]`.
    pub range: i32,
    pub progress: f64,
    pub theme: Theme,
    pub padding: Padding,
    pub cursor_gap: f64,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE,
            progress: 0.0,
            theme: Theme::default(),
            padding: Padding::default(),
            cursor_gap: DEFAULT_CURSOR_GAP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelState {
    /// Fractional while dragging, integral after a commit.
    pub rotation_degree: f64,
    pub min_degree: i32,
    pub max_degree: i32,
    pub total_offset_x: f64,
}

impl WheelState {
    fn new(range: i32) -> Self {
        let d = range.saturating_abs();
        Self {
            rotation_degree: 0.0,
            min_degree: -d,
            max_degree: d,
            total_offset_x: 0.0,
        }
    }

    fn clamp_degree(&self, degree: f64) -> f64 {
        degree.clamp(f64::from(self.min_degree), f64::from(self.max_degree))
    }

    fn at_limit(&self) -> bool {
        self.rotation_degree >= f64::from(self.max_degree)
            || self.rotation_degree <= f64::from(self.min_degree)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TouchState {
    Idle,
    Dragging { prev_x: f64 },
}

pub struct Wheel {
    state: WheelState,
    touch: TouchState,
    theme: Theme,
    colors: ThemeColors,
    padding: Padding,
    cursor_gap: f64,
    size: (f64, f64),
    layout: Option<Layout>,
    ticks: TickRegistry,
    cursors: Option<CursorPair>,
    label: DegreeLabel,
    label_origin: Point,
    metrics: Box<dyn TextMetrics>,
    listener: Option<Box<dyn WheelListener>>,
}

impl Wheel {
    pub fn new(options: WheelOptions, metrics: Box<dyn TextMetrics>) -> Self {
        let mut wheel = Self {
            state: WheelState::new(options.range),
            touch: TouchState::Idle,
            theme: options.theme,
            colors: options.theme.colors(),
            padding: options.padding,
            cursor_gap: options.cursor_gap,
            size: (0.0, 0.0),
            layout: None,
            ticks: TickRegistry::new(),
            cursors: None,
            label: DegreeLabel::default(),
            label_origin: Point::default(),
            metrics,
            listener: None,
        };
        wheel.set_progress(options.progress);
        wheel
    }

    pub fn set_listener(&mut self, listener: Box<dyn WheelListener>) {
        self.listener = Some(listener);
    }

    fn notify(&mut self, f: impl FnOnce(&mut Box<dyn WheelListener>)) {
        if let Some(listener) = self.listener.as_mut() {
            f(listener);
        }
    }

    /// Records the view size. A new size invalidates the layout and the ticks; they are
    /// resolved again by the next [`Wheel::prepare_frame`].
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.invalidate_layout();
    }

    fn invalidate_layout(&mut self) {
        self.layout = None;
        self.cursors = None;
        self.ticks.clear();
    }

    /// Resolves the layout on the first frame after a size change.
    pub fn prepare_frame(&mut self) {
        if !self.ticks.is_empty() {
            return;
        }
        let (width, height) = self.size;
        let Some(layout) = Layout::resolve(
            width,
            height,
            &self.padding,
            self.cursor_gap,
            self.metrics.as_ref(),
        ) else {
            return;
        };

        self.state.total_offset_x = geometry::degree_to_offset(
            self.state.rotation_degree,
            layout.draw_width(),
            self.state.max_degree,
        );
        self.ticks.rebuild(layout.projection, layout.tick_length);
        // bring the ticks in line with a non-zero starting offset
        self.ticks.apply_delta(
            layout
                .projection
                .offset_to_angle_delta(self.state.total_offset_x),
        );
        self.cursors = Some(layout.cursors());
        self.label_origin.y = layout.label_baseline;
        self.layout = Some(layout);
        self.sync_cursors();
        self.sync_label();
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.touch = TouchState::Dragging { prev_x: x };
        log::trace!("Pointer down at {x}");
        self.notify(|l| l.on_start_tracking_touch());
    }

    pub fn pointer_move(&mut self, x: f64) {
        let TouchState::Dragging { prev_x } = self.touch else {
            log::trace!("Ignoring move to {x} while idle");
            return;
        };
        self.touch = TouchState::Dragging { prev_x: x };
        let raw_delta = x - prev_x;

        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let width = layout.draw_width();
        let projection = layout.projection;
        let half = width / 2.0;

        self.state.total_offset_x = (self.state.total_offset_x + raw_delta).clamp(-half, half);
        self.state.rotation_degree = geometry::offset_to_degree(
            self.state.total_offset_x,
            width,
            self.state.min_degree,
            self.state.max_degree,
        );
        self.sync_cursors();
        self.sync_label();

        if self.state.at_limit() {
            // pinned at the limit: snap without rotating the ticks any further
            self.commit();
        } else {
            self.ticks
                .apply_delta(projection.offset_to_angle_delta(raw_delta));
        }
        log::trace!(
            "Move dx={raw_delta:.2} offset={:.2} degree={:.3}",
            self.state.total_offset_x,
            self.state.rotation_degree
        );
        let progress = self.state.rotation_degree;
        self.notify(|l| l.on_progress_changed(progress, false));
    }

    pub fn pointer_up(&mut self) {
        if self.touch == TouchState::Idle {
            return;
        }
        self.commit();
        self.touch = TouchState::Idle;
        log::debug!("Committed progress {}", self.state.rotation_degree);
        self.notify(|l| l.on_stop_tracking_touch());
    }

    /// Ends a drag interrupted by the toolkit; the current value is committed as on release.
    pub fn pointer_cancel(&mut self) {
        self.pointer_up();
    }

    /// Snaps the rotation to the nearest integer degree and realigns the offset with it.
    fn commit(&mut self) {
        let rounded = f64::from(geometry::round_half_away(self.state.rotation_degree));
        self.state.rotation_degree = self.state.clamp_degree(rounded);
        self.sync_offset();
        self.sync_cursors();
        self.sync_label();
    }

    fn sync_offset(&mut self) {
        let width = self.layout.as_ref().map_or(0.0, Layout::draw_width);
        self.state.total_offset_x =
            geometry::degree_to_offset(self.state.rotation_degree, width, self.state.max_degree);
    }

    fn sync_cursors(&mut self) {
        if let Some(cursors) = self.cursors.as_mut() {
            cursors.trans_x_to(self.state.total_offset_x);
        }
    }

    fn sync_label(&mut self) {
        self.label = DegreeLabel::from_degree(self.state.rotation_degree);
        // the baseline only changes with the layout
        if let Some(layout) = self.layout.as_ref() {
            self.label_origin.x = layout.label_x(&self.label, self.metrics.as_ref());
        }
    }

    /// Sets a symmetric range `[-|degree|, |degree|]`, re-clamps the current value and
    /// recomputes the offset against the current layout.
    pub fn set_range(&mut self, degree: i32) {
        let state = WheelState::new(degree);
        self.state.min_degree = state.min_degree;
        self.state.max_degree = state.max_degree;
        self.set_progress(self.state.rotation_degree);
    }

    pub fn range(&self) -> (i32, i32) {
        (self.state.min_degree, self.state.max_degree)
    }

    pub fn progress(&self) -> f64 {
        self.state.rotation_degree
    }

    pub fn set_progress(&mut self, degree: f64) {
        if !degree.is_finite() {
            log::warn!("Ignoring non-finite progress {degree}");
            return;
        }
        self.state.rotation_degree = self.state.clamp_degree(degree);
        self.sync_offset();
        self.sync_cursors();
        self.sync_label();
        if self.state.total_offset_x == 0.0
            && let Some(layout) = self.layout.as_ref()
        {
            self.ticks.rebuild(layout.projection, layout.tick_length);
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.colors = theme.colors();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        if self.padding != padding {
            self.padding = padding;
            self.invalidate_layout();
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn total_offset_x(&self) -> f64 {
        self.state.total_offset_x
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.touch, TouchState::Dragging { .. })
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn ticks(&self) -> &TickRegistry {
        &self.ticks
    }

    pub fn cursors(&self) -> Option<&CursorPair> {
        self.cursors.as_ref()
    }

    pub fn label(&self) -> &DegreeLabel {
        &self.label
    }

    pub fn label_origin(&self) -> Point {
        self.label_origin
    }

    pub fn preferred_height(&self) -> f64 {
        layout::preferred_height(
            &self.padding,
            self.cursor_gap,
            self.metrics.as_ref(),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::tests::FixedMetrics;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Event {
        Start,
        Progress(f64, bool),
        Stop,
    }

    #[derive(Default, Clone)]
    pub(crate) struct Recorder(pub Rc<RefCell<Vec<Event>>>);

    impl WheelListener for Recorder {
        fn on_start_tracking_touch(&mut self) {
            self.0.borrow_mut().push(Event::Start);
        }
        fn on_progress_changed(&mut self, progress: f64, from_user: bool) {
            self.0.borrow_mut().push(Event::Progress(progress, from_user));
        }
        fn on_stop_tracking_touch(&mut self) {
            self.0.borrow_mut().push(Event::Stop);
        }
    }

    pub(crate) const WIDTH: f64 = 400.0;

    pub(crate) fn wheel() -> (Wheel, Recorder) {
        let mut wheel = Wheel::new(WheelOptions::default(), Box::new(FixedMetrics));
        let recorder = Recorder::default();
        wheel.set_listener(Box::new(recorder.clone()));
        wheel.resize(WIDTH, 160.0);
        wheel.prepare_frame();
        (wheel, recorder)
    }

    fn drag(wheel: &mut Wheel, from: f64, steps: &[f64]) {
        wheel.pointer_down(from);
        let mut x = from;
        for dx in steps {
            x += dx;
            wheel.pointer_move(x);
        }
    }

    #[test]
    fn test_fresh_wheel_is_resolved_at_zero() {
        let (wheel, _) = wheel();
        assert_eq!(wheel.progress(), 0.0);
        assert_eq!(wheel.range(), (-45, 45));
        assert_eq!(wheel.ticks().len(), crate::ticks::TICK_COUNT);
        assert_eq!(wheel.label().as_str(), "0°");
        assert_eq!(wheel.cursors().map(|c| c.top.offset_x()), Some(0.0));
    }

    #[test]
    fn test_degree_stays_in_range_for_any_drag() {
        let (mut wheel, _) = wheel();
        wheel.pointer_down(200.0);
        let mut x = 200.0;
        for i in 0..400 {
            x += ((i * 37) % 101) as f64 - 50.0 + if i % 3 == 0 { 90.0 } else { -60.0 };
            wheel.pointer_move(x);
            let p = wheel.progress();
            assert!((-45.0..=45.0).contains(&p), "move {i}: {p}");
            assert!(wheel.total_offset_x().abs() <= WIDTH / 2.0);
        }
        wheel.pointer_up();
        assert!((-45.0..=45.0).contains(&wheel.progress()));
    }

    #[test]
    fn test_drag_right_to_the_limit() {
        let (mut wheel, recorder) = wheel();
        drag(&mut wheel, 100.0, &[WIDTH / 2.0]);
        assert_eq!(wheel.progress(), -45.0);
        assert_eq!(wheel.total_offset_x(), WIDTH / 2.0);
        assert_eq!(
            recorder.0.borrow().last(),
            Some(&Event::Progress(-45.0, false))
        );
        // pinned on the first move, so the resting window is still visible
        let visible: Vec<i32> = wheel
            .ticks()
            .front_facing()
            .map(|t| t.angle.to_degrees().round() as i32)
            .collect();
        assert_eq!(visible, (-11..=11).map(|i| i * 4).collect::<Vec<_>>());
    }

    #[test]
    fn test_pinned_drag_does_not_rotate_ticks() {
        let (mut wheel, _) = wheel();
        drag(&mut wheel, 100.0, &[WIDTH / 2.0]);
        let before: Vec<_> = wheel.ticks().iter().copied().collect();
        wheel.pointer_move(500.0);
        wheel.pointer_move(700.0);
        let after: Vec<_> = wheel.ticks().iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(wheel.progress(), -45.0);
    }

    #[test]
    fn test_partial_drag_rotates_ticks_and_cursors() {
        let (mut wheel, _) = wheel();
        drag(&mut wheel, 200.0, &[-10.0, -15.0, -25.0]);
        // -50 px of 200 px half width
        assert!((wheel.progress() - 11.25).abs() < 1e-9);
        assert_eq!(wheel.total_offset_x(), -50.0);
        let cursors = wheel.cursors().expect("cursors");
        assert_eq!(cursors.top.offset_x(), -50.0);
        assert_eq!(cursors.bottom.offset_x(), -50.0);
        assert_eq!(wheel.label().as_str(), "11°");
        let center = wheel.ticks().iter().nth(45).expect("tick 0");
        assert!(center.angle < 0.0);
        assert!(center.screen_x < 200.0);
    }

    #[test]
    fn test_release_commits_to_integer() {
        let (mut wheel, recorder) = wheel();
        drag(&mut wheel, 200.0, &[-50.0]);
        wheel.pointer_up();
        assert_eq!(wheel.progress(), 11.0);
        let expected = geometry::degree_to_offset(11.0, WIDTH, 45);
        assert_eq!(wheel.total_offset_x(), expected);
        assert_eq!(wheel.cursors().map(|c| c.top.offset_x()), Some(expected));
        assert!(!wheel.is_dragging());

        let events = recorder.0.borrow();
        assert_eq!(events.first(), Some(&Event::Start));
        assert_eq!(events.last(), Some(&Event::Stop));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_negative_commit_rounds_away_from_zero() {
        let (mut wheel, _) = wheel();
        // 4.5° to the right
        drag(&mut wheel, 200.0, &[20.0]);
        assert!((wheel.progress() + 4.5).abs() < 1e-9);
        wheel.pointer_up();
        assert_eq!(wheel.progress(), -5.0);
    }

    #[test]
    fn test_set_progress_without_drag() {
        let (mut wheel, recorder) = wheel();
        let pristine: Vec<_> = wheel.ticks().iter().copied().collect();
        wheel.ticks.apply_delta(0.02);
        let rotated: Vec<_> = wheel.ticks().iter().copied().collect();
        wheel.set_progress(30.0);
        assert_eq!(wheel.progress(), 30.0);
        assert!(wheel.total_offset_x() < 0.0);
        // not rebuilt: the rotation applied above is still there
        assert_eq!(wheel.ticks().iter().copied().collect::<Vec<_>>(), rotated);
        assert_ne!(rotated, pristine);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_set_progress_zero_realigns_ticks() {
        let (mut wheel, _) = wheel();
        let pristine: Vec<_> = wheel.ticks().iter().copied().collect();
        drag(&mut wheel, 200.0, &[-13.0, -7.0, 31.0]);
        wheel.pointer_up();
        assert_ne!(pristine, wheel.ticks().iter().copied().collect::<Vec<_>>());
        wheel.set_progress(0.0);
        assert_eq!(wheel.total_offset_x(), 0.0);
        assert_eq!(pristine, wheel.ticks().iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn test_set_range_recomputes_offset_in_place() {
        let (mut wheel, recorder) = wheel();
        wheel.set_progress(20.0);
        wheel.set_range(30);
        let expected = geometry::degree_to_offset(20.0, WIDTH, 30);
        assert_eq!(wheel.progress(), 20.0);
        assert_eq!(wheel.total_offset_x(), expected);
        assert!(wheel.layout().is_some());
        assert_eq!(wheel.ticks().len(), crate::ticks::TICK_COUNT);
        assert_eq!(wheel.cursors().map(|c| c.bottom.offset_x()), Some(expected));

        // a drag right away is tracked against the new range
        drag(&mut wheel, 200.0, &[-10.0]);
        let progress = -((expected - 10.0) * 2.0 / WIDTH) * 30.0;
        assert!((wheel.progress() - progress).abs() < 1e-9);
        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[Event::Start, Event::Progress(wheel.progress(), false)]
        );
    }

    #[test]
    fn test_tick_length_does_not_depend_on_range() {
        let mut narrow = Wheel::new(
            WheelOptions {
                range: 0,
                ..Default::default()
            },
            Box::new(FixedMetrics),
        );
        narrow.resize(WIDTH, 160.0);
        narrow.prepare_frame();
        let (wide, _) = wheel();
        assert_eq!(
            narrow.layout().map(|l| l.tick_length),
            wide.layout().map(|l| l.tick_length)
        );
        assert_eq!(narrow.preferred_height(), wide.preferred_height());
    }

    #[test]
    fn test_cancel_commits_like_release() {
        let (mut wheel, recorder) = wheel();
        drag(&mut wheel, 200.0, &[-50.0]);
        wheel.pointer_cancel();
        assert_eq!(wheel.progress(), 11.0);
        assert_eq!(
            wheel.total_offset_x(),
            geometry::degree_to_offset(11.0, WIDTH, 45)
        );
        assert!(!wheel.is_dragging());
        assert_eq!(recorder.0.borrow().last(), Some(&Event::Stop));
    }

    #[test]
    fn test_second_down_restarts_tracking() {
        let (mut wheel, recorder) = wheel();
        drag(&mut wheel, 200.0, &[-20.0]);
        assert!((wheel.progress() - 4.5).abs() < 1e-9);
        // the next delta is measured from 300, not from 180
        drag(&mut wheel, 300.0, &[-10.0]);
        assert_eq!(wheel.total_offset_x(), -30.0);
        assert!((wheel.progress() - 6.75).abs() < 1e-9);
        let events = recorder.0.borrow();
        assert_eq!(events.len(), 4);
        assert_eq!(events[2], Event::Start);
    }

    #[test]
    fn test_set_theme_swaps_colors() {
        let (mut wheel, _) = wheel();
        assert_eq!(wheel.theme(), Theme::Dark);
        assert_eq!(wheel.colors(), &Theme::Dark.colors());
        wheel.set_theme(Theme::Light);
        assert_eq!(wheel.theme(), Theme::Light);
        assert_eq!(wheel.colors(), &Theme::Light.colors());
        assert_ne!(wheel.colors().background, Theme::Dark.colors().background);
    }

    #[test]
    fn test_set_padding_moves_bounds() {
        let (mut wheel, _) = wheel();
        wheel.set_progress(10.0);
        wheel.set_padding(Padding::uniform(20.0));
        assert!(wheel.layout().is_none());
        assert!(wheel.ticks().is_empty());
        wheel.prepare_frame();
        let layout = wheel.layout().expect("layout");
        assert_eq!(layout.bounds, geometry::Rect::new(20.0, 20.0, 380.0, 140.0));
        assert_eq!(
            wheel.total_offset_x(),
            geometry::degree_to_offset(10.0, 360.0, 45)
        );
    }

    #[test]
    fn test_commit_round_trip() {
        let (mut wheel, _) = wheel();
        for d in -45..=45 {
            wheel.set_progress(f64::from(d));
            let back = geometry::offset_to_degree(wheel.total_offset_x(), WIDTH, -45, 45);
            assert!((back - f64::from(d)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_out_of_range_inputs_are_normalized() {
        let (mut wheel, _) = wheel();
        wheel.set_progress(120.0);
        assert_eq!(wheel.progress(), 45.0);
        wheel.set_progress(f64::NAN);
        assert_eq!(wheel.progress(), 45.0);
        wheel.set_range(-30);
        assert_eq!(wheel.range(), (-30, 30));
        assert_eq!(wheel.progress(), 30.0);
        wheel.set_range(i32::MIN);
        assert_eq!(wheel.range(), (-i32::MAX, i32::MAX));
    }

    #[test]
    fn test_zero_range_pins_everything() {
        let mut wheel = Wheel::new(
            WheelOptions {
                range: 0,
                ..Default::default()
            },
            Box::new(FixedMetrics),
        );
        wheel.resize(WIDTH, 160.0);
        wheel.prepare_frame();
        drag(&mut wheel, 200.0, &[-40.0]);
        assert_eq!(wheel.progress(), 0.0);
        assert_eq!(wheel.total_offset_x(), 0.0);
    }

    #[test]
    fn test_events_before_layout_are_harmless() {
        let mut wheel = Wheel::new(WheelOptions::default(), Box::new(FixedMetrics));
        let recorder = Recorder::default();
        wheel.set_listener(Box::new(recorder.clone()));
        drag(&mut wheel, 0.0, &[30.0, 30.0]);
        wheel.pointer_up();
        assert_eq!(wheel.progress(), 0.0);
        assert!(wheel.ticks().is_empty());
        assert_eq!(recorder.0.borrow().as_slice(), &[Event::Start, Event::Stop]);
    }

    #[test]
    fn test_idle_moves_are_ignored() {
        let (mut wheel, recorder) = wheel();
        wheel.pointer_move(50.0);
        wheel.pointer_up();
        assert_eq!(wheel.progress(), 0.0);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_initial_progress_applies_at_first_layout() {
        let mut wheel = Wheel::new(
            WheelOptions {
                progress: 20.0,
                ..Default::default()
            },
            Box::new(FixedMetrics),
        );
        assert_eq!(wheel.total_offset_x(), 0.0);
        wheel.resize(WIDTH, 160.0);
        wheel.prepare_frame();
        assert_eq!(wheel.total_offset_x(), geometry::degree_to_offset(20.0, WIDTH, 45));
        assert_eq!(wheel.label().as_str(), "20°");
        let center = wheel.ticks().iter().nth(45).expect("tick 0");
        assert!(center.screen_x < 200.0);
    }

    #[test]
    fn test_resize_invalidates_layout() {
        let (mut wheel, _) = wheel();
        wheel.set_progress(10.0);
        wheel.resize(600.0, 160.0);
        assert!(wheel.layout().is_none());
        assert!(wheel.ticks().is_empty());
        wheel.prepare_frame();
        assert_eq!(wheel.layout().map(Layout::draw_width), Some(600.0));
        assert_eq!(wheel.total_offset_x(), geometry::degree_to_offset(10.0, 600.0, 45));
    }
}
