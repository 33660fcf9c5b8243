mod schedule;

pub use self::schedule::{
    Cadence, DEFAULT_INTERVAL, FRAME_PERIOD, Scheduler, TickHandle, TimerScheduler,
};
use crate::{
    Result,
    engine::{Boundary, GameOfLife},
    pos::{Coord, Dims},
};
use rand::{SeedableRng, rngs::StdRng};

/// Draws the simulation onto a surface
pub trait Renderer {
    fn render(&mut self, game: &GameOfLife, cell_size: CellSize, state: RunState) -> Result<()>;
}

/// Size of one cell in surface units (pixels, terminal columns, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    width: u16,
    height: u16,
}
impl CellSize {
    /// Zero sizes are raised to 1
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn width(self) -> u16 {
        self.width
    }
    #[inline]
    pub fn height(self) -> u16 {
        self.height
    }

    /// The cell under a surface-relative point: `floor(x / width)`,
    /// `floor(y / height)`
    #[inline]
    pub fn to_coord(self, x: u16, y: u16) -> Coord {
        Coord {
            row: usize::from(y / self.height),
            col: usize::from(x / self.width),
        }
    }

    /// Number of whole cells fitting on a surface of `width x height`
    pub fn fit(self, width: u16, height: u16) -> Dims {
        Dims::new(
            usize::from(height / self.height),
            usize::from(width / self.width),
        )
    }
}
impl Default for CellSize {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Reset,
}

/// Key bindings for the three controls
///
/// An unbound control is unavailable; pressing its key does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: Option<char>,
    pub stop: Option<char>,
    pub reset: Option<char>,
}
impl Controls {
    pub fn lookup(&self, key: char) -> Option<Control> {
        [
            (self.start, Control::Start),
            (self.stop, Control::Stop),
            (self.reset, Control::Reset),
        ]
        .into_iter()
        .find_map(|(bound, control)| (bound == Some(key)).then_some(control))
    }

    pub fn unbind(&mut self, control: Control) {
        match control {
            Control::Start => self.start = None,
            Control::Stop => self.stop = None,
            Control::Reset => self.reset = None,
        }
    }
}
impl Default for Controls {
    fn default() -> Self {
        Self {
            start: Some('s'),
            stop: Some('p'),
            reset: Some('r'),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub dims: Dims,
    pub alive_probability: f64,
    pub boundary: Boundary,
    pub cell_size: CellSize,
    pub controls: Controls,
    /// Seed for reproducible runs; [`None`] seeds from the OS
    pub seed: Option<u64>,
}
impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            dims: Dims::square(125),
            alive_probability: 0.3,
            boundary: Boundary::Toroidal,
            cell_size: CellSize::default(),
            controls: Controls::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Owns one simulation and drives it from a [`Scheduler`]
///
/// All operations run on the caller's thread; the host serializes ticks
/// and input so they never interleave.
pub struct Runner<S, R> {
    config: RunnerConfig,
    game: GameOfLife,
    rng: StdRng,
    scheduler: S,
    renderer: R,
    in_flight: Option<TickHandle>,
}

impl<S: Scheduler, R: Renderer> Runner<S, R> {
    pub fn new(config: RunnerConfig, scheduler: S, renderer: R) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let game = GameOfLife::random(
            config.dims,
            config.alive_probability,
            config.boundary,
            &mut rng,
        );
        tracing::debug!(
            rows = config.dims.rows,
            cols = config.dims.cols,
            alive = game.alive_count(),
            boundary = ?config.boundary,
            "seeded grid"
        );
        Self {
            config,
            game,
            rng,
            scheduler,
            renderer,
            in_flight: None,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        match self.in_flight {
            Some(_) => RunState::Running,
            None => RunState::Stopped,
        }
    }

    /// Begins the tick cadence; a no-op while already running
    pub fn start(&mut self) {
        if self.in_flight.is_some() {
            tracing::trace!("start ignored, already running");
            return;
        }
        let handle = self.scheduler.schedule();
        tracing::debug!(handle = handle.id(), cadence = ?self.scheduler.cadence(), "started");
        self.in_flight = Some(handle);
    }

    /// Cancels the pending tick; a no-op while stopped
    pub fn stop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            self.scheduler.cancel(handle);
            tracing::debug!(
                handle = handle.id(),
                generation = self.game.generation(),
                "stopped"
            );
        }
    }

    /// Stops, reseeds the grid and renders it once
    pub fn reset(&mut self) -> Result<()> {
        self.stop();
        self.game.reseed(self.config.alive_probability, &mut self.rng);
        tracing::debug!(alive = self.game.alive_count(), "reset");
        self.render()
    }

    /// Runs one generation for a fired `handle` and renders it
    ///
    /// Handles other than the in-flight one belong to a cancelled cadence
    /// and are ignored.
    pub fn tick(&mut self, handle: TickHandle) -> Result<()> {
        if self.in_flight != Some(handle) {
            tracing::trace!(handle = handle.id(), "stale tick ignored");
            return Ok(());
        }

        self.game.next_generation();
        if self.scheduler.cadence() == Cadence::Frame {
            self.in_flight = Some(self.scheduler.schedule());
        }
        self.render()
    }

    /// Toggles the cell under a surface-relative point and re-renders
    ///
    /// Points beyond the grid are clamped onto its last row/col.
    pub fn handle_pointer_click(&mut self, x: u16, y: u16) -> Result<()> {
        let dims = self.game.grid().dims();
        if dims.is_empty() {
            return self.render();
        }
        let coord = dims.clamp(self.config.cell_size.to_coord(x, y));
        self.game.toggle(coord);
        tracing::trace!(x, y, row = coord.row, col = coord.col, "toggled cell");
        self.render()
    }

    /// Dispatches a control key; returns whether the key was bound
    pub fn press(&mut self, key: char) -> Result<bool> {
        let Some(control) = self.config.controls.lookup(key) else {
            return Ok(false);
        };
        match control {
            Control::Start => self.start(),
            Control::Stop => self.stop(),
            Control::Reset => self.reset()?,
        }
        Ok(true)
    }

    pub fn render(&mut self) -> Result<()> {
        let state = self.state();
        self.renderer
            .render(&self.game, self.config.cell_size, state)
    }

    #[inline]
    pub fn game(&self) -> &GameOfLife {
        &self.game
    }
    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[derive(Default)]
    struct RecordingScheduler {
        cadence: Option<Cadence>,
        scheduled: Vec<TickHandle>,
        cancelled: Vec<TickHandle>,
    }
    impl RecordingScheduler {
        fn frames() -> Self {
            Self {
                cadence: Some(Cadence::Frame),
                ..Self::default()
            }
        }
        fn active(&self) -> usize {
            self.scheduled
                .iter()
                .filter(|h| !self.cancelled.contains(h))
                .count()
        }
    }
    impl Scheduler for RecordingScheduler {
        fn cadence(&self) -> Cadence {
            self.cadence.unwrap_or(Cadence::Interval)
        }
        fn schedule(&mut self) -> TickHandle {
            let handle = TickHandle::new(self.scheduled.len() as u64 + 1);
            self.scheduled.push(handle);
            handle
        }
        fn cancel(&mut self, handle: TickHandle) {
            self.cancelled.push(handle);
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(Grid, RunState)>,
    }
    impl Renderer for RecordingRenderer {
        fn render(&mut self, game: &GameOfLife, _: CellSize, state: RunState) -> Result<()> {
            self.frames.push((game.grid().clone(), state));
            Ok(())
        }
    }

    fn config() -> RunnerConfig {
        RunnerConfig {
            dims: Dims::new(8, 10),
            cell_size: CellSize::new(10, 10),
            seed: Some(11),
            ..RunnerConfig::default()
        }
    }

    fn runner() -> Runner<RecordingScheduler, RecordingRenderer> {
        Runner::new(config(), RecordingScheduler::default(), RecordingRenderer::default())
    }

    #[test]
    fn start_twice_schedules_once() {
        let mut runner = runner();

        runner.start();
        runner.start();

        assert_eq!(runner.scheduler().scheduled.len(), 1);
        assert_eq!(runner.state(), RunState::Running);
    }

    #[test]
    fn stop_cancels_and_is_idempotent() {
        let mut runner = runner();
        runner.stop();
        assert!(runner.scheduler().cancelled.is_empty());

        runner.start();
        runner.stop();
        runner.stop();

        assert_eq!(runner.scheduler().cancelled.len(), 1);
        assert_eq!(runner.scheduler().active(), 0);
        assert_eq!(runner.state(), RunState::Stopped);
    }

    #[test]
    fn tick_advances_and_renders() {
        let mut runner = runner();
        runner.start();
        let handle = runner.scheduler().scheduled[0];
        let expected = crate::engine::next_generation(runner.game().grid(), Boundary::Toroidal);

        runner.tick(handle).unwrap();

        assert_eq!(runner.game().generation(), 1);
        assert_eq!(runner.renderer.frames.len(), 1);
        assert_eq!(runner.renderer.frames[0], (expected, RunState::Running));
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut runner = runner();
        runner.start();
        let handle = runner.scheduler().scheduled[0];
        runner.stop();

        runner.tick(handle).unwrap();

        assert_eq!(runner.game().generation(), 0);
        assert!(runner.renderer.frames.is_empty());
    }

    #[test]
    fn frame_cadence_rearms_each_tick() {
        let mut runner = Runner::new(
            config(),
            RecordingScheduler::frames(),
            RecordingRenderer::default(),
        );
        runner.start();
        for _ in 0..3 {
            let handle = *runner.scheduler().scheduled.last().unwrap();
            runner.tick(handle).unwrap();
        }

        assert_eq!(runner.scheduler().scheduled.len(), 4);
        assert_eq!(runner.game().generation(), 3);
        assert_eq!(runner.state(), RunState::Running);
    }

    #[test]
    fn interval_cadence_does_not_rearm() {
        let mut runner = runner();
        runner.start();
        let handle = runner.scheduler().scheduled[0];
        runner.tick(handle).unwrap();
        runner.tick(handle).unwrap();

        assert_eq!(runner.scheduler().scheduled.len(), 1);
        assert_eq!(runner.game().generation(), 2);
    }

    #[test]
    fn reset_stops_reseeds_and_renders() {
        let mut runner = runner();
        runner.start();
        let handle = runner.scheduler().scheduled[0];
        runner.tick(handle).unwrap();

        runner.reset().unwrap();

        assert_eq!(runner.state(), RunState::Stopped);
        assert_eq!(runner.game().generation(), 0);
        assert_eq!(runner.scheduler().active(), 0);
        let (grid, state) = runner.renderer.frames.last().unwrap();
        assert_eq!(grid, runner.game().grid());
        assert_eq!(*state, RunState::Stopped);
    }

    #[test]
    fn reset_while_stopped_ends_stopped() {
        let mut runner = runner();

        runner.reset().unwrap();

        assert_eq!(runner.state(), RunState::Stopped);
        assert_eq!(runner.renderer.frames.len(), 1);
    }

    #[test]
    fn click_toggles_cell_under_pointer() {
        let mut runner = runner();
        let before = runner.game().grid().clone();

        // x maps to col, y maps to row
        runner.handle_pointer_click(37, 52).unwrap();

        let target = Coord::new(5, 3);
        let after = runner.game().grid();
        assert_ne!(after.get(target), before.get(target));
        let mut restored = after.clone();
        restored.toggle(target);
        assert_eq!(restored, before);
        assert_eq!(runner.renderer.frames.len(), 1);
    }

    #[test]
    fn click_past_edge_is_clamped() {
        let mut runner = runner();
        let before = runner.game().grid().clone();

        runner.handle_pointer_click(500, 500).unwrap();

        let corner = Coord::new(7, 9);
        assert_ne!(runner.game().grid().get(corner), before.get(corner));
    }

    #[test]
    fn click_on_empty_grid_still_renders() {
        let config = RunnerConfig {
            dims: Dims::new(0, 4),
            ..config()
        };
        let mut runner = Runner::new(config, RecordingScheduler::default(), RecordingRenderer::default());

        runner.handle_pointer_click(3, 3).unwrap();

        assert_eq!(runner.renderer.frames.len(), 1);
        assert_eq!(runner.game().alive_count(), 0);
    }

    #[test]
    fn zero_cell_size_is_raised_to_one() {
        let size = CellSize::new(0, 0);
        assert_eq!((size.width(), size.height()), (1, 1));
        assert_eq!(size.to_coord(3, 5), Coord::new(5, 3));
        assert_eq!(size.fit(4, 2), Dims::new(2, 4));

        let config = RunnerConfig {
            cell_size: CellSize::new(0, 1),
            ..config()
        };
        let mut runner = Runner::new(config, RecordingScheduler::default(), RecordingRenderer::default());
        let before = runner.game().grid().clone();

        runner.handle_pointer_click(3, 3).unwrap();

        let target = Coord::new(3, 3);
        assert_ne!(runner.game().grid().get(target), before.get(target));
    }

    #[test]
    fn unbound_control_is_unavailable() {
        let mut config = config();
        config.controls.unbind(Control::Start);
        let mut runner = Runner::new(config, RecordingScheduler::default(), RecordingRenderer::default());

        assert!(!runner.press('s').unwrap());
        assert_eq!(runner.state(), RunState::Stopped);
        assert!(runner.scheduler().scheduled.is_empty());

        assert!(runner.press('r').unwrap());
        assert!(!runner.press('z').unwrap());
    }

    #[test]
    fn bound_controls_drive_state() {
        let mut runner = runner();

        assert!(runner.press('s').unwrap());
        assert_eq!(runner.state(), RunState::Running);
        assert!(runner.press('p').unwrap());
        assert_eq!(runner.state(), RunState::Stopped);
    }

    #[test]
    fn seeded_runners_agree() {
        let a = runner();
        let b = runner();

        assert_eq!(a.game().grid(), b.game().grid());
    }
}
