use crate::stats::{Recorder, SimpleRecord};
use lifegrid::{CellSize, GameOfLife, RunState, Result, runner::Renderer};

/// A surface-less renderer that only logs periodic reports
pub struct HeadlessRender {
    stats: SimpleRecord,
}
impl HeadlessRender {
    pub fn new() -> Self {
        Self {
            stats: SimpleRecord::new(0),
        }
    }
}

impl Renderer for HeadlessRender {
    fn render(&mut self, game: &GameOfLife, _: CellSize, _: RunState) -> Result<()> {
        self.stats.record(game.generation(), game.alive_count());
        if self.stats.has_report() {
            tracing::info!("{}", self.stats.report());
        }
        Ok(())
    }
}
