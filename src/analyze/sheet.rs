//! Accumulate-and-cap helper used by every factor scorer.
//!
//! A scorer opens a `ScoreSheet` over the shared details sink, fires rules in
//! its fixed order, then calls `finish()` to get the capped factor value.
//! Detail strings land in the sink in the order rules fire.

/// Upper bound of every factor and of the combined score.
pub const MAX_SCORE: u32 = 100;

pub struct ScoreSheet<'d> {
    points: u32,
    details: &'d mut Vec<String>,
}

impl<'d> ScoreSheet<'d> {
    pub fn new(details: &'d mut Vec<String>) -> Self {
        Self { points: 0, details }
    }

    /// If `fired`, add `points` and append the formatted detail.
    /// The formatter only runs for rules that fire.
    pub fn rule<F>(&mut self, fired: bool, points: u32, detail: F) -> &mut Self
    where
        F: FnOnce() -> String,
    {
        if fired {
            self.points = self.points.saturating_add(points);
            self.details.push(detail());
        }
        self
    }

    /// Final factor value, clamped to `[0, 100]`.
    pub fn finish(&self) -> u8 {
        // MAX_SCORE fits in u8
        self.points.min(MAX_SCORE) as u8
    }
}
