//! Startup loading sequence: a timed progress bar that completes exactly once.

use std::time::Duration;

pub const TICK: Duration = Duration::from_millis(50);
pub const STEP: u8 = 2;
/// Pause between reaching 100% and completing.
pub const COMPLETE_DELAY: Duration = Duration::from_millis(500);

pub const TITLE: &str = "Explorador Espacial";
pub const SUBTITLE: &str = "Preparando tu viaje por las estrellas";

pub const PHASES: [&str; 5] = [
    "Inicializando sistemas...",
    "Cargando naves espaciales...",
    "Configurando motores de propulsión...",
    "Estableciendo comunicaciones...",
    "Preparando exploración...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingEvent {
    Progress(u8),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Ticking { since_tick: Duration },
    Finishing { waited: Duration },
    Done,
    Cancelled,
}

#[derive(Debug)]
pub struct LoadingSequence {
    progress: u8,
    stage: Stage,
    elapsed: Duration,
}

impl Default for LoadingSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingSequence {
    pub fn new() -> Self {
        Self {
            progress: 0,
            stage: Stage::Ticking { since_tick: Duration::ZERO },
            elapsed: Duration::ZERO,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Status line for the current progress.
    pub fn phase_text(&self) -> &'static str {
        let index = (self.progress / 20) as usize;
        PHASES[index.min(PHASES.len() - 1)]
    }

    /// Time spent on the loading screen, for its animations.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Done | Stage::Cancelled)
    }

    /// Stop the sequence. Nothing is emitted afterwards.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            log::debug!("Loading cancelled at {}%", self.progress);
        }
        self.stage = Stage::Cancelled;
    }

    /// Advance by one frame's worth of time, returning what happened in order.
    /// Long frames run every tick they cover.
    pub fn advance(&mut self, dt: Duration) -> Vec<LoadingEvent> {
        let mut events = Vec::new();
        if self.is_finished() {
            return events;
        }
        self.elapsed += dt;
        let mut remaining = dt;

        loop {
            match self.stage {
                Stage::Ticking { since_tick } => {
                    let since_tick = since_tick + remaining;
                    if since_tick < TICK {
                        self.stage = Stage::Ticking { since_tick };
                        break;
                    }
                    remaining = since_tick - TICK;
                    self.progress = (self.progress + STEP).min(100);
                    events.push(LoadingEvent::Progress(self.progress));
                    self.stage = if self.progress >= 100 {
                        Stage::Finishing { waited: Duration::ZERO }
                    } else {
                        Stage::Ticking { since_tick: Duration::ZERO }
                    };
                }
                Stage::Finishing { waited } => {
                    let waited = waited + remaining;
                    if waited < COMPLETE_DELAY {
                        self.stage = Stage::Finishing { waited };
                        break;
                    }
                    self.stage = Stage::Done;
                    events.push(LoadingEvent::Complete);
                    log::info!("Loading complete");
                    break;
                }
                Stage::Done | Stage::Cancelled => break,
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(seq: &mut LoadingSequence, frame: Duration, frames: usize) -> Vec<LoadingEvent> {
        (0..frames).flat_map(|_| seq.advance(frame)).collect()
    }

    #[test]
    fn progress_strictly_increases_to_100() {
        let mut seq = LoadingSequence::new();
        let events = run_frames(&mut seq, Duration::from_millis(16), 400);
        let progress: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                LoadingEvent::Progress(p) => Some(*p),
                LoadingEvent::Complete => None,
            })
            .collect();
        assert_eq!(progress.len(), 50);
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(progress.last(), Some(&100));
    }

    #[test]
    fn completes_exactly_once_after_100() {
        let mut seq = LoadingSequence::new();
        let events = run_frames(&mut seq, Duration::from_millis(10), 1000);
        let completes: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == LoadingEvent::Complete)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(completes.len(), 1);
        assert_eq!(events[completes[0] - 1], LoadingEvent::Progress(100));
        assert!(seq.is_finished());
    }

    #[test]
    fn completion_waits_half_a_second() {
        let mut seq = LoadingSequence::new();
        // 50 ticks of 50 ms reach 100%.
        let events = seq.advance(TICK * 50);
        assert_eq!(events.last(), Some(&LoadingEvent::Progress(100)));
        assert!(seq.advance(Duration::from_millis(499)).is_empty());
        assert_eq!(seq.advance(Duration::from_millis(1)), vec![LoadingEvent::Complete]);
    }

    #[test]
    fn one_long_frame_runs_everything_in_order() {
        let mut seq = LoadingSequence::new();
        let events = seq.advance(Duration::from_secs(10));
        assert_eq!(events.len(), 51);
        assert_eq!(events[0], LoadingEvent::Progress(2));
        assert_eq!(events[50], LoadingEvent::Complete);
    }

    #[test]
    fn nothing_after_cancel() {
        let mut seq = LoadingSequence::new();
        seq.advance(Duration::from_millis(120));
        let before = seq.progress();
        seq.cancel();
        assert!(seq.advance(Duration::from_secs(60)).is_empty());
        assert_eq!(seq.progress(), before);
    }

    #[test]
    fn nothing_after_complete() {
        let mut seq = LoadingSequence::new();
        seq.advance(Duration::from_secs(5));
        assert!(seq.is_finished());
        assert!(seq.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn phase_text_follows_progress() {
        let mut seq = LoadingSequence::new();
        assert_eq!(seq.phase_text(), PHASES[0]);
        seq.advance(TICK * 10); // 20%
        assert_eq!(seq.phase_text(), PHASES[1]);
        seq.advance(TICK * 30); // 80%
        assert_eq!(seq.phase_text(), PHASES[4]);
        seq.advance(TICK * 10); // 100%
        assert_eq!(seq.phase_text(), PHASES[4]);
    }
}
