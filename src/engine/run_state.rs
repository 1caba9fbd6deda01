/// Loop control flags.
///
/// A stopped loop ignores ticks entirely. Paused skips the update pass but
/// keeps drawing so the screen stays live; asleep skips both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    pub running: bool,
    pub paused: bool,
    pub asleep: bool,
}

impl RunState {
    pub fn should_update(&self) -> bool {
        self.running && !self.paused && !self.asleep
    }

    pub fn should_draw(&self) -> bool {
        self.running && !self.asleep
    }
}

/// What a tick actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub updated: bool,
    pub drawn: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_flags() {
        let mut run = RunState::default();
        assert!(!run.should_update());
        assert!(!run.should_draw());

        run.running = true;
        assert!(run.should_update() && run.should_draw());

        run.paused = true;
        assert!(!run.should_update());
        assert!(run.should_draw());

        run.asleep = true;
        assert!(!run.should_draw());
    }
}
