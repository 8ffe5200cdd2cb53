use bevy_ecs::prelude::Resource;

/// Counts completed calls to `run_cycle`. Cycle numbers start at 1.
#[derive(Debug, Default, Resource)]
pub struct CycleClock {
    cycle: u64,
}

impl CycleClock {
    /// Number of the most recent cycle, 0 before the first one.
    pub fn now(&self) -> u64 {
        self.cycle
    }

    pub fn advance(&mut self) -> u64 {
        self.cycle += 1;
        self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_one_cycle_at_a_time() {
        let mut clock = CycleClock::default();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.now(), 2);
    }
}
