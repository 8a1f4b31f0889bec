/// Settings for computing and updating a neighbor list
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateSettings {
    /// Only consider rebuilding on multiples of this step count
    pub every: usize,
    /// Minimum number of steps between two rebuilds
    pub delay: usize,
    /// Rebuild only when some particle moved more than half the padding
    pub check: bool,
    last_update_step: usize,
}
impl Default for UpdateSettings {
    fn default() -> Self {
        Self::new()
    }
}
impl UpdateSettings {
    pub fn new() -> Self {
        Self {
            every: 1,
            delay: 0,
            check: true,
            last_update_step: 0,
        }
    }
    pub fn should_update_neighbors(&self, step: usize) -> bool {
        step % self.every.max(1) == 0 && step.saturating_sub(self.last_update_step) >= self.delay
    }
    pub fn last_update_step(&self) -> usize {
        self.last_update_step
    }
    pub(crate) fn record_update(&mut self, step: usize) {
        self.last_update_step = step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_and_delay() {
        let mut settings = UpdateSettings {
            every: 2,
            delay: 4,
            ..UpdateSettings::new()
        };
        settings.record_update(10);
        assert!(!settings.should_update_neighbors(12));
        assert!(!settings.should_update_neighbors(13));
        assert!(settings.should_update_neighbors(14));
    }
}
