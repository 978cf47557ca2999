/// Cycle sink the bus reports elapsed time to. Waiting on the bus never
/// blocks, it only adds to this counter.
pub struct Scheduler {
    pub cycles: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { cycles: 0 }
    }

    pub fn advance(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
