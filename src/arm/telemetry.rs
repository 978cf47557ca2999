/// Snapshot of the core state the bus is allowed to observe. The core
/// publishes these after every pipeline step; the bus reads them to drive
/// the BIOS latch, the prefetch buffer and open-bus resolution.
pub struct CpuTelemetry {
    pub pc: u32,
    /// CPSR T bit.
    pub thumb: bool,
    /// Last two prefetched instruction words, most recent at index 1.
    pub prefetch: [u32; 2],
    pub is_dma_running: bool,
}

impl CpuTelemetry {
    pub fn new() -> Self {
        Self {
            pc: 0,
            thumb: false,
            prefetch: [0; 2],
            is_dma_running: false,
        }
    }
}

impl Default for CpuTelemetry {
    fn default() -> Self {
        Self::new()
    }
}
