use super::GbaBus;

/// Cartridge prefetch FIFO. Between bursts of CPU demand the cart bus keeps
/// fetching sequential instruction words into this buffer, so a later
/// sequential fetch only pays the bus turnaround.
///
/// Invariant: `head - tail == size * insn_len` and `size <= capacity`.
pub(super) struct PrefetchBuffer {
    pub(super) enabled: bool,
    /// 2 in thumb mode, 4 in arm mode; fixed at the last re-arm.
    pub(super) insn_len: u32,
    pub(super) capacity: u32,
    /// Cycles for one sequential cart fetch, captured at re-arm.
    pub(super) reload: u32,
    /// Cycles until the in-flight slot completes.
    pub(super) countdown: u32,
    /// Completed slots waiting to be consumed.
    pub(super) size: u32,
    /// Next address the buffer will fetch.
    pub(super) head: u32,
    /// Next address the CPU will consume.
    pub(super) tail: u32,
}

impl PrefetchBuffer {
    pub(super) fn new() -> Self {
        Self {
            enabled: true,
            insn_len: 0,
            capacity: 0,
            reload: 0,
            countdown: 0,
            size: 0,
            head: 0,
            tail: 0,
        }
    }

    pub(super) fn reset(&mut self) {
        let enabled = self.enabled;
        *self = Self::new();
        self.enabled = enabled;
    }

    /// Runs the cart bus for `cycles` while the CPU is not using it.
    pub(super) fn step(&mut self, mut cycles: u32) {
        while self.size < self.capacity && cycles >= self.countdown {
            cycles -= self.countdown;
            self.head += self.insn_len;
            self.countdown = self.reload;
            self.size += 1;
        }

        if self.size < self.capacity {
            self.countdown -= cycles;
        }
        // with the buffer full the remaining cycles are bus idle time
    }
}

impl GbaBus {
    /// CPU-side transition, entered from `mem_access` with the cart bus
    /// held and `intended_cycles` already looked up for this access.
    pub(super) fn prefetch_access(&mut self, address: u32, intended_cycles: u32) {
        if self.pbuffer.tail == address {
            if self.pbuffer.size == 0 {
                // the slot is still in flight: release the bus and let the
                // idle path finish the fetch, then consume it right away
                self.gamepak_bus_in_use = false;
                let countdown = self.pbuffer.countdown;
                self.idle_for(countdown);

                self.pbuffer.tail += self.pbuffer.insn_len;
                self.pbuffer.size -= 1;
            } else {
                self.pbuffer.tail += self.pbuffer.insn_len;
                self.pbuffer.size -= 1;

                self.gamepak_bus_in_use = false;
                self.idle_for(1);
            }
        } else {
            // out-of-sequence access: pay the full miss before touching the
            // buffer state, the bus is still held so nothing fetches
            self.idle_for(intended_cycles);

            if self.cpu.thumb {
                self.pbuffer.insn_len = 2;
                self.pbuffer.capacity = 8;
                self.pbuffer.reload = self.seq_timing16(address >> 24);
            } else {
                self.pbuffer.insn_len = 4;
                self.pbuffer.capacity = 4;
                self.pbuffer.reload = self.seq_timing32(address >> 24);
            }

            self.pbuffer.countdown = self.pbuffer.reload;
            self.pbuffer.tail = address + self.pbuffer.insn_len;
            self.pbuffer.head = self.pbuffer.tail;
            self.pbuffer.size = 0;
        }
    }
}
