use super::{GbaBus, CART_REGION_END, CART_REGION_START, SRAM_MIRROR_REGION};
use crate::arm::access_code;

/*
** Region        Bus   Read      Write     Cycles   Note
** ==================================================
** BIOS ROM      32    8/16/32   -         1/1/1
** Work RAM 32K  32    8/16/32   8/16/32   1/1/1
** I/O           32    8/16/32   8/16/32   1/1/1
** OAM           32    8/16/32   16/32     1/1/1
** Work RAM 256K 16    8/16/32   8/16/32   3/3/6
** Palette RAM   16    8/16/32   16/32     1/1/2
** VRAM          16    8/16/32   16/32     1/1/2
** GamePak ROM   16    8/16/32   -         5/5/8    seq/nonseq from WAITCNT
** GamePak SRAM  8     8         8         5        from WAITCNT
**
** Source: GBATek
*/
const ACCESS_TIME16: [[u32; 16]; 2] = [
    [1, 1, 3, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 3, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1],
];

const ACCESS_TIME32: [[u32; 16]; 2] = [
    [1, 1, 6, 1, 1, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 6, 1, 1, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1],
];

const GAMEPAK_NONSEQ_WAITSTATES: [u32; 4] = [4, 3, 2, 8];

const NONSEQ: usize = access_code::NONSEQUENTIAL as usize;
const SEQ: usize = access_code::SEQUENTIAL as usize;

impl GbaBus {
    pub(super) fn reset_timing_tables(&mut self) {
        self.access_time16 = ACCESS_TIME16;
        self.access_time32 = ACCESS_TIME32;
    }

    /// Rederives the cart and SRAM rows of both timing tables from WAITCNT.
    /// The non-cart rows are never touched.
    pub(super) fn update_waitstates(&mut self) {
        let waitcnt = self.io.waitcnt;

        let ws0_nonseq = 1 + GAMEPAK_NONSEQ_WAITSTATES[usize::from(waitcnt.ws0_nonseq())];
        let ws1_nonseq = 1 + GAMEPAK_NONSEQ_WAITSTATES[usize::from(waitcnt.ws1_nonseq())];
        let ws2_nonseq = 1 + GAMEPAK_NONSEQ_WAITSTATES[usize::from(waitcnt.ws2_nonseq())];
        let sram = 1 + GAMEPAK_NONSEQ_WAITSTATES[usize::from(waitcnt.sram())];

        self.access_time16[NONSEQ][0x8] = ws0_nonseq;
        self.access_time16[NONSEQ][0x9] = ws0_nonseq;
        self.access_time16[NONSEQ][0xA] = ws1_nonseq;
        self.access_time16[NONSEQ][0xB] = ws1_nonseq;
        self.access_time16[NONSEQ][0xC] = ws2_nonseq;
        self.access_time16[NONSEQ][0xD] = ws2_nonseq;
        self.access_time16[NONSEQ][0xE] = sram;
        self.access_time16[NONSEQ][0xF] = sram;

        let ws0_seq = 1 + if waitcnt.ws0_seq() { 1 } else { 2 };
        let ws1_seq = 1 + if waitcnt.ws1_seq() { 1 } else { 4 };
        let ws2_seq = 1 + if waitcnt.ws2_seq() { 1 } else { 8 };

        self.access_time16[SEQ][0x8] = ws0_seq;
        self.access_time16[SEQ][0x9] = ws0_seq;
        self.access_time16[SEQ][0xA] = ws1_seq;
        self.access_time16[SEQ][0xB] = ws1_seq;
        self.access_time16[SEQ][0xC] = ws2_seq;
        self.access_time16[SEQ][0xD] = ws2_seq;
        self.access_time16[SEQ][0xE] = sram;
        self.access_time16[SEQ][0xF] = sram;

        // a 32-bit cart access is two 16-bit bus cycles
        for region in (CART_REGION_START as usize)..=(SRAM_MIRROR_REGION as usize) {
            self.access_time32[NONSEQ][region] =
                self.access_time16[NONSEQ][region] + self.access_time16[SEQ][region];
            self.access_time32[SEQ][region] = 2 * self.access_time16[SEQ][region];
        }
    }

    /// Charges the cycles for one bus access of `size` bytes, routing cart
    /// accesses through the prefetch buffer when it is allowed to run.
    pub(super) fn mem_access(&mut self, address: u32, size: u32, access: u8) {
        let address = address & !(size - 1);
        let page = (address >> 24) & 0xF;
        let mut access = access;

        // the cart bus reloads when a 128kb page boundary is crossed
        if (CART_REGION_START..=CART_REGION_END).contains(&page) && (address & 0x1FFFF) == 0 {
            access = access_code::NONSEQUENTIAL;
        }

        let cycles = if size <= 2 {
            self.access_time16[usize::from(access)][page as usize]
        } else {
            self.access_time32[usize::from(access)][page as usize]
        };

        self.gamepak_bus_in_use = (CART_REGION_START..=CART_REGION_END).contains(&page);
        if self.gamepak_bus_in_use && self.pbuffer.enabled && !self.cpu.is_dma_running {
            self.prefetch_access(address, cycles);
        } else {
            self.idle_for(cycles);
        }
    }

    /// Advances the scheduler. While the CPU leaves the cart bus idle the
    /// prefetch buffer keeps fetching on it.
    pub fn idle_for(&mut self, cycles: u32) {
        self.scheduler.advance(cycles);
        if !self.gamepak_bus_in_use {
            self.pbuffer.step(cycles);
        }
    }

    pub(super) fn seq_timing16(&self, page: u32) -> u32 {
        self.access_time16[SEQ][(page & 0xF) as usize]
    }

    pub(super) fn seq_timing32(&self, page: u32) -> u32 {
        self.access_time32[SEQ][(page & 0xF) as usize]
    }
}
