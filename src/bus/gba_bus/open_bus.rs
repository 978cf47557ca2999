use super::{
    GbaBus, BIOS_REGION, CART_REGION_END, CART_REGION_START, EWRAM_REGION, IWRAM_REGION,
    OAM_REGION, PALRAM_REGION, VRAM_REGION,
};

impl GbaBus {
    /// Value observed on the bus when nothing drives it. What the CPU sees
    /// is whatever was last latched: the DMA bus during transfers, otherwise
    /// the prefetched instruction words, composed per PC region.
    ///
    /// Most of this is taken from GBATek, section "GBA Unpredictable Things".
    pub(super) fn open_bus(&self, address: u32) -> u32 {
        let shift = address & 0x3;

        // On first access, open-bus during DMA transfers returns the last
        // prefetched instruction. On subsequent transfers it returns the
        // last transferred data.
        if self.was_last_access_from_dma {
            return self.dma_bus >> (8 * shift);
        }

        let prefetch = self.cpu.prefetch;

        let val = if self.cpu.thumb {
            let pc = self.cpu.pc;
            match pc >> 24 {
                EWRAM_REGION | PALRAM_REGION | VRAM_REGION => prefetch[1] | (prefetch[1] << 16),
                page if (CART_REGION_START..=CART_REGION_END).contains(&page) => {
                    prefetch[1] | (prefetch[1] << 16)
                }
                BIOS_REGION | OAM_REGION => {
                    if pc & 0x2 == 0 {
                        // 4-byte aligned PC
                        prefetch[1] | (prefetch[1] << 16)
                    } else {
                        prefetch[0] | (prefetch[1] << 16)
                    }
                }
                IWRAM_REGION => {
                    if pc & 0x2 == 0 {
                        // 4-byte aligned PC
                        prefetch[1] | (prefetch[0] << 16)
                    } else {
                        prefetch[0] | (prefetch[1] << 16)
                    }
                }
                page => panic!("reading the open bus from an impossible page: {page}"),
            }
        } else {
            prefetch[1]
        };

        val >> (8 * shift)
    }
}
