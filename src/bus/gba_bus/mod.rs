use crate::arm::CpuTelemetry;
use crate::bus::DebugHook;
use crate::ppu::Ppu;
use crate::scheduler::Scheduler;

use backup::{BackupStorage, Gpio};
use prefetch::PrefetchBuffer;

mod backup;
mod bus;
mod io;
mod io_constants;
mod open_bus;
mod prefetch;
mod timing;

pub use backup::BackupType;

const BIOS_SIZE: usize = 16 * 1024;
const WRAM_256: usize = 256 * 1024;
const WRAM_32: usize = 32 * 1024;

// region codes, top byte of the address
pub(crate) const BIOS_REGION: u32 = 0x0;
pub(crate) const EWRAM_REGION: u32 = 0x2;
pub(crate) const IWRAM_REGION: u32 = 0x3;
pub(crate) const IO_REGION: u32 = 0x4;
pub(crate) const PALRAM_REGION: u32 = 0x5;
pub(crate) const VRAM_REGION: u32 = 0x6;
pub(crate) const OAM_REGION: u32 = 0x7;
pub(crate) const CART_REGION_START: u32 = 0x8;
pub(crate) const CART_REGION_END: u32 = 0xD;
pub(crate) const SRAM_REGION: u32 = 0xE;
pub(crate) const SRAM_MIRROR_REGION: u32 = 0xF;

pub(crate) const BIOS_END: u32 = 0x3FFF;
pub(crate) const EWRAM_MASK: u32 = 0x3FFFF;
pub(crate) const IWRAM_MASK: u32 = 0x7FFF;
pub(crate) const PALRAM_MASK: u32 = 0x3FF;
pub(crate) const OAM_MASK: u32 = 0x3FF;
// vram mirrors in 128kb blocks, the upper 64kb half mirroring its 32kb in place
pub(crate) const VRAM_MASK_1: u32 = 0x17FFF;
pub(crate) const VRAM_MASK_2: u32 = 0x1FFFF;
// each 16mb cart bank mirrors the rom, same window the overread check uses
pub(crate) const CART_MASK: u32 = 0x00FF_FFFF;

pub struct GbaBus {
    bios: Box<[u8]>,
    ewram: Box<[u8]>,
    iwram: Box<[u8]>,
    rom: Box<[u8]>,
    rom_size: u32,

    /// Last 32-bit word driven on the BIOS bus; reads with PC outside BIOS
    /// see this instead of the ROM contents. Cold value is 0.
    bios_bus: u32,

    pub ppu: Ppu,
    pub backup: BackupStorage,
    pub gpio: Gpio,
    pub cpu: CpuTelemetry,
    pub scheduler: Scheduler,

    pub io: io::IoRegisters,

    access_time16: [[u32; 16]; 2],
    access_time32: [[u32; 16]; 2],
    pbuffer: PrefetchBuffer,

    pub gamepak_bus_in_use: bool,
    pub was_last_access_from_dma: bool,
    /// Last value the DMA engine moved across the bus.
    pub dma_bus: u32,

    pub debug_hook: Option<Box<dyn DebugHook>>,
}

impl GbaBus {
    /// Builds the bus from the reset payload. Ownership of the BIOS and ROM
    /// blobs transfers in; the BIOS is clamped to its 16kb window and the
    /// ROM padded to a word multiple so word reads near the end stay in
    /// bounds.
    pub fn new(bios: Vec<u8>, rom: Vec<u8>, backup_type: BackupType) -> Self {
        let mut bios = bios;
        bios.resize(BIOS_SIZE, 0);

        let mut rom = rom;
        while rom.len() % 4 != 0 {
            rom.push(0);
        }
        let rom_size = rom.len() as u32;

        let backup = BackupStorage::new(backup_type, rom_size);
        log::info!(
            "cartridge: {} byte rom, backup type {:?}",
            rom_size,
            backup_type
        );

        let mut bus = Self {
            bios: bios.into_boxed_slice(),
            ewram: vec![0; WRAM_256].into_boxed_slice(),
            iwram: vec![0; WRAM_32].into_boxed_slice(),
            rom: rom.into_boxed_slice(),
            rom_size,
            bios_bus: 0,
            ppu: Ppu::new(),
            backup,
            gpio: Gpio::new(),
            cpu: CpuTelemetry::new(),
            scheduler: Scheduler::new(),
            io: io::IoRegisters::new(),
            access_time16: [[0; 16]; 2],
            access_time32: [[0; 16]; 2],
            pbuffer: PrefetchBuffer::new(),
            gamepak_bus_in_use: false,
            was_last_access_from_dma: false,
            dma_bus: 0,
            debug_hook: None,
        };
        bus.reset_timing_tables();
        bus.update_waitstates();
        bus
    }

    pub fn reset(&mut self) {
        self.ewram.fill(0);
        self.iwram.fill(0);
        self.bios_bus = 0;
        self.ppu.reset();
        self.cpu = CpuTelemetry::new();
        self.scheduler = Scheduler::new();
        self.io = io::IoRegisters::new();
        self.pbuffer.reset();
        self.gamepak_bus_in_use = false;
        self.was_last_access_from_dma = false;
        self.dma_bus = 0;
        self.reset_timing_tables();
        self.update_waitstates();
    }

    /// Emulator option, separate from the WAITCNT prefetch bit.
    pub fn set_prefetch_enabled(&mut self, enabled: bool) {
        self.pbuffer.enabled = enabled;
    }
}
