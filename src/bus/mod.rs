mod gba_bus;

/// Memory interface the ARM core executes against. The `access` argument is
/// the core's N/S cycle classification (`arm::access_code`); it only affects
/// timing, never data.
pub trait Bus {
    fn pipeline_read_word(&mut self, address: u32, access: u8) -> u32;
    fn pipeline_read_halfword(&mut self, address: u32, access: u8) -> u16;

    fn read_word(&mut self, address: u32, access: u8) -> u32;
    fn read_halfword(&mut self, address: u32, access: u8) -> u16;
    fn read_byte(&mut self, address: u32, access: u8) -> u8;

    fn write_word(&mut self, address: u32, value: u32, access: u8);
    fn write_halfword(&mut self, address: u32, value: u16, access: u8);
    fn write_byte(&mut self, address: u32, value: u8, access: u8);

    fn i_cycle(&mut self) {}
}

/// Debugger watchpoint hook. Timed accesses report here before touching
/// memory; raw accesses never do.
pub trait DebugHook {
    fn on_read(&mut self, address: u32, size: u32);
    fn on_write(&mut self, address: u32, size: u32, value: u32);
}

pub use gba_bus::{BackupType, GbaBus};
