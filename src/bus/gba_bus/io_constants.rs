// LCD I/O Registers
pub const DISPCNT: u32 = 0x400_0000;
pub const DISPSTAT: u32 = 0x400_0004;
pub const VCOUNT: u32 = 0x400_0006;

// Keypad Input
pub const KEYINPUT: u32 = 0x400_0130;

// Interrupt, Waitstate, and Power-Down Control
pub const IE: u32 = 0x400_0200;
pub const IF: u32 = 0x400_0202;
pub const WAITCNT: u32 = 0x400_0204;
pub const IME: u32 = 0x400_0208;
