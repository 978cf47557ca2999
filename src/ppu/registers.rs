use bitfield_struct::bitfield;

pub struct Registers {
    pub lcd_control: LcdControl,
    pub lcd_status: LcdStatus,
    pub v_counter: VerticalCounter,
}

impl Registers {
    pub fn new() -> Self {
        Self {
            lcd_control: LcdControl::new(),
            lcd_status: LcdStatus::new(),
            v_counter: VerticalCounter::new(),
        }
    }
}

pub enum HalfwordIo {
    B1, // 1st byte
    B2, // 2nd byte
}

#[bitfield(u16)]
pub struct LcdControl {
    // raw bits, modes 6-7 are writable even though the PPU never renders them
    #[bits(3)]
    pub bg_mode: u8,
    pub cgb_mode: bool, // only set by bios
    pub display_frame_select: bool,
    pub hblank_interval_free: bool,
    pub obj_vram_mapping: bool,
    pub forced_blank: bool,
    pub bg0_enable: bool,
    pub bg1_enable: bool,
    pub bg2_enable: bool,
    pub bg3_enable: bool,
    pub obj_enable: bool,
    pub window0_enable: bool,
    pub window1_enable: bool,
    pub obj_window_enable: bool,
}

impl LcdControl {
    pub fn read(&self, byte_select: HalfwordIo) -> u8 {
        match byte_select {
            HalfwordIo::B1 => self.into_bits() as u8,
            HalfwordIo::B2 => (self.into_bits() >> 8) as u8,
        }
    }

    pub fn write(&mut self, value: u8, byte_select: HalfwordIo) {
        let v = self.into_bits();
        let value = u16::from(value);
        match byte_select {
            HalfwordIo::B1 => *self = Self::from_bits((v & 0xFF00) | value),
            HalfwordIo::B2 => *self = Self::from_bits((v & 0x00FF) | (value << 8)),
        }
    }
}

#[bitfield(u16)]
pub struct LcdStatus {
    pub vblank_flag: bool,
    pub hblank_flag: bool,
    pub v_counter_flag: bool,

    pub vblank_irq_enable: bool,
    pub hblank_irq_enable: bool,
    pub vcounter_irq_enable: bool,

    #[bits(2)]
    __: u8, // unused

    #[bits(8)]
    pub vcount_setting: u8,
}

impl LcdStatus {
    pub fn read(&self, byte_select: HalfwordIo) -> u8 {
        match byte_select {
            HalfwordIo::B1 => self.into_bits() as u8,
            HalfwordIo::B2 => (self.into_bits() >> 8) as u8,
        }
    }

    pub fn write(&mut self, value: u8, byte_select: HalfwordIo) {
        let v = self.into_bits();
        let value = u16::from(value);
        match byte_select {
            // bits 0-2 are status flags the hardware drives, not writable
            HalfwordIo::B1 => *self = Self::from_bits((v & 0xFF07) | (value & 0xF8)),
            HalfwordIo::B2 => *self = Self::from_bits((v & 0x00FF) | (value << 8)),
        }
    }
}

#[bitfield(u16)]
pub struct VerticalCounter {
    pub scanline_count: u8,
    __: u8,
}

impl VerticalCounter {
    pub fn read(&self, byte_select: HalfwordIo) -> u8 {
        match byte_select {
            HalfwordIo::B1 => self.into_bits() as u8,
            HalfwordIo::B2 => (self.into_bits() >> 8) as u8,
        }
    }
}
