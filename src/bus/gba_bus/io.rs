use super::io_constants::*;
use super::GbaBus;
use crate::ppu::HalfwordIo;

use bitfield_struct::bitfield;

#[bitfield(u16)]
pub struct WaitstateControl {
    #[bits(2)]
    pub sram: u8,
    #[bits(2)]
    pub ws0_nonseq: u8,
    pub ws0_seq: bool,
    #[bits(2)]
    pub ws1_nonseq: u8,
    pub ws1_seq: bool,
    #[bits(2)]
    pub ws2_nonseq: u8,
    pub ws2_seq: bool,
    #[bits(2)]
    pub phi_output: u8,
    __: bool,
    pub prefetch_flag: bool,
    pub gamepak_type: bool,
}

impl WaitstateControl {
    pub(super) fn read(&self, byte_select: HalfwordIo) -> u8 {
        match byte_select {
            HalfwordIo::B1 => self.into_bits() as u8,
            HalfwordIo::B2 => (self.into_bits() >> 8) as u8,
        }
    }

    pub(super) fn write(&mut self, value: u8, byte_select: HalfwordIo) {
        let v = self.into_bits();
        let value = u16::from(value);
        match byte_select {
            HalfwordIo::B1 => *self = Self::from_bits((v & 0xFF00) | value),
            HalfwordIo::B2 => *self = Self::from_bits((v & 0x00FF) | (value << 8)),
        }
    }
}

pub struct IoRegisters {
    pub waitcnt: WaitstateControl,
    pub interrupt_enable: u16,
    pub interrupt_flags: u16,
    pub interrupt_master_enable: u16,
    pub key_input: u16,
}

impl IoRegisters {
    pub(super) fn new() -> Self {
        Self {
            waitcnt: WaitstateControl::new(),
            interrupt_enable: 0,
            interrupt_flags: 0,
            interrupt_master_enable: 0,
            key_input: 0x03FF, // no keys held
        }
    }
}

fn lo(value: u16) -> u8 {
    value as u8
}

fn hi(value: u16) -> u8 {
    (value >> 8) as u8
}

impl GbaBus {
    pub(super) fn read_io_byte(&self, address: u32) -> u8 {
        match address {
            // lcd I/O registers
            DISPCNT => self.ppu.registers.lcd_control.read(HalfwordIo::B1),
            v if v == DISPCNT + 1 => self.ppu.registers.lcd_control.read(HalfwordIo::B2),

            DISPSTAT => self.ppu.registers.lcd_status.read(HalfwordIo::B1),
            v if v == DISPSTAT + 1 => self.ppu.registers.lcd_status.read(HalfwordIo::B2),

            VCOUNT => self.ppu.registers.v_counter.read(HalfwordIo::B1),
            v if v == VCOUNT + 1 => self.ppu.registers.v_counter.read(HalfwordIo::B2),

            KEYINPUT => lo(self.io.key_input),
            v if v == KEYINPUT + 1 => hi(self.io.key_input),

            IE => lo(self.io.interrupt_enable),
            v if v == IE + 1 => hi(self.io.interrupt_enable),

            IF => lo(self.io.interrupt_flags),
            v if v == IF + 1 => hi(self.io.interrupt_flags),

            WAITCNT => self.io.waitcnt.read(HalfwordIo::B1),
            v if v == WAITCNT + 1 => self.io.waitcnt.read(HalfwordIo::B2),

            IME => lo(self.io.interrupt_master_enable),
            v if v == IME + 1 => hi(self.io.interrupt_master_enable),

            _ => 0,
        }
    }

    pub(super) fn read_io_halfword(&self, address: u32) -> u16 {
        let halfword = [self.read_io_byte(address), self.read_io_byte(address + 1)];
        u16::from_le_bytes(halfword)
    }

    pub(super) fn read_io_word(&self, address: u32) -> u32 {
        let word = [
            self.read_io_byte(address),
            self.read_io_byte(address + 1),
            self.read_io_byte(address + 2),
            self.read_io_byte(address + 3),
        ];
        u32::from_le_bytes(word)
    }

    pub(super) fn write_io_byte(&mut self, value: u8, address: u32) {
        match address {
            // lcd I/O registers
            DISPCNT => self.ppu.registers.lcd_control.write(value, HalfwordIo::B1),
            v if v == DISPCNT + 1 => self.ppu.registers.lcd_control.write(value, HalfwordIo::B2),

            DISPSTAT => self.ppu.registers.lcd_status.write(value, HalfwordIo::B1),
            v if v == DISPSTAT + 1 => self.ppu.registers.lcd_status.write(value, HalfwordIo::B2),

            IE => self.io.interrupt_enable = (self.io.interrupt_enable & 0xFF00) | u16::from(value),
            v if v == IE + 1 => {
                self.io.interrupt_enable =
                    (self.io.interrupt_enable & 0x00FF) | (u16::from(value) << 8)
            }

            // writing 1 acknowledges (clears) the flag
            IF => self.io.interrupt_flags &= !u16::from(value),
            v if v == IF + 1 => self.io.interrupt_flags &= !(u16::from(value) << 8),

            WAITCNT => {
                self.io.waitcnt.write(value, HalfwordIo::B1);
                self.update_waitstates();
            }
            v if v == WAITCNT + 1 => {
                self.io.waitcnt.write(value, HalfwordIo::B2);
                self.update_waitstates();
            }

            IME => {
                self.io.interrupt_master_enable =
                    (self.io.interrupt_master_enable & 0xFF00) | u16::from(value)
            }
            v if v == IME + 1 => {
                self.io.interrupt_master_enable =
                    (self.io.interrupt_master_enable & 0x00FF) | (u16::from(value) << 8)
            }

            _ => (),
        }
    }

    pub(super) fn write_io_halfword(&mut self, value: u16, address: u32) {
        value
            .to_le_bytes()
            .iter()
            .enumerate()
            .for_each(|(offset, byte)| {
                self.write_io_byte(*byte, address + offset as u32);
            });
    }

    pub(super) fn write_io_word(&mut self, value: u32, address: u32) {
        value
            .to_le_bytes()
            .iter()
            .enumerate()
            .for_each(|(offset, byte)| {
                self.write_io_byte(*byte, address + offset as u32);
            });
    }
}
