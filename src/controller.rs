//! Standard NES controller: an 8-bit shift register loaded from button state
//! on the strobe's falling edge, read back one bit per $4016/$4017 access.
//! Ref: https://www.nesdev.org/wiki/Standard_controller

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const A      = 0b0000_0001;
        const B      = 0b0000_0010;
        const SELECT = 0b0000_0100;
        const START  = 0b0000_1000;
        const UP     = 0b0001_0000;
        const DOWN   = 0b0010_0000;
        const LEFT   = 0b0100_0000;
        const RIGHT  = 0b1000_0000;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Gamepad {
    buttons: Buttons,
    strobe: bool,
    shift_index: u8,
}

impl Gamepad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Buttons) {
        self.buttons.insert(button);
    }

    pub fn release(&mut self, button: Buttons) {
        self.buttons.remove(button);
    }

    /// A write to $4016 (shared strobe line for both controllers).
    pub fn cpu_write(&mut self, data: u8) {
        let strobe = data & 1 != 0;
        if strobe {
            self.shift_index = 0;
        }
        self.strobe = strobe;
    }

    /// A read of $4016 or $4017.
    pub fn cpu_read(&mut self) -> u8 {
        if self.strobe {
            return (self.buttons.bits() & Buttons::A.bits() != 0) as u8;
        }

        if self.shift_index >= 8 {
            return 1;
        }

        let bit = (self.buttons.bits() >> self.shift_index) & 1;
        self.shift_index += 1;
        bit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strobe_high_always_returns_bit_zero() {
        let mut pad = Gamepad::new();
        pad.press(Buttons::A);
        pad.cpu_write(1);
        for _ in 0..10 {
            assert_eq!(pad.cpu_read(), 1);
        }
    }

    #[test]
    fn shift_register_reads_lsb_first_then_ones() {
        let mut pad = Gamepad::new();
        pad.press(Buttons::A);
        pad.cpu_write(1);
        pad.cpu_write(0);

        let bits: Vec<u8> = (0..8).map(|_| pad.cpu_read()).collect();
        assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pad.cpu_read(), 1);
        assert_eq!(pad.cpu_read(), 1);
    }

    #[test]
    fn strobe_falling_edge_relatches_state() {
        let mut pad = Gamepad::new();
        pad.cpu_write(1);
        pad.press(Buttons::RIGHT);
        pad.press(Buttons::SELECT);
        pad.cpu_write(0);

        let bits: Vec<u8> = (0..8).map(|_| pad.cpu_read()).collect();
        assert_eq!(bits, vec![0, 0, 1, 0, 0, 0, 0, 1]);
    }
}
