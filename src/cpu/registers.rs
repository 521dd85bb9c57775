use bitflags::bitflags;

bitflags! {
    /// Processor status register. Bit 5 ("_") has no hardware meaning and
    /// always reads back as 1; bit 4 ("B") only exists in the byte pushed to
    /// the stack by PHP/BRK, never in the live register during execution.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const CARRY       = 0b0000_0001;
        const ZERO        = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        const DECIMAL     = 0b0000_1000;
        const BREAK       = 0b0001_0000;
        const UNUSED      = 0b0010_0000;
        const OVERFLOW    = 0b0100_0000;
        const NEGATIVE    = 0b1000_0000;
    }
}

impl Status {
    pub fn set_zn(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }
}

pub const STACK_POINTER_INIT: u8 = 0xFD;
pub const STATUS_INIT: Status = Status::from_bits_truncate(Status::UNUSED.bits() | Status::IRQ_DISABLE.bits());

#[derive(Debug, Clone, Copy)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            a: 0,
            x: 0,
            y: 0,
            sp: STACK_POINTER_INIT,
            pc: 0,
            status: STATUS_INIT,
        }
    }
}
