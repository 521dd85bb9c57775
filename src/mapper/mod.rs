//! Cartridge mapper subsystem.
//!
//! A mapper rewrites CPU/PPU addresses to PRG/CHR/PRG-RAM offsets and may
//! select nametable mirroring dynamically (MMC1) rather than from the header
//! alone (NROM). The set of supported boards is closed and small (see
//! Non-goals), so mappers are a tagged union dispatched with `match` rather
//! than a trait object behind dynamic dispatch.

mod mmc1;
mod nrom;

pub use mmc1::Mmc1;
pub use nrom::Nrom;

use crate::rom::{Mirror, Rom, RomError};

#[derive(Debug, Clone)]
pub enum CartMapper {
    Nrom(Nrom),
    Mmc1(Mmc1),
}

impl CartMapper {
    pub fn new(rom: Rom) -> Result<Self, RomError> {
        match rom.mapper_id {
            0 => Ok(CartMapper::Nrom(Nrom::new(rom))),
            1 => Ok(CartMapper::Mmc1(Mmc1::new(rom))),
            other => Err(RomError::UnsupportedMapper(other)),
        }
    }

    pub fn init(&mut self) {
        match self {
            CartMapper::Nrom(m) => m.init(),
            CartMapper::Mmc1(m) => m.init(),
        }
    }

    /// Returns `Some(byte)` if the mapper claims this CPU address.
    pub fn cpu_read(&mut self, addr: u16) -> Option<u8> {
        match self {
            CartMapper::Nrom(m) => m.cpu_read(addr),
            CartMapper::Mmc1(m) => m.cpu_read(addr),
        }
    }

    /// Returns `true` if the mapper claimed (handled) this CPU write.
    pub fn cpu_write(&mut self, addr: u16, value: u8) -> bool {
        match self {
            CartMapper::Nrom(m) => m.cpu_write(addr, value),
            CartMapper::Mmc1(m) => m.cpu_write(addr, value),
        }
    }

    /// Returns `Some(byte)` if the mapper claims this PPU address (always
    /// true for $0000-$1FFF, the CHR/pattern-table window).
    pub fn ppu_read(&mut self, addr: u16) -> Option<u8> {
        match self {
            CartMapper::Nrom(m) => m.ppu_read(addr),
            CartMapper::Mmc1(m) => m.ppu_read(addr),
        }
    }

    pub fn ppu_write(&mut self, addr: u16, value: u8) -> bool {
        match self {
            CartMapper::Nrom(m) => m.ppu_write(addr, value),
            CartMapper::Mmc1(m) => m.ppu_write(addr, value),
        }
    }

    pub fn mirror(&self) -> Mirror {
        match self {
            CartMapper::Nrom(m) => m.mirror(),
            CartMapper::Mmc1(m) => m.mirror(),
        }
    }

    /// A 4 KiB slice of the current pattern table (`n` selects $0000 or $1000).
    pub fn pattern(&self, bank: u8) -> &[u8] {
        match self {
            CartMapper::Nrom(m) => m.pattern(bank),
            CartMapper::Mmc1(m) => m.pattern(bank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::test::TestRomBuilder;

    #[test]
    fn unsupported_mapper_is_rejected() {
        let raw = TestRomBuilder {
            mapper: 4,
            ..Default::default()
        }
        .build();
        let rom = Rom::parse(&raw).unwrap();
        assert_eq!(CartMapper::new(rom).unwrap_err(), RomError::UnsupportedMapper(4));
    }
}
