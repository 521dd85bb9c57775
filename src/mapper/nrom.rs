use crate::rom::{Mirror, Rom, PRG_PAGE_SIZE};

const PRG_START: u16 = 0x8000;

/// Mapper 0. No bank switching: PRG mirrors a single 16 KiB page twice if
/// only one page is present, and CHR is a fixed 8 KiB window. Mirror is
/// fixed by the header.
#[derive(Debug, Clone)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    mirror: Mirror,
}

impl Nrom {
    pub fn new(rom: Rom) -> Self {
        let chr = if rom.has_chr_ram {
            vec![0u8; crate::rom::CHR_PAGE_SIZE]
        } else {
            rom.chr_rom
        };

        Nrom {
            prg_rom: rom.prg_rom,
            chr,
            mirror: rom.mirror,
        }
    }

    pub fn init(&mut self) {}

    fn map_prg(&self, addr: u16) -> usize {
        let offset = addr - PRG_START;
        let mask = if self.prg_rom.len() > PRG_PAGE_SIZE {
            0x7FFF
        } else {
            0x3FFF
        };
        (offset & mask) as usize
    }

    pub fn cpu_read(&mut self, addr: u16) -> Option<u8> {
        match addr {
            PRG_START..=0xFFFF => Some(self.prg_rom[self.map_prg(addr)]),
            _ => None,
        }
    }

    pub fn cpu_write(&mut self, addr: u16, value: u8) -> bool {
        match addr {
            PRG_START..=0xFFFF => {
                log::trace!("NROM: ignoring write 0x{value:02X} to read-only PRG at 0x{addr:04X}");
                true
            }
            _ => false,
        }
    }

    pub fn ppu_read(&mut self, addr: u16) -> Option<u8> {
        match addr {
            0x0000..=0x1FFF => Some(self.chr[addr as usize]),
            _ => None,
        }
    }

    pub fn ppu_write(&mut self, addr: u16, value: u8) -> bool {
        match addr {
            0x0000..=0x1FFF => {
                self.chr[addr as usize] = value;
                true
            }
            _ => false,
        }
    }

    pub fn mirror(&self) -> Mirror {
        self.mirror
    }

    pub fn pattern(&self, bank: u8) -> &[u8] {
        let start = bank as usize * 0x1000;
        &self.chr[start..start + 0x1000]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::test::TestRomBuilder;

    #[test]
    fn single_prg_page_mirrors_at_c000() {
        let raw = TestRomBuilder {
            prg_pages: 1,
            chr_pages: 1,
            ..Default::default()
        }
        .build();
        let rom = Rom::parse(&raw).unwrap();
        let mut mapper = Nrom::new(rom);

        assert_eq!(mapper.cpu_read(0x8000), mapper.cpu_read(0xC000));
        assert_eq!(mapper.cpu_read(0xBFFF), mapper.cpu_read(0xFFFF));
    }

    #[test]
    fn two_prg_pages_map_linearly() {
        let raw = TestRomBuilder {
            prg_pages: 2,
            chr_pages: 1,
            ..Default::default()
        }
        .build();
        let rom = Rom::parse(&raw).unwrap();
        let mut mapper = Nrom::new(rom);

        // both pages are filled with 1s in the test builder, so just assert
        // the two halves are NOT aliased onto each other.
        assert_eq!(mapper.map_prg(0x8000), 0);
        assert_eq!(mapper.map_prg(0xC000), 0x4000);
    }

    #[test]
    fn prg_writes_are_ignored() {
        let rom = crate::rom::test::test_rom();
        let mut mapper = Nrom::new(rom);
        assert!(mapper.cpu_write(0x8000, 0xFF));
    }

    #[test]
    fn chr_ram_carts_start_zeroed_and_writable() {
        let raw = TestRomBuilder {
            chr_pages: 0,
            ..Default::default()
        }
        .build();
        let rom = Rom::parse(&raw).unwrap();
        let mut mapper = Nrom::new(rom);

        assert_eq!(mapper.ppu_read(0x0000), Some(0));
        assert!(mapper.ppu_write(0x0000, 0x42));
        assert_eq!(mapper.ppu_read(0x0000), Some(0x42));
    }
}
