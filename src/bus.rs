//! The console: owns every component and drives the shared master clock.
//! The CPU never holds a reference back to this struct — each tick builds a
//! short-lived [`ConsoleBus`] borrowing the non-CPU fields and hands it to
//! `Cpu::tick` as a `&mut dyn Bus`. This sidesteps the aliasing the source's
//! CPU-holds-bus-pointer design required, at the cost of rebuilding a small
//! borrow struct every tick.

use crate::controller::Gamepad;
use crate::cpu::{Bus, Cpu};
use crate::mapper::CartMapper;
use crate::ppu::Ppu;
use crate::rom::{Rom, RomError};

#[derive(Debug, Clone, Copy)]
struct DmaState {
    page: u8,
    index: u8,
    byte_pending: bool,
    byte_latch: u8,
    align_remaining: u8,
}

pub struct Console {
    pub cpu: Cpu,
    ppu: Ppu,
    gamepads: [Gamepad; 2],
    mapper: CartMapper,
    work_ram: [u8; 0x0800],
    dma: Option<DmaState>,
    tick_parity: bool,
}

impl Console {
    pub fn new(rom: Rom) -> Result<Self, RomError> {
        let mapper = CartMapper::new(rom)?;
        let mut console = Console {
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            gamepads: [Gamepad::new(), Gamepad::new()],
            mapper,
            work_ram: [0; 0x0800],
            dma: None,
            tick_parity: false,
        };
        console.init();
        Ok(console)
    }

    pub fn init(&mut self) {
        self.mapper.init();
        self.ppu.init();
        self.dma = None;
        self.tick_parity = false;

        let mut bus = ConsoleBus {
            ppu: &mut self.ppu,
            mapper: &mut self.mapper,
            gamepads: &mut self.gamepads,
            work_ram: &mut self.work_ram,
            dma: &mut self.dma,
            parity: false,
        };
        self.cpu.reset(&mut bus);
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn gamepad_mut(&mut self, index: usize) -> &mut Gamepad {
        &mut self.gamepads[index]
    }

    pub fn is_dma_active(&self) -> bool {
        self.dma.is_some()
    }

    /// One NTSC master step: three PPU dots, then one CPU cycle (unless
    /// OAM DMA is stalling it). PPU runs first so a VBLANK-set NMI is
    /// visible to the CPU before its next instruction fetch.
    pub fn tick(&mut self) {
        for _ in 0..3 {
            if self.ppu.tick(&mut self.mapper) == Some(true) {
                self.cpu.request_nmi();
            }
        }

        if self.dma.is_some() {
            self.step_dma();
        } else {
            let parity = self.tick_parity;
            let mut bus = ConsoleBus {
                ppu: &mut self.ppu,
                mapper: &mut self.mapper,
                gamepads: &mut self.gamepads,
                work_ram: &mut self.work_ram,
                dma: &mut self.dma,
                parity,
            };
            self.cpu.tick(&mut bus);
        }

        self.tick_parity = !self.tick_parity;
    }

    fn step_dma(&mut self) {
        let mut state = self.dma.take().expect("step_dma called with no active transfer");

        if state.align_remaining > 0 {
            state.align_remaining -= 1;
            self.dma = Some(state);
            return;
        }

        if !state.byte_pending {
            let addr = ((state.page as u16) << 8) | state.index as u16;
            state.byte_latch = self.read_dma_source(addr);
            state.byte_pending = true;
            self.dma = Some(state);
        } else {
            self.ppu.dma_write(state.byte_latch);
            state.byte_pending = false;
            state.index = state.index.wrapping_add(1);
            if state.index != 0 {
                self.dma = Some(state);
            }
        }
    }

    fn read_dma_source(&mut self, addr: u16) -> u8 {
        if let Some(byte) = self.mapper.cpu_read(addr) {
            return byte;
        }
        match addr {
            0x0000..=0x1FFF => self.work_ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.cpu_read((addr & 0x0007) as u8, &mut self.mapper),
            _ => 0,
        }
    }
}

/// Transient view over everything the CPU can touch except itself, rebuilt
/// fresh inside every `Console::tick`.
struct ConsoleBus<'a> {
    ppu: &'a mut Ppu,
    mapper: &'a mut CartMapper,
    gamepads: &'a mut [Gamepad; 2],
    work_ram: &'a mut [u8; 0x0800],
    dma: &'a mut Option<DmaState>,
    parity: bool,
}

impl Bus for ConsoleBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        if let Some(byte) = self.mapper.cpu_read(addr) {
            return byte;
        }

        match addr {
            0x0000..=0x1FFF => self.work_ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.cpu_read((addr & 0x0007) as u8, self.mapper),
            0x4016 => self.gamepads[0].cpu_read(),
            0x4017 => self.gamepads[1].cpu_read(),
            _ => {
                log::trace!("unclaimed CPU read at 0x{addr:04X}");
                0
            }
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if self.mapper.cpu_write(addr, value) {
            return;
        }

        match addr {
            0x0000..=0x1FFF => self.work_ram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => self.ppu.cpu_write((addr & 0x0007) as u8, value, self.mapper),
            0x4014 => {
                log::trace!("OAM DMA started from page 0x{value:02X}");
                *self.dma = Some(DmaState {
                    page: value,
                    index: 0,
                    byte_pending: false,
                    byte_latch: 0,
                    align_remaining: 1 + self.parity as u8,
                });
            }
            0x4016 => {
                self.gamepads[0].cpu_write(value);
                self.gamepads[1].cpu_write(value);
            }
            _ => log::trace!("unclaimed CPU write 0x{value:02X} at 0x{addr:04X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::test::TestRomBuilder;

    fn test_console() -> Console {
        let raw = TestRomBuilder {
            prg_pages: 2,
            chr_pages: 1,
            ..Default::default()
        }
        .build();
        let rom = Rom::parse(&raw).unwrap();
        Console::new(rom).unwrap()
    }

    #[test]
    fn reset_lands_cpu_at_reset_vector() {
        let console = test_console();
        // the test ROM fills PRG with 0x01 bytes, so the vector reads as 0x0101
        assert_eq!(console.cpu.regs.pc, 0x0101);
    }

    #[test]
    fn oam_dma_stalls_for_513_or_514_cycles_and_copies_page() {
        let mut console = test_console();
        console.work_ram[0x0200..0x0300].copy_from_slice(&[0x42; 256]);

        // Directly drive a write to $4014 as if the CPU had executed STA $4014.
        {
            let mut bus = ConsoleBus {
                ppu: &mut console.ppu,
                mapper: &mut console.mapper,
                gamepads: &mut console.gamepads,
                work_ram: &mut console.work_ram,
                dma: &mut console.dma,
                parity: false,
            };
            bus.write(0x4014, 0x02);
        }
        assert!(console.is_dma_active());

        let mut steps = 0;
        while console.is_dma_active() {
            console.step_dma();
            steps += 1;
            assert!(steps <= 514);
        }
        assert_eq!(steps, 513);
        assert_eq!(console.ppu.oam(), &[0x42; 256]);
    }
}
