use bitflags::bitflags;

bitflags! {
    /// $2000 PPUCTRL (write-only from the CPU's side).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuCtrl: u8 {
        const NAMETABLE_X    = 0b0000_0001;
        const NAMETABLE_Y    = 0b0000_0010;
        const VRAM_INCREMENT = 0b0000_0100;
        const SPRITE_BANK    = 0b0000_1000;
        const BACKGROUND_BANK = 0b0001_0000;
        const SPRITE_SIZE    = 0b0010_0000;
        const NMI_ENABLE     = 0b1000_0000;
    }
}

impl PpuCtrl {
    pub fn vram_increment(&self) -> u16 {
        if self.contains(Self::VRAM_INCREMENT) { 32 } else { 1 }
    }

    pub fn nt_x(&self) -> u16 {
        self.contains(Self::NAMETABLE_X) as u16
    }

    pub fn nt_y(&self) -> u16 {
        self.contains(Self::NAMETABLE_Y) as u16
    }

    pub fn background_bank(&self) -> u8 {
        self.contains(Self::BACKGROUND_BANK) as u8
    }

    pub fn sprite_bank(&self) -> u8 {
        self.contains(Self::SPRITE_BANK) as u8
    }

    pub fn sprite_height(&self) -> u16 {
        if self.contains(Self::SPRITE_SIZE) { 16 } else { 8 }
    }
}

bitflags! {
    /// $2001 PPUMASK (write-only from the CPU's side).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuMask: u8 {
        const GREYSCALE          = 0b0000_0001;
        const SHOW_LEFT_BACKGROUND = 0b0000_0010;
        const SHOW_LEFT_SPRITES  = 0b0000_0100;
        const SHOW_BACKGROUND    = 0b0000_1000;
        const SHOW_SPRITES       = 0b0001_0000;
        const EMPHASIZE_RED      = 0b0010_0000;
        const EMPHASIZE_GREEN    = 0b0100_0000;
        const EMPHASIZE_BLUE     = 0b1000_0000;
    }
}

bitflags! {
    /// $2002 PPUSTATUS (read-only from the CPU's side). Bits 0-4 are unused
    /// by this core (real hardware reflects PPU-bus open-bus noise there,
    /// out of scope).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuStatus: u8 {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        const VBLANK          = 0b1000_0000;
    }
}
