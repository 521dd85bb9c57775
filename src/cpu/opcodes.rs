//! The 6502 opcode table: one `(Mnemonic, AddressingMode, base_cycles)`
//! descriptor per byte, decoded with a single `match`. Bytes with no
//! official encoding decode to `Mnemonic::Illegal`, executed as a
//! multi-cycle NOP per the core's documented fail mode.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mnemonic {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS,
    CLC, CLD, CLI, CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR,
    INC, INX, INY, JMP, JSR, LDA, LDX, LDY, LSR, NOP, ORA,
    PHA, PHP, PLA, PLP, ROL, ROR, RTI, RTS, SBC,
    SEC, SED, SEI, STA, STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
    /// Any of the 105 unfilled byte values; treated as a multi-cycle NOP.
    Illegal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    Relative,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// Groups mnemonics by the cycle-penalty rule that applies to their indexed
/// addressing modes. Read-class instructions pay +1 on a page cross; stores
/// and read-modify-writes always pay the indexed cost baked into the table
/// (no conditional penalty needed, since their table entry already reflects
/// the worst case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Read,
    Store,
    ReadModifyWrite,
    Branch,
    Other,
}

pub fn category(mnemonic: Mnemonic) -> Category {
    use Mnemonic::*;
    match mnemonic {
        ADC | AND | CMP | EOR | LDA | LDX | LDY | ORA | SBC | BIT => Category::Read,
        STA | STX | STY => Category::Store,
        ASL | LSR | ROL | ROR | INC | DEC => Category::ReadModifyWrite,
        BCC | BCS | BEQ | BMI | BNE | BPL | BVC | BVS => Category::Branch,
        _ => Category::Other,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: u8,
}

const fn instr(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Instruction {
    Instruction { mnemonic, mode, cycles }
}

pub fn decode(opcode: u8) -> Instruction {
    use AddressingMode::*;
    use Mnemonic::*;

    match opcode {
        // ADC
        0x69 => instr(ADC, Immediate, 2),
        0x65 => instr(ADC, ZeroPage, 3),
        0x75 => instr(ADC, ZeroPageX, 4),
        0x6D => instr(ADC, Absolute, 4),
        0x7D => instr(ADC, AbsoluteX, 4),
        0x79 => instr(ADC, AbsoluteY, 4),
        0x61 => instr(ADC, IndirectX, 6),
        0x71 => instr(ADC, IndirectY, 5),
        // AND
        0x29 => instr(AND, Immediate, 2),
        0x25 => instr(AND, ZeroPage, 3),
        0x35 => instr(AND, ZeroPageX, 4),
        0x2D => instr(AND, Absolute, 4),
        0x3D => instr(AND, AbsoluteX, 4),
        0x39 => instr(AND, AbsoluteY, 4),
        0x21 => instr(AND, IndirectX, 6),
        0x31 => instr(AND, IndirectY, 5),
        // ASL
        0x0A => instr(ASL, Accumulator, 2),
        0x06 => instr(ASL, ZeroPage, 5),
        0x16 => instr(ASL, ZeroPageX, 6),
        0x0E => instr(ASL, Absolute, 6),
        0x1E => instr(ASL, AbsoluteX, 7),
        // Branches
        0x90 => instr(BCC, Relative, 2),
        0xB0 => instr(BCS, Relative, 2),
        0xF0 => instr(BEQ, Relative, 2),
        0x30 => instr(BMI, Relative, 2),
        0xD0 => instr(BNE, Relative, 2),
        0x10 => instr(BPL, Relative, 2),
        0x50 => instr(BVC, Relative, 2),
        0x70 => instr(BVS, Relative, 2),
        // BIT
        0x24 => instr(BIT, ZeroPage, 3),
        0x2C => instr(BIT, Absolute, 4),
        // BRK
        0x00 => instr(BRK, Implicit, 7),
        // Flag instructions
        0x18 => instr(CLC, Implicit, 2),
        0xD8 => instr(CLD, Implicit, 2),
        0x58 => instr(CLI, Implicit, 2),
        0xB8 => instr(CLV, Implicit, 2),
        0x38 => instr(SEC, Implicit, 2),
        0xF8 => instr(SED, Implicit, 2),
        0x78 => instr(SEI, Implicit, 2),
        // CMP
        0xC9 => instr(CMP, Immediate, 2),
        0xC5 => instr(CMP, ZeroPage, 3),
        0xD5 => instr(CMP, ZeroPageX, 4),
        0xCD => instr(CMP, Absolute, 4),
        0xDD => instr(CMP, AbsoluteX, 4),
        0xD9 => instr(CMP, AbsoluteY, 4),
        0xC1 => instr(CMP, IndirectX, 6),
        0xD1 => instr(CMP, IndirectY, 5),
        // CPX
        0xE0 => instr(CPX, Immediate, 2),
        0xE4 => instr(CPX, ZeroPage, 3),
        0xEC => instr(CPX, Absolute, 4),
        // CPY
        0xC0 => instr(CPY, Immediate, 2),
        0xC4 => instr(CPY, ZeroPage, 3),
        0xCC => instr(CPY, Absolute, 4),
        // DEC
        0xC6 => instr(DEC, ZeroPage, 5),
        0xD6 => instr(DEC, ZeroPageX, 6),
        0xCE => instr(DEC, Absolute, 6),
        0xDE => instr(DEC, AbsoluteX, 7),
        // DEX / DEY
        0xCA => instr(DEX, Implicit, 2),
        0x88 => instr(DEY, Implicit, 2),
        // EOR
        0x49 => instr(EOR, Immediate, 2),
        0x45 => instr(EOR, ZeroPage, 3),
        0x55 => instr(EOR, ZeroPageX, 4),
        0x4D => instr(EOR, Absolute, 4),
        0x5D => instr(EOR, AbsoluteX, 4),
        0x59 => instr(EOR, AbsoluteY, 4),
        0x41 => instr(EOR, IndirectX, 6),
        0x51 => instr(EOR, IndirectY, 5),
        // INC
        0xE6 => instr(INC, ZeroPage, 5),
        0xF6 => instr(INC, ZeroPageX, 6),
        0xEE => instr(INC, Absolute, 6),
        0xFE => instr(INC, AbsoluteX, 7),
        // INX / INY
        0xE8 => instr(INX, Implicit, 2),
        0xC8 => instr(INY, Implicit, 2),
        // JMP / JSR
        0x4C => instr(JMP, Absolute, 3),
        0x6C => instr(JMP, Indirect, 5),
        0x20 => instr(JSR, Absolute, 6),
        // LDA
        0xA9 => instr(LDA, Immediate, 2),
        0xA5 => instr(LDA, ZeroPage, 3),
        0xB5 => instr(LDA, ZeroPageX, 4),
        0xAD => instr(LDA, Absolute, 4),
        0xBD => instr(LDA, AbsoluteX, 4),
        0xB9 => instr(LDA, AbsoluteY, 4),
        0xA1 => instr(LDA, IndirectX, 6),
        0xB1 => instr(LDA, IndirectY, 5),
        // LDX
        0xA2 => instr(LDX, Immediate, 2),
        0xA6 => instr(LDX, ZeroPage, 3),
        0xB6 => instr(LDX, ZeroPageY, 4),
        0xAE => instr(LDX, Absolute, 4),
        0xBE => instr(LDX, AbsoluteY, 4),
        // LDY
        0xA0 => instr(LDY, Immediate, 2),
        0xA4 => instr(LDY, ZeroPage, 3),
        0xB4 => instr(LDY, ZeroPageX, 4),
        0xAC => instr(LDY, Absolute, 4),
        0xBC => instr(LDY, AbsoluteX, 4),
        // LSR
        0x4A => instr(LSR, Accumulator, 2),
        0x46 => instr(LSR, ZeroPage, 5),
        0x56 => instr(LSR, ZeroPageX, 6),
        0x4E => instr(LSR, Absolute, 6),
        0x5E => instr(LSR, AbsoluteX, 7),
        // NOP
        0xEA => instr(NOP, Implicit, 2),
        // ORA
        0x09 => instr(ORA, Immediate, 2),
        0x05 => instr(ORA, ZeroPage, 3),
        0x15 => instr(ORA, ZeroPageX, 4),
        0x0D => instr(ORA, Absolute, 4),
        0x1D => instr(ORA, AbsoluteX, 4),
        0x19 => instr(ORA, AbsoluteY, 4),
        0x01 => instr(ORA, IndirectX, 6),
        0x11 => instr(ORA, IndirectY, 5),
        // Stack
        0x48 => instr(PHA, Implicit, 3),
        0x08 => instr(PHP, Implicit, 3),
        0x68 => instr(PLA, Implicit, 4),
        0x28 => instr(PLP, Implicit, 4),
        // ROL / ROR
        0x2A => instr(ROL, Accumulator, 2),
        0x26 => instr(ROL, ZeroPage, 5),
        0x36 => instr(ROL, ZeroPageX, 6),
        0x2E => instr(ROL, Absolute, 6),
        0x3E => instr(ROL, AbsoluteX, 7),
        0x6A => instr(ROR, Accumulator, 2),
        0x66 => instr(ROR, ZeroPage, 5),
        0x76 => instr(ROR, ZeroPageX, 6),
        0x6E => instr(ROR, Absolute, 6),
        0x7E => instr(ROR, AbsoluteX, 7),
        // RTI / RTS
        0x40 => instr(RTI, Implicit, 6),
        0x60 => instr(RTS, Implicit, 6),
        // SBC
        0xE9 => instr(SBC, Immediate, 2),
        0xE5 => instr(SBC, ZeroPage, 3),
        0xF5 => instr(SBC, ZeroPageX, 4),
        0xED => instr(SBC, Absolute, 4),
        0xFD => instr(SBC, AbsoluteX, 4),
        0xF9 => instr(SBC, AbsoluteY, 4),
        0xE1 => instr(SBC, IndirectX, 6),
        0xF1 => instr(SBC, IndirectY, 5),
        // STA
        0x85 => instr(STA, ZeroPage, 3),
        0x95 => instr(STA, ZeroPageX, 4),
        0x8D => instr(STA, Absolute, 4),
        0x9D => instr(STA, AbsoluteX, 5),
        0x99 => instr(STA, AbsoluteY, 5),
        0x81 => instr(STA, IndirectX, 6),
        0x91 => instr(STA, IndirectY, 6),
        // STX / STY
        0x86 => instr(STX, ZeroPage, 3),
        0x96 => instr(STX, ZeroPageY, 4),
        0x8E => instr(STX, Absolute, 4),
        0x84 => instr(STY, ZeroPage, 3),
        0x94 => instr(STY, ZeroPageX, 4),
        0x8C => instr(STY, Absolute, 4),
        // Register transfers
        0xAA => instr(TAX, Implicit, 2),
        0xA8 => instr(TAY, Implicit, 2),
        0xBA => instr(TSX, Implicit, 2),
        0x8A => instr(TXA, Implicit, 2),
        0x9A => instr(TXS, Implicit, 2),
        0x98 => instr(TYA, Implicit, 2),
        // Everything else is an unimplemented/illegal opcode.
        _ => instr(Illegal, Implicit, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_opcode() {
        let i = decode(0x69);
        assert_eq!(i.mnemonic, Mnemonic::ADC);
        assert_eq!(i.mode, AddressingMode::Immediate);
        assert_eq!(i.cycles, 2);
    }

    #[test]
    fn unfilled_byte_is_illegal() {
        let i = decode(0x02);
        assert_eq!(i.mnemonic, Mnemonic::Illegal);
    }

    #[test]
    fn official_opcode_count_is_151() {
        let count = (0u16..=255)
            .filter(|&op| decode(op as u8).mnemonic != Mnemonic::Illegal)
            .count();
        assert_eq!(count, 151);
    }
}
