//! Per-mnemonic operand semantics. Each arm reads whatever operand bytes the
//! addressing mode resolved, updates registers/flags, and returns any extra
//! cycles owed beyond the opcode table's base cost (branches only — every
//! other mnemonic's cost is already exact in the table).

use super::registers::Status;
use super::{Bus, Cpu, Operand};
use crate::cpu::opcodes::Mnemonic;

fn same_page(a: u16, b: u16) -> bool {
    a & 0xFF00 == b & 0xFF00
}

fn branch(cpu: &mut Cpu, target: u16, taken: bool) -> u8 {
    if !taken {
        return 0;
    }
    let from = cpu.regs.pc;
    cpu.regs.pc = target;
    if same_page(from, target) {
        1
    } else {
        2
    }
}

fn compare(cpu: &mut Cpu, reg: u8, value: u8) {
    let result = reg.wrapping_sub(value);
    cpu.regs.status.set(Status::CARRY, reg >= value);
    cpu.regs.status.set_zn(result);
}

fn adc(cpu: &mut Cpu, value: u8) {
    let carry_in = cpu.regs.status.contains(Status::CARRY) as u16;
    let a = cpu.regs.a as u16;
    let sum = a + value as u16 + carry_in;
    let result = sum as u8;

    cpu.regs.status.set(Status::CARRY, sum > 0xFF);
    let overflow = (!(cpu.regs.a ^ value) & (cpu.regs.a ^ result)) & 0x80 != 0;
    cpu.regs.status.set(Status::OVERFLOW, overflow);
    cpu.regs.status.set_zn(result);
    cpu.regs.a = result;
}

fn sbc(cpu: &mut Cpu, value: u8) {
    adc(cpu, !value);
}

pub fn run(cpu: &mut Cpu, bus: &mut dyn Bus, mnemonic: Mnemonic, operand: Operand) -> u8 {
    use Mnemonic::*;

    match mnemonic {
        ADC => {
            let value = cpu.read_operand(bus, operand);
            adc(cpu, value);
            0
        }
        SBC => {
            let value = cpu.read_operand(bus, operand);
            sbc(cpu, value);
            0
        }
        AND => {
            let value = cpu.read_operand(bus, operand);
            cpu.regs.a &= value;
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        ORA => {
            let value = cpu.read_operand(bus, operand);
            cpu.regs.a |= value;
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        EOR => {
            let value = cpu.read_operand(bus, operand);
            cpu.regs.a ^= value;
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        BIT => {
            let value = cpu.read_operand(bus, operand);
            cpu.regs.status.set(Status::ZERO, cpu.regs.a & value == 0);
            cpu.regs.status.set(Status::OVERFLOW, value & 0x40 != 0);
            cpu.regs.status.set(Status::NEGATIVE, value & 0x80 != 0);
            0
        }
        CMP => {
            let value = cpu.read_operand(bus, operand);
            compare(cpu, cpu.regs.a, value);
            0
        }
        CPX => {
            let value = cpu.read_operand(bus, operand);
            compare(cpu, cpu.regs.x, value);
            0
        }
        CPY => {
            let value = cpu.read_operand(bus, operand);
            compare(cpu, cpu.regs.y, value);
            0
        }
        ASL => {
            let value = cpu.read_operand(bus, operand);
            cpu.regs.status.set(Status::CARRY, value & 0x80 != 0);
            let result = value << 1;
            cpu.regs.status.set_zn(result);
            cpu.write_operand(bus, operand, result);
            0
        }
        LSR => {
            let value = cpu.read_operand(bus, operand);
            cpu.regs.status.set(Status::CARRY, value & 1 != 0);
            let result = value >> 1;
            cpu.regs.status.set_zn(result);
            cpu.write_operand(bus, operand, result);
            0
        }
        ROL => {
            let value = cpu.read_operand(bus, operand);
            let carry_in = cpu.regs.status.contains(Status::CARRY) as u8;
            cpu.regs.status.set(Status::CARRY, value & 0x80 != 0);
            let result = (value << 1) | carry_in;
            cpu.regs.status.set_zn(result);
            cpu.write_operand(bus, operand, result);
            0
        }
        ROR => {
            let value = cpu.read_operand(bus, operand);
            let carry_in = cpu.regs.status.contains(Status::CARRY) as u8;
            cpu.regs.status.set(Status::CARRY, value & 1 != 0);
            let result = (value >> 1) | (carry_in << 7);
            cpu.regs.status.set_zn(result);
            cpu.write_operand(bus, operand, result);
            0
        }
        INC => {
            let value = cpu.read_operand(bus, operand).wrapping_add(1);
            cpu.regs.status.set_zn(value);
            cpu.write_operand(bus, operand, value);
            0
        }
        DEC => {
            let value = cpu.read_operand(bus, operand).wrapping_sub(1);
            cpu.regs.status.set_zn(value);
            cpu.write_operand(bus, operand, value);
            0
        }
        INX => {
            cpu.regs.x = cpu.regs.x.wrapping_add(1);
            cpu.regs.status.set_zn(cpu.regs.x);
            0
        }
        INY => {
            cpu.regs.y = cpu.regs.y.wrapping_add(1);
            cpu.regs.status.set_zn(cpu.regs.y);
            0
        }
        DEX => {
            cpu.regs.x = cpu.regs.x.wrapping_sub(1);
            cpu.regs.status.set_zn(cpu.regs.x);
            0
        }
        DEY => {
            cpu.regs.y = cpu.regs.y.wrapping_sub(1);
            cpu.regs.status.set_zn(cpu.regs.y);
            0
        }
        LDA => {
            cpu.regs.a = cpu.read_operand(bus, operand);
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        LDX => {
            cpu.regs.x = cpu.read_operand(bus, operand);
            cpu.regs.status.set_zn(cpu.regs.x);
            0
        }
        LDY => {
            cpu.regs.y = cpu.read_operand(bus, operand);
            cpu.regs.status.set_zn(cpu.regs.y);
            0
        }
        STA => {
            cpu.write_operand(bus, operand, cpu.regs.a);
            0
        }
        STX => {
            cpu.write_operand(bus, operand, cpu.regs.x);
            0
        }
        STY => {
            cpu.write_operand(bus, operand, cpu.regs.y);
            0
        }
        TAX => {
            cpu.regs.x = cpu.regs.a;
            cpu.regs.status.set_zn(cpu.regs.x);
            0
        }
        TAY => {
            cpu.regs.y = cpu.regs.a;
            cpu.regs.status.set_zn(cpu.regs.y);
            0
        }
        TXA => {
            cpu.regs.a = cpu.regs.x;
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        TYA => {
            cpu.regs.a = cpu.regs.y;
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        TSX => {
            cpu.regs.x = cpu.regs.sp;
            cpu.regs.status.set_zn(cpu.regs.x);
            0
        }
        TXS => {
            cpu.regs.sp = cpu.regs.x;
            0
        }
        CLC => {
            cpu.regs.status.remove(Status::CARRY);
            0
        }
        SEC => {
            cpu.regs.status.insert(Status::CARRY);
            0
        }
        CLD => {
            cpu.regs.status.remove(Status::DECIMAL);
            0
        }
        SED => {
            cpu.regs.status.insert(Status::DECIMAL);
            0
        }
        CLI => {
            cpu.regs.status.remove(Status::IRQ_DISABLE);
            0
        }
        SEI => {
            cpu.regs.status.insert(Status::IRQ_DISABLE);
            0
        }
        CLV => {
            cpu.regs.status.remove(Status::OVERFLOW);
            0
        }
        PHA => {
            cpu.push8(bus, cpu.regs.a);
            0
        }
        PHP => {
            let byte = super::interrupt::status_byte_for_push(cpu.regs.status, true);
            cpu.push8(bus, byte);
            0
        }
        PLA => {
            cpu.regs.a = cpu.pop8(bus);
            cpu.regs.status.set_zn(cpu.regs.a);
            0
        }
        PLP => {
            let byte = cpu.pop8(bus);
            cpu.regs.status = Status::from_bits_truncate(byte) & !Status::BREAK | Status::UNUSED;
            0
        }
        JMP => {
            cpu.regs.pc = operand.address();
            0
        }
        JSR => {
            let target = operand.address();
            let return_addr = cpu.regs.pc.wrapping_sub(1);
            cpu.push16(bus, return_addr);
            cpu.regs.pc = target;
            0
        }
        RTS => {
            let addr = cpu.pop16(bus);
            cpu.regs.pc = addr.wrapping_add(1);
            0
        }
        RTI => {
            let byte = cpu.pop8(bus);
            cpu.regs.status = Status::from_bits_truncate(byte) & !Status::BREAK | Status::UNUSED;
            cpu.regs.pc = cpu.pop16(bus);
            0
        }
        BRK => {
            cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
            cpu.push16(bus, cpu.regs.pc);
            let byte = super::interrupt::status_byte_for_push(cpu.regs.status, true);
            cpu.push8(bus, byte);
            cpu.regs.status.insert(Status::IRQ_DISABLE);
            cpu.regs.pc = cpu.read16(bus, super::interrupt::BRK.vector);
            0
        }
        NOP | Illegal => 0,
        BCC => branch(cpu, operand.address(), !cpu.regs.status.contains(Status::CARRY)),
        BCS => branch(cpu, operand.address(), cpu.regs.status.contains(Status::CARRY)),
        BEQ => branch(cpu, operand.address(), cpu.regs.status.contains(Status::ZERO)),
        BNE => branch(cpu, operand.address(), !cpu.regs.status.contains(Status::ZERO)),
        BMI => branch(cpu, operand.address(), cpu.regs.status.contains(Status::NEGATIVE)),
        BPL => branch(cpu, operand.address(), !cpu.regs.status.contains(Status::NEGATIVE)),
        BVC => branch(cpu, operand.address(), !cpu.regs.status.contains(Status::OVERFLOW)),
        BVS => branch(cpu, operand.address(), cpu.regs.status.contains(Status::OVERFLOW)),
    }
}
