//! Whole-frame rasterization, run once per VBLANK rather than per dot. See
//! the crate's design notes for why: it trades split-scroll accuracy for a
//! far simpler pipeline, while keeping the same register file and address
//! translation the per-dot PPU would need anyway.

use super::registers::{PpuMask, PpuStatus};
use super::{nametable_index_for, palette_index, Ppu, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::mapper::CartMapper;

pub fn render_frame(ppu: &mut Ppu, mapper: &mut CartMapper) {
    let mut bg_opaque = vec![false; SCREEN_WIDTH * SCREEN_HEIGHT];

    if ppu.mask.contains(PpuMask::SHOW_BACKGROUND) {
        render_background(ppu, mapper, &mut bg_opaque);
    } else {
        let universal = ppu.palette[0];
        for pixel in ppu.canvas.iter_mut() {
            *pixel = universal & 0x3F;
        }
    }

    if ppu.mask.contains(PpuMask::SHOW_SPRITES) {
        render_sprites(ppu, mapper, &bg_opaque);
    }
}

fn render_background(ppu: &mut Ppu, mapper: &mut CartMapper, bg_opaque: &mut [bool]) {
    let nt_x = ppu.ctrl.nt_x();
    let nt_y = ppu.ctrl.nt_y();
    let bank = ppu.ctrl.background_bank();
    let pattern = mapper.pattern(bank).to_vec();

    for i in 0..SCREEN_WIDTH {
        for j in 0..SCREEN_HEIGHT {
            let x = (ppu.scroll_x as usize + i + nt_x as usize * 256) % 512;
            let y = (ppu.scroll_y as usize + j + nt_y as usize * 240) % 480;

            let nametable = (if x >= 256 { 1 } else { 0 }) + (if y >= 240 { 2 } else { 0 });
            let local_x = x % 256;
            let local_y = y % 240;

            let nt_tile_index = (local_x / 8) + (local_y / 8) * 32;
            let nt_addr = 0x2000 + nametable as u16 * 0x400 + nt_tile_index as u16;
            let nt_value = ppu.vram[nametable_index_for(nt_addr, mapper.mirror())];

            let attr_addr = 0x2000 + nametable as u16 * 0x400 + 0x3C0 + (local_x / 32) as u16 + (local_y / 32) as u16 * 8;
            let attr_byte = ppu.vram[nametable_index_for(attr_addr, mapper.mirror())];
            let quadrant = ((local_y % 32) / 16) * 2 + ((local_x % 32) / 16);
            let attr = (attr_byte >> (quadrant * 2)) & 0x3;

            let row = local_y % 8;
            let tile_base = nt_value as usize * 16;
            let plane_a = pattern.get(tile_base + row).copied().unwrap_or(0);
            let plane_b = pattern.get(tile_base + 8 + row).copied().unwrap_or(0);

            let bit = 7 - (local_x % 8);
            let pixel = ((plane_a >> bit) & 1) | (((plane_b >> bit) & 1) << 1);

            let color_index = if pixel != 0 {
                palette_index(0x3F00 | ((attr as u16) << 2) | pixel as u16)
            } else {
                palette_index(0x3F00)
            };
            let opaque = pixel != 0;

            ppu.canvas[i * SCREEN_HEIGHT + j] = ppu.palette[color_index] & 0x3F;
            bg_opaque[i * SCREEN_HEIGHT + j] = opaque;
        }
    }
}

struct Sprite {
    y: i32,
    tile: u8,
    attr: u8,
    x: u8,
}

fn render_sprites(ppu: &mut Ppu, mapper: &mut CartMapper, bg_opaque: &[bool]) {
    let height = ppu.ctrl.sprite_height() as i32;
    let sprite_bank = ppu.ctrl.sprite_bank();
    let mut sprite_zero_hit = false;

    // Back-to-front: draw index 63 first so index 0 ends up on top.
    for index in (0..64).rev() {
        let base = index * 4;
        let sprite = Sprite {
            y: ppu.oam[base] as i32 - 1,
            tile: ppu.oam[base + 1],
            attr: ppu.oam[base + 2],
            x: ppu.oam[base + 3],
        };

        if sprite.y < 0 || sprite.y >= SCREEN_HEIGHT as i32 {
            continue;
        }

        let flip_h = sprite.attr & 0x40 != 0;
        let flip_v = sprite.attr & 0x80 != 0;
        let behind_background = sprite.attr & 0x20 != 0;
        let palette_bits = sprite.attr & 0x3;

        let (bank, base_tile) = if height == 16 {
            (sprite.tile & 1, sprite.tile & 0xFE)
        } else {
            (sprite_bank, sprite.tile)
        };
        let pattern = mapper.pattern(bank).to_vec();

        for row in 0..height {
            let screen_y = sprite.y + row;
            if screen_y < 0 || screen_y >= SCREEN_HEIGHT as i32 {
                continue;
            }
            let source_row = if flip_v { height - 1 - row } else { row };
            let (tile_index, local_row) = if height == 16 {
                if source_row < 8 {
                    (base_tile as usize, source_row as usize)
                } else {
                    (base_tile as usize + 1, source_row as usize - 8)
                }
            } else {
                (base_tile as usize, source_row as usize)
            };

            let tile_base = tile_index * 16;
            let plane_a = pattern.get(tile_base + local_row).copied().unwrap_or(0);
            let plane_b = pattern.get(tile_base + 8 + local_row).copied().unwrap_or(0);

            for col in 0..8u8 {
                let screen_x = sprite.x as i32 + col as i32;
                if screen_x < 0 || screen_x >= SCREEN_WIDTH as i32 {
                    continue;
                }
                let tile_bit = if flip_h { col } else { 7 - col };
                let pixel = ((plane_a >> tile_bit) & 1) | (((plane_b >> tile_bit) & 1) << 1);
                if pixel == 0 {
                    continue;
                }

                let canvas_index = screen_x as usize * SCREEN_HEIGHT + screen_y as usize;
                let bg_is_opaque = bg_opaque[canvas_index];

                if index == 0 && bg_is_opaque {
                    sprite_zero_hit = true;
                }

                if behind_background && bg_is_opaque {
                    continue;
                }

                let color_index = palette_index(0x3F10 | ((palette_bits as u16) << 2) | pixel as u16);
                ppu.canvas[canvas_index] = ppu.palette[color_index] & 0x3F;
            }
        }
    }

    if sprite_zero_hit {
        ppu.status.insert(PpuStatus::SPRITE_ZERO_HIT);
    }
}
