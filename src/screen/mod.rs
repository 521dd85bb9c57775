//! SDL2-backed host shell: window, keymap, and the frame-pump loop. Kept
//! deliberately thin — this exists to prove the core runs, not to be
//! cycle-accurate in its own pacing (see the crate's design notes).

pub mod palette;

use std::collections::HashMap;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::bus::Console;
use crate::controller::Buttons;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Roughly the number of master `tick()` calls per NTSC video frame
/// (262 scanlines x 341 dots / 3 PPU dots per CPU cycle).
const TICKS_PER_FRAME: u32 = 262 * 341;

pub fn run(mut console: Console) {
    let sdl_context = sdl2::init().expect("sdl2 init failed");
    let video_subsystem = sdl_context.video().expect("sdl2 video subsystem failed");
    let window = video_subsystem
        .window("nemu", (SCREEN_WIDTH * 3) as u32, (SCREEN_HEIGHT * 3) as u32)
        .position_centered()
        .build()
        .expect("failed to create window");

    let mut canvas = window.into_canvas().present_vsync().build().expect("failed to create canvas");
    canvas.set_scale(3.0, 3.0).ok();
    let mut event_pump = sdl_context.event_pump().expect("failed to create event pump");

    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_target(PixelFormatEnum::RGB24, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
        .expect("failed to create texture");

    let key_map = default_key_map();
    let mut rgb_buffer = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];

    'running: loop {
        for _ in 0..TICKS_PER_FRAME {
            console.tick();
        }

        palette::canvas_to_rgb24(console.ppu().frame_canvas(), SCREEN_WIDTH, SCREEN_HEIGHT, &mut rgb_buffer);
        texture
            .update(None, &rgb_buffer, SCREEN_WIDTH * 3)
            .expect("texture update failed");
        canvas.copy(&texture, None, None).expect("canvas copy failed");
        canvas.present();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'running,
                Event::KeyDown { keycode: Some(keycode), .. } => {
                    if let Some(&button) = key_map.get(&keycode) {
                        console.gamepad_mut(0).press(button);
                    }
                }
                Event::KeyUp { keycode: Some(keycode), .. } => {
                    if let Some(&button) = key_map.get(&keycode) {
                        console.gamepad_mut(0).release(button);
                    }
                }
                _ => {}
            }
        }
    }
}

fn default_key_map() -> HashMap<Keycode, Buttons> {
    let mut map = HashMap::new();
    map.insert(Keycode::A, Buttons::A);
    map.insert(Keycode::S, Buttons::B);
    map.insert(Keycode::Q, Buttons::SELECT);
    map.insert(Keycode::W, Buttons::START);
    map.insert(Keycode::Up, Buttons::UP);
    map.insert(Keycode::Down, Buttons::DOWN);
    map.insert(Keycode::Left, Buttons::LEFT);
    map.insert(Keycode::Right, Buttons::RIGHT);
    map
}
