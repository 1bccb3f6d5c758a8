/*!
Native window front end (behind the `display` feature).

Drives the machine one frame at a time from the redraw handler, expands the
PPU's shade indices to RGBA and blits them with `pixels`. Pacing is the
display's: frames render as fast as redraws are delivered.
*/

use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use dmg::Machine;
use dmg::ppu::{LCD_HEIGHT, LCD_WIDTH};

// Instruction bound per frame; a frame is ~70k cycles, so this is generous.
const STEPS_PER_FRAME: usize = 200_000;
const SCALE: u32 = 3;

pub fn run(machine: Machine) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App {
        machine,
        window: None,
        pixels: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    machine: Machine,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let size = LogicalSize::new(
            (LCD_WIDTH as u32 * SCALE) as f64,
            (LCD_HEIGHT as u32 * SCALE) as f64,
        );
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("dmg")
                        .with_inner_size(size)
                        .with_min_inner_size(size),
                )
                .expect("create window"),
        );
        let surface =
            SurfaceTexture::new(LCD_WIDTH as u32, LCD_HEIGHT as u32, window.clone());
        let pixels = Pixels::new(LCD_WIDTH as u32, LCD_HEIGHT as u32, surface)
            .expect("create pixel surface");
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    let _ = pixels.resize_surface(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.machine.run_frame(STEPS_PER_FRAME) {
                    eprintln!("dmg: {e}");
                    eprintln!("{}", self.machine.cpu().state());
                    event_loop.exit();
                    return;
                }
                if let Some(pixels) = self.pixels.as_mut() {
                    self.machine.bus().ppu.render_rgba(pixels.frame_mut());
                    if let Err(e) = pixels.render() {
                        eprintln!("dmg: render: {e}");
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
