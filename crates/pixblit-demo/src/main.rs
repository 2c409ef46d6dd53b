//! Opens a 512×512 window showing a 16×16 black/white checkerboard.
//!
//! Resize the window to see the board letterboxed with crisp, antialiased
//! texel edges.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use pixblit_engine::logging::{init_logging, LoggingConfig};
use pixblit_engine::Display;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

const WINDOW_SIZE: u32 = 512;
const BOARD_SIZE: u32 = 16;
const FRAME_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Default)]
struct CheckerboardApp {
    display: Option<Display>,
    init_error: Option<anyhow::Error>,
    next_frame: Option<Instant>,
}

impl CheckerboardApp {
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut display = Display::init(
            event_loop,
            "Checkerboard",
            WINDOW_SIZE,
            WINDOW_SIZE,
            BOARD_SIZE,
            BOARD_SIZE,
        )?;

        let pixmap = display.pixmap_mut();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let v = if (x ^ y) & 1 == 1 { 255 } else { 0 };
                pixmap.put_pixel(x, y, [v, v, v, 255]);
            }
        }
        display.flush();

        log::info!("showing checkerboard on {}", display.profile());
        self.display = Some(display);
        Ok(())
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(display) = self.display.take() {
            display.uninit();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for CheckerboardApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.display.is_some() {
            return;
        }

        if let Err(e) = self.open(event_loop) {
            log::error!("failed to open display: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(display) = &mut self.display {
                    display.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(display) = &mut self.display {
                    display.render();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(display) = &self.display else { return };

        // Fixed cadence: one frame every FRAME_INTERVAL.
        let now = Instant::now();
        let due = *self.next_frame.get_or_insert(now);
        if now >= due {
            display.window().request_redraw();
            self.next_frame = Some(now + FRAME_INTERVAL);
        }
        if let Some(next) = self.next_frame {
            event_loop.set_control_flow(ControlFlow::WaitUntil(next));
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = CheckerboardApp::default();

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    match app.init_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
