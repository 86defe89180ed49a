use super::config::Config;
use super::glutils::log_opengl_info;
use anyhow::{Context, Error, Result};
use gl;
use log::{debug, info, warn};
use sdl2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IoEvents {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
}

impl IoEvents {
    pub fn from_sdl(event: &Event) -> Option<IoEvents> {
        match event {
            Event::Quit { .. } => Some(IoEvents::Quit),
            Event::KeyDown {
                keycode: Some(k), ..
            } => Some(IoEvents::KeyDown(*k)),
            Event::KeyUp {
                keycode: Some(k), ..
            } => Some(IoEvents::KeyUp(*k)),
            _ => None,
        }
    }

    /// Window close or Escape.
    pub fn is_quit_request(&self) -> bool {
        matches!(self, IoEvents::Quit | IoEvents::KeyDown(Keycode::Escape))
    }
}

pub fn should_quit(events: &[IoEvents]) -> bool {
    events.iter().any(IoEvents::is_quit_request)
}

// Drop order matters: the context goes before the window, the window before SDL.
pub struct System {
    pub w: usize,
    pub h: usize,
    pub events: Vec<IoEvents>,
    vsync: bool,
    event_pump: sdl2::EventPump,
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(cfg: &Config) -> Result<System> {
        let sdl_context = sdl2::init().map_err(Error::msg).context("SDL init")?;
        let video_subsystem = sdl_context
            .video()
            .map_err(Error::msg)
            .context("SDL video subsystem")?;

        let (major, minor) = cfg.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_context_flags().forward_compatible().set();

        let mut builder = video_subsystem.window(&cfg.title, cfg.width, cfg.height);
        builder.opengl().position_centered();
        if cfg.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .context("Error while building OpenGL window")?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(Error::msg)
            .context("creating OpenGL context")?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(Error::msg)
            .context("making OpenGL context current")?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug!(
            "requested OpenGL {}.{} core, got {:?}",
            major,
            minor,
            gl_attr.context_version()
        );

        let interval = if cfg.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            warn!("could not set swap interval: {e}");
        }

        info!("window '{}' {}x{}", cfg.title, cfg.width, cfg.height);
        log_opengl_info();

        let event_pump = sdl_context
            .event_pump()
            .map_err(Error::msg)
            .context("SDL event pump")?;

        Ok(System {
            w: cfg.width as usize,
            h: cfg.height as usize,
            events: Vec::new(),
            vsync: cfg.vsync,
            event_pump,
            gl_ctx,
            window,
            video_subsystem,
            sdl_context,
        })
    }

    /// Returns `false` once the user asked to quit.
    pub fn process_io_events(&mut self) -> bool {
        self.events.clear();
        self.events
            .extend(self.event_pump.poll_iter().filter_map(|e| IoEvents::from_sdl(&e)));

        if should_quit(&self.events) {
            debug!("quit requested");
            return false;
        }
        true
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
        if !self.vsync {
            ::std::thread::sleep(::std::time::Duration::new(0, 1_000_000_000u32 / 60));
        }
    }

    pub fn clear_screen(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_close_quits() {
        let ev = Event::Quit { timestamp: 0 };
        assert_eq!(IoEvents::from_sdl(&ev), Some(IoEvents::Quit));
        assert!(should_quit(&[IoEvents::Quit]));
    }

    #[test]
    fn escape_press_quits() {
        assert!(should_quit(&[
            IoEvents::KeyDown(Keycode::A),
            IoEvents::KeyDown(Keycode::Escape),
        ]));
    }

    #[test]
    fn other_keys_and_escape_release_do_not_quit() {
        assert!(!should_quit(&[
            IoEvents::KeyDown(Keycode::Space),
            IoEvents::KeyUp(Keycode::Escape),
        ]));
        assert!(!should_quit(&[]));
    }
}
