//! Backdrop builder and run loop.
//!
//! [`Backdrop`] is the entry point: configure with method chaining, then call
//! [`Backdrop::run`], which blocks until the window closes. The lifecycle is
//! Uninitialized → Sizing → Running, returning to Sizing on every resize; if
//! the reduced-motion preference is set, `run` is a no-op: no window, no GPU
//! work, no particles.
//!
//! ```ignore
//! use gossamer::Backdrop;
//!
//! Backdrop::new()
//!     .with_title("portfolio")
//!     .with_seed(7)
//!     .run()?;
//! ```
//!
//! The loop itself is the host's frame-scheduling primitive: every
//! `RedrawRequested` ticks the field, draws, and requests the next redraw,
//! indefinitely. A [`StopHandle`] can break that chain from another thread,
//! which is mainly useful in tests and embedding scenarios.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::{BackdropConfig, ReducedMotion};
use crate::error::BackdropError;
use crate::field::{Field, Surface};
use crate::gpu::GpuState;
use crate::input::PointerTracker;
use crate::time::Time;
use crate::visuals::Palette;

/// Shared flag that ends the redraw loop.
///
/// The loop checks the flag before re-scheduling each frame, so raising it
/// stops the backdrop within one frame.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the backdrop to stop after the current frame.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The ambient backdrop: a full-window particle network.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Backdrop {
    config: BackdropConfig,
    stop: StopHandle,
}

impl Backdrop {
    /// Create a backdrop with default settings.
    pub fn new() -> Self {
        Self {
            config: BackdropConfig::default(),
            stop: StopHandle::default(),
        }
    }

    /// Replace the whole configuration (e.g. one loaded from TOML).
    pub fn with_config(mut self, config: BackdropConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set the spawn seed, making the particle layout reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Force the reduced-motion preference on or off, ignoring the
    /// environment.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.config.reduced_motion = Some(reduced);
        self
    }

    /// Set the color palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// A handle that can stop the running backdrop from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run the backdrop. Blocks until the window is closed or the stop
    /// handle is raised.
    ///
    /// If the reduced-motion preference resolves to true this returns
    /// immediately without creating a window: no drawing setup runs and no
    /// particles are ever constructed.
    pub fn run(self) -> Result<(), BackdropError> {
        if ReducedMotion::resolve(self.config.reduced_motion) {
            tracing::info!("reduced motion requested; backdrop stays inert");
            return Ok(());
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.stop);
        event_loop.run_app(&mut app)?;

        match app.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    config: BackdropConfig,
    stop: StopHandle,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: Option<Field>,
    pointer: PointerTracker,
    time: Time,
    init_error: Option<BackdropError>,
}

impl App {
    fn new(config: BackdropConfig, stop: StopHandle) -> Self {
        Self {
            config,
            stop,
            window: None,
            gpu: None,
            field: None,
            pointer: PointerTracker::new(1.0),
            time: Time::new(),
            init_error: None,
        }
    }

    /// Re-enter the Sizing state: re-query the window dimensions, resize the
    /// swapchain, and rebuild the field. A resize arriving mid-frame takes
    /// effect on the next scheduled frame, never inside one.
    fn resize_to_window(&mut self) {
        let Some(window) = &self.window else { return };
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        let scale = window.scale_factor();
        let dims = Surface::from_physical(size.width, size.height, scale);
        self.pointer.set_scale_factor(scale);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(&dims);
        }
        if let Some(field) = &mut self.field {
            field.resize(dims);
        }
        tracing::debug!(
            width = dims.width,
            height = dims.height,
            dpr = dims.dpr,
            "resized backdrop"
        );
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.stop.is_stopped() {
            event_loop.exit();
            return;
        }

        self.time.update();
        let (Some(field), Some(gpu)) = (&mut self.field, &mut self.gpu) else {
            return;
        };

        let frame = field.tick(self.pointer.state());
        match gpu.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("surface out of memory; stopping backdrop");
                event_loop.exit();
                return;
            }
            Err(e) => tracing::error!("render error: {e}"),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.init_error = Some(BackdropError::Window(e));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let scale = window.scale_factor();
        let dims = Surface::from_physical(size.width, size.height, scale);
        tracing::info!(
            width = dims.width,
            height = dims.height,
            dpr = dims.dpr,
            particles = dims.particle_count(),
            "starting backdrop"
        );

        self.pointer.set_scale_factor(scale);

        match pollster::block_on(GpuState::new(window.clone(), &dims, &self.config.palette)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.init_error = Some(BackdropError::Gpu(e));
                event_loop.exit();
                return;
            }
        }

        self.field = Some(Field::new(
            dims,
            self.config.palette,
            self.config.seed_or_default(),
        ));

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_to_window();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_never_starts() {
        // Must not touch the event loop or GPU: this runs off the main
        // thread, where creating either would panic.
        let backdrop = Backdrop::new().with_reduced_motion(true);
        assert!(backdrop.run().is_ok());
    }

    #[test]
    fn test_stop_handle_roundtrip() {
        let backdrop = Backdrop::new();
        let handle = backdrop.stop_handle();
        assert!(!handle.is_stopped());
        handle.stop();
        assert!(handle.is_stopped());
    }

    #[test]
    fn test_builder_overrides() {
        let backdrop = Backdrop::new().with_title("kiosk").with_seed(3);
        assert_eq!(backdrop.config.title, "kiosk");
        assert_eq!(backdrop.config.seed, Some(3));
    }
}
