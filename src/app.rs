//! Windowed host for the particle network
//!
//! Wires a [`ParticleSimulation`] to winit and wgpu: the window is the
//! viewport, window redraws are the frame scheduler, a [`ShapeBatch`] is the
//! drawing surface and the [`RenderEngine`] presents it. Occlusion and
//! minimization map to page visibility.

use anyhow::Context;
use cgmath::Vector2;
use log::{debug, error, info, trace};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    gfx::{RenderEngine, ShapeBatch, Theme},
    options::LaunchOptions,
    performance::PerformanceMonitor,
    simulation::{
        DrawSurface, FrameHandle, FrameScheduler, HostContext, NetworkSettings,
        ParticleSimulation, Viewport,
    },
};

/// Schedules frames by requesting window redraws
///
/// winit coalesces redraw requests and cannot revoke one, so cancellation
/// only forgets the handle; the simulation ignores redraws it did not ask for.
pub struct RedrawScheduler {
    window: Arc<Window>,
    next_id: u64,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, next_id: 0 }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.window.request_redraw();
        FrameHandle(self.next_id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        trace!("Dropping frame request {:?}", handle);
    }
}

/// Reports the window's inner size as the viewport
pub struct WindowViewport {
    window: Arc<Window>,
}

impl WindowViewport {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> (u32, u32) {
        self.window.inner_size().into()
    }
}

/// Tracks whether the window can be seen
///
/// A window is hidden while it is minimized (zero-sized) or occluded. The
/// simulation is told only about changes of the combined state, so
/// un-minimizing a window that is still occluded keeps the loop stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowVisibility {
    minimized: bool,
    occluded: bool,
}

impl WindowVisibility {
    pub fn is_hidden(&self) -> bool {
        self.minimized || self.occluded
    }

    /// Applies a window resize to the simulation
    ///
    /// A zero width or height counts as minimized. Returns `true` when the
    /// renderer should be resized to the new size.
    pub fn handle_resize<S, F, V>(
        &mut self,
        simulation: &mut ParticleSimulation<S, F, V>,
        width: u32,
        height: u32,
    ) -> bool
    where
        S: DrawSurface,
        F: FrameScheduler,
        V: Viewport,
    {
        let was_hidden = self.is_hidden();
        self.minimized = width == 0 || height == 0;
        if !self.minimized {
            simulation.on_resize();
        }
        self.notify(simulation, was_hidden);
        !self.minimized
    }

    /// Applies an occlusion change to the simulation
    pub fn handle_occluded<S, F, V>(
        &mut self,
        simulation: &mut ParticleSimulation<S, F, V>,
        occluded: bool,
    ) where
        S: DrawSurface,
        F: FrameScheduler,
        V: Viewport,
    {
        let was_hidden = self.is_hidden();
        self.occluded = occluded;
        self.notify(simulation, was_hidden);
    }

    fn notify<S, F, V>(&self, simulation: &mut ParticleSimulation<S, F, V>, was_hidden: bool)
    where
        S: DrawSurface,
        F: FrameScheduler,
        V: Viewport,
    {
        let hidden = self.is_hidden();
        if hidden != was_hidden {
            debug!("Window {}", if hidden { "hidden" } else { "visible" });
            simulation.on_visibility_change(hidden);
        }
    }
}

type WindowSimulation = ParticleSimulation<ShapeBatch, RedrawScheduler, WindowViewport>;

pub struct NetworkApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    settings: NetworkSettings,
    theme: Theme,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    simulation: Option<WindowSimulation>,
    monitor: PerformanceMonitor,
    visibility: WindowVisibility,
    fatal: Option<anyhow::Error>,
}

impl NetworkApp {
    pub fn new(options: &LaunchOptions) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                settings: options.settings(),
                theme: options.theme(),
                window: None,
                render_engine: None,
                simulation: None,
                monitor: PerformanceMonitor::new(),
                visibility: WindowVisibility::default(),
                fatal: None,
            },
        })
    }

    /// Run the application until the window is closed
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        // Frames are driven by redraw requests, so idle means no work
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title("Particle Network")
                    .with_inner_size(LogicalSize::new(1280, 800)),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let (width, height) = window.inner_size().into();
        let renderer = pollster::block_on(RenderEngine::new(window.clone(), width, height))
            .context("failed to initialize renderer")?;

        let context = HostContext::new(
            Some(ShapeBatch::new()),
            RedrawScheduler::new(window.clone()),
            WindowViewport::new(window.clone()),
        );
        self.simulation = Some(ParticleSimulation::new(context, self.settings.clone()));
        self.render_engine = Some(renderer);
        self.window = Some(window);
        info!("Window ready, {} theme", self.theme.name());
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(simulation), Some(render_engine)) =
            (self.simulation.as_mut(), self.render_engine.as_mut())
        else {
            return;
        };

        self.monitor.begin_frame();
        if simulation.frame() {
            self.monitor.end_frame();
        }

        if let Some(batch) = simulation.surface() {
            self.monitor.set_vertex_count(batch.vertex_count() as u32);
            if let Err(err) = render_engine.render(batch, self.theme.background()) {
                error!("Frame dropped: {}", err);
            }
        }

        if self.monitor.should_report() {
            debug!("{}", self.monitor.summary());
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(simulation) = self.simulation.as_mut() {
            simulation.shutdown();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            error!("{:#}", err);
            self.fatal = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_code {
                KeyCode::Escape => self.shutdown(event_loop),
                KeyCode::KeyT => {
                    self.theme = self.theme.toggled();
                    info!("Switched to {} theme", self.theme.name());
                    if let Some(window) = self.window.as_ref() {
                        window.request_redraw();
                    }
                }
                _ => (),
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(simulation) = self.simulation.as_mut() else {
                    return;
                };
                if self.visibility.handle_resize(simulation, width, height) {
                    if let Some(render_engine) = self.render_engine.as_mut() {
                        render_engine.resize(width, height);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(simulation) = self.simulation.as_mut() {
                    let pointer = Vector2::new(position.x as f32, position.y as f32);
                    let pushed = simulation.on_pointer_move(pointer);
                    trace!("Pointer at {:?} repelled {} particles", pointer, pushed);
                }
            }
            WindowEvent::Occluded(occluded) => {
                if let Some(simulation) = self.simulation.as_mut() {
                    self.visibility.handle_occluded(simulation, occluded);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{FixedViewport, ManualScheduler};

    type HeadlessSimulation = ParticleSimulation<ShapeBatch, ManualScheduler, FixedViewport>;

    fn build() -> HeadlessSimulation {
        let context = HostContext::new(
            Some(ShapeBatch::new()),
            ManualScheduler::new(),
            FixedViewport::new(1280, 800),
        );
        ParticleSimulation::new(context, NetworkSettings::default().with_seed(3))
    }

    /// Fires every due frame, returning how many of them drew
    fn redraw(sim: &mut HeadlessSimulation) -> usize {
        let due = sim.scheduler_mut().take_due();
        due.iter().filter(|_| sim.frame()).count()
    }

    #[test]
    fn test_minimize_stops_loop() {
        let mut sim = build();
        let mut visibility = WindowVisibility::default();

        assert!(!visibility.handle_resize(&mut sim, 0, 0));
        assert!(visibility.is_hidden());
        assert!(!sim.is_active());
        assert!(sim.pending_frame().is_none());
        assert_eq!(sim.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_restore_restarts_with_one_pending_frame() {
        let mut sim = build();
        let mut visibility = WindowVisibility::default();
        visibility.handle_resize(&mut sim, 1280, 0);

        *sim.viewport_mut() = FixedViewport::new(1024, 768);
        assert!(visibility.handle_resize(&mut sim, 1024, 768));
        assert!(!visibility.is_hidden());
        assert!(sim.is_active());
        assert_eq!(sim.scheduler().pending_count(), 1);
        assert_eq!(sim.surface().unwrap().size(), (1024, 768));

        // A second non-zero resize is not a visibility change
        visibility.handle_resize(&mut sim, 1024, 768);
        assert_eq!(sim.scheduler().pending_count(), 1);
    }

    #[test]
    fn test_redraw_after_minimize_draws_nothing() {
        let mut sim = build();
        let mut visibility = WindowVisibility::default();
        assert_eq!(redraw(&mut sim), 1);

        let drawn = sim.frames_rendered();
        visibility.handle_resize(&mut sim, 0, 0);
        // winit may still deliver the redraw requested before the minimize
        assert!(!sim.frame());
        assert_eq!(sim.frames_rendered(), drawn);
    }

    #[test]
    fn test_occlusion_and_minimize_combine() {
        let mut sim = build();
        let mut visibility = WindowVisibility::default();

        visibility.handle_occluded(&mut sim, true);
        assert!(!sim.is_active());

        visibility.handle_resize(&mut sim, 0, 0);
        visibility.handle_resize(&mut sim, 1280, 800);
        assert!(visibility.is_hidden());
        assert!(!sim.is_active());
        assert_eq!(sim.scheduler().pending_count(), 0);

        visibility.handle_occluded(&mut sim, false);
        assert!(sim.is_active());
        assert_eq!(sim.scheduler().pending_count(), 1);
        assert_eq!(redraw(&mut sim), 1);
    }

    #[test]
    fn test_occlusion_without_change_is_ignored() {
        let mut sim = build();
        let mut visibility = WindowVisibility::default();

        visibility.handle_occluded(&mut sim, false);
        assert_eq!(sim.scheduler().requested_total(), 1);
        assert_eq!(sim.scheduler().cancelled_total(), 0);
    }
}
