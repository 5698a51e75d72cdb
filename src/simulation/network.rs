//! The animated particle network
//!
//! [`ParticleSimulation`] owns a fixed population of [`Particle`]s, advances
//! them once per animation frame, draws the connection web and the particle
//! disks onto a [`DrawSurface`], and reacts to pointer movement, resizes and
//! page visibility.
//!
//! ## Scheduling
//!
//! The render loop is a two-state machine ([`LoopState`]). While `Active`,
//! at most one frame callback is pending with the host scheduler; every
//! transition to `Inactive` cancels that exact handle, so stopping and
//! restarting can never leave two loops running.
//!
//! ## Usage
//!
//! ```
//! use particle_network::gfx::ShapeBatch;
//! use particle_network::simulation::{
//!     FixedViewport, HostContext, ManualScheduler, NetworkSettings, ParticleSimulation,
//! };
//!
//! let context = HostContext::new(
//!     Some(ShapeBatch::new()),
//!     ManualScheduler::new(),
//!     FixedViewport::new(1280, 720),
//! );
//! let mut sim = ParticleSimulation::new(context, NetworkSettings::default().with_seed(1));
//! assert_eq!(sim.particles().len(), 50);
//!
//! // Host fires the scheduled frame
//! for _ in sim.scheduler_mut().take_due() {
//!     sim.frame();
//! }
//! ```

use cgmath::{InnerSpace, Vector2};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    config::{NetworkConfig, NetworkSettings},
    particle::Particle,
    traits::{DrawSurface, FrameHandle, FrameScheduler, HostContext, Viewport},
};

/// Scheduling state of the render loop
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Rendering; `pending` is the frame currently requested from the host.
    /// It is only `None` while a frame is being drawn.
    Active { pending: Option<FrameHandle> },
    /// No frame scheduled, no work done
    Inactive,
}

impl LoopState {
    pub fn is_active(&self) -> bool {
        matches!(self, LoopState::Active { .. })
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        match self {
            LoopState::Active { pending } => *pending,
            LoopState::Inactive => None,
        }
    }
}

/// Opacity of the edge between two particles `distance` apart, before the
/// dimming factor. Falls linearly from 1 at distance 0 to 0 at
/// `connection_distance`.
pub fn edge_opacity(distance: f32, connection_distance: f32) -> f32 {
    if connection_distance <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / connection_distance).max(0.0)
}

/// Live state of an enabled simulation: the surface and what is drawn on it
struct Network<S> {
    surface: S,
    particles: Vec<Particle>,
    config: NetworkConfig,
}

impl<S: DrawSurface> Network<S> {
    fn bounds(&self) -> Vector2<f32> {
        let (width, height) = self.surface.size();
        Vector2::new(width as f32, height as f32)
    }

    fn populate(&mut self, settings: &NetworkSettings, rng: &mut StdRng) {
        let bounds = self.bounds();
        self.particles = (0..self.config.particle_count)
            .map(|_| Particle::random(bounds, settings, rng))
            .collect();
    }

    fn advance(&mut self, friction: f32) {
        let bounds = self.bounds();
        for particle in &mut self.particles {
            particle.step(bounds, friction);
        }
    }

    /// One animation frame: clear, move, then draw
    fn render_frame(&mut self, settings: &NetworkSettings) {
        self.surface.clear();
        self.advance(settings.friction);
        self.draw_shapes(settings);
    }

    /// Redraws the current positions without moving anything
    fn render_still(&mut self, settings: &NetworkSettings) {
        self.surface.clear();
        self.draw_shapes(settings);
    }

    /// Edges go first so the disks are never covered by lines
    fn draw_shapes(&mut self, settings: &NetworkSettings) {
        self.draw_connections(settings);
        self.draw_particles(settings);
    }

    fn draw_connections(&mut self, settings: &NetworkSettings) {
        let max_distance = self.config.connection_distance as f32;
        let particles = &self.particles;
        let surface = &mut self.surface;

        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let distance = (a.position - b.position).magnitude();
                if distance < max_distance {
                    let alpha = edge_opacity(distance, max_distance) * settings.edge_dimming;
                    surface.stroke_line(
                        a.position,
                        b.position,
                        settings.edge_width,
                        settings.color.with_alpha(alpha),
                    );
                }
            }
        }
    }

    fn draw_particles(&mut self, settings: &NetworkSettings) {
        for particle in &self.particles {
            self.surface.fill_circle(
                particle.position,
                particle.radius,
                settings.color.with_alpha(particle.opacity),
            );
        }
    }
}

/// Particle network animation bound to a host environment
///
/// A simulation built without a surface is disabled: every operation on it
/// is a no-op and nothing is ever scheduled.
pub struct ParticleSimulation<S, F, V> {
    network: Option<Network<S>>,
    scheduler: F,
    viewport: V,
    settings: NetworkSettings,
    state: LoopState,
    rng: StdRng,
    frames_rendered: u64,
}

impl<S, F, V> ParticleSimulation<S, F, V>
where
    S: DrawSurface,
    F: FrameScheduler,
    V: Viewport,
{
    /// Builds the simulation and starts rendering
    ///
    /// The surface is sized to the viewport, the population is derived from
    /// the viewport width, and the first frame is requested from the
    /// scheduler. With reduced motion a single still frame is drawn and the
    /// loop stays inactive.
    pub fn new(context: HostContext<S, F, V>, settings: NetworkSettings) -> Self {
        let HostContext {
            surface,
            scheduler,
            viewport,
        } = context;

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut sim = Self {
            network: None,
            scheduler,
            viewport,
            settings,
            state: LoopState::Inactive,
            rng,
            frames_rendered: 0,
        };

        let Some(mut surface) = surface else {
            warn!("No drawing surface available, particle network disabled");
            return sim;
        };

        let (width, height) = sim.viewport.size();
        surface.resize(width, height);
        let config = NetworkConfig::for_viewport_width(width);

        let mut network = Network {
            surface,
            particles: Vec::with_capacity(config.particle_count),
            config,
        };
        network.populate(&sim.settings, &mut sim.rng);
        sim.network = Some(network);

        info!(
            "Particle network created: {}x{} viewport, {} particles, connection distance {}px",
            width, height, config.particle_count, config.connection_distance
        );

        if sim.settings.reduced_motion {
            sim.draw_still();
        } else {
            sim.start();
        }
        sim
    }

    /// Transitions to `Active`, requesting a frame right away if none is pending
    ///
    /// Nothing is drawn until the host fires that frame, so every drawn frame
    /// is one the host presents. Calling this while already active does
    /// nothing.
    pub fn start(&mut self) {
        if self.network.is_none() || self.settings.reduced_motion {
            return;
        }
        if self.state.pending().is_some() {
            return;
        }

        debug!("Particle network started");
        let handle = self.scheduler.request_frame();
        self.state = LoopState::Active {
            pending: Some(handle),
        };
    }

    /// Transitions to `Inactive`, cancelling the pending frame if any
    pub fn stop(&mut self) {
        let previous = std::mem::replace(&mut self.state, LoopState::Inactive);
        if let LoopState::Active { pending } = previous {
            if let Some(handle) = pending {
                self.scheduler.cancel_frame(handle);
            }
            debug!("Particle network stopped after {} frames", self.frames_rendered);
        }
    }

    /// Runs the scheduled frame
    ///
    /// Called by the host when the frame requested from its scheduler fires.
    /// Returns `false` without drawing if no frame is pending, which is the
    /// case for callbacks that raced a [`stop`](Self::stop).
    pub fn frame(&mut self) -> bool {
        if self.state.pending().is_none() {
            return false;
        }
        self.state = LoopState::Active { pending: None };
        self.run_frame();
        true
    }

    /// Repels particles near a pointer position given in host coordinates
    ///
    /// Returns the number of particles whose velocity changed.
    pub fn on_pointer_move(&mut self, position: Vector2<f32>) -> usize {
        let Some(network) = self.network.as_mut() else {
            return 0;
        };

        let local = position - network.surface.origin();
        let radius = self.settings.repel_radius;
        let strength = self.settings.repel_strength;

        network
            .particles
            .iter_mut()
            .map(|p| p.repel_from(local, radius, strength))
            .filter(|&changed| changed)
            .count()
    }

    /// Page visibility changed: hidden stops the loop, visible restarts it
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if hidden {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Resizes the surface to the current viewport
    ///
    /// Population and connection distance are kept; use
    /// [`rebuild`](Self::rebuild) to re-derive them for the new size.
    pub fn on_resize(&mut self) {
        let (width, height) = self.viewport.size();
        if let Some(network) = self.network.as_mut() {
            network.surface.resize(width, height);
            debug!("Particle surface resized to {}x{}", width, height);
        }
    }

    /// Recreates the population for the current viewport
    pub fn rebuild(&mut self) {
        let (width, height) = self.viewport.size();
        let Some(network) = self.network.as_mut() else {
            return;
        };

        network.surface.resize(width, height);
        network.config = NetworkConfig::for_viewport_width(width);
        network.populate(&self.settings, &mut self.rng);
        info!(
            "Particle network rebuilt: {} particles, connection distance {}px",
            network.config.particle_count, network.config.connection_distance
        );

        if self.settings.reduced_motion {
            self.draw_still();
        }
    }

    /// Stops the loop and releases the surface and particles
    ///
    /// Events delivered afterwards are ignored.
    pub fn shutdown(&mut self) {
        self.stop();
        if self.network.take().is_some() {
            info!("Particle network shut down");
        }
    }

    fn run_frame(&mut self) {
        let Some(network) = self.network.as_mut() else {
            return;
        };

        network.render_frame(&self.settings);
        self.frames_rendered += 1;

        if let LoopState::Active { pending } = &mut self.state {
            *pending = Some(self.scheduler.request_frame());
        }
    }

    fn draw_still(&mut self) {
        if let Some(network) = self.network.as_mut() {
            network.render_still(&self.settings);
            self.frames_rendered += 1;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.network.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.state.pending()
    }

    pub fn config(&self) -> Option<NetworkConfig> {
        self.network.as_ref().map(|n| n.config)
    }

    pub fn settings(&self) -> &NetworkSettings {
        &self.settings
    }

    /// Current particles; empty when disabled
    pub fn particles(&self) -> &[Particle] {
        self.network
            .as_ref()
            .map(|n| n.particles.as_slice())
            .unwrap_or(&[])
    }

    pub fn surface(&self) -> Option<&S> {
        self.network.as_ref().map(|n| &n.surface)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }
}
