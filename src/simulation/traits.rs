//! Host environment seams for the particle network
//!
//! The simulation never reaches for globals: everything it needs from the
//! outside world (a place to draw, a frame scheduler, the viewport size) is
//! handed to it through a [`HostContext`] at construction. The winit host in
//! [`crate::app`] provides real implementations, tests provide fakes.

use cgmath::Vector2;

use crate::gfx::color::Rgba;

/// A 2D immediate-mode drawing surface
///
/// Coordinates are surface-local pixels with the origin in the top-left
/// corner and y growing downwards.
pub trait DrawSurface {
    /// Current surface size in pixels
    fn size(&self) -> (u32, u32);

    /// Resizes the drawable area
    fn resize(&mut self, width: u32, height: u32);

    /// Position of the surface's top-left corner in pointer coordinates
    ///
    /// Pointer events are delivered relative to the host's coordinate space;
    /// subtracting this origin yields surface-local positions.
    fn origin(&self) -> Vector2<f32> {
        Vector2::new(0.0, 0.0)
    }

    /// Clears the whole surface
    fn clear(&mut self);

    /// Draws a filled disk
    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba);

    /// Draws a straight line segment of the given width
    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>, width: f32, color: Rgba);
}

/// Opaque handle identifying one scheduled frame callback
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Per-frame scheduling primitive
///
/// `request_frame` asks the host to fire a single frame callback before the
/// next repaint. The host delivers it by calling
/// [`ParticleSimulation::frame`](super::network::ParticleSimulation::frame).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a previously requested frame. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Viewport size query
pub trait Viewport {
    fn size(&self) -> (u32, u32);
}

/// Everything the simulation borrows from its host
///
/// `surface` is optional: a host that could not resolve its drawing surface
/// passes `None` and gets back a disabled simulation.
pub struct HostContext<S, F, V> {
    pub surface: Option<S>,
    pub scheduler: F,
    pub viewport: V,
}

impl<S, F, V> HostContext<S, F, V> {
    pub fn new(surface: Option<S>, scheduler: F, viewport: V) -> Self {
        Self {
            surface,
            scheduler,
            viewport,
        }
    }
}

/// A fixed viewport size, for headless use and tests
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedViewport {
    pub width: u32,
    pub height: u32,
}

impl FixedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Frame scheduler driven by hand
///
/// Keeps track of which requested frames are still outstanding so callers
/// can assert on the number of pending callbacks, and fire them explicitly
/// with [`ManualScheduler::take_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    requested_total: u64,
    cancelled_total: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames requested and not yet fired or cancelled
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    pub fn cancelled_total(&self) -> u64 {
        self.cancelled_total
    }

    /// Removes and returns all outstanding frames, as if the host fired them
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested_total += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled_total += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_tracks_pending() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_ne!(a, b);
        assert_eq!(scheduler.pending_count(), 2);

        scheduler.cancel_frame(a);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.cancelled_total(), 1);

        // Cancelling twice is harmless
        scheduler.cancel_frame(a);
        assert_eq!(scheduler.cancelled_total(), 1);

        assert_eq!(scheduler.take_due(), vec![b]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_fixed_viewport() {
        assert_eq!(FixedViewport::new(800, 600).size(), (800, 600));
    }
}
