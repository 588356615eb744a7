use super::style::Color;
use super::{EllipsePatch, RenderSurface};
use crate::Error;
use nalgebra as na;

/// A point of a scatter layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker<F: na::RealField + Copy> {
    pub position: na::Point2<F>,
    pub color: Color,
}

/// In-memory surface holding a scatter layer and a list of ellipse overlays.
///
/// Patches persist until [`Canvas::clear`] is called. Back ends that need a retained scene, such as
/// the rerun viewer, can build one of these and replay it.
#[derive(Debug, Clone)]
pub struct Canvas<F: na::RealField + Copy> {
    markers: Vec<Marker<F>>,
    patches: Vec<EllipsePatch<F>>,
}

impl<F: na::RealField + Copy> Canvas<F> {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            patches: Vec::new(),
        }
    }

    /// Adds points to the scatter layer.
    pub fn scatter<I>(&mut self, points: I, color: Color)
    where
        I: IntoIterator<Item = na::Point2<F>>,
    {
        self.markers.extend(
            points
                .into_iter()
                .map(|position| Marker { position, color }),
        );
    }

    pub fn markers(&self) -> &[Marker<F>] {
        &self.markers
    }

    /// Patches in drawing order: ascending `z_order`, insertion order among equals.
    pub fn patches(&self) -> Vec<&EllipsePatch<F>> {
        let mut patches: Vec<_> = self.patches.iter().collect();
        patches.sort_by_key(|p| p.style.z_order);
        patches
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.patches.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.patches.clear();
    }

    /// Replays every patch, in drawing order, onto another surface.
    pub fn replay<S>(&self, surface: &mut S) -> Result<(), Error>
    where
        S: RenderSurface<F> + ?Sized,
    {
        for patch in self.patches() {
            surface.add_patch(patch.clone())?;
        }
        Ok(())
    }
}

impl<F: na::RealField + Copy> Default for Canvas<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: na::RealField + Copy> RenderSurface<F> for Canvas<F> {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn add_patch(&mut self, patch: EllipsePatch<F>) -> Result<(), Error> {
        self.patches.push(patch);
        Ok(())
    }
}
