//! A moving polygon that is kept out of a fixed obstacle.
//!
//! Each [`Scene::step`] nudges the mover, tests it against the obstacle, and
//! pushes it back out along the minimum translation vector if they overlap.
//! The scene is plain data, so a caller drives it from whatever input source
//! or frame loop it has.

use crate::{
    error::GeometryError,
    polygon::Polygon,
    sat::{resolve, Collision},
    V2,
};
use log::debug;

/// One unit of movement in screen coordinates, where `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}
impl Nudge {
    /// Unit direction of the nudge.
    pub fn direction(self) -> V2 {
        match self {
            Nudge::Up => V2::new(0.0, -1.0),
            Nudge::Down => V2::new(0.0, 1.0),
            Nudge::Left => V2::new(-1.0, 0.0),
            Nudge::Right => V2::new(1.0, 0.0),
        }
    }
}

/// Scene state: a polygon under control and an obstacle it may not enter.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// The polygon that is nudged and pushed out.
    pub mover: Polygon,
    /// The polygon that never moves.
    pub obstacle: Polygon,
    /// Distance moved by a single nudge.
    pub step_size: f64,
}

/// Outcome of a single [`Scene::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// The scene after the nudge and any push out.
    pub scene: Scene,
    /// The collision that was resolved during the step, if there was one.
    pub collision: Option<Collision>,
}

impl Scene {
    pub fn new(mover: Polygon, obstacle: Polygon, step_size: f64) -> Self {
        Scene {
            mover,
            obstacle,
            step_size,
        }
    }

    /// Advance the scene by one nudge.
    ///
    /// The mover is translated by `step_size` in the direction of the nudge.
    /// If it then overlaps the obstacle, it is moved by the collision's
    /// [`push_vector`](Collision::push_vector) so that the two only touch.
    pub fn step(mut self, nudge: Nudge) -> Result<Step, GeometryError> {
        let collision = self.advance(nudge)?;
        Ok(Step {
            scene: self,
            collision,
        })
    }

    /// Advance the scene in place by one nudge, as [`Scene::step`] does.
    ///
    /// On error the mover has already been nudged but not pushed out.
    pub fn advance(&mut self, nudge: Nudge) -> Result<Option<Collision>, GeometryError> {
        self.mover.translate_by(nudge.direction() * self.step_size);

        let collision = resolve(&self.mover, &self.obstacle)?;
        if let Some(collision) = &collision {
            debug!(
                "{:?} overlapped by {}; pushing by {:?}",
                nudge,
                collision.depth(),
                collision.push_vector()
            );
            self.mover.translate_by(collision.push_vector());
        }
        Ok(collision)
    }

    /// Apply a sequence of nudges in order.
    ///
    /// # Returns
    ///
    /// The final scene and every collision resolved along the way.
    pub fn replay(
        mut self,
        nudges: impl IntoIterator<Item = Nudge>,
    ) -> Result<(Scene, Vec<Collision>), GeometryError> {
        let mut collisions = Vec::new();
        for nudge in nudges {
            collisions.extend(self.advance(nudge)?);
        }
        Ok((self, collisions))
    }
}
