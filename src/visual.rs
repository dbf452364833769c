use rand::{thread_rng, Rng};

use crate::{Key, CANVAS_HEIGHT, CANVAS_WIDTH};

/// A translucent random particle color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn random() -> Self {
        let mut rng = thread_rng();
        Rgba {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
            a: 200,
        }
    }
}

/// A request to the decorative frontend layer
///
/// The core only emits these; rendering is someone else's job
#[derive(Debug, Clone, PartialEq)]
pub enum VisualEvent {
    /// Spawn a decorative particle
    Particle {
        x: f32,
        y: f32,
        size: f32,
        color: Rgba,
    },
    /// Mark or unmark a key as pressed
    Pressed(Key, bool),
    /// Replace the set of keys showing the next-note highlight
    Glow(Vec<Key>),
    /// Redraw after an auto-play step
    Redraw,
}

/// A particle for a note pressed at a position, or at the canvas center
pub fn particle_at(pos: Option<(f32, f32)>) -> VisualEvent {
    let (x, y) = pos.unwrap_or((CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0));
    VisualEvent::Particle {
        x,
        y,
        size: thread_rng().gen_range(50.0, 150.0),
        color: Rgba::random(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_default_to_the_canvas_center() {
        match particle_at(None) {
            VisualEvent::Particle { x, y, size, color } => {
                assert_eq!((x, y), (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0));
                assert!(size >= 50.0 && size < 150.0);
                assert_eq!(color.a, 200);
            }
            event => panic!("expected a particle, got {:?}", event),
        }
    }

    #[test]
    fn particles_keep_their_given_position() {
        match particle_at(Some((12.0, 34.0))) {
            VisualEvent::Particle { x, y, .. } => assert_eq!((x, y), (12.0, 34.0)),
            event => panic!("expected a particle, got {:?}", event),
        }
    }
}
