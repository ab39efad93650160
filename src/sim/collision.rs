//! Step-halving collision correction
//!
//! A body proposes a move by queueing actions. The move is applied at full
//! scale and tested against the map mask. On overlap the body is rolled back
//! to its snapshot and the move is retried at half the previous scale. Once
//! a scale below the threshold has been tried and still overlaps, the
//! full-scale move is re-applied and accepted even if it overlaps, so a body
//! can never lock up against a wall.

use super::map::TankMap;
use crate::consts::COLLISION_STEP;
use crate::renderer::Collidable;

/// A body whose pending motion can be applied at a fraction of its size
pub trait Correctable: Collidable {
    /// Enough state to undo an applied move
    type Snapshot;

    fn snapshot(&self) -> Self::Snapshot;

    /// Return to `snapshot`, silhouette included
    fn restore(&mut self, snapshot: &Self::Snapshot);

    /// Apply every queued action scaled by `scale` and refresh the silhouette
    fn apply_pending(&mut self, scale: f32);

    fn has_pending(&self) -> bool;

    fn clear_pending(&mut self);
}

/// How a correction pass ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// Nothing was queued
    Idle,
    /// The move was applied at `scale` without overlapping a wall
    Accepted { scale: f32, attempts: u32 },
    /// Every scale above the threshold overlapped; the full move was kept
    Forced { attempts: u32 },
}

impl Correction {
    pub fn is_forced(&self) -> bool {
        matches!(self, Correction::Forced { .. })
    }
}

/// Apply the body's queued motion, halving it until it clears the map
///
/// The queue is always empty afterwards.
pub fn correct_motion<B>(body: &mut B, map: &TankMap, threshold: f32) -> Correction
where
    B: Correctable + ?Sized,
{
    if !body.has_pending() {
        return Correction::Idle;
    }

    // A non-positive threshold would let the scale underflow to zero forever
    let threshold = threshold.max(f32::MIN_POSITIVE);
    let snapshot = body.snapshot();
    let mut scale = 1.0_f32;
    let mut attempts = 0;

    let outcome = loop {
        body.apply_pending(scale);
        attempts += 1;
        let Some(hit) = map.hits_any_wall(&*body) else {
            break Correction::Accepted { scale, attempts };
        };

        body.restore(&snapshot);
        if scale < threshold {
            body.apply_pending(1.0);
            log::debug!(
                "Collision at {} not resolved after {} attempts, forcing move",
                hit,
                attempts
            );
            break Correction::Forced { attempts };
        }
        scale *= COLLISION_STEP;
    };

    body.clear_pending();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Mask;
    use glam::{IVec2, Vec2};

    /// Square body that slides by a fixed velocity per queued step
    struct Slider {
        position: Vec2,
        pending: Vec<Vec2>,
        mask: Mask,
    }

    impl Slider {
        fn new(x: f32, y: f32, size: u32) -> Self {
            Self {
                position: Vec2::new(x, y),
                pending: Vec::new(),
                mask: Mask::full(size, size),
            }
        }
    }

    impl Collidable for Slider {
        fn mask(&self) -> &Mask {
            &self.mask
        }

        fn mask_offset(&self) -> IVec2 {
            self.position.floor().as_ivec2()
        }
    }

    impl Correctable for Slider {
        type Snapshot = Vec2;

        fn snapshot(&self) -> Vec2 {
            self.position
        }

        fn restore(&mut self, snapshot: &Vec2) {
            self.position = *snapshot;
        }

        fn apply_pending(&mut self, scale: f32) {
            for step in &self.pending {
                self.position += *step * scale;
            }
        }

        fn has_pending(&self) -> bool {
            !self.pending.is_empty()
        }

        fn clear_pending(&mut self) {
            self.pending.clear();
        }
    }

    fn vertical_wall_map() -> TankMap {
        let mut map = TankMap::new(400, 400);
        // Occupies x in 195..205
        map.add_wall(Vec2::new(200.0, 0.0), Vec2::new(200.0, 400.0))
            .unwrap();
        map
    }

    #[test]
    fn test_clear_move_is_accepted_at_full_scale() {
        let map = vertical_wall_map();
        let mut body = Slider::new(100.0, 100.0, 10);
        body.pending.push(Vec2::new(20.0, 0.0));
        let result = correct_motion(&mut body, &map, 0.01);
        assert_eq!(result, Correction::Accepted { scale: 1.0, attempts: 1 });
        assert_eq!(body.position, Vec2::new(120.0, 100.0));
        assert!(body.pending.is_empty());
    }

    #[test]
    fn test_blocked_move_is_shortened_and_clear() {
        let map = vertical_wall_map();
        let mut body = Slider::new(150.0, 100.0, 10);
        // Full move would end at x = 190..200, overlapping the wall
        body.pending.push(Vec2::new(40.0, 0.0));
        let result = correct_motion(&mut body, &map, 0.01);

        assert_eq!(result, Correction::Accepted { scale: 0.5, attempts: 2 });
        assert_eq!(body.position, Vec2::new(170.0, 100.0));
        assert!(map.hits_any_wall(&body).is_none());
        assert!(body.pending.is_empty());
    }

    #[test]
    fn test_embedded_body_is_forced_to_full_move() {
        let map = vertical_wall_map();
        // Already inside the wall, every partial move still overlaps
        let mut body = Slider::new(196.0, 100.0, 6);
        body.pending.push(Vec2::new(0.0, 30.0));
        let result = correct_motion(&mut body, &map, 0.01);

        // Scales 1, 1/2, ..., 1/128 are tried; 1/128 is the first below the threshold
        assert_eq!(result, Correction::Forced { attempts: 8 });
        assert!(result.is_forced());
        assert_eq!(body.position, Vec2::new(196.0, 130.0));
        assert!(body.pending.is_empty());
    }

    #[test]
    fn test_step_below_threshold_is_still_tried() {
        let mut map = TankMap::new(400, 400);
        // Occupies x in 200..400
        map.add_wall_with_width(Vec2::new(300.0, 0.0), Vec2::new(300.0, 400.0), 200.0)
            .unwrap();
        let mut body = Slider::new(189.0, 100.0, 10);
        // Only 128 / 128 = 1px of travel keeps the body clear of x = 200
        body.pending.push(Vec2::new(128.0, 0.0));
        let result = correct_motion(&mut body, &map, 0.01);

        assert_eq!(
            result,
            Correction::Accepted {
                scale: 1.0 / 128.0,
                attempts: 8
            }
        );
        assert_eq!(body.position, Vec2::new(190.0, 100.0));
        assert!(map.hits_any_wall(&body).is_none());
    }

    #[test]
    fn test_nothing_queued_is_idle() {
        let map = vertical_wall_map();
        let mut body = Slider::new(196.0, 100.0, 6);
        assert_eq!(correct_motion(&mut body, &map, 0.01), Correction::Idle);
        assert_eq!(body.position, Vec2::new(196.0, 100.0));
    }

    #[test]
    fn test_zero_threshold_still_terminates() {
        let map = vertical_wall_map();
        let mut body = Slider::new(196.0, 100.0, 6);
        body.pending.push(Vec2::new(0.0, 1.0));
        assert!(correct_motion(&mut body, &map, 0.0).is_forced());
    }
}
