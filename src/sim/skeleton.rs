//! Runner skeleton as a tree of bones
//!
//! Each bone stores a local rigid transform relative to its parent. Bones are
//! kept in parent-before-child order so world transforms compose in a single
//! forward pass. Nothing here knows about drawing.

use std::f32::consts::PI;

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Height of the hips above the player centre
const HIP_HEIGHT: f32 = 0.05;
const TORSO_LENGTH: f32 = 0.08;
const NECK_OFFSET: f32 = 0.1;
const SHOULDER_OFFSET: f32 = 0.07;
const ARM_LENGTH: f32 = 0.06;
const LEG_SEGMENT: f32 = 0.05;
/// Rest angle of the upper legs away from straight up
const LEG_REST: f32 = 140.0 * PI / 180.0;
/// Peak swing of the run cycle
const SWING: f32 = 40.0 * PI / 180.0;
/// Run cycle frequency relative to the animation phase
const CYCLE_RATE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneKind {
    Body,
    Head,
    LeftArm,
    RightArm,
    LeftUpperLeg,
    LeftLowerLeg,
    RightUpperLeg,
    RightLowerLeg,
}

/// One rigid segment, extending `length` along its local +y axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub kind: BoneKind,
    pub parent: Option<usize>,
    pub offset: Vec2,
    pub rotation: f32,
    pub length: f32,
}

impl Bone {
    fn new(kind: BoneKind, parent: Option<usize>, offset: Vec2, length: f32) -> Self {
        Self {
            kind,
            parent,
            offset,
            rotation: 0.0,
            length,
        }
    }

    #[inline]
    pub fn local(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation, self.offset)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::runner()
    }
}

impl Skeleton {
    /// Body, head, two arms and two two-segment legs
    pub fn runner() -> Self {
        use BoneKind::*;

        let bones = vec![
            Bone::new(Body, None, Vec2::ZERO, TORSO_LENGTH),
            Bone::new(Head, Some(0), Vec2::new(0.0, NECK_OFFSET), 0.0),
            Bone::new(LeftArm, Some(0), Vec2::new(0.0, SHOULDER_OFFSET), ARM_LENGTH),
            Bone::new(RightArm, Some(0), Vec2::new(0.0, SHOULDER_OFFSET), ARM_LENGTH),
            Bone::new(LeftUpperLeg, Some(0), Vec2::ZERO, LEG_SEGMENT),
            Bone::new(LeftLowerLeg, Some(4), Vec2::new(0.0, LEG_SEGMENT), LEG_SEGMENT),
            Bone::new(RightUpperLeg, Some(0), Vec2::ZERO, LEG_SEGMENT),
            Bone::new(RightLowerLeg, Some(6), Vec2::new(0.0, LEG_SEGMENT), LEG_SEGMENT),
        ];
        Self { bones }
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Place the skeleton at the player and set limb angles for phase `theta`
    pub fn pose(&mut self, player_pos: Vec2, theta: f32) {
        let swing = (CYCLE_RATE * theta).sin() * SWING;
        let knee = 0.5 * SWING * (1.0 + (CYCLE_RATE * theta).cos());

        for bone in &mut self.bones {
            match bone.kind {
                BoneKind::Body => bone.offset = player_pos + Vec2::new(0.0, HIP_HEIGHT),
                BoneKind::Head => {}
                // Arms hang down and swing against the legs
                BoneKind::LeftArm => bone.rotation = PI - 0.5 * swing,
                BoneKind::RightArm => bone.rotation = PI + 0.5 * swing,
                BoneKind::LeftUpperLeg => bone.rotation = LEG_REST + swing,
                BoneKind::RightUpperLeg => bone.rotation = -LEG_REST + swing,
                BoneKind::LeftLowerLeg => bone.rotation = knee,
                BoneKind::RightLowerLeg => bone.rotation = -knee,
            }
        }
    }

    /// Compose world transforms, indexed like `bones()`
    pub fn world_transforms(&self) -> Vec<Affine2> {
        let mut world: Vec<Affine2> = Vec::with_capacity(self.bones.len());
        for (i, bone) in self.bones.iter().enumerate() {
            let local = bone.local();
            let transform = match bone.parent {
                Some(p) => {
                    debug_assert!(p < i, "bone {i} listed before its parent {p}");
                    world[p] * local
                }
                None => local,
            };
            world.push(transform);
        }
        world
    }
}
