//! Externally sampled skeletal geometry.
//!
//! Presentation samples bone positions each tick and hands them to the sim
//! before hit detection runs. Animation interpolation is only approximately
//! deterministic, so every sample is quantized to an integer grid on entry;
//! this is the single acknowledged nondeterminism boundary of the core.
//! Missing data defaults to zeroed samples and must never crash the sim.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::attacks::BoneAnchor;
use crate::constants::BONE_QUANT_STEP;

/// Snap a sampled point to the quantization grid.
pub fn quantize(p: DVec2) -> DVec2 {
    DVec2::new(
        (p.x / BONE_QUANT_STEP).round() * BONE_QUANT_STEP,
        (p.y / BONE_QUANT_STEP).round() * BONE_QUANT_STEP,
    )
}

/// Axis-aligned chest hurtbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChestBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl ChestBox {
    /// Whether a point lies inside the box.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether the segment a→b passes through the box, sampled coarsely.
    /// Segment lengths here are a weapon's reach, so a fixed subdivision
    /// is accurate to within the quantization grid.
    pub fn intersects_segment(&self, a: DVec2, b: DVec2, thickness: f64) -> bool {
        const STEPS: u32 = 8;
        let grown = ChestBox {
            min: self.min - DVec2::splat(thickness),
            max: self.max + DVec2::splat(thickness),
        };
        (0..=STEPS).any(|i| {
            let t = i as f64 / STEPS as f64;
            grown.contains(a.lerp(b, t))
        })
    }
}

/// One fighter's sampled geometry for the current tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneSamples {
    /// Attack anchor points, in declared anchor order.
    pub anchors: Vec<(BoneAnchor, DVec2)>,
    /// Head hurtbox center.
    pub head_center: DVec2,
    /// Head hurtbox radius.
    pub head_radius: f64,
    /// Chest hurtbox.
    pub chest: ChestBox,
    /// Weapon line from grip to tip, if the loadout carries one.
    pub weapon_line: Option<(DVec2, DVec2)>,
}

impl Default for BoneSamples {
    /// Zeroed samples: every test degrades to a miss, never a crash.
    fn default() -> Self {
        Self {
            anchors: Vec::new(),
            head_center: DVec2::ZERO,
            head_radius: 0.0,
            chest: ChestBox::default(),
            weapon_line: None,
        }
    }
}

impl BoneSamples {
    /// Quantize every sampled point in place. Called once on entry to the
    /// tick step so identical visual poses produce identical hit tests.
    pub fn quantized(mut self) -> Self {
        for (_, p) in &mut self.anchors {
            *p = quantize(*p);
        }
        self.head_center = quantize(self.head_center);
        self.chest.min = quantize(self.chest.min);
        self.chest.max = quantize(self.chest.max);
        if let Some((a, b)) = self.weapon_line {
            self.weapon_line = Some((quantize(a), quantize(b)));
        }
        self
    }

    /// Position of a named anchor, if sampled this tick.
    pub fn anchor(&self, anchor: BoneAnchor) -> Option<DVec2> {
        self.anchors
            .iter()
            .find(|(a, _)| *a == anchor)
            .map(|(_, p)| *p)
    }
}

/// Distance from point `p` to segment a→b.
pub fn point_segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
