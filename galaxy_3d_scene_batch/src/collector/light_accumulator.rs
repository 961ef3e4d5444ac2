/// Per-drawable light ranking.
///
/// Each lit geometry owns one accumulator per frame. Lights are fed in one
/// at a time with a penalty (lower is better); the accumulator keeps the
/// best `MAX_VERTEX_LIGHTS` of them in ascending penalty order. The head of
/// the list becomes per-pixel lights, the tail per-vertex lights.

use smallvec::SmallVec;
use crate::galaxy3d::{LARGE_VALUE, MAX_VERTEX_LIGHTS};
use crate::scene::LightImportance;

/// Penalty of `Important` lights: ahead of every `Auto` light, behind the
/// main light (`-LARGE_VALUE`).
const IMPORTANT_PENALTY: f32 = -LARGE_VALUE * 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct RankedLight {
    penalty: f32,
    /// Index into the frame's visible lights
    light: u32,
    importance: LightImportance,
}

/// Bounded, penalty-ordered set of the lights affecting one drawable.
#[derive(Debug, Clone, Default)]
pub struct DrawableLightAccumulator {
    lights: SmallVec<[RankedLight; MAX_VERTEX_LIGHTS]>,
    max_pixel_lights: usize,
}

impl DrawableLightAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every light (start of frame).
    pub fn reset(&mut self) {
        self.lights.clear();
        self.max_pixel_lights = 0;
    }

    /// Offer a light to this drawable.
    ///
    /// `Important` lights rank ahead of every `Auto` light but never ahead
    /// of the main light, which is offered with `-LARGE_VALUE`. On equal
    /// penalties the light offered first stays ahead. A light ranking below
    /// a full set is dropped.
    pub fn accumulate(
        &mut self,
        light: u32,
        importance: LightImportance,
        penalty: f32,
        max_pixel_lights: usize,
    ) {
        self.max_pixel_lights = max_pixel_lights;

        let penalty = match importance {
            LightImportance::Important => penalty.min(IMPORTANT_PENALTY),
            LightImportance::Auto | LightImportance::NotImportant => penalty,
        };

        let position = self.lights.partition_point(|ranked| ranked.penalty <= penalty);
        if position >= MAX_VERTEX_LIGHTS {
            return;
        }
        if self.lights.len() == MAX_VERTEX_LIGHTS {
            self.lights.pop();
        }
        self.lights.insert(position, RankedLight { penalty, light, importance });
    }

    /// Number of accumulated lights (pixel and vertex)
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Accumulated lights, best first
    pub fn lights(&self) -> impl Iterator<Item = u32> + '_ {
        self.lights.iter().map(|ranked| ranked.light)
    }

    /// Per-pixel lights, best first.
    pub fn pixel_lights(&self) -> SmallVec<[u32; MAX_VERTEX_LIGHTS]> {
        self.split().0
    }

    /// Per-vertex lights, best first.
    pub fn vertex_lights(&self) -> SmallVec<[u32; MAX_VERTEX_LIGHTS]> {
        self.split().1
    }

    /// The first `max_pixel_lights` lights that are not `NotImportant` go
    /// per-pixel, everything else per-vertex.
    fn split(&self) -> (SmallVec<[u32; MAX_VERTEX_LIGHTS]>, SmallVec<[u32; MAX_VERTEX_LIGHTS]>) {
        let mut pixel = SmallVec::new();
        let mut vertex = SmallVec::new();
        for ranked in &self.lights {
            let eligible = ranked.importance != LightImportance::NotImportant;
            if eligible && pixel.len() < self.max_pixel_lights {
                pixel.push(ranked.light);
            } else {
                vertex.push(ranked.light);
            }
        }
        (pixel, vertex)
    }
}

#[cfg(test)]
#[path = "light_accumulator_tests.rs"]
mod tests;
