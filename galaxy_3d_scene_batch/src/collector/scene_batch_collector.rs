/// SceneBatchCollector: turns the drawables of a frame into scene batches.
///
/// One collector serves one view. Every frame runs the same fixed sequence:
///
/// 1. `initialize_frame`: size per-frame tables, bind camera and pipeline state factory
/// 2. `initialize_passes`: configure (or keep) the scene passes
/// 3. `update_and_collect_source_batches`: classify drawables in parallel,
///    build intermediate batches per pass
/// 4. `process_visible_lights`: find lit geometries per light, rank lights per geometry
/// 5. `collect_scene_batches`: resolve pipeline states, produce final batches
///
/// Stages invoked out of order fail with `Error::InvalidCallSequence`.
/// Results stay readable until the next `initialize_frame`.

use std::sync::Arc;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use crate::error::Result;
use crate::{engine_bail, engine_err};
use crate::galaxy3d::{LARGE_EPSILON, LARGE_VALUE, MAX_VERTEX_LIGHTS};
use crate::pipeline::{
    PipelineState, PipelineStateCache, PipelineStateContext, PipelineStateFactory,
    PipelineStateKey, PipelineStateRequest,
};
use crate::resource::{Geometry, Material, MaterialQuality, Pass, PassRegistry};
use crate::scene::{Drawable, DrawableFlags, DrawableIndex, Light, LightType, SceneIndex};
use crate::work_queue::WorkQueue;
use super::batch::{IntermediateSceneBatch, SceneBatch};
use super::config::CollectorConfig;
use super::frame::FrameInfo;
use super::light_accumulator::DrawableLightAccumulator;
use super::light_data::LightDataCache;
use super::pass::{PassData, ScenePassDescription};
use super::technique_resolver::{active_material_quality, find_technique};
use super::transient::{DrawableZRange, TransientDrawableIndex, TransientTraits};

const LOG_SOURCE: &str = "galaxy3d::SceneBatchCollector";

/// Progress through the per-frame call sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    FrameInitialized,
    PassesInitialized,
    SourceBatchesCollected,
    LightsProcessed,
    BatchesCollected,
}

/// Output of one classification chunk, applied after the join.
struct ClassifiedChunk {
    /// (drawable, traits, Z range for visible geometries)
    traits: Vec<(DrawableIndex, TransientTraits, Option<DrawableZRange>)>,
    visible_geometries: Vec<Arc<dyn Drawable>>,
    visible_lights: Vec<Arc<Light>>,
    scene_z_range: DrawableZRange,
    /// Per configured pass
    unlit_batches: Vec<Vec<IntermediateSceneBatch>>,
    lit_batches: Vec<Vec<IntermediateSceneBatch>>,
}

impl ClassifiedChunk {
    fn new(num_passes: usize) -> Self {
        Self {
            traits: Vec::new(),
            visible_geometries: Vec::new(),
            visible_lights: Vec::new(),
            scene_z_range: DrawableZRange::empty(),
            unlit_batches: (0..num_passes).map(|_| Vec::new()).collect(),
            lit_batches: (0..num_passes).map(|_| Vec::new()).collect(),
        }
    }
}

/// Batch scan result: the resolved batch fields plus the cached state, if any.
struct ScannedBatch {
    drawable: Arc<dyn Drawable>,
    source_batch_index: usize,
    geometry: Arc<Geometry>,
    material: Arc<Material>,
    pass: Arc<Pass>,
    pipeline_state: Option<Arc<dyn PipelineState>>,
}

/// Per-view batch collector
pub struct SceneBatchCollector {
    work_queue: Arc<WorkQueue>,
    pass_registry: Arc<PassRegistry>,
    default_material: Arc<Material>,
    config: CollectorConfig,

    stage: Stage,
    frame: Option<FrameInfo>,
    pipeline_state_factory: Option<Arc<dyn PipelineStateFactory>>,
    material_quality: MaterialQuality,

    passes: Vec<PassData>,

    transient: TransientDrawableIndex,
    scene_z_range: DrawableZRange,
    visible_geometries: Vec<Arc<dyn Drawable>>,
    visible_lights: Vec<Arc<Light>>,
    /// Index into `visible_lights`
    main_light: Option<usize>,
    light_accumulators: Vec<DrawableLightAccumulator>,
    light_data: LightDataCache,
}

impl SceneBatchCollector {
    /// Create a collector.
    ///
    /// `default_material` is used by source batches without a material.
    pub fn new(
        work_queue: Arc<WorkQueue>,
        pass_registry: Arc<PassRegistry>,
        default_material: Arc<Material>,
        config: CollectorConfig,
    ) -> Result<Self> {
        // ========== VALIDATION: pixel lights must fit in the accumulator ==========
        if config.max_pixel_lights > MAX_VERTEX_LIGHTS {
            engine_bail!(InitializationFailed, LOG_SOURCE,
                "max_pixel_lights ({}) exceeds the per-drawable light capacity ({})",
                config.max_pixel_lights, MAX_VERTEX_LIGHTS);
        }

        crate::engine_debug!(LOG_SOURCE, "Created collector ({} threads)", work_queue.num_threads());

        Ok(Self {
            work_queue,
            pass_registry,
            default_material,
            material_quality: config.material_quality,
            config,
            stage: Stage::Idle,
            frame: None,
            pipeline_state_factory: None,
            passes: Vec::new(),
            transient: TransientDrawableIndex::default(),
            scene_z_range: DrawableZRange::empty(),
            visible_geometries: Vec::new(),
            visible_lights: Vec::new(),
            main_light: None,
            light_accumulators: Vec::new(),
            light_data: LightDataCache::new(),
        })
    }

    // ===== FRAME STAGES =====

    /// Start a new frame. Discards the results of the previous one.
    pub fn initialize_frame(&mut self, frame: FrameInfo, factory: Arc<dyn PipelineStateFactory>) {
        let num_drawables = frame.num_drawables as usize;

        self.transient.reset(num_drawables);
        self.light_accumulators.resize_with(num_drawables, DrawableLightAccumulator::default);
        for accumulator in &mut self.light_accumulators {
            accumulator.reset();
        }

        self.scene_z_range = DrawableZRange::empty();
        self.visible_geometries.clear();
        self.visible_lights.clear();
        self.main_light = None;
        for pass in &mut self.passes {
            pass.clear_frame();
        }

        self.material_quality = active_material_quality(self.config.material_quality, &frame.camera);
        self.pipeline_state_factory = Some(factory);
        self.frame = Some(frame);
        self.stage = Stage::FrameInitialized;
    }

    /// Configure the scene passes of this frame.
    ///
    /// Invalid descriptions are logged and skipped. Passes whose
    /// description is unchanged keep their pipeline state caches.
    pub fn initialize_passes(&mut self, descriptions: &[ScenePassDescription]) -> Result<()> {
        self.require_stage(Stage::FrameInitialized, "initialize_passes")?;

        let mut previous = std::mem::take(&mut self.passes);
        for description in descriptions {
            if let Some(position) = previous.iter().position(|p| p.description == *description) {
                let mut pass = previous.swap_remove(position);
                pass.clear_frame();
                self.passes.push(pass);
                continue;
            }

            // Errors are logged by PassData::new; the pass is just left out
            if let Ok(pass) = PassData::new(description.clone(), &self.pass_registry) {
                self.passes.push(pass);
            }
        }

        self.stage = Stage::PassesInitialized;
        Ok(())
    }

    /// Update every drawable, classify it and build intermediate batches.
    ///
    /// `drawables` is normally `Scene::drawables()`; every index must be
    /// below `FrameInfo::num_drawables`.
    pub fn update_and_collect_source_batches(&mut self, drawables: &[Arc<dyn Drawable>]) -> Result<()> {
        self.require_stage(Stage::PassesInitialized, "update_and_collect_source_batches")?;
        let frame = self.current_frame()?;

        let chunks = self.work_queue.for_each_parallel(
            drawables,
            self.config.drawable_work_threshold,
            |_thread, _offset, chunk| self.classify_chunk(frame, chunk),
        )?;
        let chunks = chunks.into_iter().collect::<Result<Vec<_>>>()?;

        // ========== MERGE CHUNK OUTPUTS (chunk order) ==========
        for chunk in chunks {
            for (index, traits, z_range) in chunk.traits {
                self.transient.insert_traits(index, traits);
                if let Some(z_range) = z_range {
                    self.transient.set_z_range(index, z_range);
                }
                if traits.contains(TransientTraits::VISIBLE_GEOMETRY) {
                    if let Some(accumulator) = self.light_accumulators.get_mut(index.index()) {
                        accumulator.reset();
                    }
                }
            }
            self.visible_geometries.extend(chunk.visible_geometries);
            self.visible_lights.extend(chunk.visible_lights);
            self.scene_z_range.accumulate(chunk.scene_z_range);

            for ((pass, unlit), lit) in self.passes.iter_mut().zip(chunk.unlit_batches).zip(chunk.lit_batches) {
                pass.unlit_batches.extend(unlit);
                pass.lit_batches.extend(lit);
            }
        }

        self.stage = Stage::SourceBatchesCollected;
        Ok(())
    }

    /// Find the geometries lit by each visible light and rank lights per geometry.
    pub fn process_visible_lights(&mut self, scene_index: &dyn SceneIndex) -> Result<()> {
        self.require_stage(Stage::SourceBatchesCollected, "process_visible_lights")?;
        let frame_number = self.current_frame()?.frame_number;

        self.main_light = self.find_main_light();

        // ========== COLLECT LIT GEOMETRIES (parallel over lights) ==========
        let transient = &self.transient;
        let visible_geometries = &self.visible_geometries;
        let lit_geometries = self.work_queue.process_each(&self.visible_lights, |_, light| {
            collect_lit_geometries(light, scene_index, transient, visible_geometries)
        })?;

        for (light, lit) in self.visible_lights.iter().zip(lit_geometries) {
            self.light_data.get_or_insert(light, frame_number).set_lit_geometries(lit);
        }
        self.light_data.evict_stale(frame_number, self.config.light_data_retention_frames);

        // ========== ACCUMULATE (sequential over lights) ==========
        for (light_index, light) in self.visible_lights.iter().enumerate() {
            let Some(data) = self.light_data.get(light) else { continue };

            let is_main_light = self.main_light == Some(light_index);
            let inverse_divisor = 1.0 / light.intensity_divisor();

            let penalties = self.work_queue.for_each_parallel(
                data.lit_geometries(),
                self.config.lit_geometries_work_threshold,
                |_thread, _offset, chunk| {
                    chunk
                        .iter()
                        .map(|geometry| {
                            let penalty = if is_main_light {
                                -LARGE_VALUE
                            } else {
                                light.distance_to(geometry.as_ref()).max(LARGE_EPSILON) * inverse_divisor
                            };
                            (geometry.index(), penalty)
                        })
                        .collect::<Vec<_>>()
                },
            )?;

            for (index, penalty) in penalties.into_iter().flatten() {
                if let Some(accumulator) = self.light_accumulators.get_mut(index.index()) {
                    accumulator.accumulate(
                        light_index as u32,
                        light.importance(),
                        penalty,
                        self.config.max_pixel_lights,
                    );
                }
            }
        }

        self.stage = Stage::LightsProcessed;
        Ok(())
    }

    /// Resolve pipeline states and produce the final batches of every pass.
    ///
    /// Batches whose pipeline state can't be built are logged and left out.
    pub fn collect_scene_batches(&mut self) -> Result<()> {
        self.require_stage(Stage::LightsProcessed, "collect_scene_batches")?;
        let frame = self.current_frame()?;
        let camera = Arc::clone(&frame.camera);
        let frame_number = frame.frame_number;
        let Some(factory) = self.pipeline_state_factory.clone() else {
            engine_bail!(InvalidCallSequence, LOG_SOURCE, "No pipeline state factory bound to the frame");
        };
        let main_light = self.main_light().cloned();

        let unlit_context = PipelineStateContext { camera: &camera, light: None };
        let lit_context = PipelineStateContext { camera: &camera, light: main_light.as_deref() };

        let Self { passes, work_queue, default_material, config, .. } = &mut *self;
        for pass in passes.iter_mut() {
            pass.unlit_pipeline_state_cache.begin_frame(frame_number);
            pass.lit_pipeline_state_cache.begin_frame(frame_number);

            pass.unlit_base_scene_batches = assemble_batches(
                work_queue,
                config.batch_work_threshold,
                default_material,
                &pass.unlit_batches,
                &mut pass.unlit_pipeline_state_cache,
                &unlit_context,
                factory.as_ref(),
            )?;
            pass.lit_base_scene_batches = assemble_batches(
                work_queue,
                config.batch_work_threshold,
                default_material,
                &pass.lit_batches,
                &mut pass.lit_pipeline_state_cache,
                &lit_context,
                factory.as_ref(),
            )?;

            pass.unlit_pipeline_state_cache.evict_stale(config.pipeline_state_retention_frames);
            pass.lit_pipeline_state_cache.evict_stale(config.pipeline_state_retention_frames);
        }

        crate::engine_debug!(LOG_SOURCE,
            "Frame {}: {} visible geometries, {} visible lights, {} unlit + {} lit batches",
            self.frame.as_ref().map_or(0, |f| f.frame_number),
            self.visible_geometries.len(),
            self.visible_lights.len(),
            self.passes.iter().map(|p| p.unlit_base_scene_batches.len()).sum::<usize>(),
            self.passes.iter().map(|p| p.lit_base_scene_batches.len()).sum::<usize>());

        self.stage = Stage::BatchesCollected;
        Ok(())
    }

    /// Force every cached pipeline state to be rebuilt (device or shader reset).
    pub fn invalidate_pipeline_states(&mut self) {
        for pass in &mut self.passes {
            pass.unlit_pipeline_state_cache.invalidate_all();
            pass.lit_pipeline_state_cache.invalidate_all();
        }
    }

    // ===== RESULTS =====

    /// Final batches of the pass whose unlit-base or lit-base pass is named
    /// `pass_name`. Empty when no configured pass uses that name.
    ///
    /// When several configured passes share the name, the last one wins.
    pub fn base_batches(&self, pass_name: &str) -> &[SceneBatch] {
        let Some(index) = self.pass_registry.find(pass_name) else { return &[] };
        for pass in self.passes.iter().rev() {
            if pass.unlit_base_pass == Some(index) {
                return &pass.unlit_base_scene_batches;
            }
            if pass.lit_base_pass == Some(index) {
                return &pass.lit_base_scene_batches;
            }
        }
        &[]
    }

    /// Lit batches of the forward pass using `pass_name` as a base pass.
    /// The last matching pass wins.
    pub fn lit_base_batches(&self, pass_name: &str) -> &[SceneBatch] {
        let Some(index) = self.pass_registry.find(pass_name) else { return &[] };
        self.passes
            .iter()
            .rev()
            .find(|pass| pass.additional_light_pass.is_some() && pass.has_base_pass(index))
            .map(|pass| pass.lit_base_scene_batches.as_slice())
            .unwrap_or(&[])
    }

    /// Per-vertex lights of a drawable, best first, `None`-filled.
    pub fn vertex_lights(&self, index: DrawableIndex) -> [Option<Arc<Light>>; MAX_VERTEX_LIGHTS] {
        let lights = self
            .light_accumulators
            .get(index.index())
            .map(|accumulator| accumulator.vertex_lights())
            .unwrap_or_default();
        std::array::from_fn(|slot| {
            lights.get(slot).and_then(|&light| self.visible_lights.get(light as usize)).cloned()
        })
    }

    /// Per-pixel lights of a drawable, best first.
    pub fn pixel_lights(&self, index: DrawableIndex) -> SmallVec<[Arc<Light>; MAX_VERTEX_LIGHTS]> {
        self.light_accumulators
            .get(index.index())
            .map(|accumulator| {
                accumulator
                    .pixel_lights()
                    .into_iter()
                    .filter_map(|light| self.visible_lights.get(light as usize).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Brightest visible directional light.
    pub fn main_light(&self) -> Option<&Arc<Light>> {
        self.main_light.and_then(|index| self.visible_lights.get(index))
    }

    pub fn visible_lights(&self) -> &[Arc<Light>] {
        &self.visible_lights
    }

    pub fn visible_geometries(&self) -> &[Arc<dyn Drawable>] {
        &self.visible_geometries
    }

    /// Geometries lit by the visible light at `light_index`.
    pub fn lit_geometries(&self, light_index: usize) -> &[Arc<dyn Drawable>] {
        self.visible_lights
            .get(light_index)
            .and_then(|light| self.light_data.get(light))
            .map(|data| data.lit_geometries())
            .unwrap_or(&[])
    }

    pub fn transient_traits(&self, index: DrawableIndex) -> TransientTraits {
        self.transient.traits(index)
    }

    pub fn drawable_z_range(&self, index: DrawableIndex) -> DrawableZRange {
        self.transient.z_range(index)
    }

    /// View depth range of every visible finite geometry.
    pub fn scene_z_range(&self) -> DrawableZRange {
        self.scene_z_range
    }

    /// Accepted pass descriptions, in configuration order.
    pub fn configured_passes(&self) -> impl Iterator<Item = &ScenePassDescription> {
        self.passes.iter().map(|pass| &pass.description)
    }

    /// Number of cached light data entries
    pub fn light_data_count(&self) -> usize {
        self.light_data.len()
    }

    pub fn frame(&self) -> Option<&FrameInfo> {
        self.frame.as_ref()
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    // ===== INTERNAL =====

    fn require_stage(&self, expected: Stage, operation: &str) -> Result<()> {
        if self.stage != expected {
            engine_bail!(InvalidCallSequence, LOG_SOURCE,
                "{} called in stage {:?}, expected {:?}", operation, self.stage, expected);
        }
        Ok(())
    }

    fn current_frame(&self) -> Result<&FrameInfo> {
        self.frame.as_ref().ok_or_else(|| {
            engine_err!(InvalidCallSequence, LOG_SOURCE, "Frame not initialized")
        })
    }

    /// Brightest directional light; the first one wins ties.
    fn find_main_light(&self) -> Option<usize> {
        let mut best_score = 0.0;
        let mut main_light = None;
        for (index, light) in self.visible_lights.iter().enumerate() {
            if light.light_type() != LightType::Directional {
                continue;
            }
            let score = light.intensity_divisor();
            if score > best_score {
                best_score = score;
                main_light = Some(index);
            }
        }
        main_light
    }

    fn classify_chunk(&self, frame: &FrameInfo, chunk: &[Arc<dyn Drawable>]) -> Result<ClassifiedChunk> {
        let mut out = ClassifiedChunk::new(self.passes.len());
        let view_row = frame.camera.view_matrix().row(2);
        let view_z = view_row.truncate();
        let view_z_abs = view_z.abs();

        for drawable in chunk {
            let index = drawable.index();
            if !self.transient.contains(index) {
                engine_bail!(IntegrityCheckFailed, LOG_SOURCE,
                    "Drawable index {} out of range (frame has {} drawables)",
                    index.0, self.transient.len());
            }

            drawable.update_batches(frame);

            let draw_distance = drawable.draw_distance();
            if draw_distance > 0.0 && drawable.distance() > draw_distance {
                out.traits.push((index, TransientTraits::UPDATED, None));
                continue;
            }

            if drawable.is_geometry() {
                let bounds = drawable.world_bounding_box();
                let z_range = if bounds.is_infinite() {
                    DrawableZRange::infinite()
                } else {
                    // View space looks down -Z: depth is the negated view Z
                    let center = -(view_z.dot(bounds.center()) + view_row.w);
                    let edge = view_z_abs.dot(bounds.half_size());
                    let range = DrawableZRange::new(center - edge, center + edge);
                    out.scene_z_range.accumulate(range);
                    range
                };

                let mut traits = TransientTraits::UPDATED | TransientTraits::VISIBLE_GEOMETRY;
                for (source_batch_index, source_batch) in drawable.source_batches().iter().enumerate() {
                    let material = source_batch.material.as_ref().unwrap_or(&self.default_material);
                    let Some(technique) = find_technique(drawable.as_ref(), material, self.material_quality) else {
                        continue;
                    };

                    for (pass_index, pass) in self.passes.iter().enumerate() {
                        let Some(batch) = pass.create_intermediate_batch(drawable, source_batch_index, &technique) else {
                            continue;
                        };
                        if batch.additional_pass.is_some() {
                            traits |= TransientTraits::FORWARD_LIT;
                            out.lit_batches[pass_index].push(batch);
                        } else {
                            out.unlit_batches[pass_index].push(batch);
                        }
                    }
                }

                out.traits.push((index, traits, Some(z_range)));
                out.visible_geometries.push(Arc::clone(drawable));
            } else if drawable.is_light() {
                out.traits.push((index, TransientTraits::UPDATED, None));
                let Some(light) = Arc::clone(drawable).into_light() else { continue };
                if light.is_negligible() {
                    continue;
                }
                out.visible_lights.push(light);
            } else {
                out.traits.push((index, TransientTraits::UPDATED, None));
            }
        }

        Ok(out)
    }
}

/// Visible geometries affected by `light`, in query traversal order.
fn collect_lit_geometries(
    light: &Light,
    scene_index: &dyn SceneIndex,
    transient: &TransientDrawableIndex,
    visible_geometries: &[Arc<dyn Drawable>],
) -> Vec<Arc<dyn Drawable>> {
    let light_mask = light.effective_light_mask();
    let affected = |drawable: &Arc<dyn Drawable>| drawable.light_mask() & light_mask != 0;

    let mut candidates = Vec::new();
    match light.light_type() {
        LightType::Directional => {
            return visible_geometries.iter().filter(|&d| affected(d)).cloned().collect();
        }
        LightType::Point => {
            scene_index.query_sphere(&light.sphere(), DrawableFlags::GEOMETRY, &mut candidates);
        }
        LightType::Spot => {
            scene_index.query_frustum(&light.frustum(), DrawableFlags::GEOMETRY, &mut candidates);
        }
    }

    candidates.retain(|drawable| {
        transient.traits(drawable.index()).contains(TransientTraits::VISIBLE_GEOMETRY) && affected(drawable)
    });
    candidates
}

/// Resolve the intermediate batches of one list into scene batches.
///
/// Cache lookups run in parallel; missing states are built serially
/// afterwards, at most once per key.
fn assemble_batches(
    work_queue: &WorkQueue,
    min_chunk: usize,
    default_material: &Arc<Material>,
    intermediate: &[IntermediateSceneBatch],
    cache: &mut PipelineStateCache,
    context: &PipelineStateContext<'_>,
    factory: &dyn PipelineStateFactory,
) -> Result<Vec<SceneBatch>> {
    // ========== PARALLEL SCAN ==========
    let scan_cache: &PipelineStateCache = cache;
    let chunks = work_queue.for_each_parallel(intermediate, min_chunk, |_thread, _offset, chunk| {
        chunk
            .iter()
            .filter_map(|batch| {
                let source = batch.drawable.source_batches().get(batch.source_batch_index)?;
                let material = source.material.as_ref().unwrap_or(default_material);
                let key = PipelineStateKey::new(
                    batch.drawable.pipeline_state_hash(),
                    &source.geometry,
                    material,
                    &batch.base_pass,
                );
                Some(ScannedBatch {
                    drawable: Arc::clone(&batch.drawable),
                    source_batch_index: batch.source_batch_index,
                    geometry: Arc::clone(&source.geometry),
                    material: Arc::clone(material),
                    pass: Arc::clone(&batch.base_pass),
                    pipeline_state: scan_cache.lookup(&key),
                })
            })
            .collect::<Vec<_>>()
    })?;

    // ========== SERIAL BUILD OF MISSING STATES ==========
    let mut batches = Vec::with_capacity(intermediate.len());
    let mut failed_keys = FxHashSet::default();
    let mut built_keys = FxHashSet::default();

    for scanned in chunks.into_iter().flatten() {
        let pipeline_state = match scanned.pipeline_state {
            Some(state) => state,
            None => {
                let request = PipelineStateRequest {
                    drawable: scanned.drawable.as_ref(),
                    geometry: &scanned.geometry,
                    material: &scanned.material,
                    pass: &scanned.pass,
                };
                let key = request.key();
                if failed_keys.contains(&key) {
                    continue;
                }

                match cache.get_or_create(&request, context, factory) {
                    Ok(state) => {
                        // Only the first miss of a key builds; later ones hit the fresh entry
                        built_keys.insert(key);
                        state
                    }
                    Err(err) => {
                        crate::engine_error!(LOG_SOURCE,
                            "Skipping batch of drawable {} (pass '{}'): {}",
                            scanned.drawable.index().0, scanned.pass.name(), err);
                        failed_keys.insert(key);
                        continue;
                    }
                }
            }
        };

        batches.push(SceneBatch {
            drawable_index: scanned.drawable.index(),
            drawable: scanned.drawable,
            source_batch_index: scanned.source_batch_index,
            geometry: scanned.geometry,
            material: scanned.material,
            pass: scanned.pass,
            pipeline_state,
        });
    }

    if !built_keys.is_empty() {
        crate::engine_trace!("galaxy3d::PipelineStateCache",
            "Built {} pipeline states ({} cached)", built_keys.len(), cache.len());
    }

    Ok(batches)
}

#[cfg(test)]
#[path = "scene_batch_collector_tests.rs"]
mod tests;
