pub mod draw;
pub mod ring;
pub mod timer;

use glam::Vec2;
use winit::window::Window;

use self::ring::{FrameHistory, FrameStats};
use self::timer::PhaseTimers;
use crate::camera::Camera;
use crate::ecs::components::{Alive, Body, SnakeName};
use crate::leaderboard::LeaderboardEntry;
use crate::render::GpuState;
use crate::world::Arena;

/// Number of frame times to keep in the histogram.
const FRAME_HISTORY_LEN: usize = 300;
/// Gap between a snake's head circle and its name, in world units.
const LABEL_GAP: f32 = 10.0;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

/// A name drawn above a snake's head, in physical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct NameLabel {
    pub screen_pos: Vec2,
    pub text: String,
}

/// Round state the HUD shows this frame.
#[derive(Debug, Default)]
pub struct HudView {
    pub in_round: bool,
    pub score: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub labels: Vec<NameLabel>,
    /// Score of the round that just ended, shown on the menu.
    pub last_score: Option<u32>,
    pub best_score: Option<u32>,
    pub entity_count: usize,
    pub tick_count: u64,
    pub clock_ms: f64,
    pub pending_events: usize,
}

/// Something the player asked for through the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudAction {
    StartRound { display_name: String },
}

/// Paint output of one HUD frame.
pub struct HudFrame {
    pub primitives: Vec<egui::epaint::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen_descriptor: egui_wgpu::ScreenDescriptor,
    pub action: Option<HudAction>,
}

/// Name labels for every live snake, above the head.
pub fn name_labels(arena: &Arena, camera: &Camera) -> Vec<NameLabel> {
    arena
        .ecs
        .query::<(&Body, &SnakeName, &Alive)>()
        .iter()
        .filter(|(_, (_, _, alive))| alive.0)
        .filter_map(|(_, (body, name, _))| {
            let head = body.head()?;
            let above = head - Vec2::new(0.0, body.radius + LABEL_GAP);
            Some(NameLabel {
                screen_pos: camera.world_to_screen(above),
                text: name.0.clone(),
            })
        })
        .collect()
}

/// Score, leaderboard, start menu and the F3 debug panel, powered by egui.
pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    pub debug_visible: bool,
    /// Contents of the menu's name field.
    pub name_input: String,

    /// Rolling window of frame times (seconds).
    pub frame_times: FrameHistory,
    pub frame_stats: FrameStats,

    pub phase_timers: PhaseTimers,

    // Periodic FPS log accumulator.
    frame_count: u64,
    log_timer: f64,
    log_frame_count: u32,
    log_frame_sum: f64,
    log_frame_min: f64,
    log_frame_max: f64,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuState, initial_name: Option<String>) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            debug_visible: false,
            name_input: initial_name.unwrap_or_default(),
            frame_times: FrameHistory::new(FRAME_HISTORY_LEN),
            frame_stats: FrameStats::default(),
            phase_timers: PhaseTimers::new(),
            frame_count: 0,
            log_timer: 0.0,
            log_frame_count: 0,
            log_frame_sum: 0.0,
            log_frame_min: f64::MAX,
            log_frame_max: 0.0,
        }
    }

    /// Record a frame time, update rolling stats, and periodically log.
    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frame_times.push(dt);

        self.frame_stats = self.frame_times.stats();

        self.log_frame_count += 1;
        self.log_frame_sum += dt;
        self.log_frame_min = self.log_frame_min.min(dt);
        self.log_frame_max = self.log_frame_max.max(dt);
        self.log_timer += dt;

        if self.log_timer >= FPS_LOG_INTERVAL {
            let avg_ms = (self.log_frame_sum / self.log_frame_count as f64) * 1000.0;
            let fps = self.log_frame_count as f64 / self.log_timer;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.log_frame_min * 1000.0,
                self.log_frame_max * 1000.0,
                self.frame_count,
            );
            self.log_timer = 0.0;
            self.log_frame_count = 0;
            self.log_frame_sum = 0.0;
            self.log_frame_min = f64::MAX;
            self.log_frame_max = 0.0;
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::debug!("debug panel {}", if self.debug_visible { "shown" } else { "hidden" });
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the egui frame and produce paint output plus any requested action.
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
        view: &HudView,
    ) -> HudFrame {
        let raw_input = self.egui_state.take_egui_input(window);

        // Snapshot read-only state (egui_ctx.run() borrows self otherwise).
        let debug = draw::DebugSnapshot {
            visible: self.debug_visible,
            frame_stats: self.frame_stats,
            frame_times: self.frame_times.iter().collect(),
            phase_durations: self.phase_timers.durations_us,
            phase_total_us: self.phase_timers.total_us(),
            entity_count: view.entity_count,
            tick_count: view.tick_count,
            clock_ms: view.clock_ms,
            pending_events: view.pending_events,
        };
        let mut name_input = std::mem::take(&mut self.name_input);
        let mut action = None;

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            draw::name_labels(ctx, &view.labels);
            if view.in_round {
                draw::game_hud(ctx, view);
            } else {
                action = draw::menu(ctx, &mut name_input, view.last_score, view.best_score);
            }
            draw::debug_panel(ctx, &debug);
        });

        self.name_input = name_input;

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        HudFrame {
            primitives,
            textures_delta: full_output.textures_delta,
            screen_descriptor: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [screen_w, screen_h],
                pixels_per_point,
            },
            action,
        }
    }

    /// Upload egui textures and buffers. Call before the overlay render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &HudFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.primitives,
            &frame.screen_descriptor,
        )
    }

    /// Render egui into the given render pass.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'static>, frame: &HudFrame) {
        self.egui_renderer
            .render(render_pass, &frame.primitives, &frame.screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, frame: &HudFrame) {
        for &id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::lifecycle;

    #[test]
    fn labels_sit_above_live_heads() {
        let mut cfg = ArenaConfig::default();
        cfg.schedule.autonomous_count = 1;
        cfg.food.initial_count = 0;
        let mut arena = Arena::new(Vec2::new(800.0, 600.0), cfg);
        let mut rng = fastrand::Rng::with_seed(5);
        arena.populate("Noodle".into(), &mut rng);
        let other = arena.autonomous()[0];
        lifecycle::kill(&mut arena, other);

        let cam = Camera {
            offset: Vec2::new(-400.0, -300.0),
        };
        let labels = name_labels(&arena, &cam);
        assert_eq!(
            labels,
            vec![NameLabel {
                screen_pos: Vec2::new(400.0, 275.0),
                text: "Noodle".into(),
            }]
        );
    }
}
