use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::ArenaConfig;
use crate::hooks::{LocalProfile, RoundHooks};
use crate::hud::timer::Phase;
use crate::hud::{self, Hud, HudAction, HudView};
use crate::render::scene::Scene;
use crate::render::GpuState;
use crate::round::Round;
use crate::scheduler::{FixedStep, TICK_MS};

/// Initial window size (logical pixels).
const WINDOW_WIDTH: f64 = 1280.0;
const WINDOW_HEIGHT: f64 = 800.0;

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    hud: Option<Hud>,

    hooks: LocalProfile,
    config: ArenaConfig,
    /// Current or most recently finished round. A finished round stays for its last frame.
    round: Option<Round>,

    /// Latest cursor position in viewport pixels.
    pointer: Option<Vec2>,

    // Fixed timestep
    step: FixedStep,
    last_frame_time: Option<Instant>,

    // Reusable draw lists (avoid per-frame allocation)
    scene: Scene,

    // Screen dimensions
    screen_w: u32,
    screen_h: u32,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            hud: None,
            hooks: LocalProfile::from_env(),
            config: ArenaConfig::default(),
            round: None,
            pointer: None,
            step: FixedStep::default(),
            last_frame_time: None,
            scene: Scene::default(),
            screen_w: 0,
            screen_h: 0,
        }
    }

    fn viewport(&self) -> Vec2 {
        Vec2::new(self.screen_w as f32, self.screen_h as f32)
    }

    fn start_round(&mut self, display_name: String) {
        let round = Round::start(
            display_name,
            self.viewport(),
            self.config,
            fastrand::Rng::new(),
            &mut self.hooks,
        );
        self.round = Some(round);
        self.step.reset();
    }

    /// Run every fixed tick that accumulated since the last frame.
    fn run_fixed_update(&mut self, dt: f64) {
        let ticks = self.step.advance(dt);
        let Some(round) = self.round.as_mut() else {
            return;
        };
        for _ in 0..ticks {
            if !round.is_running() {
                break;
            }
            round.tick(TICK_MS, self.pointer, &mut self.hooks);
        }
    }

    fn hud_view(&self) -> HudView {
        let best_score = self.hooks.best_score();
        let Some(round) = &self.round else {
            return HudView {
                best_score,
                ..HudView::default()
            };
        };
        HudView {
            in_round: round.is_running(),
            score: round.score(),
            leaderboard: round.leaderboard().to_vec(),
            labels: hud::name_labels(round.arena(), round.camera()),
            last_score: (!round.is_running()).then(|| round.score()),
            best_score,
            entity_count: round.arena().ecs.len() as usize,
            tick_count: round.ticks(),
            clock_ms: round.clock_ms(),
            pending_events: round.pending_events(),
        }
    }

    fn redraw(&mut self) {
        // --- Timing ---
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            if let Some(hud) = &mut self.hud {
                hud.record_frame(dt);
                hud.phase_timers.begin();
            }
            self.run_fixed_update(dt);
            if let Some(hud) = &mut self.hud {
                hud.phase_timers.end(Phase::Simulation);
            }
        }
        self.last_frame_time = Some(now);

        let view = self.hud_view();

        let (Some(window), Some(gpu), Some(hud)) =
            (self.window.as_ref(), self.gpu.as_mut(), self.hud.as_mut())
        else {
            return;
        };

        // --- Build draw lists ---
        hud.phase_timers.begin();
        match &self.round {
            Some(round) => self.scene.build(round.arena(), round.camera()),
            None => self.scene.clear(),
        }
        hud.phase_timers.end(Phase::BuildScene);

        hud.phase_timers.begin();
        gpu.upload(&self.scene);
        hud.phase_timers.end(Phase::GpuUpload);

        // --- Render ---
        hud.phase_timers.begin();
        let Some(mut frame) = gpu.begin_frame() else {
            return;
        };
        gpu.draw_scene(&mut frame.encoder, &frame.view);

        let hud_frame = hud.run_frame(window, self.screen_w, self.screen_h, &view);
        let cmd_bufs = hud.prepare(&gpu.device, &gpu.queue, &mut frame.encoder, &hud_frame);
        {
            let mut pass = GpuState::begin_overlay_pass(&mut frame.encoder, &frame.view);
            hud.render(&mut pass, &hud_frame);
        }
        gpu.finish_frame(frame.encoder, frame.output, cmd_bufs);
        hud.free_textures(&hud_frame);
        hud.phase_timers.end(Phase::RenderSubmit);

        if let Some(HudAction::StartRound { display_name }) = hud_frame.action {
            self.start_round(display_name);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Snakepit")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.screen_w = size.width;
        self.screen_h = size.height;
        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = match GpuState::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };
        log::info!("wgpu + circle pipeline initialized");

        let initial_name = self.hooks.initial_display_name();
        self.hud = Some(Hud::new(&window, &gpu, initial_name));
        self.gpu = Some(gpu);

        // Continuous game loop
        event_loop.set_control_flow(ControlFlow::Poll);

        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(hud)) = (&self.window, &mut self.hud) {
            hud.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if new_size.width > 0 && new_size.height > 0 {
                    self.screen_w = new_size.width;
                    self.screen_h = new_size.height;
                    let viewport = self.viewport();
                    if let Some(round) = &mut self.round {
                        round.set_viewport(viewport);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => {
                        log::info!("ESC pressed, exiting");
                        event_loop.exit();
                    }
                    PhysicalKey::Code(KeyCode::F3) => {
                        if let Some(hud) = &mut self.hud {
                            hud.toggle_debug();
                        }
                    }
                    _ => {}
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Entry point: create the event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
