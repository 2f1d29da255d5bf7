use super::ring::FrameStats;
use super::timer::{Phase, PHASE_COUNT};
use super::{HudAction, HudView, NameLabel};
use crate::hooks::{resolve_display_name, DEFAULT_PLAYER_NAME};

/// 60 Hz frame budget, seconds.
const FRAME_BUDGET: f64 = 0.01667;

pub(super) struct DebugSnapshot {
    pub visible: bool,
    pub frame_stats: FrameStats,
    pub frame_times: Vec<f64>,
    pub phase_durations: [f64; PHASE_COUNT],
    pub phase_total_us: f64,
    pub entity_count: usize,
    pub tick_count: u64,
    pub clock_ms: f64,
    pub pending_events: usize,
}

fn color32(rgba: u32) -> egui::Color32 {
    let [r, g, b, a] = rgba.to_be_bytes();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn panel_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 200))
        .corner_radius(6.0)
        .inner_margin(10.0)
}

/// Snake names, painted behind every window.
pub(super) fn name_labels(ctx: &egui::Context, labels: &[NameLabel]) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let ppp = ctx.pixels_per_point();
    for label in labels {
        painter.text(
            egui::pos2(label.screen_pos.x / ppp, label.screen_pos.y / ppp),
            egui::Align2::CENTER_BOTTOM,
            &label.text,
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
    }
}

/// Score in the top-left, leaderboard in the top-right.
pub(super) fn game_hud(ctx: &egui::Context, view: &HudView) {
    egui::Area::new(egui::Id::new("score"))
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new(format!("Score: {}", view.score))
                        .size(20.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });
        });

    egui::Area::new(egui::Id::new("leaderboard"))
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Leaderboard")
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                for (rank, entry) in view.leaderboard.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{}.", rank + 1))
                                .monospace()
                                .color(egui::Color32::from_gray(200)),
                        );
                        ui.label(egui::RichText::new(&entry.name).color(color32(entry.color)));
                        ui.label(
                            egui::RichText::new(entry.length.to_string())
                                .monospace()
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                }
            });
        });
}

/// Start menu. Returns a start request on Play or Enter.
pub(super) fn menu(
    ctx: &egui::Context,
    name_input: &mut String,
    last_score: Option<u32>,
    best_score: Option<u32>,
) -> Option<HudAction> {
    let mut start = ctx.input(|i| i.key_pressed(egui::Key::Enter));

    egui::Window::new("Snakepit")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));
            if let Some(score) = last_score {
                ui.label(egui::RichText::new(format!("Final score: {score}")).size(18.0));
            }
            if let Some(best) = best_score {
                ui.label(format!("Best this session: {best}"));
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.add(
                    egui::TextEdit::singleline(name_input)
                        .hint_text(DEFAULT_PLAYER_NAME)
                        .desired_width(180.0),
                );
            });
            ui.add_space(6.0);
            if ui.button("Play").clicked() {
                start = true;
            }
            ui.label("Steer with the mouse. Esc quits, F3 shows stats.");
        });

    start.then(|| HudAction::StartRound {
        display_name: resolve_display_name(Some(name_input.as_str())),
    })
}

pub(super) fn debug_panel(ctx: &egui::Context, s: &DebugSnapshot) {
    if !s.visible {
        return;
    }

    egui::Window::new("Debug")
        .default_pos([10.0, 60.0])
        .default_width(320.0)
        .resizable(true)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            // --- Performance ---
            ui.heading("Performance");
            ui.label(format!("FPS: {:.1}", s.frame_stats.fps));
            ui.label(format!(
                "Frame: {:.2}ms avg | {:.2} min | {:.2} max",
                s.frame_stats.avg * 1000.0,
                s.frame_stats.min * 1000.0,
                s.frame_stats.max * 1000.0,
            ));
            ui.add_space(4.0);

            // --- Frame time histogram ---
            ui.heading("Frame Time History");
            if !s.frame_times.is_empty() {
                let max_time = s
                    .frame_times
                    .iter()
                    .copied()
                    .fold(0.0f64, f64::max)
                    .max(0.020);

                let (response, painter) =
                    ui.allocate_painter(egui::vec2(300.0, 60.0), egui::Sense::hover());
                let rect = response.rect;

                let bar_width = rect.width() / s.frame_times.len() as f32;
                let budget_y = rect.bottom() - (FRAME_BUDGET / max_time) as f32 * rect.height();

                for (i, &t) in s.frame_times.iter().enumerate() {
                    let h = (t / max_time) as f32 * rect.height();
                    let x = rect.left() + i as f32 * bar_width;
                    let color = if t > FRAME_BUDGET {
                        egui::Color32::from_rgb(255, 100, 80)
                    } else {
                        egui::Color32::from_rgb(80, 200, 120)
                    };
                    painter.rect_filled(
                        egui::Rect::from_min_max(
                            egui::pos2(x, rect.bottom() - h),
                            egui::pos2(x + bar_width.max(1.0), rect.bottom()),
                        ),
                        0.0,
                        color,
                    );
                }

                painter.line_segment(
                    [
                        egui::pos2(rect.left(), budget_y),
                        egui::pos2(rect.right(), budget_y),
                    ],
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(255, 255, 100)),
                );
            }
            ui.add_space(4.0);

            // --- Phase timers ---
            ui.heading("Phase Timers");
            let total = s.phase_total_us.max(1.0);
            let max_us = s
                .phase_durations
                .iter()
                .copied()
                .fold(0.0f64, f64::max)
                .max(1.0);

            for phase in Phase::ALL {
                let us = s.phase_durations[phase as usize];
                let pct = us / total * 100.0;
                let bar_frac = (us / max_us) as f32;

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("{:<12}", phase.label())).monospace());
                    ui.label(
                        egui::RichText::new(format!("{:>5.0}us ({:>2.0}%)", us, pct)).monospace(),
                    );

                    let (response, painter) =
                        ui.allocate_painter(egui::vec2(80.0, 12.0), egui::Sense::hover());
                    let r = response.rect;
                    painter.rect_filled(
                        egui::Rect::from_min_max(
                            r.left_top(),
                            egui::pos2(r.left() + r.width() * bar_frac, r.bottom()),
                        ),
                        2.0,
                        egui::Color32::from_rgb(100, 180, 255),
                    );
                });
            }
            ui.add_space(4.0);

            // --- Info ---
            ui.heading("Info");
            ui.label(format!(
                "Entities: {} | Ticks: {}",
                s.entity_count, s.tick_count
            ));
            ui.label(format!(
                "Round clock: {:.1}s | Pending events: {}",
                s.clock_ms / 1000.0,
                s.pending_events
            ));
            ui.label("F3: Toggle | ESC: Quit");
        });
}
