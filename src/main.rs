mod app;
mod camera;
mod config;
mod ecs;
mod food;
mod hooks;
mod hud;
mod leaderboard;
mod lifecycle;
mod math;
mod render;
mod round;
mod scheduler;
mod snake;
mod world;

fn main() {
    env_logger::init();
    log::info!("Snakepit starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
