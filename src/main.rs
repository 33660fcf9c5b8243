use std::{
    io,
    sync::Mutex,
    thread,
    time::Instant,
};

mod console;
mod headless;
mod options;
mod stats;

use console::{ConsoleCommand, ConsoleRender};
use headless::HeadlessRender;
use lifegrid::{Result, Runner, runner::TimerScheduler};
use tracing_subscriber::EnvFilter;

fn init_logging(args: &options::Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = args.log_file() {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if args.headless() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    // the terminal is the drawing surface otherwise, so logs stay off it
    Ok(())
}

fn run_headless(
    mut runner: Runner<TimerScheduler, HeadlessRender>,
    generations: Option<u64>,
) -> Result<()> {
    runner.start();
    while generations.is_none_or(|max| runner.game().generation() < max) {
        let now = Instant::now();
        if let Some(handle) = runner.scheduler_mut().due(now) {
            runner.tick(handle)?;
        } else if let Some(wait) = runner.scheduler().timeout(now) {
            thread::sleep(wait);
        } else {
            break;
        }
    }
    runner.stop();

    let game = runner.game();
    tracing::info!(
        generation = game.generation(),
        alive = game.alive_count(),
        "finished"
    );
    Ok(())
}

fn run_console(
    mut runner: Runner<TimerScheduler, ConsoleRender>,
    autostart: bool,
    generations: Option<u64>,
) -> Result<()> {
    runner.render()?;
    if autostart {
        runner.start();
    }

    loop {
        let timeout = runner.scheduler().timeout(Instant::now());
        if let Some(cmd) = console::poll_events(timeout)? {
            match cmd {
                ConsoleCommand::Exit => break,
                ConsoleCommand::Key(key) => {
                    runner.press(key)?;
                }
                ConsoleCommand::Click { x, y } => {
                    if let Some((x, y)) = console::body_click(x, y, ConsoleRender::surface_size()?) {
                        runner.handle_pointer_click(x, y)?;
                    }
                }
                ConsoleCommand::Handled => {}
            }
        }

        // at most one generation per pass so input is never starved
        if let Some(handle) = runner.scheduler_mut().due(Instant::now()) {
            runner.tick(handle)?;
            if generations.is_some_and(|max| runner.game().generation() >= max) {
                runner.stop();
                runner.render()?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    init_logging(&args)?;

    let scheduler = if args.frame() {
        TimerScheduler::frame()
    } else {
        TimerScheduler::interval(args.sleep()?)
    };
    let generations = args.generations()?;

    if args.headless() {
        let config = args.runner_config(None)?;
        let runner = Runner::new(config, scheduler, HeadlessRender::new());
        return run_headless(runner, generations);
    }

    // a missing terminal is fatal here, before anything is seeded
    let surface = ConsoleRender::surface_size()?;
    let config = args.runner_config(Some(surface))?;
    let runner = Runner::new(config, scheduler, ConsoleRender::new()?);
    run_console(runner, !args.paused(), generations)
}
