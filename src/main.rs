use {
    anyhow::Result,
    clap::Parser,
    coin_tracker::{
        Cli, Command,
        app::{HELP, UserInput, parse_input},
        build_dashboard,
        view::{DashboardView, render_dashboard},
    },
    std::{panic, time::Duration},
    tokio::io::{AsyncBufReadExt, BufReader},
};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

fn init_log() {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("coin_tracker"), my_code_level)
        .parse_default_env()
        .init();
}

fn draw(view: &DashboardView) {
    println!("{}{}", CLEAR_SCREEN, render_dashboard(view));
    println!("(type `help` for commands)");
}

#[tokio::main]
async fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    init_log();

    let args = Cli::parse();
    let mut dashboard = build_dashboard(&args)?;
    let tx = dashboard.sender();
    let mut view_rx = dashboard.subscribe();

    dashboard.start();
    let engine = tokio::spawn(dashboard.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut redraw = tokio::time::interval(Duration::from_secs(args.render_secs.max(1)));
    let mut dirty = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_input(&line) {
                    UserInput::Command(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    UserInput::Show => draw(&view_rx.borrow_and_update()),
                    UserInput::Help => println!("{}", HELP),
                    UserInput::Quit => break,
                    UserInput::Invalid(message) => println!("{}", message),
                },
                Ok(None) => {
                    // Piped or closed stdin: keep rendering until Ctrl-C.
                    stdin_open = false;
                }
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                dirty = true;
            }
            _ = redraw.tick() => {
                if dirty {
                    draw(&view_rx.borrow_and_update());
                    dirty = false;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let _ = tx.send(Command::Shutdown);
    if let Err(e) = engine.await {
        log::error!("Engine task ended abnormally: {}", e);
    }
    Ok(())
}
