//! # turtlecraft CLI
//!
//! Interactive shell for the turtle graphics language.
//!
//! Usage:
//!   turtlecraft
//!   turtlecraft -p <program.tt>
//!   turtlecraft -p <program.tt> --svg <out.svg> --record <out.json>
//!   turtlecraft --replay <out.json> --svg <out.svg>
//!
//! Examples:
//!   turtlecraft -p demos/square.tt
//!   turtlecraft -p demos/flower.tt -s 0 --svg flower.svg
//!
//! Without `--svg` or `--record` moves are reported as text and turtles use
//! mathematical coordinates. With either flag they draw on a canvas of
//! `--wx` by `--wy` with the origin at its centre and y pointing down.

mod display;

use clap::Parser;
use display::{replay_to_svg, run_display, Outputs};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use turtlecraft_core::config::{DEFAULT_DELAY_MS, DEFAULT_SPEED, MAX_SPEED};
use turtlecraft_core::{
    load_program, AnimatedSink, ChannelSurface, DrawSink, Error, ExecutionStep, ExitReason, Interpreter,
    PromptedLines, Renderer, Result, SessionConfig, ShutdownToken, SystemClock, TextSink,
};

#[derive(Parser)]
#[command(name = "turtlecraft")]
#[command(author, version, about = "turtlecraft - a shell for turtle graphics")]
struct Cli {
    /// Canvas width
    #[arg(short = 'x', long, default_value_t = 600)]
    wx: u32,

    /// Canvas height
    #[arg(short = 'y', long, default_value_t = 600)]
    wy: u32,

    /// Program to run before reading commands interactively
    #[arg(short = 'p', long)]
    turtle_program: Option<PathBuf>,

    /// Drawing speed, 0 (instant) to 25
    #[arg(short, long, default_value_t = DEFAULT_SPEED,
          value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_SPEED)))]
    speed: u8,

    /// Pause after each drawn segment, in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_DELAY_MS)]
    delay: u64,

    /// Write the drawing as SVG when the session ends
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write a replayable JSON draw log when the session ends
    #[arg(long)]
    record: Option<PathBuf>,

    /// Redraw a recording made with `--record` into the `--svg` file and exit
    #[arg(long, requires = "svg", conflicts_with = "turtle_program")]
    replay: Option<PathBuf>,

    /// Do not print the prompt
    #[arg(short, long)]
    quiet: bool,

    /// Print the execution trace to stderr on exit
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max_len).collect::<String>())
    }
}

fn print_trace(trace: &[ExecutionStep]) {
    eprintln!("\n--- Execution Trace ({} steps) ---", trace.len());
    for step in trace {
        let err = step.error.as_ref().map(|e| format!(" ({})", e)).unwrap_or_default();
        eprintln!("  {:3}. {} -> {}{}", step.step, truncate(&step.command, 40), step.result, err);
    }
}

/// Request a shutdown on Ctrl-C or SIGTERM. The interpreter stops before its
/// next line; a pending read still has to return first.
fn watch_signals(token: ShutdownToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut term = match signal(SignalKind::terminate()) {
                Ok(term) => term,
                Err(e) => {
                    debug!(error = %e, "SIGTERM handler unavailable");
                    let _ = tokio::signal::ctrl_c().await;
                    token.request();
                    return;
                }
            };
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        token.request();
        eprintln!("\nStopping after the current command (press Enter if waiting for input)");
    });
}

/// Run the program lines, then `input` unless the program already ended
/// the session. The transcript goes to `out`; `prompt` gets ` t: ` before
/// each interactive read.
fn interpret<R: BufRead, W: Write, P: Write>(
    config: SessionConfig,
    sink: Box<dyn DrawSink>,
    program: Vec<String>,
    token: ShutdownToken,
    input: R,
    out: W,
    prompt: Option<P>,
) -> Result<(ExitReason, Vec<ExecutionStep>)> {
    let mut interp = Interpreter::new(config, sink, out)?.with_shutdown(token);

    let mut reason = interp.run(program)?;
    if reason == ExitReason::EndOfInput {
        reason = interp.run_source(PromptedLines::new(input, prompt))?;
    }
    Ok((reason, interp.trace().to_vec()))
}

async fn run(cli: Cli) -> Result<()> {
    if let (Some(recording), Some(svg)) = (&cli.replay, &cli.svg) {
        let segments = replay_to_svg(recording, svg, cli.wx, cli.wy)?;
        info!(segments, "replay finished");
        return Ok(());
    }

    let program = match &cli.turtle_program {
        Some(path) => load_program(path)?,
        None => Vec::new(),
    };

    let token = ShutdownToken::new();
    watch_signals(token.clone());

    let outputs = Outputs {
        svg: cli.svg.clone(),
        record: cli.record.clone(),
    };

    let (config, sink, display): (SessionConfig, Box<dyn DrawSink>, _) = if outputs.any() {
        let config = SessionConfig::screen(cli.wx, cli.wy)
            .with_speed(cli.speed)
            .with_delay_ms(cli.delay);
        config.validate()?;
        let (tx, rx) = unbounded_channel();
        let display = tokio::spawn(run_display(rx, cli.wx, cli.wy, config.clone(), outputs));
        let sink: Box<dyn DrawSink> =
            Box::new(AnimatedSink::new(Renderer::from_config(&config), ChannelSurface::new(tx), SystemClock));
        (config, sink, Some(display))
    } else {
        let config = SessionConfig::text_mode()
            .with_speed(cli.speed)
            .with_delay_ms(cli.delay);
        let sink: Box<dyn DrawSink> = Box::new(TextSink);
        (config, sink, None)
    };
    debug!(?config, "session configured");

    let quiet = cli.quiet;
    let worker = tokio::task::spawn_blocking(move || {
        let prompt = (!quiet).then(std::io::stdout);
        interpret(config, sink, program, token, std::io::stdin().lock(), std::io::stdout(), prompt)
    });
    let outcome = worker
        .await
        .map_err(|e| Error::unexpected(format!("interpreter task failed: {}", e)).with_operation("cli::run"))?;

    // The interpreter is gone, so the display channel is closed
    if let Some(display) = display {
        let segments = display
            .await
            .map_err(|e| Error::unexpected(format!("display task failed: {}", e)).with_operation("cli::run"))??;
        info!(segments, "display finished");
    }

    let (reason, trace) = outcome?;
    info!(?reason, "session ended");
    if cli.verbose {
        print_trace(&trace);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
