//! Binary entrypoint for gallery-page.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use humantime::format_duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use gallery_page::carousel::{Carousel, Direction, Track};
use gallery_page::config::Configuration;
use gallery_page::events::{CarouselEvent, PageCommand, PageEvent, ViewportJump};
use gallery_page::script::{Routed, Script};
use gallery_page::tasks;
use gallery_page::tasks::page::PageState;

#[derive(Debug, Parser)]
#[command(
    name = "gallery-page",
    version,
    about = "headless driver for a static gallery page's interactivity"
)]
struct Args {
    /// Path to YAML config describing the page
    #[arg(value_name = "CONFIG")]
    config: PathBuf,
    /// Replay a timed event script against the running tasks
    #[arg(long = "script", value_name = "FILE")]
    script: Option<PathBuf>,
    /// Print the command plan for the script without timers and exit
    #[arg(long = "script-dry-run", requires = "script")]
    script_dry_run: bool,
    /// Stop after this long instead of waiting for ctrl-c
    #[arg(long = "run-for", value_name = "DURATION", value_parser = humantime::parse_duration)]
    run_for: Option<Duration>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // init tracing (RUST_LOG controls level, default = info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let Args {
        config,
        script,
        script_dry_run,
        run_for,
    } = Args::parse();

    let cfg = Configuration::from_yaml_file(&config)
        .with_context(|| format!("failed to load configuration from {}", config.display()))?
        .validated()
        .context("invalid configuration values")?;
    tracing::info!(
        "Loaded configuration from {}:\n{:#?}",
        config.display(),
        cfg
    );

    let script = match script {
        Some(path) => Some(
            Script::from_yaml_file(&path)
                .with_context(|| format!("failed to load script from {}", path.display()))?,
        ),
        None => None,
    };

    if script_dry_run {
        let script = script.expect("clap guarantees --script with --script-dry-run");
        run_script_dry_run(&cfg, &script)?;
        return Ok(());
    }

    // Channels (small/bounded)
    let (carousel_tx, carousel_rx) = mpsc::channel::<CarouselEvent>(16); // Adapter -> Carousel
    let (page_tx, page_rx) = mpsc::channel::<PageEvent>(16); // Adapter -> Page
    let (jump_tx, jump_rx) = mpsc::channel::<ViewportJump>(16); // Carousel -> Adapter
    let (command_tx, command_rx) = mpsc::channel::<PageCommand>(16); // Page -> Adapter

    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    if let Some(limit) = run_for {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            sleep(limit).await;
            tracing::info!(limit = %format_duration(limit), "run-for limit reached");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    // Carousel controller
    tasks.spawn({
        let track = Track::from_offsets(cfg.track.slide_offsets.clone())?;
        let options = cfg.carousel.clone();
        let cancel = cancel.clone();
        async move {
            tasks::carousel::run(track, options, carousel_rx, jump_tx, cancel)
                .await
                .context("carousel task failed")
        }
    });

    // Page features
    tasks.spawn({
        let structure = cfg.page.clone();
        let cancel = cancel.clone();
        async move {
            tasks::page::run(structure, page_rx, command_tx, cancel)
                .await
                .context("page task failed")
        }
    });

    // Adapter stand-in: log every effect the page would apply
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            run_adapter_sink(jump_rx, command_rx, cancel).await;
            Ok(())
        }
    });

    // Script playback, if any
    if let Some(script) = script {
        tasks.spawn({
            let cancel = cancel.clone();
            async move {
                run_script_playback(script, carousel_tx, page_tx, cancel).await;
                Ok(())
            }
        });
    }

    // Drain JoinSet (wait for tasks to complete)
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    Ok(())
}

/// Consume viewport jumps and page commands the way a browser adapter would,
/// logging them instead of touching a DOM.
async fn run_adapter_sink(
    mut jumps: mpsc::Receiver<ViewportJump>,
    mut commands: mpsc::Receiver<PageCommand>,
    cancel: CancellationToken,
) {
    let mut jumps_open = true;
    let mut commands_open = true;
    while jumps_open || commands_open {
        select! {
            _ = cancel.cancelled() => break,
            maybe_jump = jumps.recv(), if jumps_open => {
                match maybe_jump {
                    Some(jump) => {
                        tracing::info!(index = jump.index, offset = jump.offset, "viewport jump");
                    }
                    None => jumps_open = false,
                }
            }
            maybe_cmd = commands.recv(), if commands_open => {
                match maybe_cmd {
                    Some(cmd) => tracing::info!(command = ?cmd, "page command"),
                    None => commands_open = false,
                }
            }
        }
    }
}

async fn run_script_playback(
    script: Script,
    carousel_tx: mpsc::Sender<CarouselEvent>,
    page_tx: mpsc::Sender<PageEvent>,
    cancel: CancellationToken,
) {
    let start = Instant::now();
    for step in script.steps {
        select! {
            _ = cancel.cancelled() => return,
            _ = sleep_until(start + step.at) => {}
        }
        let sent = match step.event.route() {
            Routed::Carousel(ev) => carousel_tx.send(ev).await.is_ok(),
            Routed::Page(ev) => page_tx.send(ev).await.is_ok(),
        };
        if !sent {
            tracing::warn!("task channel closed; stopping script playback");
            return;
        }
    }
    tracing::info!("script playback complete");
}

/// Replay the script synchronously against the pure state, printing the
/// command plan. Timers are not simulated: scroll settles apply immediately
/// and no automatic advances occur.
fn run_script_dry_run(cfg: &Configuration, script: &Script) -> Result<()> {
    let track = Track::from_offsets(cfg.track.slide_offsets.clone())?;
    let mut carousel = Carousel::new(track);
    let mut page = PageState::new(&cfg.page);

    println!(
        "# script dry run\n# slides: {}\n# steps: {}\n",
        carousel.track().len(),
        script.steps.len()
    );

    let init = carousel.jump_to(0);
    println!("{:>8}  jump to slide {} @ {}px", "init", init.index, init.offset);

    for step in &script.steps {
        let at = format_duration(step.at).to_string();
        match step.event.clone().route() {
            Routed::Carousel(ev) => match ev {
                CarouselEvent::PrevPressed => {
                    let jump = carousel.advance(Direction::Backward);
                    println!("{at:>8}  jump to slide {} @ {}px", jump.index, jump.offset);
                }
                CarouselEvent::NextPressed => {
                    let jump = carousel.advance(Direction::Forward);
                    println!("{at:>8}  jump to slide {} @ {}px", jump.index, jump.offset);
                }
                CarouselEvent::PointerEntered => {
                    println!("{at:>8}  pause auto-advance");
                }
                CarouselEvent::PointerLeft => {
                    println!("{at:>8}  resume auto-advance");
                }
                CarouselEvent::Scrolled { offset } => {
                    let index = carousel.resync(offset);
                    println!("{at:>8}  settle at {offset}px -> slide {index}");
                }
            },
            Routed::Page(ev) => {
                for command in page.handle(ev) {
                    println!("{at:>8}  {command:?}");
                }
            }
        }
    }

    Ok(())
}
