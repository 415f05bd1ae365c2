//! CUI player mode for running content documents
//!
//! This module provides an interactive player mode where users can
//! navigate a content graph in the terminal.

use crate::{
    application::{content_store::ContentStore, engine::NavigationEngine, frontend::Frontend},
    cli::terminal::{TerminalFrontend, TerminalStyle},
    domain::{repositories::ContentSource, value_objects::NodeId},
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::Instant;

/// Player settings from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Show history and variables after every render
    pub debug: bool,
    /// Disable typewriter and clear delays
    pub instant: bool,
}

/// A parsed line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select an option by 0-based index
    Select(usize),
    Back,
    Reload,
    Quit,
    Help,
    Empty,
    Unknown,
}

impl Command {
    /// Parse a line; options are numbered from 1 on screen
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "" => Self::Empty,
            "b" | "back" => Self::Back,
            "r" | "reload" => Self::Reload,
            "q" | "quit" => Self::Quit,
            "h" | "help" | "?" => Self::Help,
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Self::Select(n - 1),
                _ => Self::Unknown,
            },
        }
    }
}

/// Run the player on stdin/stdout
pub async fn run_play(source: &dyn ContentSource, options: PlayerOptions) -> anyhow::Result<()> {
    let store = ContentStore::load(source).await;
    let style = TerminalStyle::from_config(store.config(), options.instant);
    let mut engine = NavigationEngine::new(store, TerminalFrontend::new(std::io::stdout(), style));

    let stdin = BufReader::new(tokio::io::stdin());
    play(&mut engine, stdin, options).await
}

/// Main player loop, generic over the input so it can be driven by tests
pub async fn play<W, R>(
    engine: &mut NavigationEngine<TerminalFrontend<W>>,
    input: R,
    options: PlayerOptions,
) -> anyhow::Result<()>
where
    W: Write + Send,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    if let Err(e) = engine.start().await {
        anyhow::bail!("cannot start: {e}");
    }
    after_render(engine, options);

    loop {
        let pending = pending_auto_advance(engine);

        let line = tokio::select! {
            line = lines.next_line() => line?,
            origin = wait_for(pending.clone()), if pending.is_some() => {
                if engine.auto_advance(origin.as_str()).await {
                    after_render(engine, options);
                }
                continue;
            }
        };

        // End of input
        let Some(line) = line else {
            break;
        };

        match Command::parse(&line) {
            Command::Select(index) => {
                let renders = engine.frontend().render_count();
                match engine.select_option(index).await {
                    // Display-only choices and dangling gotos leave the screen as it was
                    Some(_) if engine.frontend().render_count() > renders => {
                        after_render(engine, options)
                    }
                    Some(_) => {}
                    None => engine.frontend_mut().notice("[Invalid option]"),
                }
            }
            Command::Back => {
                if engine.go_back().await {
                    after_render(engine, options);
                } else {
                    engine.frontend_mut().notice("[Cannot go back]");
                }
            }
            Command::Reload => {
                engine.reload_current_node().await;
                after_render(engine, options);
            }
            Command::Quit => {
                engine.frontend_mut().notice("Goodbye!");
                break;
            }
            Command::Help => show_help(engine.frontend_mut()),
            Command::Empty => {}
            Command::Unknown => engine
                .frontend_mut()
                .notice("Invalid input. Enter an option number, 'b', 'r', 'h' or 'q'."),
        }
    }

    Ok(())
}

/// Origin node and deadline of the auto-advance armed by the last render
fn pending_auto_advance<W: Write + Send>(
    engine: &NavigationEngine<TerminalFrontend<W>>,
) -> Option<(NodeId, Instant)> {
    let frontend = engine.frontend();
    let node = frontend.last_rendered()?;
    node.auto_advance.as_ref()?;
    let rendered_at = frontend.rendered_at()?;
    Some((node.id.clone(), rendered_at + node.auto_advance_delay))
}

async fn wait_for(pending: Option<(NodeId, Instant)>) -> NodeId {
    match pending {
        Some((origin, deadline)) => {
            tokio::time::sleep_until(deadline).await;
            origin
        }
        None => std::future::pending().await,
    }
}

fn after_render<W: Write + Send>(
    engine: &mut NavigationEngine<TerminalFrontend<W>>,
    options: PlayerOptions,
) {
    if options.debug {
        let info = debug_info(engine);
        engine.frontend_mut().notice(&info);
    }
}

/// History and variables, the way `--debug` shows them
pub fn debug_info<F: Frontend>(engine: &NavigationEngine<F>) -> String {
    let current = engine
        .current_node_id()
        .map_or("-", NodeId::as_str);
    let history = engine
        .history()
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" > ");
    let vars = engine
        .variables()
        .iter()
        .map(|(name, var)| format!("{name}={}", var.value))
        .collect::<Vec<_>>()
        .join(", ");

    format!("[debug]\nnode={current}\nhistory=[{history}]\nvars={{{vars}}}")
}

fn show_help<W: Write + Send>(frontend: &mut TerminalFrontend<W>) {
    frontend.notice("Controls:");
    frontend.notice("  1-9:  select option");
    frontend.notice("  b:    back");
    frontend.notice("  r:    reload");
    frontend.notice("  q:    quit");
}
