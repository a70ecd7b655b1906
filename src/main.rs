//! more-pane binary: page files or stdin in a window

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use more_pane::PagerConfig;

mod cli;
#[cfg(debug_assertions)]
mod debug_dump;
mod runtime;
mod view;

use cli::{CliArgs, TargetSource};
use runtime::App;

fn read_source(source: &TargetSource) -> Result<String> {
    match source {
        TargetSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
        TargetSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}

fn main() -> Result<()> {
    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    more_pane::tracing::init();

    let mut config = PagerConfig::load();
    startup.apply_to(&mut config);

    let targets = startup
        .sources
        .iter()
        .map(|source| Ok((source.title(), read_source(source)?)))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(targets = targets.len(), start_at_top = config.more, "starting");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, targets);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
