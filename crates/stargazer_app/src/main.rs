mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod render;
mod session;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    app::run(app::Args::parse())
}
