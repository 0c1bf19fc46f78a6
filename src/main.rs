use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fireball::{render_preview, render_with_stats, save_png, PreviewMode, Scene};

/// Renders a noise-displaced fireball with a sphere-tracing ray marcher.
#[derive(Debug, Parser)]
#[command(name = "fireball", version)]
struct CliOptions {
    /// Scene description (XML). Defaults are used for anything it omits.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Where to write the PNG.
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels; overrides the scene file.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels; overrides the scene file.
    #[arg(long)]
    height: Option<u32>,

    /// Terminal preview printed after rendering: braille, ascii or none.
    #[arg(long, default_value_t = PreviewMode::Braille)]
    preview: PreviewMode,

    /// Character width of the ascii preview.
    #[arg(long, default_value_t = 80)]
    columns: u32,

    /// Skip writing the PNG.
    #[arg(long)]
    no_image: bool,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse();
    let scene = load_scene(&options)?;

    let (frame, stats) = render_with_stats(&scene);
    info!(
        "traced {}x{} pixels ({} hits) in {:.2?}",
        frame.width(),
        frame.height(),
        stats.hits,
        stats.elapsed
    );

    if !options.no_image {
        save_png(&frame, &options.output)
            .with_context(|| format!("failed to write {}", options.output.display()))?;
        println!(
            "Wrote {} ({}x{})",
            options.output.display(),
            frame.width(),
            frame.height()
        );
    }

    if let Some(preview) = render_preview(&frame, options.preview, options.columns) {
        print!("{preview}");
    }
    Ok(())
}

fn load_scene(options: &CliOptions) -> Result<Scene> {
    let mut scene = match &options.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };
    if let Some(width) = options.width {
        scene.render.width = width;
    }
    if let Some(height) = options.height {
        scene.render.height = height;
    }
    scene
        .render
        .validate()
        .context("invalid image dimensions")?;
    Ok(scene)
}
