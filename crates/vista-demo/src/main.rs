mod app;
mod cli;
mod scene;

use anyhow::Result;
use clap::Parser;
use vista_engine::device::GpuInit;
use vista_engine::headless::{run_headless, HeadlessConfig};
use vista_engine::logging::{init_logging, LoggingConfig};
use vista_engine::viewport::ViewportConfig;
use vista_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::DemoApp;
use crate::cli::Args;
use crate::scene::DemoScene;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..Default::default()
    });

    let aspect = args.width.max(1) as f32 / args.height.max(1) as f32;
    let scene = DemoScene::new(aspect, args.ambient_intensity, args.point_intensity);
    let app = DemoApp::new(scene);

    if args.headless {
        let report = run_headless(
            HeadlessConfig {
                fps: args.fps,
                max_frames: args.max_frames(),
                viewport: ViewportConfig {
                    initial_width: args.width,
                    initial_height: args.height,
                    max_pixel_density: args.max_pixel_density,
                    ..Default::default()
                },
            },
            app,
        )?;
        log::info!(
            "presented {} frames, stopped by {:?}",
            report.presented,
            report.stop
        );
        return Ok(());
    }

    Runtime::run(
        RuntimeConfig {
            title: "vista".to_string(),
            initial_size: LogicalSize::new(f64::from(args.width), f64::from(args.height)),
            max_pixel_density: args.max_pixel_density,
        },
        GpuInit::default(),
        app,
    )
}
