use clap::Parser;

/// Spinning primitives under an orbit camera.
#[derive(Debug, Clone, Parser)]
#[command(name = "vista-demo", version, about)]
pub struct Args {
    /// Run without a window for a fixed number of frames.
    #[arg(long)]
    pub headless: bool,

    /// Frame cap for headless runs (0 = run until exit).
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Frame rate for headless runs.
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Initial logical width.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial logical height.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Upper bound for the backing-buffer pixel density.
    #[arg(long, default_value_t = 2.0)]
    pub max_pixel_density: f64,

    #[arg(long, default_value_t = 1.0)]
    pub ambient_intensity: f32,

    #[arg(long, default_value_t = 1.0)]
    pub point_intensity: f32,

    /// Log filter in `RUST_LOG` syntax, e.g. "debug" or "vista_engine=trace".
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    pub fn max_frames(&self) -> Option<u64> {
        (self.frames > 0).then_some(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_windowed_demo() {
        let args = Args::parse_from(["vista-demo"]);
        assert!(!args.headless);
        assert_eq!((args.width, args.height), (1280, 720));
        assert_eq!(args.max_pixel_density, 2.0);
        assert_eq!(args.max_frames(), Some(300));
    }

    #[test]
    fn zero_frames_means_uncapped() {
        let args = Args::parse_from(["vista-demo", "--headless", "--frames", "0", "--point-intensity", "0.5"]);
        assert!(args.headless);
        assert_eq!(args.max_frames(), None);
        assert_eq!(args.point_intensity, 0.5);
    }
}
