use clap::Parser;

/// Command line arguments for the demo renderer.
#[derive(Parser, Debug)]
#[command(
    name = "softraster",
    about = "Projects a demo mesh into screen space and rasterizes it to a PNG"
)]
pub struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output image width, overriding the config.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output image height, overriding the config.
    #[arg(long)]
    pub height: Option<u32>,

    /// Output PNG path, overriding the config.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Blendshape weight applied to the demo mesh before projection.
    #[arg(long, default_value_t = 0.0)]
    pub morph: f32,

    /// Restrict shading to an elliptical stencil mask.
    #[arg(long)]
    pub mask: bool,
}
