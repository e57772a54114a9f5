//! Command-line configuration for a single render.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "plot-render")]
#[command(about = "Render a 2-D dataset as a color-mapped PNG image")]
pub struct Args {
    /// Document JSON holding the datasets
    #[arg(short, long, env = "PLOT_RENDER_DOCUMENT")]
    pub document: PathBuf,

    /// Image settings JSON (defaults apply when omitted)
    #[arg(short, long, env = "PLOT_RENDER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Dataset to plot, overriding the settings file
    #[arg(long, env = "PLOT_RENDER_DATA")]
    pub data: Option<String>,

    /// Output PNG path
    #[arg(short, long, env = "PLOT_RENDER_OUTPUT", default_value = "plot.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, env = "PLOT_RENDER_WIDTH", default_value = "512")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, env = "PLOT_RENDER_HEIGHT", default_value = "512")]
    pub height: u32,

    /// Blank border around the plot area, in pixels
    #[arg(long, env = "PLOT_RENDER_MARGIN", default_value = "0")]
    pub margin: f64,

    /// Horizontal axis range as "min,max" (defaults to the data extent)
    #[arg(long, env = "PLOT_RENDER_X_RANGE", value_parser = parse_range)]
    pub x_range: Option<(f64, f64)>,

    /// Vertical axis range as "min,max" (defaults to the data extent)
    #[arg(long, env = "PLOT_RENDER_Y_RANGE", value_parser = parse_range)]
    pub y_range: Option<(f64, f64)>,

    /// Logarithmic horizontal axis
    #[arg(long, env = "PLOT_RENDER_LOG_X")]
    pub log_x: bool,

    /// Logarithmic vertical axis
    #[arg(long, env = "PLOT_RENDER_LOG_Y")]
    pub log_y: bool,

    /// Run the horizontal axis right to left
    #[arg(long, env = "PLOT_RENDER_INVERT_X")]
    pub invert_x: bool,

    /// Run the vertical axis top to bottom
    #[arg(long, env = "PLOT_RENDER_INVERT_Y")]
    pub invert_y: bool,

    /// Background color as #rrggbb or #rrggbbaa
    #[arg(long, env = "PLOT_RENDER_BACKGROUND", default_value = "#ffffff", value_parser = parse_color)]
    pub background: [u8; 4],

    /// Log level
    #[arg(long, env = "PLOT_RENDER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "PLOT_RENDER_JSON_LOGS")]
    pub json_logs: bool,
}

/// Parse an axis range given as "min,max".
pub fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"min,max\", got \"{}\"", s))?;
    let min: f64 = min.trim().parse().map_err(|e| format!("invalid minimum: {}", e))?;
    let max: f64 = max.trim().parse().map_err(|e| format!("invalid maximum: {}", e))?;
    if !(min.is_finite() && max.is_finite()) || min == max {
        return Err(format!("range {},{} is empty", min, max));
    }
    Ok((min, max))
}

/// Parse a hex color such as `#336699` or `#33669980`.
pub fn parse_color(s: &str) -> Result<[u8; 4], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return Err(format!("invalid color \"{}\"", s));
    }

    let mut rgba = [255u8; 4];
    for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| format!("invalid color \"{}\"", s))?;
    }
    Ok(rgba)
}
