//! Stackertui — classic falling-block puzzle game in the terminal.

mod app;
mod game;
mod input;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let mut app = App::new(&args, theme);
    app.run()
}

/// Classic falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "stackertui",
    version,
    about = "Classic falling-block puzzle in the terminal. Stack the pieces; clear full rows to score.",
    long_about = "Stackertui is a terminal rendition of the classic falling-block puzzle.\n\n\
        Pieces fall one row at a time, faster as you level up. Fill a row to clear it; \
        the game ends when a new piece has no room to enter.\n\n\
        CONTROLS (normal):\n  Left/Right  Move    Up      Rotate CW   Down    Soft drop\n  Space / P   Pause   R       Restart     Q / Esc Quit\n\n\
        CONTROLS (vim):\n  h/l         Move    k       Rotate CW   j       Soft drop\n\n\
        Use --theme to load a btop-style theme (e.g. onedark.theme)."
)]
pub struct Args {
    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Seed for the piece sequence. Random (clock-derived) when not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u32>,

    /// Target render frames per second.
    #[arg(long, default_value = "30.0", value_name = "RATE")]
    pub frame_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
