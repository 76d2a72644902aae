use clap::{ArgGroup, Parser};
use color_picker::DisplayPoint;
use common_types::CandidateSource;
use std::path::PathBuf;

/// Build a playlist of tracks whose artwork matches a color.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["color", "pick"])))]
pub struct Args {
    /// Target color, `#rrggbb` or `rgb`.
    #[arg(long)]
    pub color: Option<String>,

    /// Sample the picker surface at `x,y` display coordinates instead.
    #[arg(long, value_parser = parse_point)]
    pub pick: Option<DisplayPoint>,

    #[arg(long, default_value_t = CandidateSource::Liked)]
    pub source: CandidateSource,

    /// Required with `--source playlist`.
    #[arg(long)]
    pub playlist_url: Option<String>,

    /// Consider at most this many tracks, 0 for all.
    #[arg(long, default_value_t = 0)]
    pub limit: u32,

    /// Cutoff for the saved selection.
    #[arg(long)]
    pub top_n: Option<String>,

    #[arg(long, short, action)]
    pub save: bool,

    /// Playlist name, defaults to one derived from the color.
    #[arg(long)]
    pub name: Option<String>,

    /// Settings file, `config/settings.yaml` when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn parse_point(text: &str) -> Result<DisplayPoint, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {text:?}"))?;
    let coord = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {part:?}: {e}"))
    };
    Ok(DisplayPoint::new(coord(x)?, coord(y)?))
}
