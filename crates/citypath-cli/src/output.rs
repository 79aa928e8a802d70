//! Output formatting for command results.
//!
//! Writers take any [`Write`] sink so that the interactive session and the
//! one-shot commands share them.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use citypath_lib::{MapDocument, RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Write a route summary as text, highlighting the heading line.
pub fn write_route_text<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    palette: &ColorPalette,
) -> io::Result<()> {
    let rendered = summary.render(RouteRenderMode::PlainText);
    let mut lines = rendered.lines();
    if let Some(heading) = lines.next() {
        writeln!(out, "{}{}{}", palette.white_bold, heading, palette.reset)?;
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Print the footer with elapsed time.
pub fn write_footer<W: Write>(
    out: &mut W,
    elapsed: Duration,
    palette: &ColorPalette,
) -> io::Result<()> {
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{elapsed_ms}ms")
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };
    writeln!(out, "\n{}Completed in {time_str}{}", palette.gray, palette.reset)
}

/// Write the map as Leaflet HTML and/or GeoJSON, returning the paths written.
pub fn write_map_files(
    map: &MapDocument,
    html: Option<&Path>,
    geojson: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if let Some(path) = html {
        let document = map.to_html().context("failed to render the route map")?;
        fs::write(path, document)
            .with_context(|| format!("failed to write map to {}", path.display()))?;
        written.push(path.to_path_buf());
    }
    if let Some(path) = geojson {
        let document = serde_json::to_string_pretty(&map.to_geojson())
            .context("failed to serialise the route as GeoJSON")?;
        fs::write(path, document)
            .with_context(|| format!("failed to write GeoJSON to {}", path.display()))?;
        written.push(path.to_path_buf());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_uses_milliseconds_below_one_second() {
        let mut out = Vec::new();
        write_footer(&mut out, Duration::from_millis(250), &ColorPalette::plain()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nCompleted in 250ms\n");
    }

    #[test]
    fn footer_uses_seconds_above_one_second() {
        let mut out = Vec::new();
        write_footer(&mut out, Duration::from_millis(1_500), &ColorPalette::plain()).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("1.50s"));
    }

    #[test]
    fn json_is_newline_terminated() {
        let mut out = Vec::new();
        write_json(&mut out, &["Ottawa", "Toronto"]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("]\n"));
        let parsed: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec!["Ottawa", "Toronto"]);
    }
}
