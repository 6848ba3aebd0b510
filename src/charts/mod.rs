// src/charts/mod.rs
//
// RBA chart-pack downloader. Unrelated to the statistics pipelines and
// deliberately forgiving: one bad chart must not take down the rest, so
// every URL is downloaded and rasterized inside its own error scope.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use resvg::{tiny_skia, usvg};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

const CHART_PACK_URL: &str = "https://www.rba.gov.au/chart-pack/images/";

/// The charts to mirror, relative to the chart-pack root.
static CHARTS: &[&str] = &[
    "world-economy/gdp-growth-advanced-economies.svg",
    "world-economy/gdp-growth-china-and-india.svg",
    "world-economy/inflation-advanced-economies.svg",
    "au-growth/gdp-growth.svg",
];

pub const OUTPUT_DIR: &str = "downloaded_files";

/// Download and rasterize every configured chart. Failures are logged and
/// skipped; the summary line always prints. Only an unusable output
/// directory aborts.
pub fn run(client: &Client, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating chart directory {}", out_dir.display()))?;

    let mut ok = 0usize;
    let mut failed = 0usize;
    for chart in CHARTS {
        let url = format!("{CHART_PACK_URL}{chart}");
        let svg_path = match download_chart(client, &url, out_dir) {
            Ok(path) => {
                info!(file = %path.display(), "downloaded");
                path
            }
            Err(err) => {
                error!(%url, "download failed: {err:#}");
                failed += 1;
                continue;
            }
        };
        match rasterize_svg(&svg_path) {
            Ok(png_path) => {
                info!(file = %png_path.display(), "converted to PNG");
                ok += 1;
            }
            Err(err) => {
                error!(file = %svg_path.display(), "conversion failed: {err:#}");
                failed += 1;
            }
        }
    }

    info!(ok, failed, "chart pack complete");
    Ok(())
}

/// GET one chart and save it under its URL basename.
fn download_chart(client: &Client, url: &str, out_dir: &Path) -> Result<PathBuf> {
    let parsed = url::Url::parse(url).with_context(|| format!("parsing {url}"))?;
    let name = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .with_context(|| format!("{url} has no file name"))?;
    let dest = out_dir.join(name);

    let bytes = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()?
        .bytes()
        .with_context(|| format!("reading body of {url}"))?;
    fs::write(&dest, &bytes).with_context(|| format!("writing {}", dest.display()))?;
    Ok(dest)
}

/// Rasterize a saved SVG to a PNG next to it, at the SVG's intrinsic pixel
/// size.
pub fn rasterize_svg(svg_path: &Path) -> Result<PathBuf> {
    let data = fs::read(svg_path).with_context(|| format!("reading {}", svg_path.display()))?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .with_context(|| format!("parsing SVG {}", svg_path.display()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .with_context(|| format!("SVG {} has a degenerate size", svg_path.display()))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let png_path = svg_path.with_extension("png");
    pixmap
        .save_png(&png_path)
        .with_context(|| format!("writing {}", png_path.display()))?;
    Ok(png_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterizes_a_minimal_svg_in_place() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let svg_path = dir.path().join("chart.svg");
        fs::write(
            &svg_path,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
                   <rect width="20" height="10" fill="#123456"/>
                 </svg>"##,
        )?;

        let png_path = rasterize_svg(&svg_path)?;
        assert_eq!(png_path, dir.path().join("chart.png"));
        let png = fs::read(&png_path)?;
        assert_eq!(&png[1..4], b"PNG");
        Ok(())
    }

    #[test]
    fn rejects_a_file_that_is_not_svg() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("chart.svg");
        fs::write(&path, b"not an svg")?;
        assert!(rasterize_svg(&path).is_err());
        Ok(())
    }
}
