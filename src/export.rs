use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use console::style;
use image::RgbaImage;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::cli::{CommonArgs, ExportTarget};
use crate::error::{ContribError, Result};
use crate::github::ContributionQuery;
use crate::model::Dataset;
use crate::render::cards::render_offscreen;
use crate::render::{card_views, to_text, CardView, NO_CONTRIBUTIONS_NOTICE};
use crate::year::year_filter;

pub const JSON_FILE_NAME: &str = "data.json";
pub const TEXT_FILE_NAME: &str = "data.txt";
pub const DEFAULT_IMAGE_BASE: &str = "stats";
/// Column width of the off-screen cards region captured for images.
pub const IMAGE_COLUMNS: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    Download,
    Clipboard,
}

impl FromStr for ImageAction {
    type Err = ContribError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "download" => Ok(ImageAction::Download),
            "clipboard" => Ok(ImageAction::Clipboard),
            other => Err(ContribError::Config(format!("unknown image action '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    File(PathBuf),
    Clipboard { width: u32, height: u32 },
}

impl fmt::Display for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportArtifact::File(path) => write!(f, "Saved {}", path.display()),
            ExportArtifact::Clipboard { width, height } => {
                write!(f, "Copied {width}x{height} image to clipboard")
            }
        }
    }
}

/// A temporary file next to the export target, renamed into place on commit.
///
/// Dropping an uncommitted handle removes the temporary file.
struct TransferHandle {
    file: NamedTempFile,
    target: PathBuf,
}

impl TransferHandle {
    fn acquire(dir: &Path, file_name: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            file: NamedTempFile::new_in(dir)?,
            target: dir.join(file_name),
        })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes)?;
        self.file.flush()?;
        Ok(())
    }

    fn commit(self) -> Result<PathBuf> {
        self.file.persist(&self.target)?;
        Ok(self.target)
    }
}

fn write_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let mut handle = TransferHandle::acquire(dir, file_name)?;
    handle.write_all(bytes)?;
    handle.commit()
}

/// User-triggered exports of the dataset or its cards. Never mutates what it exports.
///
/// The sink owns the system clipboard once an image has been copied: on X11 and Wayland
/// the copied image is only served while that handle is alive.
pub struct ExportSink {
    out_dir: PathBuf,
    clipboard: RefCell<Option<arboard::Clipboard>>,
    wait_for_clipboard: bool,
}

impl ExportSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            clipboard: RefCell::new(None),
            wait_for_clipboard: false,
        }
    }

    /// For short-lived processes: block a clipboard copy until another owner replaces it.
    pub fn wait_for_clipboard(mut self) -> Self {
        self.wait_for_clipboard = true;
        self
    }

    pub fn holds_clipboard(&self) -> bool {
        self.clipboard.borrow().is_some()
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn export_json(&self, dataset: &Dataset) -> Result<PathBuf> {
        let json = dataset.to_pretty_json()?;
        let path = write_artifact(&self.out_dir, JSON_FILE_NAME, json.as_bytes())?;
        info!(path = %path.display(), repositories = dataset.len(), "exported JSON");
        Ok(path)
    }

    pub fn export_text(&self, dataset: &Dataset) -> Result<PathBuf> {
        let text = to_text(dataset);
        let path = write_artifact(&self.out_dir, TEXT_FILE_NAME, text.as_bytes())?;
        info!(path = %path.display(), repositories = dataset.len(), "exported text");
        Ok(path)
    }

    pub fn export_image(
        &self,
        cards: &[CardView],
        action: ImageAction,
        filename_base: &str,
    ) -> Result<ExportArtifact> {
        let img = capture_cards(cards).map_err(|e| {
            warn!(error = %e, "cards capture failed");
            e
        })?;

        match action {
            ImageAction::Download => {
                let png = crate::raster::encode_png(&img)?;
                let path = write_artifact(&self.out_dir, &format!("{filename_base}.png"), &png)?;
                info!(path = %path.display(), width = img.width(), height = img.height(), "exported image");
                Ok(ExportArtifact::File(path))
            }
            ImageAction::Clipboard => {
                self.copy_image(&img)?;
                info!(width = img.width(), height = img.height(), "copied image to clipboard");
                Ok(ExportArtifact::Clipboard { width: img.width(), height: img.height() })
            }
        }
    }

    fn copy_image(&self, img: &RgbaImage) -> Result<()> {
        let mut slot = self.clipboard.borrow_mut();
        let mut clipboard = match slot.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        let data = arboard::ImageData {
            width: img.width() as usize,
            height: img.height() as usize,
            bytes: Cow::Borrowed(img.as_raw()),
        };
        let result = if self.wait_for_clipboard {
            set_image_and_wait(&mut clipboard, data)
        } else {
            clipboard.set_image(data)
        };
        *slot = Some(clipboard);
        result?;
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn set_image_and_wait(
    clipboard: &mut arboard::Clipboard,
    data: arboard::ImageData<'_>,
) -> std::result::Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    clipboard.set().wait().image(data)
}

#[cfg(not(target_os = "linux"))]
fn set_image_and_wait(
    clipboard: &mut arboard::Clipboard,
    data: arboard::ImageData<'_>,
) -> std::result::Result<(), arboard::Error> {
    clipboard.set_image(data)
}

/// Render the cards region off-screen and rasterize it.
pub fn capture_cards(cards: &[CardView]) -> Result<RgbaImage> {
    if cards.is_empty() {
        return Err(ContribError::Capture("cards region is empty".to_string()));
    }
    let pages: Vec<RgbaImage> = render_offscreen(cards, IMAGE_COLUMNS)
        .iter()
        .map(crate::raster::rasterize)
        .collect();
    Ok(crate::raster::stack(&pages))
}

pub fn exec(
    common: CommonArgs,
    login: String,
    target: ExportTarget,
    clipboard: bool,
    name: String,
) -> anyhow::Result<()> {
    if clipboard && target != ExportTarget::Png {
        anyhow::bail!("--clipboard only applies to --format png");
    }

    let filter = year_filter(&common)?;
    let query = ContributionQuery::new(login, filter.from_param());
    let payload = crate::source::fetch_once(&common, &query)?;

    if payload.dataset.is_empty() {
        println!("{}", style(NO_CONTRIBUTIONS_NOTICE).yellow());
        return Ok(());
    }

    let sink = ExportSink::new(&common.out_dir).wait_for_clipboard();
    let artifact = match target {
        ExportTarget::Json => ExportArtifact::File(
            sink.export_json(&payload.dataset)
                .context("Failed to export JSON")?,
        ),
        ExportTarget::Text => ExportArtifact::File(
            sink.export_text(&payload.dataset)
                .context("Failed to export text")?,
        ),
        ExportTarget::Png => {
            let action = if clipboard { ImageAction::Clipboard } else { ImageAction::Download };
            if clipboard && cfg!(target_os = "linux") {
                eprintln!(
                    "{}",
                    style("Serving the image on the clipboard until something else is copied...").dim()
                );
            }
            sink.export_image(&card_views(&payload.dataset), action, &name)
                .context("Failed to export cards image")?
        }
    };

    println!("{}", style(artifact).green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample;
    use crate::model::ExportFormat;
    use crate::render::{render, Presentation};

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn json_export_matches_preview() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());
        let dataset = sample();

        let path = sink.export_json(&dataset).unwrap();
        assert_eq!(path, dir.path().join(JSON_FILE_NAME));
        let written = std::fs::read_to_string(&path).unwrap();
        let Presentation::Json(preview) = render(&dataset, ExportFormat::Json) else {
            panic!("expected json");
        };
        assert_eq!(written, preview);
        assert_eq!(Dataset::from_json(&written).unwrap(), dataset);
        assert_eq!(entries(dir.path()), vec![JSON_FILE_NAME]);
    }

    #[test]
    fn text_export_is_byte_identical_to_preview() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());
        let dataset = sample();

        let path = sink.export_text(&dataset).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), to_text(&dataset));
    }

    #[test]
    fn repeated_exports_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());
        let dataset = sample();
        let before = dataset.clone();

        sink.export_text(&dataset).unwrap();
        sink.export_text(&dataset).unwrap();
        sink.export_json(&dataset).unwrap();

        assert_eq!(dataset, before);
        assert_eq!(entries(dir.path()), vec![JSON_FILE_NAME, TEXT_FILE_NAME]);
    }

    #[test]
    fn image_download_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());
        let cards = card_views(&sample());

        let artifact = sink.export_image(&cards, ImageAction::Download, "stats").unwrap();
        let path = dir.path().join("stats.png");
        assert_eq!(artifact, ExportArtifact::File(path.clone()));
        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), IMAGE_COLUMNS as u32 * crate::raster::CELL_WIDTH);
    }

    #[test]
    fn empty_capture_fails_without_leaving_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());

        let result = sink.export_image(&[], ImageAction::Download, "stats");
        assert!(matches!(result, Err(ContribError::Capture(_))));
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn clipboard_copy_keeps_ownership_in_the_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());
        let cards = card_views(&sample());
        assert!(!sink.holds_clipboard());

        // Headless hosts have no clipboard; that must surface as an error, not a silent success.
        match sink.export_image(&cards, ImageAction::Clipboard, "stats") {
            Ok(artifact) => {
                assert!(matches!(artifact, ExportArtifact::Clipboard { .. }));
                assert!(sink.holds_clipboard());
            }
            Err(e) => assert!(matches!(e, ContribError::Clipboard(_))),
        }
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn image_action_parses() {
        assert_eq!("download".parse::<ImageAction>().unwrap(), ImageAction::Download);
        assert_eq!("clipboard".parse::<ImageAction>().unwrap(), ImageAction::Clipboard);
        assert!("print".parse::<ImageAction>().is_err());
    }
}
