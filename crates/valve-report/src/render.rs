use std::path::{Path, PathBuf};

use tracing::debug;

use valve_model::ReportModel;

use crate::error::{RenderError, Result};
use crate::style::StyleTable;

/// Turns a finished report into one output document.
pub trait ReportRenderer {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, report: &ReportModel, styles: &StyleTable) -> Result<Vec<u8>>;
}

/// Render `report` into `output_dir` as `Dashboard_<DD-MM-YYYY>.<ext>`.
pub fn write_report(
    output_dir: &Path,
    report: &ReportModel,
    renderer: &dyn ReportRenderer,
    styles: &StyleTable,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|source| RenderError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let bytes = renderer.render(report, styles)?;
    let path = output_dir.join(report.file_name(renderer.extension()));
    std::fs::write(&path, &bytes).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "report written");
    Ok(path)
}
