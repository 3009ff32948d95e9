//! Output naming
//!
//! Region `index` is written to `{directory}/{base_name}_{index}{extension}`.

use crate::request::SegmentationRequest;
use std::path::{Path, PathBuf};

/// Extension used when neither the request nor the input names one
pub const DEFAULT_EXTENSION: &str = ".png";

/// Resolved output location for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    pub directory: PathBuf,
    pub base_name: String,
    pub extension: String,
}

impl OutputNaming {
    /// Resolve explicit overrides against the input path.
    ///
    /// Without overrides the directory is the input's parent (`.` for a
    /// bare file name), the base name is the input stem and the
    /// extension is the input's, or [`DEFAULT_EXTENSION`].
    pub fn resolve(request: &SegmentationRequest) -> Self {
        let input = &request.input_path;

        let directory = match &request.output_directory {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        };

        let base_name = match &request.output_base_name {
            Some(name) => name.clone(),
            None => input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let extension = match &request.output_extension {
            Some(ext) => ext.clone(),
            None => input
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        };

        Self {
            directory,
            base_name,
            extension,
        }
    }

    /// File name for region `index`
    pub fn file_name(&self, index: i32) -> String {
        format!("{}_{}{}", self.base_name, index, self.extension)
    }

    /// Full output path for region `index`
    pub fn path_for(&self, index: i32) -> PathBuf {
        self.directory.join(self.file_name(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_input() {
        let req = SegmentationRequest::new("art/sheet.bmp");
        let naming = OutputNaming::resolve(&req);
        assert_eq!(naming.directory, PathBuf::from("art"));
        assert_eq!(naming.base_name, "sheet");
        assert_eq!(naming.extension, ".bmp");
        assert_eq!(naming.path_for(3), PathBuf::from("art/sheet_3.bmp"));
    }

    #[test]
    fn test_input_without_extension() {
        let req = SegmentationRequest::new("art/sheet");
        assert_eq!(OutputNaming::resolve(&req).file_name(1), "sheet_1.png");
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let req = SegmentationRequest::new("sheet.png");
        assert_eq!(OutputNaming::resolve(&req).directory, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let req = SegmentationRequest::new("art/sheet.bmp")
            .with_output_directory("out/sprites")
            .with_base_name("hero")
            .with_extension(".png");
        let naming = OutputNaming::resolve(&req);
        assert_eq!(naming.path_for(12), PathBuf::from("out/sprites/hero_12.png"));
    }
}
