//! Request validation
//!
//! All checks run and accumulate; an empty result means the request is
//! valid. Validation only queries the filesystem, it never changes it.

use crate::error::ValidationError;
use crate::fs::FileSystem;
use crate::request::SegmentationRequest;

/// Check a request before the pipeline runs.
pub fn validate(request: &SegmentationRequest, fs: &dyn FileSystem) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let input = &request.input_path;
    if input.as_os_str().is_empty() {
        errors.push(ValidationError::MissingInputPath);
    } else if !fs.exists(input) {
        errors.push(ValidationError::InputNotFound(input.clone()));
    } else if !fs.is_file(input) {
        errors.push(ValidationError::InputNotFile(input.clone()));
    }

    if request.start_index < 1 {
        errors.push(ValidationError::InvalidStartIndex(request.start_index));
    }
    if request.min_region_width < 1 {
        errors.push(ValidationError::InvalidMinWidth(request.min_region_width));
    }
    if request.min_region_height < 1 {
        errors.push(ValidationError::InvalidMinHeight(request.min_region_height));
    }

    if let Some(ext) = &request.output_extension
        && !is_valid_extension(ext)
    {
        errors.push(ValidationError::InvalidExtension(ext.clone()));
    }
    if let Some(name) = &request.output_base_name
        && !is_valid_base_name(name)
    {
        errors.push(ValidationError::InvalidBaseName(name.clone()));
    }

    errors
}

fn is_valid_extension(ext: &str) -> bool {
    ext.len() > 1 && ext.starts_with('.') && !ext.contains(['/', '\\'])
}

fn is_valid_base_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Filesystem with a fixed set of existing files
    struct FakeFs(Vec<PathBuf>);

    impl FileSystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.0.iter().any(|p| p == path || p.starts_with(path))
        }
        fn is_file(&self, path: &Path) -> bool {
            self.0.iter().any(|p| p == path)
        }
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    fn fs() -> FakeFs {
        FakeFs(vec![PathBuf::from("in/sheet.png")])
    }

    #[test]
    fn test_valid_request() {
        let req = SegmentationRequest::new("in/sheet.png");
        assert!(validate(&req, &fs()).is_empty());
    }

    #[test]
    fn test_missing_input() {
        let req = SegmentationRequest::default();
        assert_eq!(validate(&req, &fs()), vec![ValidationError::MissingInputPath]);

        let req = SegmentationRequest::new("in/other.png");
        assert_eq!(
            validate(&req, &fs()),
            vec![ValidationError::InputNotFound(PathBuf::from("in/other.png"))]
        );
    }

    #[test]
    fn test_directory_input() {
        let req = SegmentationRequest::new("in");
        assert_eq!(
            validate(&req, &fs()),
            vec![ValidationError::InputNotFile(PathBuf::from("in"))]
        );
    }

    #[test]
    fn test_errors_accumulate() {
        let req = SegmentationRequest::new("missing.png")
            .with_start_index(0)
            .with_min_region_size(0, -2)
            .with_extension("png")
            .with_base_name("a/b");
        let errors = validate(&req, &fs());
        assert_eq!(
            errors,
            vec![
                ValidationError::InputNotFound(PathBuf::from("missing.png")),
                ValidationError::InvalidStartIndex(0),
                ValidationError::InvalidMinWidth(0),
                ValidationError::InvalidMinHeight(-2),
                ValidationError::InvalidExtension("png".into()),
                ValidationError::InvalidBaseName("a/b".into()),
            ]
        );
    }

    #[test]
    fn test_extension_rules() {
        assert!(is_valid_extension(".png"));
        assert!(is_valid_extension(".PNG"));
        assert!(!is_valid_extension("."));
        assert!(!is_valid_extension(""));
        assert!(!is_valid_extension("bmp"));
        assert!(!is_valid_extension("./../x.png"));
        assert!(!is_valid_extension(".p\\ng"));
        assert!(!is_valid_extension("./"));
    }

    #[test]
    fn test_extension_cannot_escape_output_directory() {
        let req = SegmentationRequest::new("in/sheet.png").with_extension("./../escaped.png");
        assert_eq!(
            validate(&req, &fs()),
            vec![ValidationError::InvalidExtension("./../escaped.png".into())]
        );
    }

    #[test]
    fn test_base_name_rules() {
        assert!(is_valid_base_name("sprite"));
        assert!(is_valid_base_name("sprite.sheet"));
        assert!(!is_valid_base_name(""));
        assert!(!is_valid_base_name("dir\\name"));
    }
}
