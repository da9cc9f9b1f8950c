//! Pre-upload file validation.
//!
//! A file must pass extension and size checks before any network call is
//! made. [`FilePicker`] models the selection state of one upload widget:
//! picking a new file clears any prior error, and a failed validation
//! clears the retained file so an invalid selection is never kept.

use serde::Serialize;

/// Spreadsheet extensions accepted for bulk upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// Maximum accepted file size: 50 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Why a candidate file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileValidationError {
    #[error("Please upload a CSV or Excel file (.csv, .xls, .xlsx)")]
    InvalidFileType,

    #[error("File size exceeds 50MB limit")]
    FileTooLarge { size: u64 },
}

/// A validated, ready-to-upload file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// Check a candidate file's extension and size.
pub fn validate_upload_file(name: &str, size: u64) -> Result<(), FileValidationError> {
    let extension = name.rsplit('.').next().unwrap_or("").to_lowercase();
    if name.find('.').is_none() || !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(FileValidationError::InvalidFileType);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(FileValidationError::FileTooLarge { size });
    }
    Ok(())
}

/// File-selection state for one upload widget.
#[derive(Debug, Default)]
pub struct FilePicker {
    file: Option<SelectedFile>,
    error: Option<FileValidationError>,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and retain a newly chosen file.
    ///
    /// Any previously displayed error is cleared first. On rejection the
    /// file is cleared as well and the error is retained for display.
    pub fn select(&mut self, name: &str, size: u64) -> Result<&SelectedFile, FileValidationError> {
        self.error = None;
        match validate_upload_file(name, size) {
            Ok(()) => {
                self.file = Some(SelectedFile {
                    name: name.to_string(),
                    size,
                });
                Ok(self.file.as_ref().unwrap())
            }
            Err(e) => {
                self.file = None;
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Discard the current selection and any error.
    pub fn clear(&mut self) {
        self.file = None;
        self.error = None;
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&FileValidationError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_upload_file --

    #[test]
    fn accepts_spreadsheet_extensions() {
        for name in &["data.csv", "data.xls", "data.xlsx", "DATA.CSV", "a.b.XlSx"] {
            assert_eq!(validate_upload_file(name, 1024), Ok(()), "name: {name}");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        for name in &["data.pdf", "data.txt", "data", "csv", ".csv.exe"] {
            assert_eq!(
                validate_upload_file(name, 1024),
                Err(FileValidationError::InvalidFileType),
                "name: {name}"
            );
        }
    }

    #[test]
    fn accepts_file_at_size_limit() {
        assert_eq!(validate_upload_file("big.csv", MAX_UPLOAD_BYTES), Ok(()));
    }

    #[test]
    fn rejects_file_over_size_limit() {
        let size = MAX_UPLOAD_BYTES + 1;
        assert_eq!(
            validate_upload_file("big.csv", size),
            Err(FileValidationError::FileTooLarge { size })
        );
    }

    // -- FilePicker --

    #[test]
    fn select_retains_valid_file() {
        let mut picker = FilePicker::new();
        picker.select("customers.xlsx", 2048).unwrap();
        assert_eq!(picker.file().unwrap().name, "customers.xlsx");
        assert!(picker.error().is_none());
    }

    #[test]
    fn invalid_selection_clears_file_and_sets_error() {
        let mut picker = FilePicker::new();
        picker.select("customers.csv", 2048).unwrap();

        let err = picker.select("data.pdf", 100).unwrap_err();
        assert_eq!(err, FileValidationError::InvalidFileType);
        assert!(picker.file().is_none(), "invalid file must not be retained");
        assert!(picker.error().is_some());
    }

    #[test]
    fn new_selection_clears_previous_error() {
        let mut picker = FilePicker::new();
        let _ = picker.select("data.pdf", 100);
        assert!(picker.error().is_some());

        picker.select("data.csv", 100).unwrap();
        assert!(picker.error().is_none());
        assert_eq!(picker.file().unwrap().name, "data.csv");
    }

    #[test]
    fn clear_resets_everything() {
        let mut picker = FilePicker::new();
        picker.select("data.csv", 100).unwrap();
        picker.clear();
        assert!(picker.file().is_none());
        assert!(picker.error().is_none());
    }
}
