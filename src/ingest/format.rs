/// Upload formats the ingestion layer can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

impl FileFormat {
    /// Detect the format from the text after the final `.` of a filename.
    /// Returns `None` for unsupported or missing extensions.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.trim().rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" | "xls" => Some(FileFormat::Excel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv() {
        assert_eq!(FileFormat::from_filename("staff.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_filename("q1.report.CSV"), Some(FileFormat::Csv));
    }

    #[test]
    fn test_excel() {
        assert_eq!(FileFormat::from_filename("staff.xlsx"), Some(FileFormat::Excel));
        assert_eq!(FileFormat::from_filename("staff.xls"), Some(FileFormat::Excel));
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(FileFormat::from_filename("staff.json"), None);
        assert_eq!(FileFormat::from_filename("staff"), None);
        assert_eq!(FileFormat::from_filename("csv"), None);
        assert_eq!(FileFormat::from_filename("staff.csv.txt"), None);
        assert_eq!(FileFormat::from_filename(""), None);
    }
}
