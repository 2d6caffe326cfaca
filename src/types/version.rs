//! DWG format revisions.
//!
//! The first six bytes of a DWG file carry an ASCII version tag
//! (`AC1015` etc.) that selects the physical container layout and gates
//! per-field layout differences throughout the object data.

use crate::error::{DecodeError, Result};

/// A DWG format revision, identified by the file's ASCII version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileVersion {
    /// R13 (AC1012)
    Ac1012,
    /// R14 (AC1014)
    Ac1014,
    /// R2000 (AC1015)
    Ac1015,
    /// R2004 (AC1018)
    Ac1018,
    /// R2007 (AC1021)
    Ac1021,
    /// R2010 (AC1024)
    Ac1024,
    /// R2013 (AC1027)
    Ac1027,
    /// R2018 (AC1032)
    Ac1032,
}

impl FileVersion {
    /// Parse the six-byte ASCII tag at the start of a DWG file.
    pub fn from_tag(tag: &[u8]) -> Result<Self> {
        match tag {
            b"AC1012" => Ok(FileVersion::Ac1012),
            b"AC1014" => Ok(FileVersion::Ac1014),
            b"AC1015" => Ok(FileVersion::Ac1015),
            b"AC1018" => Ok(FileVersion::Ac1018),
            b"AC1021" => Ok(FileVersion::Ac1021),
            b"AC1024" => Ok(FileVersion::Ac1024),
            b"AC1027" => Ok(FileVersion::Ac1027),
            b"AC1032" => Ok(FileVersion::Ac1032),
            _ => Err(DecodeError::UnsupportedVersion(
                String::from_utf8_lossy(tag).into_owned(),
            )),
        }
    }

    /// The six-byte ASCII tag for this revision.
    pub fn tag(&self) -> &'static [u8; 6] {
        match self {
            FileVersion::Ac1012 => b"AC1012",
            FileVersion::Ac1014 => b"AC1014",
            FileVersion::Ac1015 => b"AC1015",
            FileVersion::Ac1018 => b"AC1018",
            FileVersion::Ac1021 => b"AC1021",
            FileVersion::Ac1024 => b"AC1024",
            FileVersion::Ac1027 => b"AC1027",
            FileVersion::Ac1032 => b"AC1032",
        }
    }

    /// R13-R14 only
    pub fn r13_14_only(&self) -> bool {
        matches!(self, FileVersion::Ac1012 | FileVersion::Ac1014)
    }

    /// R13 through R2000
    pub fn r13_15_only(&self) -> bool {
        *self <= FileVersion::Ac1015
    }

    /// R2000+ (AC1015+)
    pub fn r2000_plus(&self) -> bool {
        *self >= FileVersion::Ac1015
    }

    /// Pre-R2004
    pub fn r2004_pre(&self) -> bool {
        *self < FileVersion::Ac1018
    }

    /// R2004+ (AC1018+)
    pub fn r2004_plus(&self) -> bool {
        *self >= FileVersion::Ac1018
    }

    /// Pre-R2007
    pub fn r2007_pre(&self) -> bool {
        *self < FileVersion::Ac1021
    }

    /// R2007+ (AC1021+)
    pub fn r2007_plus(&self) -> bool {
        *self >= FileVersion::Ac1021
    }

    /// R2010+ (AC1024+)
    pub fn r2010_plus(&self) -> bool {
        *self >= FileVersion::Ac1024
    }

    /// R2013+ (AC1027+)
    pub fn r2013_plus(&self) -> bool {
        *self >= FileVersion::Ac1027
    }

    /// R2018+ (AC1032+)
    pub fn r2018_plus(&self) -> bool {
        *self >= FileVersion::Ac1032
    }

    /// Whether this revision uses the classic section-locator container.
    pub fn uses_section_locators(&self) -> bool {
        self.r2004_pre()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for v in [
            FileVersion::Ac1012,
            FileVersion::Ac1014,
            FileVersion::Ac1015,
            FileVersion::Ac1018,
            FileVersion::Ac1021,
            FileVersion::Ac1024,
            FileVersion::Ac1027,
            FileVersion::Ac1032,
        ] {
            assert_eq!(FileVersion::from_tag(v.tag()).unwrap(), v);
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            FileVersion::from_tag(b"AC1009"),
            Err(DecodeError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_flags_ac1012() {
        let v = FileVersion::Ac1012;
        assert!(v.r13_14_only());
        assert!(v.r13_15_only());
        assert!(!v.r2000_plus());
        assert!(v.r2004_pre());
    }

    #[test]
    fn test_flags_ac1015() {
        let v = FileVersion::Ac1015;
        assert!(!v.r13_14_only());
        assert!(v.r13_15_only());
        assert!(v.r2000_plus());
        assert!(v.r2004_pre());
        assert!(v.uses_section_locators());
    }

    #[test]
    fn test_flags_ac1032() {
        let v = FileVersion::Ac1032;
        assert!(v.r2000_plus());
        assert!(v.r2004_plus());
        assert!(v.r2007_plus());
        assert!(v.r2010_plus());
        assert!(v.r2013_plus());
        assert!(v.r2018_plus());
        assert!(!v.uses_section_locators());
    }
}
