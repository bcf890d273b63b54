//! Metadata and payload types shared by the tree, the mounts and generated code.

use std::borrow::Cow;
use std::fs;

use chrono::{DateTime, NaiveDate, Utc};

/// The zero modification time. Used when a timestamp is unknown.
pub const ZERO_TIME: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Build a UTC timestamp from its calendar fields.
///
/// Generated code renders every modification time through this function.
/// Out-of-range fields yield [`ZERO_TIME`].
pub fn utc_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanosecond))
        .map(|naive| naive.and_utc())
        .unwrap_or(ZERO_TIME)
}

/// Metadata supplied when adding a node to a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    pub is_dir: bool,
    pub size: u64,
    pub mod_time: DateTime<Utc>,
}

impl NodeInfo {
    pub fn dir(mod_time: DateTime<Utc>) -> Self {
        Self {
            is_dir: true,
            size: 0,
            mod_time,
        }
    }

    pub fn file(size: u64, mod_time: DateTime<Utc>) -> Self {
        Self {
            is_dir: false,
            size,
            mod_time,
        }
    }
}

/// Bytes handed to `Mount::add_file`.
///
/// Embedded payloads borrow `'static` data from the binary; hand-built trees
/// may pass owned buffers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload(Option<Cow<'static, [u8]>>);

impl Payload {
    /// Payload of a zero-size file.
    pub const EMPTY: Payload = Payload(None);

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |data| data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage form: `None` for empty payloads.
    pub(crate) fn into_data(self) -> Option<Cow<'static, [u8]>> {
        self.0.filter(|data| !data.is_empty())
    }
}

impl From<&'static [u8]> for Payload {
    fn from(data: &'static [u8]) -> Self {
        Payload(Some(Cow::Borrowed(data)))
    }
}

impl<const N: usize> From<&'static [u8; N]> for Payload {
    fn from(data: &'static [u8; N]) -> Self {
        Payload(Some(Cow::Borrowed(data.as_slice())))
    }
}

impl From<&'static str> for Payload {
    fn from(data: &'static str) -> Self {
        Payload(Some(Cow::Borrowed(data.as_bytes())))
    }
}

impl From<Vec<u8>> for Payload {
    fn from(data: Vec<u8>) -> Self {
        Payload(Some(Cow::Owned(data)))
    }
}

impl From<String> for Payload {
    fn from(data: String) -> Self {
        Payload(Some(Cow::Owned(data.into_bytes())))
    }
}

/// Metadata returned by `stat`, `lstat` and directory listings.
///
/// The same type describes virtual nodes and physical entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
    /// Always `false` for virtual entries: the tree has no link concept.
    pub is_symlink: bool,
    pub mod_time: DateTime<Utc>,
}

impl FileInfo {
    /// Describe a physical entry.
    pub fn from_metadata(name: impl Into<String>, metadata: &fs::Metadata) -> Self {
        Self {
            name: name.into(),
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            is_symlink: metadata.file_type().is_symlink(),
            mod_time: metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or(ZERO_TIME),
        }
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn utc_date_builds_timestamp() {
        let t = utc_date(2024, 2, 29, 13, 14, 15, 500);
        assert_eq!(t.year(), 2024);
        assert_eq!(t.month(), 2);
        assert_eq!(t.day(), 29);
        assert_eq!(t.hour(), 13);
        assert_eq!(t.nanosecond(), 500);
    }

    #[test]
    fn utc_date_out_of_range_is_zero() {
        assert_eq!(utc_date(2023, 2, 30, 0, 0, 0, 0), ZERO_TIME);
        assert_eq!(utc_date(2023, 1, 1, 25, 0, 0, 0), ZERO_TIME);
    }

    #[test]
    fn payload_conversions() {
        assert!(Payload::EMPTY.is_empty());
        assert_eq!(Payload::from(b"hi").len(), 2);
        assert_eq!(Payload::from("abc").len(), 3);
        assert_eq!(Payload::from(vec![1u8, 2, 3, 4]).len(), 4);
        assert!(Payload::from(Vec::new()).into_data().is_none());
    }

    #[test]
    fn file_info_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();

        let info = FileInfo::from_metadata("a.txt", &fs::metadata(&file).unwrap());
        assert_eq!(info.name, "a.txt");
        assert_eq!(info.size, 5);
        assert!(info.is_file());
        assert!(!info.is_symlink);
        assert!(info.mod_time > ZERO_TIME);

        let info = FileInfo::from_metadata("d", &fs::metadata(dir.path()).unwrap());
        assert!(info.is_dir);
    }
}
