//! Host IPv4 neighbor table access and row parsing.
//!
//! The table has a single header line followed by rows of six
//! whitespace-separated columns:
//!
//! ```text
//! IP address       HW type     Flags       HW address            Mask     Device
//! 192.168.121.111  0x1         0x2         52:54:00:12:34:56     *        virbr0
//! ```
//!
//! Column positions are fixed by the kernel; the header text is never
//! interpreted.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// `ATF_COM`: the entry is complete and its hardware address is valid.
pub const ATF_COM: u32 = 0x02;

/// Trait for opening a neighbor table.
///
/// Implemented by [`FileTable`] for the real `/proc/net/arp` style file;
/// tests supply in-memory tables.
pub trait NeighborSource {
    /// Opens the table for a fresh top-to-bottom scan.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the table cannot be opened.
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;

    /// Human readable name of the table, used in error messages.
    fn describe(&self) -> String;
}

/// A neighbor table backed by a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTable {
    path: PathBuf,
}

impl FileTable {
    /// Creates a table reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the table file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NeighborSource for FileTable {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// One row of the neighbor table, borrowed from the line it was split from.
///
/// Numeric columns are kept as text and only parsed on demand, so a
/// malformed value on a row nobody asked about never causes an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborEntry<'a> {
    /// IPv4 address in dotted-quad form.
    pub ip_address: &'a str,
    /// Link-layer type code, e.g. `0x1`.
    pub hardware_type: &'a str,
    /// Flag bitmask, e.g. `0x2`.
    pub flags: &'a str,
    /// Hardware (MAC) address.
    pub hardware_address: &'a str,
    /// Mask column, normally `*`.
    pub mask: &'a str,
    /// Host interface owning the entry.
    pub device: &'a str,
}

impl<'a> NeighborEntry<'a> {
    /// Splits a data line into its six columns.
    ///
    /// Returns `None` if the line has fewer than six columns.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        Some(Self {
            ip_address: fields.next()?,
            hardware_type: fields.next()?,
            flags: fields.next()?,
            hardware_address: fields.next()?,
            mask: fields.next()?,
            device: fields.next()?,
        })
    }

    /// Parses the flags column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not a valid integer.
    pub fn parsed_flags(&self) -> Result<u32, ParseIntError> {
        parse_flags(self.flags)
    }

    /// Returns true if the complete bit is set in the flags column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not a valid integer.
    pub fn is_complete(&self) -> Result<bool, ParseIntError> {
        Ok(self.parsed_flags()? & ATF_COM == ATF_COM)
    }
}

/// Parses an integer whose base is given by its prefix.
///
/// Accepts `0x`/`0X` hexadecimal, `0o`/`0O` octal, `0b`/`0B` binary,
/// a bare leading `0` as octal, and plain decimal.
///
/// # Errors
///
/// Returns an error if the digits are invalid for the detected base or
/// the value does not fit in a `u32`.
pub fn parse_flags(value: &str) -> Result<u32, ParseIntError> {
    let (digits, radix) = if let Some(hex) = strip_prefix_ci(value, 'x') {
        (hex, 16)
    } else if let Some(octal) = strip_prefix_ci(value, 'o') {
        (octal, 8)
    } else if let Some(binary) = strip_prefix_ci(value, 'b') {
        (binary, 2)
    } else if value.len() > 1 && value.starts_with('0') {
        (&value[1..], 8)
    } else {
        (value, 10)
    };

    u32::from_str_radix(digits, radix)
}

/// Strips `0<marker>` in either letter case.
fn strip_prefix_ci(value: &str, marker: char) -> Option<&str> {
    let rest = value.strip_prefix('0')?;
    rest.strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod entry {
        use super::*;

        #[test]
        fn parse_splits_six_columns() {
            let entry =
                NeighborEntry::parse("192.168.121.111  0x1  0x2  52:54:00:12:34:56  *  virbr0")
                    .unwrap();

            assert_eq!(entry.ip_address, "192.168.121.111");
            assert_eq!(entry.hardware_type, "0x1");
            assert_eq!(entry.flags, "0x2");
            assert_eq!(entry.hardware_address, "52:54:00:12:34:56");
            assert_eq!(entry.mask, "*");
            assert_eq!(entry.device, "virbr0");
        }

        #[test]
        fn parse_accepts_tabs_and_trailing_space() {
            let entry = NeighborEntry::parse("10.0.0.1\t0x1\t0x6\taa:bb:cc:dd:ee:ff\t*\teth0  \n")
                .unwrap();

            assert_eq!(entry.flags, "0x6");
            assert_eq!(entry.device, "eth0");
        }

        #[test]
        fn parse_rejects_short_lines() {
            assert!(NeighborEntry::parse("").is_none());
            assert!(NeighborEntry::parse("10.0.0.1 0x1 0x2 aa:bb:cc:dd:ee:ff *").is_none());
        }

        #[test]
        fn complete_bit_is_detected() {
            let complete = NeighborEntry::parse("10.0.0.1 0x1 0x2 aa *  eth0").unwrap();
            let permanent = NeighborEntry::parse("10.0.0.1 0x1 0x6 aa *  eth0").unwrap();
            let incomplete = NeighborEntry::parse("10.0.0.1 0x1 0x0 aa * eth0").unwrap();

            assert!(complete.is_complete().unwrap());
            assert!(permanent.is_complete().unwrap());
            assert!(!incomplete.is_complete().unwrap());
        }

        #[test]
        fn malformed_flags_are_an_error() {
            let entry = NeighborEntry::parse("10.0.0.1 0x1 0xZZ aa * eth0").unwrap();
            assert!(entry.is_complete().is_err());
        }
    }

    mod flags {
        use super::*;

        #[test]
        fn hexadecimal() {
            assert_eq!(parse_flags("0x2"), Ok(2));
            assert_eq!(parse_flags("0X0c"), Ok(12));
        }

        #[test]
        fn decimal() {
            assert_eq!(parse_flags("2"), Ok(2));
            assert_eq!(parse_flags("0"), Ok(0));
            assert_eq!(parse_flags("10"), Ok(10));
        }

        #[test]
        fn octal_and_binary() {
            assert_eq!(parse_flags("010"), Ok(8));
            assert_eq!(parse_flags("0o17"), Ok(15));
            assert_eq!(parse_flags("0b10"), Ok(2));
        }

        #[test]
        fn invalid_values() {
            assert!(parse_flags("").is_err());
            assert!(parse_flags("0x").is_err());
            assert!(parse_flags("0xG").is_err());
            assert!(parse_flags("09").is_err());
            assert!(parse_flags("flags").is_err());
        }
    }

    mod file_table {
        use super::*;
        use std::io::Read;

        #[test]
        fn open_reads_file_contents() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            std::io::Write::write_all(&mut file, b"header\nrow\n").unwrap();
            let table = FileTable::new(file.path());

            let mut content = String::new();
            table.open().unwrap().read_to_string(&mut content).unwrap();

            assert_eq!(content, "header\nrow\n");
        }

        #[test]
        fn open_fails_for_missing_file() {
            let dir = tempfile::tempdir().unwrap();
            let table = FileTable::new(dir.path().join("arp"));

            assert!(table.open().is_err());
        }

        #[test]
        fn describe_is_the_path() {
            let table = FileTable::new("/proc/net/arp");
            assert_eq!(table.describe(), "/proc/net/arp");
            assert_eq!(table.path(), Path::new("/proc/net/arp"));
        }
    }
}
