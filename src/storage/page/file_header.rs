//! File header - the reserved first page of a page file.
//!
//! The header records the total number of data pages. It is written in two
//! forms that must agree:
//! - the decimal page count as ASCII text at byte 0, NUL terminated
//! - a fixed-width, versioned, checksummed binary block at
//!   [`HEADER_META_OFFSET`]
//!
//! Headers carrying only the text form are accepted as legacy headers.

use thiserror::Error;

use crate::common::config::{HEADER_MAGIC, HEADER_META_OFFSET, HEADER_META_SIZE, HEADER_VERSION};

use super::Page;

/// Why a header page was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header does not start with a decimal page count")]
    NotNumeric,
    #[error("header page count overflows u32")]
    Overflow,
    #[error("header declares no pages")]
    ZeroPages,
    #[error("unsupported header version {0}")]
    UnsupportedVersion(u16),
    #[error("header checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("header page count mismatch: text says {text}, metadata says {meta}")]
    CountMismatch { text: u32, meta: u32 },
}

/// Decoded header page.
///
/// # Layout
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       n     total_num_pages, decimal ASCII, then 0x00
/// 32      4     magic "PGFH"
/// 36      2     format version (u16, little-endian)
/// 38      2     reserved, zero
/// 40      4     total_num_pages (u32, little-endian)
/// 44      4     CRC32 of bytes 0..44 (u32, little-endian)
/// ```
/// Every other byte of the page is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Number of data pages following the header.
    pub total_num_pages: u32,
}

impl FileHeader {
    const OFFSET_MAGIC: usize = HEADER_META_OFFSET;
    const OFFSET_VERSION: usize = HEADER_META_OFFSET + 4;
    const OFFSET_COUNT: usize = HEADER_META_OFFSET + 8;
    const OFFSET_CHECKSUM: usize = HEADER_META_OFFSET + 12;

    pub fn new(total_num_pages: u32) -> Self {
        Self { total_num_pages }
    }

    /// Encode this header as a full page.
    pub fn to_page(&self) -> Page {
        let mut page = Page::new();
        let data = page.as_mut_slice();

        let text = self.total_num_pages.to_string();
        data[..text.len()].copy_from_slice(text.as_bytes());

        data[Self::OFFSET_MAGIC..Self::OFFSET_MAGIC + 4].copy_from_slice(&HEADER_MAGIC);
        data[Self::OFFSET_VERSION..Self::OFFSET_VERSION + 2]
            .copy_from_slice(&HEADER_VERSION.to_le_bytes());
        data[Self::OFFSET_COUNT..Self::OFFSET_COUNT + 4]
            .copy_from_slice(&self.total_num_pages.to_le_bytes());

        let checksum = Self::compute_checksum(&page);
        page.as_mut_slice()[Self::OFFSET_CHECKSUM..Self::OFFSET_CHECKSUM + 4]
            .copy_from_slice(&checksum.to_le_bytes());

        page
    }

    /// Decode a header page.
    ///
    /// The text count is the run of ASCII digits at byte 0, ending at the
    /// first other byte. Unlike `atoi`, leading whitespace and a `+` sign are
    /// rejected; this crate never writes them. If the binary block is present
    /// it must validate and agree.
    pub fn from_page(page: &Page) -> Result<Self, HeaderError> {
        let data = page.as_slice();
        let text = Self::parse_text_count(&data[..HEADER_META_OFFSET])?;
        if text == 0 {
            return Err(HeaderError::ZeroPages);
        }

        if data[Self::OFFSET_MAGIC..Self::OFFSET_MAGIC + 4] != HEADER_MAGIC {
            log::debug!("legacy header without metadata block, {} pages", text);
            return Ok(Self::new(text));
        }

        let version = read_u16(data, Self::OFFSET_VERSION);
        if version != HEADER_VERSION {
            return Err(HeaderError::UnsupportedVersion(version));
        }

        let stored = read_u32(data, Self::OFFSET_CHECKSUM);
        let computed = Self::compute_checksum(page);
        if stored != computed {
            return Err(HeaderError::ChecksumMismatch { stored, computed });
        }

        let meta = read_u32(data, Self::OFFSET_COUNT);
        if meta != text {
            return Err(HeaderError::CountMismatch { text, meta });
        }

        Ok(Self::new(text))
    }

    /// CRC32 over everything in front of the checksum field.
    fn compute_checksum(page: &Page) -> u32 {
        crc32fast::hash(&page.as_slice()[..Self::OFFSET_CHECKSUM])
    }

    fn parse_text_count(text: &[u8]) -> Result<u32, HeaderError> {
        let digits = text.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(HeaderError::NotNumeric);
        }

        text[..digits].iter().try_fold(0u32, |acc, &b| {
            acc.checked_mul(10)
                .and_then(|acc| acc.checked_add(u32::from(b - b'0')))
                .ok_or(HeaderError::Overflow)
        })
    }
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

const _: () = assert!(FileHeader::OFFSET_CHECKSUM + 4 == HEADER_META_OFFSET + HEADER_META_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_header(text: &[u8]) -> Page {
        let mut page = Page::new();
        page.copy_from_slice(text);
        page
    }

    #[test]
    fn test_header_roundtrip() {
        for count in [1, 9, 10, 4096, u32::MAX] {
            let page = FileHeader::new(count).to_page();
            assert_eq!(FileHeader::from_page(&page), Ok(FileHeader::new(count)));
        }
    }

    #[test]
    fn test_header_text_prefix() {
        let page = FileHeader::new(42).to_page();
        let data = page.as_slice();

        assert_eq!(&data[..3], b"42\0");
        assert!(data[3..HEADER_META_OFFSET].iter().all(|&b| b == 0));
        assert_eq!(&data[HEADER_META_OFFSET..HEADER_META_OFFSET + 4], b"PGFH");
        assert!(data[HEADER_META_OFFSET + HEADER_META_SIZE..]
            .iter()
            .all(|&b| b == 0));
    }

    #[test]
    fn test_header_byte_layout() {
        let page = FileHeader::new(0x0403_0201).to_page();
        let data = page.as_slice();

        assert_eq!(&data[36..38], &[1, 0]); // version 1, little-endian
        assert_eq!(&data[38..40], &[0, 0]);
        assert_eq!(&data[40..44], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_legacy_text_header() {
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"1")),
            Ok(FileHeader::new(1))
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"17trailing")),
            Ok(FileHeader::new(17))
        );
    }

    #[test]
    fn test_invalid_text_headers() {
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"")),
            Err(HeaderError::NotNumeric)
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"abc")),
            Err(HeaderError::NotNumeric)
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"-3")),
            Err(HeaderError::NotNumeric)
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b" 5")),
            Err(HeaderError::NotNumeric)
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"+5")),
            Err(HeaderError::NotNumeric)
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"0")),
            Err(HeaderError::ZeroPages)
        );
        assert_eq!(
            FileHeader::from_page(&legacy_header(b"99999999999")),
            Err(HeaderError::Overflow)
        );
    }

    #[test]
    fn test_corrupt_metadata_rejected() {
        let mut page = FileHeader::new(5).to_page();
        page.as_mut_slice()[40] = 6;

        assert!(matches!(
            FileHeader::from_page(&page),
            Err(HeaderError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut page = FileHeader::new(5).to_page();
        page.as_mut_slice()[36] = 9;

        assert_eq!(
            FileHeader::from_page(&page),
            Err(HeaderError::UnsupportedVersion(9))
        );
    }

    #[test]
    fn test_text_and_metadata_must_agree() {
        let mut page = FileHeader::new(5).to_page();
        page.as_mut_slice()[0] = b'6';
        let checksum = FileHeader::compute_checksum(&page);
        page.as_mut_slice()[44..48].copy_from_slice(&checksum.to_le_bytes());

        assert_eq!(
            FileHeader::from_page(&page),
            Err(HeaderError::CountMismatch { text: 6, meta: 5 })
        );
    }
}
