//! Append-only journal in on-board NOR flash.
//!
//! The journal owns a sector-aligned flash region and appends CRLF-terminated
//! text records to it, wrapping to the start when the region is full.
//!
//! # Layout
//!
//! Records never straddle a sector: a record that does not fit in the rest of
//! the current sector starts at the next one, leaving the tail erased. The
//! sector after the one being written is always kept erased, which gives the
//! boot scan an unambiguous end marker:
//!
//! ```text
//! | data data | data  ..... | (erased) | old data | old data |
//!               ^ head        ^ erased sector ahead of head
//! ```
//!
//! At mount the journal finds the erased sector whose predecessor holds data
//! and resumes at the first erased byte of that predecessor. Record bytes are
//! printable ASCII plus CR/LF, so `0xFF` never appears inside a record.

use core::fmt;

use cluster_common::config::LOG_PATH;
use cluster_common::hal::LogStorage;
use embedded_storage::nor_flash::{NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash};

/// Value of an erased NOR byte.
const ERASED: u8 = 0xFF;

/// Bytes read per flash access during the boot scan.
const SCAN_CHUNK: usize = 256;

// =============================================================================
// Errors
// =============================================================================

/// Journal failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlashLogError {
    /// The flash driver reported an error.
    Flash(NorFlashErrorKind),
    /// Region start or length is not a whole number of sectors, or shorter than two.
    Misaligned,
    /// Record longer than one sector.
    RecordTooLong,
    /// Only the journal file exists on this storage.
    UnknownPath,
}

impl fmt::Display for FlashLogError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Flash(kind) => write!(f, "flash error: {kind}"),
            Self::Misaligned => f.write_str("journal region not sector aligned"),
            Self::RecordTooLong => f.write_str("record longer than a sector"),
            Self::UnknownPath => f.write_str("unknown journal path"),
        }
    }
}

impl<E: NorFlashError> From<E> for FlashLogError {
    fn from(error: E) -> Self { Self::Flash(error.kind()) }
}

// =============================================================================
// Journal
// =============================================================================

/// Circular append-only record store over a NOR flash region.
pub struct FlashLog<F> {
    flash: F,
    base: u32,
    len: u32,
    /// Next write offset, relative to `base`.
    head: u32,
}

impl<F: NorFlash + ReadNorFlash> FlashLog<F> {
    const SECTOR: u32 = F::ERASE_SIZE as u32;

    /// Take over `len` bytes of `flash` starting at `base` and locate the write head.
    pub fn mount(
        flash: F,
        base: u32,
        len: u32,
    ) -> Result<Self, FlashLogError> {
        // Records are written byte-exact
        const { assert!(F::WRITE_SIZE == 1) };

        if base % Self::SECTOR != 0 || len % Self::SECTOR != 0 || len < 2 * Self::SECTOR {
            return Err(FlashLogError::Misaligned);
        }

        let mut log = Self {
            flash,
            base,
            len,
            head: 0,
        };
        log.head = log.find_head()?;
        Ok(log)
    }

    /// Current write offset within the region.
    #[inline]
    pub const fn head(&self) -> u32 { self.head }

    /// Region size in bytes.
    #[inline]
    pub const fn len(&self) -> u32 { self.len }

    /// Whether nothing has been written since the region was last erased.
    pub fn is_empty(&mut self) -> Result<bool, FlashLogError> {
        for sector in 0..self.sector_count() {
            if !self.sector_erased(sector)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Release the flash driver.
    pub fn into_inner(self) -> F { self.flash }

    /// Append one record.
    pub fn append(
        &mut self,
        record: &[u8],
    ) -> Result<(), FlashLogError> {
        let size = record.len() as u32;
        if size > Self::SECTOR {
            return Err(FlashLogError::RecordTooLong);
        }
        if size == 0 {
            return Ok(());
        }

        let sector_end = (self.head / Self::SECTOR + 1) * Self::SECTOR;
        if self.head + size > sector_end {
            // Skip the tail; the next sector is already erased
            self.head = sector_end % self.len;
        }
        if self.head % Self::SECTOR == 0 {
            self.erase_sector(self.next_sector(self.head / Self::SECTOR))?;
        }

        self.flash.write(self.base + self.head, record)?;
        self.head = (self.head + size) % self.len;
        Ok(())
    }

    fn sector_count(&self) -> u32 { self.len / Self::SECTOR }

    fn next_sector(
        &self,
        sector: u32,
    ) -> u32 {
        (sector + 1) % self.sector_count()
    }

    fn erase_sector(
        &mut self,
        sector: u32,
    ) -> Result<(), FlashLogError> {
        let from = self.base + sector * Self::SECTOR;
        self.flash.erase(from, from + Self::SECTOR)?;
        Ok(())
    }

    /// Offset of the first erased byte in `sector`, if any.
    fn first_erased(
        &mut self,
        sector: u32,
    ) -> Result<Option<u32>, FlashLogError> {
        let start = sector * Self::SECTOR;
        let mut chunk = [0u8; SCAN_CHUNK];
        let mut offset = 0;
        while offset < Self::SECTOR {
            let n = (Self::SECTOR - offset).min(SCAN_CHUNK as u32);
            let buf = &mut chunk[..n as usize];
            self.flash.read(self.base + start + offset, buf)?;
            if let Some(pos) = buf.iter().position(|&b| b == ERASED) {
                return Ok(Some(start + offset + pos as u32));
            }
            offset += n;
        }
        Ok(None)
    }

    fn sector_erased(
        &mut self,
        sector: u32,
    ) -> Result<bool, FlashLogError> {
        let start = sector * Self::SECTOR;
        let mut chunk = [0u8; SCAN_CHUNK];
        let mut offset = 0;
        while offset < Self::SECTOR {
            let n = (Self::SECTOR - offset).min(SCAN_CHUNK as u32);
            let buf = &mut chunk[..n as usize];
            self.flash.read(self.base + start + offset, buf)?;
            if buf.iter().any(|&b| b != ERASED) {
                return Ok(false);
            }
            offset += n;
        }
        Ok(true)
    }

    fn find_head(&mut self) -> Result<u32, FlashLogError> {
        let count = self.sector_count();
        let mut erased_seen = false;

        for sector in 0..count {
            if !self.sector_erased(sector)? {
                continue;
            }
            erased_seen = true;
            let prev = (sector + count - 1) % count;
            if self.sector_erased(prev)? {
                continue;
            }
            // Data ends inside the predecessor, or fills it completely
            let head = match self.first_erased(prev)? {
                Some(offset) => offset,
                None => sector * Self::SECTOR,
            };
            if head % Self::SECTOR == 0 {
                self.erase_sector(self.next_sector(head / Self::SECTOR))?;
            }
            return Ok(head);
        }

        if !erased_seen {
            // No end marker: restart the journal from the first sector
            self.erase_sector(0)?;
            self.erase_sector(1)?;
        }
        Ok(0)
    }
}

impl<F: NorFlash + ReadNorFlash> LogStorage for FlashLog<F> {
    type Error = FlashLogError;

    fn append_line(
        &mut self,
        path: &str,
        text: &str,
    ) -> Result<(), Self::Error> {
        if path != LOG_PATH {
            return Err(FlashLogError::UnknownPath);
        }
        self.append(text.as_bytes())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_storage::nor_flash::ErrorType;

    use super::*;

    const SECTOR: usize = 64;

    /// RAM-backed NOR flash that rejects writes to unerased bytes.
    struct MemFlash {
        data: Vec<u8>,
        erases: usize,
    }

    impl MemFlash {
        fn new(sectors: usize) -> Self {
            Self {
                data: vec![ERASED; sectors * SECTOR],
                erases: 0,
            }
        }
    }

    impl ErrorType for MemFlash {
        type Error = NorFlashErrorKind;
    }

    impl ReadNorFlash for MemFlash {
        const READ_SIZE: usize = 1;

        fn read(
            &mut self,
            offset: u32,
            bytes: &mut [u8],
        ) -> Result<(), Self::Error> {
            let start = offset as usize;
            let src = self.data.get(start..start + bytes.len()).ok_or(NorFlashErrorKind::OutOfBounds)?;
            bytes.copy_from_slice(src);
            Ok(())
        }

        fn capacity(&self) -> usize { self.data.len() }
    }

    impl NorFlash for MemFlash {
        const WRITE_SIZE: usize = 1;
        const ERASE_SIZE: usize = SECTOR;

        fn erase(
            &mut self,
            from: u32,
            to: u32,
        ) -> Result<(), Self::Error> {
            if from as usize % SECTOR != 0 || to as usize % SECTOR != 0 {
                return Err(NorFlashErrorKind::NotAligned);
            }
            let range = self.data.get_mut(from as usize..to as usize).ok_or(NorFlashErrorKind::OutOfBounds)?;
            range.fill(ERASED);
            self.erases += 1;
            Ok(())
        }

        fn write(
            &mut self,
            offset: u32,
            bytes: &[u8],
        ) -> Result<(), Self::Error> {
            let start = offset as usize;
            let dst = self.data.get_mut(start..start + bytes.len()).ok_or(NorFlashErrorKind::OutOfBounds)?;
            assert!(dst.iter().all(|&b| b == ERASED), "write over unerased flash at {offset}");
            dst.copy_from_slice(bytes);
            Ok(())
        }
    }

    fn record(n: usize) -> String { format!("{n:03}/01/2024 00:00:00\r\n") }

    fn erased_sectors(flash: &MemFlash) -> usize {
        flash.data.chunks(SECTOR).filter(|s| s.iter().all(|&b| b == ERASED)).count()
    }

    #[test]
    fn test_fresh_region_starts_at_zero() {
        let mut log = FlashLog::mount(MemFlash::new(4), 0, 4 * SECTOR as u32).unwrap();
        assert_eq!(log.head(), 0);
        assert!(log.is_empty().unwrap());
    }

    #[test]
    fn test_append_and_remount() {
        let mut log = FlashLog::mount(MemFlash::new(4), 0, 4 * SECTOR as u32).unwrap();
        log.append_line(LOG_PATH, "a,1\r\n").unwrap();
        log.append_line(LOG_PATH, "b,2\r\n").unwrap();
        assert_eq!(log.head(), 10);

        let flash = log.into_inner();
        assert_eq!(&flash.data[..10], b"a,1\r\nb,2\r\n");

        let log = FlashLog::mount(flash, 0, 4 * SECTOR as u32).unwrap();
        assert_eq!(log.head(), 10);
    }

    #[test]
    fn test_region_offset_is_respected() {
        let mut log = FlashLog::mount(MemFlash::new(4), SECTOR as u32, 2 * SECTOR as u32).unwrap();
        log.append(b"xyz").unwrap();
        let flash = log.into_inner();
        assert!(flash.data[..SECTOR].iter().all(|&b| b == ERASED));
        assert_eq!(&flash.data[SECTOR..SECTOR + 3], b"xyz");
    }

    #[test]
    fn test_rejects_bad_region() {
        assert_eq!(
            FlashLog::mount(MemFlash::new(4), 1, 2 * SECTOR as u32).err(),
            Some(FlashLogError::Misaligned)
        );
        assert_eq!(
            FlashLog::mount(MemFlash::new(4), 0, SECTOR as u32).err(),
            Some(FlashLogError::Misaligned)
        );
    }

    #[test]
    fn test_rejects_unknown_path_and_long_record() {
        let mut log = FlashLog::mount(MemFlash::new(4), 0, 4 * SECTOR as u32).unwrap();
        assert_eq!(log.append_line("other.txt", "x\r\n"), Err(FlashLogError::UnknownPath));
        assert_eq!(log.append(&[b'x'; SECTOR + 1]), Err(FlashLogError::RecordTooLong));
        assert_eq!(log.head(), 0);
    }

    #[test]
    fn test_records_do_not_straddle_sectors() {
        let mut log = FlashLog::mount(MemFlash::new(4), 0, 4 * SECTOR as u32).unwrap();
        // 22-byte records: two per 64-byte sector
        for n in 0..3 {
            log.append(record(n).as_bytes()).unwrap();
        }
        assert_eq!(log.head(), SECTOR as u32 + 22);
        let flash = log.into_inner();
        assert!(flash.data[44..SECTOR].iter().all(|&b| b == ERASED));
        assert_eq!(&flash.data[SECTOR..SECTOR + 22], record(2).as_bytes());
    }

    #[test]
    fn test_wraps_and_remounts_at_every_step() {
        let len = 4 * SECTOR as u32;
        let mut flash = MemFlash::new(4);

        for n in 0..40 {
            let mut log = FlashLog::mount(flash, 0, len).unwrap();
            let before = log.head();
            log.append(record(n).as_bytes()).unwrap();
            let after = log.head();
            flash = log.into_inner();

            // One sector is always kept erased as the end marker
            assert!(erased_sectors(&flash) >= 1, "no erased sector after record {n}");

            let remounted = FlashLog::mount(flash, 0, len).unwrap();
            assert_eq!(remounted.head(), after, "head lost after record {n} (was {before})");
            flash = remounted.into_inner();
        }

        // 40 records at two per sector went round the four sectors several times
        assert!(flash.erases > 4);
    }

    #[test]
    fn test_region_without_end_marker_restarts() {
        let mut flash = MemFlash::new(4);
        flash.data.fill(b'z');

        let mut log = FlashLog::mount(flash, 0, 4 * SECTOR as u32).unwrap();
        assert_eq!(log.head(), 0);
        log.append(b"fresh\r\n").unwrap();
        let flash = log.into_inner();
        assert_eq!(&flash.data[..7], b"fresh\r\n");
    }
}
