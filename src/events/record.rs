//! Length-prefixed, checksummed record framing used by event files.
//!
//! Layout of one record:
//!
//! ```text
//! u64 LE  payload length
//! u32 LE  masked CRC32C of the 8 length bytes
//! [u8]    payload
//! u32 LE  masked CRC32C of the payload
//! ```

use crate::error::RecordError;
use std::io::{self, Read, Write};

const HEADER_LEN: usize = 12;
const FOOTER_LEN: u64 = 4;
const MASK_DELTA: u32 = 0xa282_ead8;

/// CRC32C of `data`, rotated and offset the way the record format stores it.
pub fn masked_crc(data: &[u8]) -> u32 {
    let crc = crc32c::crc32c(data);
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

/// Sequential reader over framed records.
pub struct RecordReader<R> {
    inner: R,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next record payload. `Ok(None)` marks a clean end of input.
    pub fn read_record(&mut self) -> Result<Option<Vec<u8>>, RecordError> {
        let mut header = [0u8; HEADER_LEN];
        let got = read_full(&mut self.inner, &mut header)?;
        if got == 0 {
            return Ok(None);
        }
        if got < HEADER_LEN {
            return Err(RecordError::TruncatedHeader { got });
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&header[..8]);
        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&header[8..]);

        let stored = u32::from_le_bytes(crc_bytes);
        let computed = masked_crc(&len_bytes);
        if stored != computed {
            return Err(RecordError::LengthChecksum { stored, computed });
        }

        // Bounded by the declared length. A short read is truncation.
        let len = u64::from_le_bytes(len_bytes);
        let mut payload = Vec::new();
        (&mut self.inner)
            .take(len.saturating_add(FOOTER_LEN))
            .read_to_end(&mut payload)?;
        if (payload.len() as u64) < len.saturating_add(FOOTER_LEN) {
            let got = payload.len().min(len as usize);
            return Err(RecordError::TruncatedPayload { expected: len, got });
        }

        let footer = payload.split_off(len as usize);
        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&footer);
        let stored = u32::from_le_bytes(crc_bytes);
        let computed = masked_crc(&payload);
        if stored != computed {
            return Err(RecordError::PayloadChecksum { stored, computed });
        }

        Ok(Some(payload))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Vec<u8>, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Writer producing the framing that `RecordReader` accepts.
pub struct RecordWriter<W> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record(&mut self, payload: &[u8]) -> io::Result<()> {
        let len_bytes = (payload.len() as u64).to_le_bytes();
        self.inner.write_all(&len_bytes)?;
        self.inner.write_all(&masked_crc(&len_bytes).to_le_bytes())?;
        self.inner.write_all(payload)?;
        self.inner.write_all(&masked_crc(payload).to_le_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Fill `buf` as far as the reader allows, returning how many bytes arrived.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
