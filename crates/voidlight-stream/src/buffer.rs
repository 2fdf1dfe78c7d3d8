//! Turns a non-seekable byte source into a seekable one.
//!
//! The dispatch contract requires every stream reaching a converter's
//! `accepts`/`convert` to support rewinding. Network responses and stdin
//! arrive as plain `Read`s; this module buffers them into memory up to a
//! threshold, spilling to a temp file beyond it.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tempfile::NamedTempFile;

/// Bytes beyond this size are spilled to disk rather than held in memory.
pub const DEFAULT_SPILL_THRESHOLD: usize = 16 * 1024 * 1024;

/// A seekable byte buffer, backed by memory or a temp file depending on size.
pub enum SeekableBuffer {
    Memory(io::Cursor<Vec<u8>>),
    Disk(std::fs::File),
}

impl SeekableBuffer {
    /// Reads `reader` to completion, buffering in memory up to `threshold`
    /// bytes, then spilling any remainder to a temp file.
    pub fn from_reader<R: Read>(mut reader: R, threshold: usize) -> io::Result<Self> {
        let mut memory = Vec::with_capacity(threshold.min(64 * 1024));
        let mut chunk = [0u8; 64 * 1024];

        loop {
            if memory.len() >= threshold {
                let mut file = NamedTempFile::new()?.into_file();
                file.write_all(&memory)?;
                io::copy(&mut reader, &mut file)?;
                file.seek(SeekFrom::Start(0))?;
                return Ok(SeekableBuffer::Disk(file));
            }
            let remaining = threshold - memory.len();
            let want = remaining.min(chunk.len());
            let read = reader.read(&mut chunk[..want])?;
            if read == 0 {
                break;
            }
            memory.extend_from_slice(&chunk[..read]);
        }

        Ok(SeekableBuffer::Memory(io::Cursor::new(memory)))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        SeekableBuffer::Memory(io::Cursor::new(bytes))
    }

    /// Reads up to `limit` bytes from the current position without
    /// disturbing it — used by the dispatcher's sniff-head step.
    pub fn peek(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        let pos = self.stream_position()?;
        let mut buf = vec![0u8; limit];
        let n = self.read_up_to(&mut buf)?;
        buf.truncate(n);
        self.seek(SeekFrom::Start(pos))?;
        Ok(buf)
    }

    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut total = 0;
        while total < buf.len() {
            let n = self.read(&mut buf[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }
}

impl Read for SeekableBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SeekableBuffer::Memory(cursor) => cursor.read(buf),
            SeekableBuffer::Disk(file) => file.read(buf),
        }
    }
}

impl Seek for SeekableBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            SeekableBuffer::Memory(cursor) => cursor.seek(pos),
            SeekableBuffer::Disk(file) => file.seek(pos),
        }
    }
}
