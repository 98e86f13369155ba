//! The streaming buffer pump.
//!
//! Owns a fixed-capacity working buffer, refills it from an external byte
//! stream, asks the active algorithm for cut offsets, and emits chunk
//! records. This is the only place bytes are copied more than once (the
//! shift-down after each emitted chunk); everything else borrows.

use std::io::Read;
use std::time::{Duration, Instant};

use crate::algo::Algorithm;
use crate::error::EngineError;
use crate::hashing::HashBackend;

/// The working byte buffer. `logical_end` is the number of valid bytes
/// currently buffered; `data.len()` is the fixed capacity.
#[derive(Debug)]
pub struct Buffer {
    data: Vec<u8>,
    logical_end: usize,
}

impl Buffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: vec![0u8; capacity], logical_end: 0 }
    }

    pub fn logical_end(&self) -> usize {
        self.logical_end
    }

    pub fn filled(&self) -> &[u8] {
        &self.data[..self.logical_end]
    }

    /// Reads as many bytes as fit in the unused tail of the buffer, until
    /// either the buffer is full or a read returns zero bytes. The latter,
    /// and only the latter, is a genuine end-of-stream signal — a buffer
    /// that was already full before this call reads nothing without that
    /// meaning the stream is exhausted.
    fn refill(&mut self, reader: &mut impl Read) -> std::io::Result<bool> {
        let mut hit_eof = false;
        while self.logical_end < self.data.len() {
            let n = reader.read(&mut self.data[self.logical_end..])?;
            if n == 0 {
                hit_eof = true;
                break;
            }
            self.logical_end += n;
        }
        Ok(hit_eof)
    }

    fn is_full(&self) -> bool {
        self.logical_end == self.data.len()
    }

    /// Drops the first `cut` bytes, shifting the remainder down to
    /// offset 0 and decrementing `logical_end` by `cut`.
    fn shift(&mut self, cut: usize) {
        debug_assert!(cut <= self.logical_end);
        self.data.copy_within(cut..self.logical_end, 0);
        self.logical_end -= cut;
    }
}

/// One emitted chunk: its size and, if hashing is enabled, its digest.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub digest: Option<Vec<u8>>,
    pub size: usize,
}

/// Wall-clock totals accumulated over a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics {
    pub chunk_time: Duration,
    pub hash_time: Duration,
    pub total_bytes: u64,
}

impl Metrics {
    fn merge(&mut self, other: Metrics) {
        self.chunk_time += other.chunk_time;
        self.hash_time += other.hash_time;
        self.total_bytes += other.total_bytes;
    }
}

/// Default working-buffer capacity: 1 MiB.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 20;

pub struct StreamingDriver {
    buffer: Buffer,
    algorithm: Algorithm,
    hasher: Option<Box<dyn HashBackend>>,
    metrics: Metrics,
}

impl StreamingDriver {
    pub fn new(algorithm: Algorithm, buffer_capacity: usize, hasher: Option<Box<dyn HashBackend>>) -> Self {
        Self { buffer: Buffer::with_capacity(buffer_capacity), algorithm, hasher, metrics: Metrics::default() }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Drives one file stream to completion, invoking `on_chunk` for every
    /// emitted chunk in order. Resets the driver's buffer and the
    /// algorithm's carried-over rolling state between files, so the same
    /// driver can be reused across an arbitrary number of independent
    /// streams (e.g. one per file in a directory walk) without a later
    /// file's leading bytes being silently skipped by a dirty fingerprint
    /// left over from the previous file's unmatched tail.
    pub fn process_stream(
        &mut self,
        reader: &mut impl Read,
        mut on_chunk: impl FnMut(&ChunkRecord),
    ) -> Result<(), EngineError> {
        self.buffer = Buffer::with_capacity(self.buffer.data.len());
        self.algorithm.reset_stream();
        let mut run = Metrics::default();

        loop {
            let eof = self.buffer.refill(reader).map_err(EngineError::Io)?;

            loop {
                if self.buffer.logical_end == 0 {
                    break;
                }
                let started = Instant::now();
                let cut = self.algorithm.find_cutpoint(self.buffer.filled(), self.buffer.logical_end);
                run.chunk_time += started.elapsed();

                if cut == 0 || cut > self.buffer.logical_end {
                    return Err(EngineError::InvariantViolation {
                        algorithm: self.algorithm.name(),
                        message: format!("cut {} out of range for buffered length {}", cut, self.buffer.logical_end),
                    });
                }

                let is_interior = cut < self.buffer.logical_end;
                if !is_interior && !eof {
                    if self.buffer.is_full() {
                        return Err(EngineError::InvariantViolation {
                            algorithm: self.algorithm.name(),
                            message: "working buffer is full but no cut was found; buffer_size must be \
                                      at least max_block + 1 for this algorithm"
                                .to_string(),
                        });
                    }
                    // No boundary found inside the buffered region yet;
                    // refill before deciding again.
                    break;
                }

                let digest = if let Some(hasher) = &self.hasher {
                    let started = Instant::now();
                    let d = hasher.digest(&self.buffer.filled()[..cut]);
                    run.hash_time += started.elapsed();
                    Some(d)
                } else {
                    None
                };
                run.total_bytes += cut as u64;
                let record = ChunkRecord { digest, size: cut };
                on_chunk(&record);
                self.buffer.shift(cut);

                if self.buffer.logical_end == 0 {
                    break;
                }
            }

            if eof {
                break;
            }
        }

        self.metrics.merge(run);
        Ok(())
    }
}
