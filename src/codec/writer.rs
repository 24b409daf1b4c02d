//! Compressing sinks.
//!
//! [`EncodingWriter`] is what an [`Encoding`](super::Encoding) builds around
//! a destination. Closing it is an explicit choice between two paths:
//!
//! - [`EncodingWriter::finish`] after a successful copy, which writes the
//!   trailing frame and checksum of gzip/zlib streams;
//! - [`EncodingWriter::abandon`] after a failed copy, which seals the
//!   destination first so the encoder's drop cannot append a trailer to a
//!   truncated stream.

use std::io::{self, Write};

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;

/// Destination wrapper that can be sealed.
///
/// Once sealed, writes are accepted and discarded.
#[derive(Debug)]
struct SealedSink<W> {
    inner: W,
    sealed: bool,
}

impl<W: Write> SealedSink<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            sealed: false,
        }
    }

    fn seal(&mut self) {
        self.sealed = true;
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for SealedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.sealed {
            return Ok(buf.len());
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.sealed {
            return Ok(());
        }
        self.inner.flush()
    }
}

#[derive(Debug)]
enum Inner<W: Write> {
    Identity(W),
    Gzip(GzEncoder<SealedSink<W>>),
    Deflate(ZlibEncoder<SealedSink<W>>),
}

/// A destination, possibly wrapped by a compressor.
#[derive(Debug)]
pub struct EncodingWriter<W: Write> {
    inner: Inner<W>,
}

impl<W: Write> EncodingWriter<W> {
    pub(crate) fn identity(sink: W) -> Self {
        Self {
            inner: Inner::Identity(sink),
        }
    }

    pub(crate) fn gzip(sink: W, level: Compression) -> Self {
        Self {
            inner: Inner::Gzip(GzEncoder::new(SealedSink::new(sink), level)),
        }
    }

    pub(crate) fn deflate(sink: W, level: Compression) -> Self {
        Self {
            inner: Inner::Deflate(ZlibEncoder::new(SealedSink::new(sink), level)),
        }
    }

    /// Whether closing this writer requires a finalize step.
    pub fn needs_finish(&self) -> bool {
        !matches!(self.inner, Inner::Identity(_))
    }

    /// Finalize the stream and hand back the destination.
    ///
    /// Identity is returned untouched. If writing the final frame fails, the
    /// destination is sealed before the encoder drops, so no trailer follows
    /// the error.
    pub fn finish(self) -> io::Result<W> {
        match self.inner {
            Inner::Identity(sink) => Ok(sink),
            Inner::Gzip(mut encoder) => {
                if let Err(e) = encoder.try_finish() {
                    encoder.get_mut().seal();
                    return Err(e);
                }
                Ok(encoder.finish()?.into_inner())
            },
            Inner::Deflate(mut encoder) => {
                if let Err(e) = encoder.try_finish() {
                    encoder.get_mut().seal();
                    return Err(e);
                }
                Ok(encoder.finish()?.into_inner())
            },
        }
    }

    /// Drop the writer without finalizing.
    ///
    /// Bytes already flushed to the destination stay there. Nothing more is
    /// written, including the trailer flate2 would emit on drop.
    pub fn abandon(self) {
        match self.inner {
            Inner::Identity(_) => {},
            Inner::Gzip(mut encoder) => encoder.get_mut().seal(),
            Inner::Deflate(mut encoder) => encoder.get_mut().seal(),
        }
    }
}

impl<W: Write> Write for EncodingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Identity(sink) => sink.write(buf),
            Inner::Gzip(encoder) => encoder.write(buf),
            Inner::Deflate(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            Inner::Identity(sink) => sink.flush(),
            Inner::Gzip(encoder) => encoder.flush(),
            Inner::Deflate(encoder) => encoder.flush(),
        }
    }
}
