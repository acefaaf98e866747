//! Synchsafe integers and the unsynchronization byte-stuffing transform
//!
//! An MPEG decoder resynchronizes on an `0xFF 0b111xxxxx` byte pair. Tag data is kept
//! from producing such a pair two ways:
//!
//! * Synchsafe integers pack 7 bits per byte, forcing the top bit of every byte to zero.
//! * Unsynchronization inserts a literal `0x00` after any `0xFF` that would otherwise be
//!   followed by `0x00` or a byte with its top three bits set. The transform is
//!   reversible and is applied to headers and content alike.

use crate::error::Result;
use crate::macros::err;

use std::io::{Read, Write};

/// An integer that can be converted to and from its synchsafe form
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in `7 * size_of::<Self>()` bits
	fn synch(self) -> Result<Self>;

	/// Decode a synchsafe integer
	fn unsynch(self) -> Self;
}

macro_rules! impl_synchsafe {
	($($ty:ty),+) => {
		$(
			impl SynchsafeInteger for $ty {
				fn synch(self) -> Result<Self> {
					const NUM_BYTES: u32 = core::mem::size_of::<$ty>() as u32;
					// 7 usable bits per byte
					if self > (<$ty>::MAX >> NUM_BYTES) {
						err!(SizeMismatch);
					}

					let mut synch = 0;
					for i in 0..NUM_BYTES {
						let septet = (self >> (7 * i)) & 0x7F;
						synch |= septet << (8 * i);
					}

					Ok(synch)
				}

				fn unsynch(self) -> Self {
					const NUM_BYTES: u32 = core::mem::size_of::<$ty>() as u32;

					let mut value = 0;
					for i in 0..NUM_BYTES {
						let septet = (self >> (8 * i)) & 0x7F;
						value |= septet << (7 * i);
					}

					value
				}
			}
		)+
	};
}

impl_synchsafe!(u16, u32);

/// A reader that removes unsynchronization stuffing
///
/// Any `0x00` directly following an `0xFF` is consumed without being delivered to the
/// caller. A one-byte lookahead flag keeps end-of-stream and back-to-back stuffed pairs
/// correct.
///
/// Whether a size budget counts bytes before or after the transform is decided by
/// composition: bound the *physical* reader first (`Take`) and wrap it to make the size
/// include the stuffing (ID3v2.4 per-frame sizes), or wrap an already-unsynchronized
/// stream and count what this reader yields to make the size exclude it (frame sizes
/// under a tag-wide flag).
///
/// # Examples
///
/// ```rust
/// use id3vx::util::synchsafe::UnsynchronizedStream;
/// use std::io::{Cursor, Read};
///
/// # fn main() -> id3vx::error::Result<()> {
/// let stuffed = [0xFF, 0x00, 0xE0, 0xFF, 0x00, 0x00];
///
/// let mut reader = UnsynchronizedStream::new(Cursor::new(stuffed));
/// let mut content = Vec::new();
/// reader.read_to_end(&mut content)?;
///
/// assert_eq!(content, [0xFF, 0xE0, 0xFF, 0x00]);
/// # Ok(()) }
/// ```
pub struct UnsynchronizedStream<R> {
	reader: R,
	last_was_ff: bool,
}

impl<R> UnsynchronizedStream<R> {
	/// Create a new [`UnsynchronizedStream`]
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			last_was_ff: false,
		}
	}

	/// Extract the reader, discarding the [`UnsynchronizedStream`]
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: Read> Read for UnsynchronizedStream<R> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let mut dest_pos = 0;
		let mut byte = [0];
		while dest_pos < buf.len() {
			if self.reader.read(&mut byte)? == 0 {
				break;
			}

			if self.last_was_ff {
				self.last_was_ff = false;

				// Only skip the byte if this is valid unsynchronization
				if byte[0] == 0 {
					continue;
				}
			}

			if byte[0] == 0xFF {
				self.last_was_ff = true;
			}

			buf[dest_pos] = byte[0];
			dest_pos += 1;
		}

		Ok(dest_pos)
	}
}

/// A writer that applies unsynchronization stuffing
///
/// Mirrors [`UnsynchronizedStream`]: after an `0xFF`, writing `0x00` or a byte with
/// `(b & 0xE0) == 0xE0` first inserts a literal `0x00`. [`inserted`](Self::inserted)
/// exposes how many bytes the transform added, which ID3v2.4 needs for frame sizing and
/// the whole-tag flag.
pub struct UnsynchronizedWriter<W> {
	writer: W,
	last_was_ff: bool,
	inserted: u32,
}

impl<W> UnsynchronizedWriter<W> {
	/// Create a new [`UnsynchronizedWriter`]
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			last_was_ff: false,
			inserted: 0,
		}
	}

	/// The number of `0x00` bytes inserted so far
	pub fn inserted(&self) -> u32 {
		self.inserted
	}

	/// Extract the writer, discarding the [`UnsynchronizedWriter`]
	pub fn into_inner(self) -> W {
		self.writer
	}
}

impl<W: Write> Write for UnsynchronizedWriter<W> {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		for &byte in buf {
			if self.last_was_ff && (byte == 0 || byte & 0xE0 == 0xE0) {
				self.writer.write_all(&[0])?;
				self.inserted += 1;
			}

			self.writer.write_all(&[byte])?;
			self.last_was_ff = byte == 0xFF;
		}

		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		self.writer.flush()
	}
}

/// Apply the unsynchronization transform to a whole buffer
///
/// Used for tag-wide unsynchronization (ID3v2.2/2.3), where frames are serialized first
/// and the transform runs over the assembled tag content.
pub(crate) fn unsynchronize(content: &[u8]) -> Vec<u8> {
	let mut writer = UnsynchronizedWriter::new(Vec::with_capacity(content.len()));
	// Writing to a Vec cannot fail
	let _ = writer.write_all(content);
	writer.into_inner()
}
