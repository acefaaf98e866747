//! Latin-1, UTF-8, and UTF-16 string codecs
//!
//! Every string-bearing frame field goes through [`decode_text`]/[`TextEncoding::encode`],
//! in one of three wire forms: fixed-width (ID3v1.0, null padded), null terminated, or
//! run-to-end-of-payload.

use crate::error::{ErrorKind, Id3Error, Result};
use crate::macros::err;

use std::io::Read;

use byteorder::ReadBytesExt;

/// The text encoding selector used in ID3v2 frames
///
/// The discriminants are the on-disk selector byte. ID3v2.2 and ID3v2.3 only permit
/// [`Latin1`](Self::Latin1) and [`Utf16`](Self::Utf16); the other two were introduced in
/// ID3v2.4.
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Default)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1, one byte per character
	#[default]
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	Utf16 = 1,
	/// UTF-16 big endian, no byte order mark (ID3v2.4 only)
	Utf16Be = 2,
	/// UTF-8 (ID3v2.4 only)
	Utf8 = 3,
	/// UTF-16 with a big endian byte order mark
	///
	/// Not a wire selector of its own; a [`Utf16`](Self::Utf16) string whose mark reads
	/// `FE FF` decodes to this, so the byte order survives a rewrite.
	Utf16BeBom = 4,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::Utf16),
			2 => Some(Self::Utf16Be),
			3 => Some(Self::Utf8),
			_ => None,
		}
	}

	/// The selector byte written to a frame's encoding field
	pub(crate) fn selector_byte(self) -> u8 {
		match self {
			Self::Utf16BeBom => Self::Utf16 as u8,
			other => other as u8,
		}
	}

	/// The width of this encoding's null terminator in bytes
	pub(crate) fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::Utf8 => 1,
			Self::Utf16 | Self::Utf16Be | Self::Utf16BeBom => 2,
		}
	}

	/// Encode `text`, appending the encoding's terminator when `terminated` is set
	///
	/// [`Utf16`](Self::Utf16) is written little-endian with a `FF FE` byte order mark,
	/// [`Utf16BeBom`](Self::Utf16BeBom) big-endian with `FE FF`.
	///
	/// # Errors
	///
	/// [`ErrorKind::TextEncode`] when `text` contains a character above U+00FF and the
	/// encoding is [`Latin1`](Self::Latin1).
	pub fn encode(self, text: &str, terminated: bool) -> Result<Vec<u8>> {
		let mut out = match self {
			Self::Latin1 => {
				let mut out = Vec::with_capacity(text.len());
				for c in text.chars() {
					if c as u32 > 255 {
						err!(TextEncode("Latin-1 cannot represent a character above U+00FF"));
					}
					out.push(c as u8);
				}
				out
			},
			Self::Utf16 => {
				let mut out = vec![0xFF, 0xFE];
				out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
				out
			},
			Self::Utf16BeBom => {
				let mut out = vec![0xFE, 0xFF];
				out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
				out
			},
			Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
			Self::Utf8 => text.as_bytes().to_vec(),
		};

		if terminated {
			out.extend(std::iter::repeat(0).take(self.terminator_len()));
		}

		Ok(out)
	}
}

/// Specify how to decode the provided text
///
/// By default, this decodes an unterminated Latin-1 run to the end of the reader.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct TextDecodeOptions {
	pub encoding: TextEncoding,
	/// Stop at (and consume) the encoding's null terminator instead of reading to the end
	pub terminated: bool,
	/// A byte order detected earlier in the same frame; `[0, 0]` means none
	pub bom: [u8; 2],
}

impl TextDecodeOptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn encoding(mut self, encoding: TextEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub(crate) fn terminated(mut self, terminated: bool) -> Self {
		self.terminated = terminated;
		self
	}

	pub(crate) fn bom(mut self, bom: [u8; 2]) -> Self {
		self.bom = bom;
		self
	}
}

#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodedText {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
	/// Whether a terminator was actually consumed, as opposed to hitting the end
	pub(crate) terminated: bool,
	/// The byte order mark in effect, for reuse by later strings in the same frame
	pub(crate) bom: [u8; 2],
}

pub(crate) fn decode_text<R>(reader: &mut R, options: TextDecodeOptions) -> Result<DecodedText>
where
	R: Read,
{
	let raw_bytes;
	let bytes_read;
	let terminated;

	if options.terminated {
		let (bytes, terminator_len) = read_to_terminator(reader, options.encoding);
		terminated = terminator_len > 0;

		if bytes.is_empty() {
			return Ok(DecodedText {
				bytes_read: terminator_len,
				terminated,
				bom: options.bom,
				..DecodedText::default()
			});
		}

		bytes_read = bytes.len() + terminator_len;
		raw_bytes = bytes;
	} else {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes)?;
		terminated = false;

		if bytes.is_empty() {
			return Ok(DecodedText {
				bom: options.bom,
				..DecodedText::default()
			});
		}

		bytes_read = bytes.len();
		raw_bytes = bytes;
	}

	let mut bom = options.bom;
	let content = match options.encoding {
		TextEncoding::Latin1 => latin1_decode(&raw_bytes),
		TextEncoding::Utf16 | TextEncoding::Utf16BeBom => {
			if raw_bytes.len() % 2 != 0 {
				err!(TextDecode("UTF-16 string has an odd length"));
			}

			match [raw_bytes[0], raw_bytes[1]] {
				[0xFF, 0xFE] => {
					bom = [0xFF, 0xFE];
					utf16_decode_bytes(&raw_bytes[2..], u16::from_le_bytes)?
				},
				[0xFE, 0xFF] => {
					bom = [0xFE, 0xFF];
					utf16_decode_bytes(&raw_bytes[2..], u16::from_be_bytes)?
				},
				// An all-zero pair with no byte order mark is an empty string
				[0x00, 0x00] if raw_bytes.len() == 2 => String::new(),
				// Later strings in a frame reuse the order detected by the first
				_ => match bom {
					[0xFF, 0xFE] => utf16_decode_bytes(&raw_bytes, u16::from_le_bytes)?,
					[0xFE, 0xFF] => utf16_decode_bytes(&raw_bytes, u16::from_be_bytes)?,
					_ => err!(TextDecode("UTF-16 string has an invalid byte order mark")),
				},
			}
		},
		TextEncoding::Utf16Be => utf16_decode_bytes(&raw_bytes, u16::from_be_bytes)?,
		TextEncoding::Utf8 => utf8_decode(raw_bytes)?,
	};

	Ok(DecodedText {
		content,
		bytes_read,
		terminated,
		bom,
	})
}

/// Collect bytes up to (and excluding) the encoding's null terminator
///
/// Returns the collected bytes and the number of terminator bytes consumed (0 when the
/// reader ran out first).
pub(crate) fn read_to_terminator<R>(reader: &mut R, encoding: TextEncoding) -> (Vec<u8>, usize)
where
	R: Read,
{
	let mut text_bytes = Vec::new();
	let mut terminator_len = 0;

	match encoding.terminator_len() {
		1 => {
			while let Ok(byte) = reader.read_u8() {
				if byte == 0 {
					terminator_len = 1;
					break;
				}

				text_bytes.push(byte);
			}
		},
		_ => {
			while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
				if b1 == 0 && b2 == 0 {
					terminator_len = 2;
					break;
				}

				text_bytes.push(b1);
				text_bytes.push(b2);
			}
		},
	}

	(text_bytes, terminator_len)
}

/// Decode a fixed-width, null-padded Latin-1 field (ID3v1.0)
///
/// Everything from the first null onward is padding.
pub(crate) fn latin1_decode_fixed(data: &[u8]) -> String {
	let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
	latin1_decode(&data[..end])
}

/// Encode a string into a fixed-width, null-padded Latin-1 field (ID3v1.0)
///
/// Characters that do not fit are truncated; characters above U+00FF become `'?'`.
pub(crate) fn latin1_encode_fixed(text: &str, width: usize) -> Vec<u8> {
	let mut out = vec![0; width];
	for (slot, c) in out.iter_mut().zip(text.chars()) {
		*slot = if c as u32 <= 255 { c as u8 } else { b'?' };
	}
	out
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	bytes.iter().map(|&b| b as char).collect()
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes).map_err(Into::into)
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	let words = bytes
		.chunks_exact(2)
		// A sloppy writer may repeat the BOM in front of later strings
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			_ => Some(endianness([c[0], c[1]])),
		})
		.collect::<Vec<u16>>();

	String::from_utf16(&words)
		.map_err(|_| Id3Error::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}
