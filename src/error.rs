//! Contains the errors that can arise within id3vx
//!
//! The primary error is [`Id3Error`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::version::Version;

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3Error>`
pub type Result<T> = std::result::Result<T, Id3Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Tag header related errors
	/// Arises when an unknown ID3v2 major version is found
	///
	/// This is always fatal, there is no lenient handling for structural version errors.
	UnsupportedVersion(u8, u8),
	/// Arises when a codec or frame is used against a [`Version`] it does not support
	///
	/// This is a programming error and is always fatal.
	VersionMismatch {
		/// The version the caller asked for
		requested: Version,
		/// A description of what did not support it
		reason: &'static str,
	},
	/// Arises when a tag header carries an extended header or footer flag
	///
	/// Neither is supported; they are rejected rather than misparsed.
	UnsupportedTagFlags(u8),

	// Frame related errors
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or has an invalid length for its version
	BadFrameId(Vec<u8>),
	/// Arises when a well-formed frame ID is not part of the version's known set
	///
	/// Recoverable in [`ParsingMode::Lenient`](crate::config::ParsingMode::Lenient),
	/// where the frame is skipped.
	UnrecognizedFrame(String),
	/// Arises when a frame header has reserved flag bits set
	InvalidHeaderFlags {
		/// The raw flag bytes
		flags: u16,
		/// The version's reserved-bit mask
		invalid_mask: u16,
	},
	/// Arises when a frame carries a compression, encryption, or grouping flag
	///
	/// These are rejected as unsupported unless
	/// [`ParseOptions::ignore_unsupported_flags`](crate::config::ParseOptions::ignore_unsupported_flags)
	/// is set, in which case the frame is carried as opaque binary.
	UnsupportedFrameFlags(&'static str),
	/// Arises when fewer bytes remain than a declared field requires
	///
	/// Whether the partially read frame is kept is governed by
	/// [`ParseOptions::keep_corrupt_frames`](crate::config::ParseOptions::keep_corrupt_frames).
	CorruptFrameContent(&'static str),
	/// Arises when a frame's declared size overshoots the remaining tag size
	OversizedTag,
	/// Arises when a value does not fit its wire encoding (e.g. a synchsafe u32 above 2^28)
	SizeMismatch,

	// Text related errors
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(&'static str),

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`]
	Io(std::io::Error),
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Unable to convert bytes to a str
	StrFromUtf8(std::str::Utf8Error),
}

impl ErrorKind {
	/// Whether a lenient read session may recover from this error by dropping the frame
	pub(crate) fn is_soft(&self) -> bool {
		matches!(
			self,
			ErrorKind::UnrecognizedFrame(_)
				| ErrorKind::InvalidHeaderFlags { .. }
				| ErrorKind::UnsupportedFrameFlags(_)
		)
	}
}

/// Errors that could occur within id3vx
pub struct Id3Error {
	pub(crate) kind: ErrorKind,
}

impl Id3Error {
	/// Create an `Id3Error` from an [`ErrorKind`]
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Id3Error {}

impl Debug for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<std::io::Error> for Id3Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for Id3Error {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::str::Utf8Error> for Id3Error {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl Display for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),

			ErrorKind::UnsupportedVersion(major, minor) => write!(
				f,
				"Found an invalid version (v2.{major}.{minor}), expected any major revision in: \
				 (2, 3, 4)"
			),
			ErrorKind::VersionMismatch { requested, reason } => {
				write!(f, "{reason} does not support {requested}")
			},
			ErrorKind::UnsupportedTagFlags(flags) => write!(
				f,
				"Tag header requires an unsupported extension (flags: {flags:#04x})"
			),
			ErrorKind::BadFrameId(ref id) => write!(f, "Failed to parse a frame ID: 0x{id:x?}"),
			ErrorKind::UnrecognizedFrame(ref id) => {
				write!(f, "Frame ID \"{id}\" is not part of the version's frame set")
			},
			ErrorKind::InvalidHeaderFlags {
				flags,
				invalid_mask,
			} => write!(
				f,
				"Frame header has reserved flag bits set (flags: {flags:#06x}, reserved: \
				 {invalid_mask:#06x})"
			),
			ErrorKind::UnsupportedFrameFlags(which) => {
				write!(f, "Frame requires unsupported feature: {which}")
			},
			ErrorKind::CorruptFrameContent(reason) => {
				write!(f, "Frame content is corrupt: {reason}")
			},
			ErrorKind::OversizedTag => write!(
				f,
				"A frame's declared size overshoots the remaining tag size"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(message) => write!(f, "Text encoding: {message}"),
		}
	}
}
