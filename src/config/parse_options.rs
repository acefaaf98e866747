/// The parsing strictness mode
///
/// This is the error-handling strategy for a read session. Some real-world tags carry
/// recoverable defects (reserved flag bits, experimental frame IDs, frames relying on
/// unsupported features). [`ParsingMode::Lenient`] reports those through `log::warn!`
/// and keeps every well-formed frame; [`ParsingMode::Strict`] surfaces them as errors.
///
/// Structural version errors ([`ErrorKind::UnsupportedVersion`](crate::error::ErrorKind::UnsupportedVersion),
/// [`ErrorKind::VersionMismatch`](crate::error::ErrorKind::VersionMismatch)) are fatal in
/// both modes.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Any defect, recoverable or not, fails the read
	///
	/// This is the mode for validation tooling.
	Strict,
	/// Recoverable defects are logged, the offending frame is dropped, and reading continues
	///
	/// This is the mode for batch processing of real-world files.
	#[default]
	Lenient,
}

/// Options to control how a tag is parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) keep_corrupt_frames: bool,
	pub(crate) ignore_unsupported_flags: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::Lenient,
	/// 	keep_corrupt_frames: false,
	/// 	ignore_unsupported_flags: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::Lenient;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			keep_corrupt_frames: false,
			ignore_unsupported_flags: false,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::Lenient. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether to keep frames whose content ends early
	///
	/// Some files have a slightly truncated trailing frame. By default such a frame is
	/// dropped; with this option set, the fields that did parse are kept.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::ParseOptions;
	///
	/// // My files have truncated trailing frames I still want.
	/// let parsing_options = ParseOptions::new().keep_corrupt_frames(true);
	/// ```
	pub fn keep_corrupt_frames(&mut self, keep_corrupt_frames: bool) -> Self {
		self.keep_corrupt_frames = keep_corrupt_frames;
		*self
	}

	/// Whether to carry frames with compression/encryption/grouping flags as opaque binary
	///
	/// These features are not implemented. By default such frames fail (strict) or are
	/// dropped (lenient); with this option set, their raw content is preserved unparsed.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().ignore_unsupported_flags(true);
	/// ```
	pub fn ignore_unsupported_flags(&mut self, ignore_unsupported_flags: bool) -> Self {
		self.ignore_unsupported_flags = ignore_unsupported_flags;
		*self
	}
}
