/// Options to control how a tag is written
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) unsynchronisation: bool,
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	unsynchronisation: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			unsynchronisation: false,
		}
	}

	/// Whether to apply the unsynchronisation transform when writing
	///
	/// The scope follows the destination version: ID3v2.2/2.3 unsynchronize the whole
	/// tag, ID3v2.4 unsynchronizes each frame individually. Frames that were read with
	/// their unsynchronisation flag set are re-unsynchronized regardless of this option,
	/// so a read tag writes back byte-for-byte.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::config::WriteOptions;
	///
	/// // Old hardware players get confused by false sync patterns
	/// let write_options = WriteOptions::new().unsynchronisation(true);
	/// ```
	pub fn unsynchronisation(&mut self, unsynchronisation: bool) -> Self {
		self.unsynchronisation = unsynchronisation;
		*self
	}
}
