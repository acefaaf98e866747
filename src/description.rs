//! Per-version tag descriptions
//!
//! A [`TagDescription`] is the static knowledge about one tag version: which frame IDs
//! are valid, what payload shape each ID carries, and which concrete ID fills each
//! abstract [`FrameMeaning`]. One instance per version, built on first use and immutable
//! afterwards, so it may be shared freely across threads once constructed.

use crate::version::Version;

use std::collections::HashMap;
use std::sync::OnceLock;

/// The payload shape of a frame
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameType {
	/// A text frame with a leading encoding selector (`T...` except `TXX`/`TXXX`)
	Text,
	/// Language + description + text (`COM`/`COMM`, `ULT`/`USLT`)
	Comment,
	/// A Latin-1 URL (`W...` except `WXX`/`WXXX`)
	Url,
	/// User-defined text: description + value (`TXX`/`TXXX`)
	UserText,
	/// User-defined URL: description + Latin-1 URL (`WXX`/`WXXX`)
	UserUrl,
	/// A null-delimited list of strings (`IPL`/`IPLS`/`TIPL`/`TMCL`)
	StringList,
	/// An attached picture (`PIC`/`APIC`)
	Picture,
	/// Opaque binary content
	Binary,
}

/// A version-independent semantic role, mapped to a concrete frame ID per version
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FrameMeaning {
	/// The track title
	Title,
	/// The lead artist
	Artist,
	/// The album title
	Album,
	/// The release year (recording time in ID3v2.4)
	Year,
	/// A free-form comment
	Comment,
	/// The track number
	TrackNumber,
	/// The genre
	Genre,
	/// An attached picture (not representable in ID3v1.0)
	Picture,
}

const MEANINGS_V1_V2_2: &[(FrameMeaning, &str)] = &[
	(FrameMeaning::Title, "TT2"),
	(FrameMeaning::Artist, "TP1"),
	(FrameMeaning::Album, "TAL"),
	(FrameMeaning::Year, "TYE"),
	(FrameMeaning::Comment, "COM"),
	(FrameMeaning::TrackNumber, "TRK"),
	(FrameMeaning::Genre, "TCO"),
	(FrameMeaning::Picture, "PIC"),
];

const MEANINGS_V2_3: &[(FrameMeaning, &str)] = &[
	(FrameMeaning::Title, "TIT2"),
	(FrameMeaning::Artist, "TPE1"),
	(FrameMeaning::Album, "TALB"),
	(FrameMeaning::Year, "TYER"),
	(FrameMeaning::Comment, "COMM"),
	(FrameMeaning::TrackNumber, "TRCK"),
	(FrameMeaning::Genre, "TCON"),
	(FrameMeaning::Picture, "APIC"),
];

const MEANINGS_V2_4: &[(FrameMeaning, &str)] = &[
	(FrameMeaning::Title, "TIT2"),
	(FrameMeaning::Artist, "TPE1"),
	(FrameMeaning::Album, "TALB"),
	(FrameMeaning::Year, "TDRC"),
	(FrameMeaning::Comment, "COMM"),
	(FrameMeaning::TrackNumber, "TRCK"),
	(FrameMeaning::Genre, "TCON"),
	(FrameMeaning::Picture, "APIC"),
];

// ID3v1.0 models its seven fixed trailer fields as frames with the 3-character IDs the
// later versions gave those roles. The second column is the field's fixed byte width.
const V1_FIELDS: &[(&str, usize)] = &[
	("TT2", 30),
	("TP1", 30),
	("TAL", 30),
	("TYE", 4),
	("COM", 29),
	("TRK", 1),
	("TCO", 1),
];

#[rustfmt::skip]
const FRAMES_V2_2: &[(&str, FrameType)] = &[
	// Text information
	("TT1", FrameType::Text), ("TT2", FrameType::Text), ("TT3", FrameType::Text),
	("TP1", FrameType::Text), ("TP2", FrameType::Text), ("TP3", FrameType::Text),
	("TP4", FrameType::Text), ("TAL", FrameType::Text), ("TYE", FrameType::Text),
	("TRK", FrameType::Text), ("TCO", FrameType::Text), ("TEN", FrameType::Text),
	("TCM", FrameType::Text), ("TXT", FrameType::Text), ("TLA", FrameType::Text),
	("TOT", FrameType::Text), ("TOA", FrameType::Text), ("TOL", FrameType::Text),
	("TOR", FrameType::Text), ("TDA", FrameType::Text), ("TIM", FrameType::Text),
	("TRD", FrameType::Text), ("TMT", FrameType::Text), ("TFT", FrameType::Text),
	("TBP", FrameType::Text), ("TPA", FrameType::Text), ("TKE", FrameType::Text),
	("TSS", FrameType::Text), ("TLE", FrameType::Text), ("TSI", FrameType::Text),
	("TDY", FrameType::Text), ("TCR", FrameType::Text), ("TPB", FrameType::Text),
	("TOF", FrameType::Text),
	// Language-tagged text
	("COM", FrameType::Comment), ("ULT", FrameType::Comment),
	// URLs
	("WAF", FrameType::Url), ("WAR", FrameType::Url), ("WAS", FrameType::Url),
	("WCM", FrameType::Url), ("WCP", FrameType::Url), ("WPB", FrameType::Url),
	// User-defined
	("TXX", FrameType::UserText), ("WXX", FrameType::UserUrl),
	// Lists
	("IPL", FrameType::StringList),
	// Pictures
	("PIC", FrameType::Picture),
	// Binary
	("MCI", FrameType::Binary), ("UFI", FrameType::Binary), ("CNT", FrameType::Binary),
	("POP", FrameType::Binary), ("GEO", FrameType::Binary), ("BUF", FrameType::Binary),
	("LNK", FrameType::Binary), ("REV", FrameType::Binary), ("EQU", FrameType::Binary),
	("RVA", FrameType::Binary), ("STC", FrameType::Binary), ("MLL", FrameType::Binary),
	("ETC", FrameType::Binary), ("SLT", FrameType::Binary), ("CRA", FrameType::Binary),
	("CRM", FrameType::Binary),
];

#[rustfmt::skip]
const FRAMES_V2_3: &[(&str, FrameType)] = &[
	// Text information
	("TIT1", FrameType::Text), ("TIT2", FrameType::Text), ("TIT3", FrameType::Text),
	("TPE1", FrameType::Text), ("TPE2", FrameType::Text), ("TPE3", FrameType::Text),
	("TPE4", FrameType::Text), ("TALB", FrameType::Text), ("TYER", FrameType::Text),
	("TRCK", FrameType::Text), ("TCON", FrameType::Text), ("TENC", FrameType::Text),
	("TCOM", FrameType::Text), ("TEXT", FrameType::Text), ("TLAN", FrameType::Text),
	("TOAL", FrameType::Text), ("TOPE", FrameType::Text), ("TOLY", FrameType::Text),
	("TORY", FrameType::Text), ("TDAT", FrameType::Text), ("TIME", FrameType::Text),
	("TRDA", FrameType::Text), ("TMED", FrameType::Text), ("TFLT", FrameType::Text),
	("TBPM", FrameType::Text), ("TPOS", FrameType::Text), ("TKEY", FrameType::Text),
	("TSSE", FrameType::Text), ("TLEN", FrameType::Text), ("TSIZ", FrameType::Text),
	("TDLY", FrameType::Text), ("TCOP", FrameType::Text), ("TPUB", FrameType::Text),
	("TOFN", FrameType::Text), ("TOWN", FrameType::Text), ("TRSN", FrameType::Text),
	("TRSO", FrameType::Text), ("TSRC", FrameType::Text),
	// Language-tagged text
	("COMM", FrameType::Comment), ("USLT", FrameType::Comment),
	// URLs
	("WOAF", FrameType::Url), ("WOAR", FrameType::Url), ("WOAS", FrameType::Url),
	("WCOM", FrameType::Url), ("WCOP", FrameType::Url), ("WPUB", FrameType::Url),
	("WORS", FrameType::Url), ("WPAY", FrameType::Url),
	// User-defined
	("TXXX", FrameType::UserText), ("WXXX", FrameType::UserUrl),
	// Lists
	("IPLS", FrameType::StringList),
	// Pictures
	("APIC", FrameType::Picture),
	// Binary
	("MCDI", FrameType::Binary), ("UFID", FrameType::Binary), ("PCNT", FrameType::Binary),
	("POPM", FrameType::Binary), ("GEOB", FrameType::Binary), ("PRIV", FrameType::Binary),
	("RBUF", FrameType::Binary), ("RVRB", FrameType::Binary), ("EQUA", FrameType::Binary),
	("RVAD", FrameType::Binary), ("SYTC", FrameType::Binary), ("MLLT", FrameType::Binary),
	("ETCO", FrameType::Binary), ("SYLT", FrameType::Binary), ("POSS", FrameType::Binary),
	("USER", FrameType::Binary), ("OWNE", FrameType::Binary), ("COMR", FrameType::Binary),
	("LINK", FrameType::Binary), ("AENC", FrameType::Binary), ("ENCR", FrameType::Binary),
	("GRID", FrameType::Binary),
];

#[rustfmt::skip]
const FRAMES_V2_4: &[(&str, FrameType)] = &[
	// Text information
	("TIT1", FrameType::Text), ("TIT2", FrameType::Text), ("TIT3", FrameType::Text),
	("TPE1", FrameType::Text), ("TPE2", FrameType::Text), ("TPE3", FrameType::Text),
	("TPE4", FrameType::Text), ("TALB", FrameType::Text), ("TRCK", FrameType::Text),
	("TCON", FrameType::Text), ("TENC", FrameType::Text), ("TCOM", FrameType::Text),
	("TEXT", FrameType::Text), ("TLAN", FrameType::Text), ("TOAL", FrameType::Text),
	("TOPE", FrameType::Text), ("TOLY", FrameType::Text), ("TMED", FrameType::Text),
	("TFLT", FrameType::Text), ("TBPM", FrameType::Text), ("TPOS", FrameType::Text),
	("TKEY", FrameType::Text), ("TSSE", FrameType::Text), ("TLEN", FrameType::Text),
	("TDLY", FrameType::Text), ("TCOP", FrameType::Text), ("TPUB", FrameType::Text),
	("TOFN", FrameType::Text), ("TOWN", FrameType::Text), ("TRSN", FrameType::Text),
	("TRSO", FrameType::Text), ("TSRC", FrameType::Text),
	// Timestamps (plain text frames for codec purposes)
	("TDRC", FrameType::Text), ("TDOR", FrameType::Text), ("TDEN", FrameType::Text),
	("TDRL", FrameType::Text), ("TDTG", FrameType::Text),
	// ID3v2.4 additions
	("TMOO", FrameType::Text), ("TPRO", FrameType::Text), ("TSOA", FrameType::Text),
	("TSOP", FrameType::Text), ("TSOT", FrameType::Text), ("TSST", FrameType::Text),
	// Language-tagged text
	("COMM", FrameType::Comment), ("USLT", FrameType::Comment),
	// URLs
	("WOAF", FrameType::Url), ("WOAR", FrameType::Url), ("WOAS", FrameType::Url),
	("WCOM", FrameType::Url), ("WCOP", FrameType::Url), ("WPUB", FrameType::Url),
	("WORS", FrameType::Url), ("WPAY", FrameType::Url),
	// User-defined
	("TXXX", FrameType::UserText), ("WXXX", FrameType::UserUrl),
	// Lists
	("TIPL", FrameType::StringList), ("TMCL", FrameType::StringList),
	// Pictures
	("APIC", FrameType::Picture),
	// Binary
	("MCDI", FrameType::Binary), ("UFID", FrameType::Binary), ("PCNT", FrameType::Binary),
	("POPM", FrameType::Binary), ("GEOB", FrameType::Binary), ("PRIV", FrameType::Binary),
	("RBUF", FrameType::Binary), ("RVRB", FrameType::Binary), ("EQU2", FrameType::Binary),
	("RVA2", FrameType::Binary), ("SYTC", FrameType::Binary), ("MLLT", FrameType::Binary),
	("ETCO", FrameType::Binary), ("SYLT", FrameType::Binary), ("POSS", FrameType::Binary),
	("USER", FrameType::Binary), ("OWNE", FrameType::Binary), ("COMR", FrameType::Binary),
	("LINK", FrameType::Binary), ("AENC", FrameType::Binary), ("ENCR", FrameType::Binary),
	("GRID", FrameType::Binary), ("SIGN", FrameType::Binary), ("SEEK", FrameType::Binary),
	("ASPI", FrameType::Binary),
];

/// The static description of one tag version
#[derive(Debug)]
pub struct TagDescription {
	version: Version,
	frames: HashMap<&'static str, FrameType>,
	meanings: &'static [(FrameMeaning, &'static str)],
}

impl TagDescription {
	fn build(version: Version) -> Self {
		let (table, meanings): (&[(&str, FrameType)], _) = match version {
			Version::V1_0 => {
				let frames = V1_FIELDS
					.iter()
					.map(|&(id, _)| (id, FrameType::Text))
					.collect();
				return Self {
					version,
					frames,
					meanings: MEANINGS_V1_V2_2,
				};
			},
			Version::V2_2 => (FRAMES_V2_2, MEANINGS_V1_V2_2),
			Version::V2_3 => (FRAMES_V2_3, MEANINGS_V2_3),
			Version::V2_4 => (FRAMES_V2_4, MEANINGS_V2_4),
		};

		Self {
			version,
			frames: table.iter().copied().collect(),
			meanings,
		}
	}

	/// The version this description belongs to
	pub fn version(&self) -> Version {
		self.version
	}

	/// The [`FrameType`] of `id`, if `id` is part of this version's frame set
	pub fn frame_type(&self, id: &str) -> Option<FrameType> {
		self.frames.get(id).copied()
	}

	/// The `'static` spelling of `id`, if `id` is part of this version's frame set
	pub(crate) fn interned_id(&self, id: &str) -> Option<&'static str> {
		self.frames.get_key_value(id).map(|(known, _)| *known)
	}

	/// The concrete frame ID filling `meaning` in this version
	pub fn id_for(&self, meaning: FrameMeaning) -> Option<&'static str> {
		self.meanings
			.iter()
			.find(|(m, _)| *m == meaning)
			.map(|(_, id)| *id)
			.filter(|id| self.frames.contains_key(id))
	}

	/// The [`FrameMeaning`] `id` fills in this version, if any
	pub fn meaning_of(&self, id: &str) -> Option<FrameMeaning> {
		self.meanings
			.iter()
			.find(|(_, mapped)| *mapped == id)
			.map(|(m, _)| *m)
	}

	/// The ID3v1.0 fields in trailer order
	pub(crate) fn v1_fields() -> &'static [(&'static str, usize)] {
		V1_FIELDS
	}
}

/// Look up the shared [`TagDescription`] for `version`
///
/// Descriptions are built once, lazily, and never mutated afterwards.
pub fn tag_description(version: Version) -> &'static TagDescription {
	static DESCRIPTIONS: OnceLock<[TagDescription; 4]> = OnceLock::new();

	let all = DESCRIPTIONS.get_or_init(|| {
		[
			TagDescription::build(Version::V1_0),
			TagDescription::build(Version::V2_2),
			TagDescription::build(Version::V2_3),
			TagDescription::build(Version::V2_4),
		]
	});

	match version {
		Version::V1_0 => &all[0],
		Version::V2_2 => &all[1],
		Version::V2_3 => &all[2],
		Version::V2_4 => &all[3],
	}
}

#[cfg(test)]
mod tests {
	use super::{FrameMeaning, FrameType, tag_description};
	use crate::version::Version;

	#[test_log::test]
	fn id_lengths_match_version() {
		for (version, len) in [
			(Version::V2_2, 3),
			(Version::V2_3, 4),
			(Version::V2_4, 4),
		] {
			let description = tag_description(version);
			assert!(description.frame_type("XXXXX").is_none());
			for meaning in [
				FrameMeaning::Title,
				FrameMeaning::Artist,
				FrameMeaning::Album,
			] {
				assert_eq!(description.id_for(meaning).unwrap().len(), len);
			}
		}
	}

	#[test_log::test]
	fn meanings_resolve() {
		assert_eq!(
			tag_description(Version::V2_2).id_for(FrameMeaning::Title),
			Some("TT2")
		);
		assert_eq!(
			tag_description(Version::V2_3).id_for(FrameMeaning::Year),
			Some("TYER")
		);
		assert_eq!(
			tag_description(Version::V2_4).id_for(FrameMeaning::Year),
			Some("TDRC")
		);
		// No pictures in the 128 byte trailer
		assert_eq!(
			tag_description(Version::V1_0).id_for(FrameMeaning::Picture),
			None
		);
	}

	#[test_log::test]
	fn frame_types() {
		let v23 = tag_description(Version::V2_3);
		assert_eq!(v23.frame_type("TIT2"), Some(FrameType::Text));
		assert_eq!(v23.frame_type("COMM"), Some(FrameType::Comment));
		assert_eq!(v23.frame_type("APIC"), Some(FrameType::Picture));
		assert_eq!(v23.frame_type("MCDI"), Some(FrameType::Binary));
		assert_eq!(v23.frame_type("TXXX"), Some(FrameType::UserText));
		assert_eq!(v23.frame_type("IPLS"), Some(FrameType::StringList));
	}
}
