// Shorthand for return Err(Id3Error::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)               -> return Err(Id3Error::new(ErrorKind::Variant))
// - err!(Variant(Message))      -> return Err(Id3Error::new(ErrorKind::Variant(Message)))
// - err!(Variant { field: val }) -> struct variants, field shorthand included
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($($reason:expr),+)) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant($($reason),+),
		))
	};
	($variant:ident { $($fields:tt)+ }) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant { $($fields)+ },
		))
	};
}

// A macro for handling the different `ParsingMode`s
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		STRICT: $strict_handler:expr,
		DEFAULT: $default:expr $(,)?
	) => {
		match $parse_mode {
			crate::config::ParsingMode::Strict => $strict_handler,
			crate::config::ParsingMode::Lenient => $default,
		}
	};
}

pub(crate) use {err, parse_mode_choice};
