use crate::{Error, Result};
use indexmap::IndexMap;

/// Options forwarded to the table endpoint, keyed by name.
/// A repeated key keeps its first position and takes the last value.
pub type OptionSet = IndexMap<String, String>;

/// splits a single `key=value` string on the first `=`
pub fn parse_option(option: &str) -> Result<(String, String)> {
    match option.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(Error::MalformedOption(option.to_string())),
    }
}

/// Parses the raw options in order, stopping at the first malformed one.
pub fn parse_options<S: AsRef<str>>(options: &[S]) -> Result<OptionSet> {
    let mut set = OptionSet::with_capacity(options.len());
    for option in options {
        let (key, value) = parse_option(option.as_ref())?;
        set.insert(key, value);
    }
    Ok(set)
}
