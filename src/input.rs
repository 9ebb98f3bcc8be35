//! Selection and opening of the byte stream a capture is read from.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use tracing::debug;

use crate::errors::*;

/// Buffer size for reading pcap inputs (64KB).
const BUFFER_SIZE: usize = 65536;

/// Names designating the standard input.
const STDIN_NAMES: [&str; 2] = ["-", "/dev/stdin"];


/// Where a capture is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// The standard input of the process
    Stdin,
    /// A file on disk
    Path(PathBuf),
}

impl Input {
    /// Interprets a user given input name.
    ///
    /// `-` and `/dev/stdin` designate the standard input, anything else is a file path.
    ///
    /// # Errors
    /// Returns [`PcapError::MissingInput`] if no name or an empty name is given.
    ///
    /// # Examples
    /// ```rust
    /// use pcap_scan::Input;
    ///
    /// assert_eq!(Input::parse(Some("-")).unwrap(), Input::Stdin);
    /// assert_eq!(Input::parse(Some("a.pcap")).unwrap(), Input::Path("a.pcap".into()));
    /// assert!(Input::parse(None).is_err());
    /// ```
    pub fn parse(name: Option<&str>) -> PcapResult<Input> {
        match name {
            None | Some("") => Err(PcapError::MissingInput),
            Some(name) if STDIN_NAMES.contains(&name) => Ok(Input::Stdin),
            Some(name) => Ok(Input::Path(PathBuf::from(name))),
        }
    }

    /// Opens the input as a buffered byte stream.
    pub fn open(&self) -> PcapResult<Box<dyn Read + Send>> {
        debug!(input = %self, "Opening pcap input");

        let reader: Box<dyn Read + Send> = match self {
            Input::Stdin => Box::new(BufReader::with_capacity(BUFFER_SIZE, std::io::stdin())),
            Input::Path(path) => {
                let file = File::open(path).map_err(|source| PcapError::OpenFailed { path: path.clone(), source })?;
                Box::new(BufReader::with_capacity(BUFFER_SIZE, file))
            },
        };

        Ok(reader)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
