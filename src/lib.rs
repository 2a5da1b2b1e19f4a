use thiserror::Error;
pub mod cli;
pub mod log;
pub mod mode;
pub mod options;
pub mod plot;
pub mod request;
pub mod table;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const BASE_URL: &str = "https://www-genesis.destatis.de/genesisWS/rest/2020";
pub const LANGUAGE: &str = "de";

pub const ENDPOINT_WHOAMI: &str = "helloworld/whoami";
pub const ENDPOINT_LOGINCHECK: &str = "helloworld/logincheck";
pub const ENDPOINT_TABLE: &str = "data/table";

pub const CONTENT_PATH: [&str; 2] = ["Object", "Content"];
pub const CSV_SEPARATOR: u8 = b';';

pub const DEFAULT_XLSX: &str = "data.xlsx";
pub const DEFAULT_SVG: &str = "data.svg";
pub const SHEET_NAME: &str = "Sheet1";

pub const EXIT_MALFORMED: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid option format: {0}. Expected format 'key=value'.")]
    MalformedOption(String),
    #[error("a username was given without a password")]
    MissingSecret,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with status {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has no string at {0}")]
    MissingContent(&'static str),
    #[error("could not parse table content: {0}")]
    Csv(#[from] csv::Error),
    #[error("table content has no header row")]
    EmptyTable,
    #[error("table row {row} has {found} fields, the header has {expected}")]
    TooManyFields {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("could not write spreadsheet: {0}")]
    Spreadsheet(String),
    #[error("could not draw plot: {0}")]
    Plot(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// exit status of the process when the run ends with this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MalformedOption(_) | Error::MissingSecret => EXIT_MALFORMED,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The username and password pair sent with every authenticated request
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// min and max of a slice, None when the slice is empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}
