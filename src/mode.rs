//! The three things a run can do, picked from the positional arguments.

use crate::log::{fields_from_pairs, fields_of, record};
use crate::options::{parse_options, OptionSet};
use crate::plot::{plot_series, show};
use crate::request::{Config, Dispatcher, Params, Transport};
use crate::table::{NumericSeries, Table};
use crate::{Credentials, Error, Result, CONTENT_PATH, ENDPOINT_LOGINCHECK, ENDPOINT_TABLE, ENDPOINT_WHOAMI};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::Level;

/// The positional arguments of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub credentials: Option<Credentials>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    WhoAmI,
    LoginCheck(Credentials),
    Table(Credentials, OptionSet),
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Identity(Value),
    Login(Value),
    Table(Saved),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub table: Table,
    pub series: NumericSeries,
    pub xlsx: PathBuf,
    /// None when the plot was skipped or could not be drawn
    pub svg: Option<PathBuf>,
}

impl Invocation {
    /// a username needs a password, options need both
    pub fn new(
        username: Option<String>,
        password: Option<String>,
        options: Vec<String>,
    ) -> Result<Invocation> {
        let credentials = match (username, password) {
            (Some(u), Some(p)) => Some(Credentials::new(u, p)),
            (None, None) if options.is_empty() => None,
            _ => return Err(Error::MissingSecret),
        };
        Ok(Invocation {
            credentials,
            options,
        })
    }

    /// Options are parsed here, so a malformed one ends the run before any request.
    pub fn mode(&self) -> Result<Mode> {
        let credentials = match &self.credentials {
            None => return Ok(Mode::WhoAmI),
            Some(c) => c.clone(),
        };
        if self.options.is_empty() {
            return Ok(Mode::LoginCheck(credentials));
        }
        let options = parse_options(&self.options)?;
        Ok(Mode::Table(credentials, options))
    }
}

/// username, password and language, in this order
pub fn authenticated_params(credentials: &Credentials, language: &str) -> Params {
    let mut params = Params::with_capacity(3);
    params.insert("username".to_string(), credentials.username.clone());
    params.insert("password".to_string(), credentials.password.clone());
    params.insert("language".to_string(), language.to_string());
    params
}

/// the raw csv held by the response envelope
pub fn content_of(response: &Value) -> Result<&str> {
    CONTENT_PATH
        .iter()
        .try_fold(response, |v, key| v.get(key))
        .and_then(Value::as_str)
        .ok_or(Error::MissingContent("Object.Content"))
}

pub fn run<T: Transport>(mode: Mode, config: &Config, dispatcher: &Dispatcher<T>) -> Result<Outcome> {
    match mode {
        Mode::WhoAmI => {
            let response = dispatcher.get_json(ENDPOINT_WHOAMI, &Params::new())?;
            record(Level::INFO, "WhoAmI result:", &fields_of(&response));
            Ok(Outcome::Identity(response))
        }
        Mode::LoginCheck(credentials) => {
            let params = authenticated_params(&credentials, &config.language);
            let response = dispatcher.get_json(ENDPOINT_LOGINCHECK, &params)?;
            record(Level::INFO, "Login test result:", &fields_of(&response));
            Ok(Outcome::Login(response))
        }
        Mode::Table(credentials, options) => {
            fetch_table(&credentials, options, config, dispatcher).map(Outcome::Table)
        }
    }
}

fn fetch_table<T: Transport>(
    credentials: &Credentials,
    options: OptionSet,
    config: &Config,
    dispatcher: &Dispatcher<T>,
) -> Result<Saved> {
    record(
        Level::INFO,
        &format!(
            "User: {} calling {} API endpoint with options:",
            credentials.username, ENDPOINT_TABLE
        ),
        &fields_from_pairs(&options),
    );
    let mut params = authenticated_params(credentials, &config.language);
    params.extend(options);
    let response = dispatcher.get_json(ENDPOINT_TABLE, &params)?;
    tracing::debug!("Data loaded successfully!");
    record(Level::DEBUG, "Data response:", &fields_of(&response));

    let table = Table::from_csv_str(content_of(&response)?)?;
    tracing::debug!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        kinds = ?table.column_kinds(),
        "Table created successfully\n{}",
        table
    );

    table.to_xlsx(&config.xlsx)?;
    tracing::info!("Data saved to {}", config.xlsx.display());

    let series = table.numeric_series(0);
    tracing::debug!(numeric_data = ?series.values(), "Numeric data extracted");
    let svg = match &config.svg {
        Some(fout) => render_plot(&series, fout, config.show),
        None => None,
    };
    Ok(Saved {
        table,
        series,
        xlsx: config.xlsx.clone(),
        svg,
    })
}

/// the spreadsheet is already saved, so plot problems only warn
fn render_plot(series: &NumericSeries, fout: &Path, open_viewer: bool) -> Option<PathBuf> {
    if series.is_empty() {
        tracing::warn!(column = %series.name, "no numeric values in the first column, skipping the plot");
        return None;
    }
    if let Err(e) = plot_series(series, fout) {
        tracing::warn!("{}", e);
        return None;
    }
    tracing::info!("Plot saved to {}", fout.display());
    if open_viewer {
        if let Err(e) = show(fout) {
            tracing::warn!("could not open {}: {}", fout.display(), e);
        }
    }
    Some(fout.to_path_buf())
}
