use super::VERSION;
use crate::mode::Invocation;
use crate::request::Config;
use crate::{Result, BASE_URL, DEFAULT_SVG, DEFAULT_XLSX, LANGUAGE};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

/// Everything a run needs from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub invocation: Invocation,
    pub config: Config,
    pub verbose: bool,
}

pub fn app() -> App<'static, 'static> {
    let arg_username = Arg::with_name("username")
        .help("GENESIS username, without it only the whoami endpoint is called")
        .index(1)
        .requires("password");
    let arg_password = Arg::with_name("password")
        .help("GENESIS password, without options only the login is checked")
        .index(2);
    let arg_options = Arg::with_name("options")
        .help("key=value options for the data/table endpoint, e.g. name=12411-0001")
        .index(3)
        .multiple(true);
    let arg_xlsx = Arg::with_name("xlsx")
        .help("name of the output xlsx file")
        .short("o")
        .long("xlsx")
        .takes_value(true)
        .default_value(DEFAULT_XLSX);
    let arg_svg = Arg::with_name("svg")
        .help("name of the output svg file with the plot of the first column")
        .short("p")
        .long("svg")
        .takes_value(true)
        .default_value(DEFAULT_SVG);
    let arg_no_plot = Arg::with_name("no_plot")
        .help("do not plot the first column")
        .long("no-plot")
        .conflicts_with("show");
    let arg_show = Arg::with_name("show")
        .help("open the plot with the default viewer")
        .long("show");
    let arg_base_url = Arg::with_name("base_url")
        .help("address of the GENESIS web service")
        .long("base-url")
        .takes_value(true)
        .default_value(BASE_URL);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    App::new("genesis")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to fetch a GENESIS table, save it to xlsx, and plot its first column")
        .arg(arg_username)
        .arg(arg_password)
        .arg(arg_options)
        .arg(arg_xlsx)
        .arg(arg_svg)
        .arg(arg_no_plot)
        .arg(arg_show)
        .arg(arg_base_url)
        .arg(arg_verbose)
}

pub fn cli_from_matches(cli_args: &ArgMatches) -> Result<Cli> {
    let username = cli_args.value_of("username").map(String::from);
    let password = cli_args.value_of("password").map(String::from);
    let options: Vec<String> = cli_args
        .values_of("options")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();
    let invocation = Invocation::new(username, password, options)?;
    let svg = if cli_args.is_present("no_plot") {
        None
    } else {
        Some(PathBuf::from(cli_args.value_of("svg").unwrap_or(DEFAULT_SVG)))
    };
    let config = Config {
        base_url: String::from(cli_args.value_of("base_url").unwrap_or(BASE_URL)),
        language: String::from(LANGUAGE),
        xlsx: PathBuf::from(cli_args.value_of("xlsx").unwrap_or(DEFAULT_XLSX)),
        svg,
        show: cli_args.is_present("show"),
    };
    Ok(Cli {
        invocation,
        config,
        verbose: cli_args.is_present("verbose"),
    })
}

/// Takes the CLI arguments of the process, exits on usage errors.
pub fn parse_cli() -> Result<Cli> {
    cli_from_matches(&app().get_matches())
}
