use genesis_lpp::mode::{run, Invocation, Outcome};
use genesis_lpp::request::{Config, Dispatcher, Reply, Transport};
use genesis_lpp::{Error, Result};
use serde_json::json;
use std::cell::RefCell;
use std::path::Path;

const BASE: &str = "http://genesis.test/rest/2020";

/// answers every GET with the same reply and remembers the addresses
struct Recording {
    reply: Reply,
    urls: RefCell<Vec<String>>,
}

impl Recording {
    fn new(status: u16, body: String) -> Recording {
        Recording {
            reply: Reply { status, body },
            urls: RefCell::new(Vec::new()),
        }
    }

    fn json(value: serde_json::Value) -> Recording {
        Recording::new(200, value.to_string())
    }
}

impl Transport for Recording {
    fn get(&self, url: &str) -> Result<Reply> {
        self.urls.borrow_mut().push(url.to_string());
        Ok(self.reply.clone())
    }
}

fn config_in(dir: &Path) -> Config {
    Config {
        base_url: BASE.to_string(),
        xlsx: dir.join("data.xlsx"),
        svg: None,
        ..Config::default()
    }
}

/// positional arguments through mode selection and the run, like the binary does
fn execute(args: &[&str], config: &Config, transport: Recording) -> (Result<Outcome>, Vec<String>) {
    let dispatcher = Dispatcher::new(config, transport);
    let mut args = args.iter().map(|s| s.to_string());
    let username = args.next();
    let password = args.next();
    let result = Invocation::new(username, password, args.collect())
        .and_then(|invocation| invocation.mode())
        .and_then(|mode| run(mode, config, &dispatcher));
    let urls = dispatcher.transport().urls.borrow().clone();
    (result, urls)
}

fn table_response(content: &str) -> Recording {
    Recording::json(json!({
        "Ident": {"Service": "data", "Method": "table"},
        "Status": {"Code": 0, "Content": "erfolgreich"},
        "Object": {"Content": content},
    }))
}

#[test]
fn no_credentials_calls_whoami_without_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = Recording::json(json!({"User": "GAST", "Language": "de"}));
    let (result, urls) = execute(&[], &config, transport);
    match result.unwrap() {
        Outcome::Identity(value) => assert_eq!(value["User"], "GAST"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(urls, vec![format!("{}/helloworld/whoami?", BASE)]);
}

#[test]
fn credentials_without_options_only_check_the_login() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = Recording::json(json!({"Status": "Sie wurden erfolgreich an- und abgemeldet!"}));
    let (result, urls) = execute(&["user", "secret"], &config, transport);
    assert!(matches!(result.unwrap(), Outcome::Login(_)));
    assert_eq!(
        urls,
        vec![format!(
            "{}/helloworld/logincheck?username=user&password=secret&language=de",
            BASE
        )]
    );
    assert!(!config.xlsx.exists());
}

#[test]
fn table_is_saved_with_index_and_first_column_series() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = table_response("a;b\n1;2\n3;x\n");
    let (result, urls) = execute(&["user", "secret", "name=12411-0001"], &config, transport);
    let saved = match result.unwrap() {
        Outcome::Table(saved) => saved,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(
        urls,
        vec![format!(
            "{}/data/table?username=user&password=secret&language=de&name=12411-0001",
            BASE
        )]
    );
    assert_eq!(saved.table.n_columns(), 2);
    assert_eq!(saved.table.n_rows(), 2);
    assert_eq!(saved.series.name, "a");
    assert_eq!(saved.series.values(), vec![1., 3.]);
    assert_eq!(saved.svg, None);

    let book = umya_spreadsheet::reader::xlsx::read(&config.xlsx).unwrap();
    let sheet = book.get_sheet_by_name("Sheet1").unwrap();
    assert_eq!(sheet.get_value("B1"), "a");
    assert_eq!(sheet.get_value("C1"), "b");
    assert_eq!(sheet.get_value("A3"), "1");
    assert_eq!(sheet.get_value("C3"), "x");
}

#[test]
fn options_follow_fixed_fields_and_may_shadow_them() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = table_response("a\n1\n");
    let (result, urls) = execute(
        &["user", "secret", "name=1", "language=en", "name=2"],
        &config,
        transport,
    );
    assert!(result.is_ok());
    assert_eq!(
        urls,
        vec![format!(
            "{}/data/table?username=user&password=secret&language=en&name=2",
            BASE
        )]
    );
}

#[test]
fn malformed_option_issues_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = table_response("a\n1\n");
    let (result, urls) = execute(&["user", "secret", "name=1", "area"], &config, transport);
    match result {
        Err(e @ Error::MalformedOption(_)) => {
            assert_eq!(e.exit_code(), 1);
            assert!(e.to_string().contains("area"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(urls.is_empty());
    assert!(!config.xlsx.exists());
}

#[test]
fn missing_content_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = Recording::json(json!({"Status": {"Code": 104}, "Object": null}));
    let (result, urls) = execute(&["user", "secret", "name=1"], &config, transport);
    assert!(matches!(result, Err(Error::MissingContent(_))));
    assert_eq!(urls.len(), 1);
    assert!(!config.xlsx.exists());
}

#[test]
fn error_status_is_not_retried_and_writes_nothing() {
    for args in [
        vec![],
        vec!["user", "secret"],
        vec!["user", "secret", "name=12411-0001"],
    ] {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let transport = Recording::new(503, "Service Unavailable".to_string());
        let (result, urls) = execute(&args, &config, transport);
        match result {
            Err(e @ Error::Remote { .. }) => assert_eq!(e.exit_code(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(urls.len(), 1);
        assert!(!config.xlsx.exists());
    }
}

#[test]
fn first_column_without_numbers_skips_the_plot() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        svg: Some(dir.path().join("data.svg")),
        ..config_in(dir.path())
    };
    let transport = table_response("region;value\nBerlin;1\nBayern;2\n");
    let (result, _) = execute(&["user", "secret", "name=1"], &config, transport);
    match result.unwrap() {
        Outcome::Table(saved) => {
            assert!(saved.series.is_empty());
            assert_eq!(saved.svg, None);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(config.xlsx.exists());
    assert!(!dir.path().join("data.svg").exists());
}

#[test]
fn plot_problems_do_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        svg: Some(dir.path().join("data.svg")),
        ..config_in(dir.path())
    };
    let transport = table_response("a;b\n1;2\n3;x\n4;5\n");
    let (result, _) = execute(&["user", "secret", "name=1"], &config, transport);
    match result.unwrap() {
        Outcome::Table(saved) => {
            if let Some(svg) = saved.svg {
                assert!(svg.exists());
            }
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(config.xlsx.exists());
}

#[test]
fn infinite_cells_are_saved_but_not_plotted() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        svg: Some(dir.path().join("data.svg")),
        ..config_in(dir.path())
    };
    let transport = table_response("a\n1\ninf\n3\n");
    let (result, _) = execute(&["user", "secret", "name=1"], &config, transport);
    match result.unwrap() {
        Outcome::Table(saved) => {
            assert_eq!(saved.table.n_rows(), 3);
            assert_eq!(saved.series.values(), vec![1., 3.]);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(config.xlsx.exists());
}

#[test]
fn short_rows_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let transport = table_response("a;b\n1;2\n3\n");
    let (result, _) = execute(&["user", "secret", "name=1"], &config, transport);
    match result.unwrap() {
        Outcome::Table(saved) => {
            assert_eq!(saved.table.n_rows(), 2);
            assert_eq!(saved.series.values(), vec![1., 3.]);
        }
        other => panic!("unexpected {:?}", other),
    }
}
