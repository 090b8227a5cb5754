//! コマンドライン解析のテスト

use clap::Parser;
use clomonitor::cli::{parse_filter, Cli, Commands};
use clomonitor_common::{ConfiguredTheme, FilterKind, Prefs, SortBy, SortDirection};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("clomonitor").chain(args.iter().copied()))
        .expect("引数の解析に失敗")
}

#[test]
fn test_search_to_query() {
    let cli = parse(&[
        "search",
        "envoy proxy",
        "-f",
        "maturity=graduated",
        "--filter",
        "maturity=incubating",
        "-f",
        "rating=a",
        "--accepted-from",
        "2020-01-01",
        "--page",
        "2",
    ]);
    let Commands::Search(args) = cli.command else {
        panic!("search コマンドではない");
    };

    let query = args.to_query(&Prefs::default()).unwrap();
    assert_eq!(query.limit, 20);
    assert_eq!(query.offset(), 20);
    assert_eq!(query.sort_by, SortBy::Name);
    assert_eq!(query.sort_direction, SortDirection::Asc);
    assert_eq!(
        clomonitor_common::prepare_query_string(&query.filters),
        "?maturity=graduated&maturity=incubating&rating=a&accepted_from=2020-01-01&text=envoy+proxy&page=2"
    );
}

#[test]
fn test_search_overrides_prefs() {
    let cli = parse(&["search", "--limit", "60", "--sort-by", "score", "--sort-direction", "desc"]);
    let Commands::Search(args) = cli.command else {
        panic!("search コマンドではない");
    };

    let query = args.to_query(&Prefs::default()).unwrap();
    assert_eq!(query.limit, 60);
    assert_eq!(query.sort_by, SortBy::Score);
    assert_eq!(query.sort_direction, SortDirection::Desc);
    assert_eq!(query.filters.page_number, 1);
    assert_eq!(query.filters.text, None);
}

#[test]
fn test_duplicate_filter_values_collapsed() {
    let cli = parse(&["search", "-f", "rating=a", "-f", "rating=a"]);
    let Commands::Search(args) = cli.command else {
        panic!("search コマンドではない");
    };
    let filters = args.to_filters().unwrap();
    assert_eq!(filters.filters.get("rating"), Some(&["a".to_string()][..]));
}

#[test]
fn test_parse_filter() {
    assert_eq!(parse_filter("foundation=cncf"), Ok((FilterKind::Foundation, "cncf".to_string())));
    assert_eq!(
        parse_filter("passing_check=readme"),
        Ok((FilterKind::PassingCheck, "readme".to_string()))
    );
    assert!(parse_filter("maturity").is_err());
    assert!(parse_filter("category=0").is_err());
    assert!(parse_filter("rating=z").is_err());
}

#[test]
fn test_unknown_filter_rejected_by_clap() {
    let result = Cli::try_parse_from(["clomonitor", "search", "-f", "stars=5"]);
    assert!(result.is_err());
}

#[test]
fn test_prefs_command() {
    let cli = parse(&["prefs", "--limit", "40", "--theme", "auto", "--verbose"]);
    assert!(cli.verbose);
    let Commands::Prefs { limit, theme, sort_by, interactive, .. } = cli.command else {
        panic!("prefs コマンドではない");
    };
    assert_eq!(limit, Some(40));
    assert_eq!(theme, Some(ConfiguredTheme::Automatic));
    assert_eq!(sort_by, None);
    assert!(!interactive);
}

#[test]
fn test_project_and_stats_commands() {
    let cli = parse(&["project", "cncf", "artifact-hub", "--snapshot", "2022-10-28"]);
    let Commands::Project { foundation, name, snapshot, json } = cli.command else {
        panic!("project コマンドではない");
    };
    assert_eq!((foundation.as_str(), name.as_str()), ("cncf", "artifact-hub"));
    assert_eq!(snapshot.as_deref(), Some("2022-10-28"));
    assert!(!json);

    let cli = parse(&["--api-url", "http://localhost:8000", "stats", "--foundation", "lfaidata"]);
    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000"));
    assert!(matches!(cli.command, Commands::Stats { foundation: Some(ref f), .. } if f == "lfaidata"));
}
