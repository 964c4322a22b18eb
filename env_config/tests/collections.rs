//! Collection and byte-sequence fields loaded through the derive.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use env_config::{EnvConfig, ListPolicy, LoadError, Loader};
use rstest::rstest;

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Lists {
    #[env("NAMES")]
    names: Vec<String>,
    #[env("PORTS")]
    ports: Vec<i32>,
    #[env("FLAGS;delimiter=|")]
    flags: Vec<bool>,
    #[env("WAITS;delimiter=\\s")]
    waits: Vec<Duration>,
    #[env("ZONES;default=eu,us")]
    zones: Vec<String>,
    #[env("RATIOS;default=0.5:1.5;delimiter=:")]
    ratios: Vec<f64>,
    #[env("PAYLOAD")]
    payload: Vec<u8>,
}

fn load(vars: &[(&str, &str)], policy: ListPolicy) -> Result<Lists, LoadError> {
    let env: HashMap<&str, &str> = vars.iter().copied().collect();
    let mut lists = Lists::default();
    Loader::new()
        .with_env(&env)
        .list_policy(policy)
        .load(&mut lists)?;
    Ok(lists)
}

#[rstest]
fn splits_on_configured_delimiters() -> Result<()> {
    let lists = load(
        &[
            ("NAMES", "a,b,c"),
            ("PORTS", "80,443"),
            ("FLAGS", "true|0|T"),
            ("WAITS", "1s 250ms"),
            ("PAYLOAD", "raw bytes"),
        ],
        ListPolicy::Lenient,
    )?;
    ensure!(lists.names == ["a", "b", "c"]);
    ensure!(lists.ports == [80, 443]);
    ensure!(lists.flags == [true, false, true]);
    ensure!(lists.waits == [Duration::from_secs(1), Duration::from_millis(250)]);
    ensure!(lists.payload == b"raw bytes");
    Ok(())
}

#[rstest]
fn defaults_are_split_after_substitution() -> Result<()> {
    let lists = load(&[], ListPolicy::Lenient)?;
    ensure!(lists.zones == ["eu", "us"]);
    ensure!(lists.ratios == [0.5, 1.5]);
    ensure!(lists.names.is_empty());
    Ok(())
}

#[rstest]
fn explicit_value_overrides_default() -> Result<()> {
    let lists = load(&[("ZONES", "ap")], ListPolicy::Lenient)?;
    ensure!(lists.zones == ["ap"]);
    Ok(())
}

#[rstest]
#[case::middle("1,x,3", vec![1, 0, 3])]
#[case::trailing_delimiter("1,2,", vec![1, 2, 0])]
#[case::padded(" 1,2", vec![0, 2])]
fn lenient_policy_zeroes_bad_elements(#[case] raw: &str, #[case] expected: Vec<i32>) -> Result<()> {
    let lists = load(&[("PORTS", raw)], ListPolicy::Lenient)?;
    ensure!(lists.ports == expected, "got {:?}", lists.ports);
    Ok(())
}

#[rstest]
fn strict_policy_reports_the_failing_element() -> Result<()> {
    let Err(err) = load(&[("PORTS", "1,x,3")], ListPolicy::Strict) else {
        return Err(anyhow!("expected strict parsing to fail"));
    };
    let LoadError::Element {
        key, index, value, ..
    } = &err
    else {
        return Err(anyhow!("unexpected error {err}"));
    };
    ensure!(key == "PORTS");
    ensure!(*index == 1);
    ensure!(value == "x");
    Ok(())
}

#[rstest]
fn strings_are_not_trimmed() -> Result<()> {
    let lists = load(&[("NAMES", " a , b ")], ListPolicy::Lenient)?;
    ensure!(lists.names == [" a ", " b "]);
    Ok(())
}

#[rstest]
fn empty_value_keeps_existing_list() -> Result<()> {
    let env: HashMap<&str, &str> = HashMap::new();
    let mut lists = Lists {
        names: vec!["kept".to_owned()],
        ..Lists::default()
    };
    Loader::new().with_env(&env).load(&mut lists)?;
    ensure!(lists.names == ["kept"]);
    Ok(())
}

#[derive(Debug, Default, EnvConfig)]
struct Padded {
    #[env("PORT; default=8080 ")]
    port: u16,
    #[env("BACKENDS; default=8080 ;delimiter=, ")]
    backends: Vec<u16>,
    #[env(" HOSTS ; default= a|b ; delimiter= | ")]
    hosts: Vec<String>,
}

#[rstest]
fn padded_annotations_are_trimmed() -> Result<()> {
    let env: HashMap<&str, &str> = HashMap::new();
    let mut padded = Padded::default();
    Loader::new().with_env(&env).load(&mut padded)?;
    ensure!(padded.port == 8080, "got {}", padded.port);
    ensure!(padded.backends == [8080], "got {:?}", padded.backends);
    ensure!(padded.hosts == ["a", "b"], "got {:?}", padded.hosts);
    Ok(())
}
