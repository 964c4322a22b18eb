//! Key prefixing across nested, boxed and optional records.

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use env_config::{EnvConfig, LoadError, Loader};
use rstest::rstest;

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Credentials {
    #[env("USER;default=guest")]
    user: String,
    #[env("PASS")]
    pass: String,
}

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Database {
    #[env("HOST;default=localhost")]
    host: String,
    #[env("PORT;default=5432")]
    port: u16,
    #[env("AUTH")]
    auth: Box<Credentials>,
}

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Service {
    #[env("NAME")]
    name: String,
    #[env("PRIMARY")]
    primary: Database,
    #[env("REPLICA")]
    replica: Option<Database>,
    #[env("  PADDED  ")]
    padded: String,
}

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[rstest]
#[case::bare("SVC")]
#[case::with_separator("SVC_")]
fn prefixes_every_level(#[case] prefix: &str) -> Result<()> {
    let env = env(&[
        ("SVC_NAME", "orders"),
        ("SVC_PRIMARY_HOST", "db-1"),
        ("SVC_PRIMARY_AUTH_USER", "admin"),
        ("SVC_PRIMARY_AUTH_PASS", "hunter2"),
        ("SVC_REPLICA_PORT", "6432"),
        ("SVC_PADDED", "trimmed key"),
    ]);
    let mut service = Service::default();
    Loader::new()
        .with_env(&env)
        .with_prefix(prefix)
        .load(&mut service)?;

    let expected = Service {
        name: "orders".to_owned(),
        primary: Database {
            host: "db-1".to_owned(),
            port: 5432,
            auth: Box::new(Credentials {
                user: "admin".to_owned(),
                pass: "hunter2".to_owned(),
            }),
        },
        replica: Some(Database {
            host: "localhost".to_owned(),
            port: 6432,
            auth: Box::new(Credentials {
                user: "guest".to_owned(),
                pass: String::new(),
            }),
        }),
        padded: "trimmed key".to_owned(),
    };
    ensure!(service == expected, "got {service:?}");
    Ok(())
}

#[rstest]
fn existing_optional_record_is_reused() -> Result<()> {
    let env = env(&[("REPLICA_HOST", "db-2")]);
    let mut service = Service {
        replica: Some(Database {
            port: 7000,
            ..Database::default()
        }),
        ..Service::default()
    };
    Loader::new().with_env(&env).load(&mut service)?;
    let replica = service.replica.unwrap_or_default();
    ensure!(replica.host == "db-2");
    ensure!(replica.port == 5432, "default applies to an unset key");
    Ok(())
}

#[rstest]
fn scalar_root_is_rejected_without_writes() -> Result<()> {
    let env = env(&[("VALUE", "1")]);
    let mut value = 7_u32;
    let err = Loader::new().with_env(&env).load(&mut value);
    ensure!(
        matches!(err, Err(LoadError::NotAStruct { type_name: "u32" })),
        "unexpected result {err:?}"
    );
    ensure!(value == 7);

    let mut optional: Option<String> = None;
    let err = Loader::new().with_env(&env).load(&mut optional);
    ensure!(matches!(err, Err(LoadError::NotAStruct { .. })));
    ensure!(optional.is_none(), "non-record roots are not allocated");
    Ok(())
}

#[rstest]
fn error_display_names_the_key() -> Result<()> {
    let env = env(&[("PRIMARY_PORT", "99999")]);
    let mut service = Service::default();
    let Err(err) = Loader::new().with_env(&env).load(&mut service) else {
        anyhow::bail!("port out of range should fail");
    };
    ensure!(err.key() == Some("PRIMARY_PORT"));
    let message = err.to_string();
    ensure!(
        message.starts_with("failed to parse PRIMARY_PORT=\"99999\" as u16"),
        "unexpected message {message}"
    );
    Ok(())
}
