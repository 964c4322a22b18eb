use std::collections::HashMap;

use env_config::{EnvConfig, Loader};

/// Verifies that `#[env_config(crate = "env_config")]` is accepted. Uses the
/// real crate name so no workspace reconfiguration is needed.
#[derive(Debug, Default, EnvConfig)]
#[env_config(crate = "env_config")]
struct CratePathConfig {
    #[env("VALUE;default=hello")]
    value: String,
    #[env("COUNT")]
    count: u32,
}

fn main() {
    let env = HashMap::from([("COUNT", "1")]);
    let mut cfg = CratePathConfig::default();
    let result = Loader::new().with_env(&env).load(&mut cfg);
    let _: env_config::LoadResult<()> = result;
}
