//! Trybuild fixture verifying `#[env_config(crate = "...")]` works with a
//! dependency renamed via `use ... as`.

use env_config as my_cfg;
use my_cfg::EnvConfig;

#[derive(Debug, Default, EnvConfig)]
#[env_config(crate = "my_cfg")]
struct AliasedConfig {
    #[env("VALUE")]
    value: String,
    #[env("NESTED")]
    nested: Inner,
}

#[derive(Debug, Default, EnvConfig)]
#[env_config(crate = "my_cfg")]
struct Inner {
    #[env("FLAG")]
    flag: bool,
}

fn main() {
    let mut cfg = AliasedConfig::default();
    let result = my_cfg::load_config(&mut cfg);
    let _: my_cfg::LoadResult<()> = result;
}
