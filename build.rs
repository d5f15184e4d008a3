#[path = "build/resolve.rs"]
#[allow(dead_code, reason = "shared with the unit tests")]
mod resolve;

use std::env;

use crate::resolve::ConfigError;
use crate::resolve::Inputs;
use crate::resolve::Resolved;

fn var(name: &str) -> Option<String> {
  env::var(name).ok()
}

fn list(name: &str, separator: char) -> Vec<String> {
  var(name)
    .map(|value| {
      value
        .split(separator)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
    })
    .unwrap_or_default()
}

fn inputs() -> Inputs {
  Inputs {
    target_arch: var("CARGO_CFG_TARGET_ARCH").unwrap_or_default(),
    target_env: var("CARGO_CFG_TARGET_ENV").unwrap_or_default(),
    target_features: list("CARGO_CFG_TARGET_FEATURE", ','),
    rustflags: list("CARGO_ENCODED_RUSTFLAGS", '\x1f'),
    base_simd: var(resolve::ENV_BASE_SIMD),
    extended_simd: var(resolve::ENV_EXTENDED_SIMD),
  }
}

fn main() {
  println!("cargo::rerun-if-changed=build.rs");
  println!("cargo::rerun-if-changed=build/resolve.rs");
  println!("cargo::rerun-if-env-changed={}", resolve::ENV_BASE_SIMD);
  println!("cargo::rerun-if-env-changed={}", resolve::ENV_EXTENDED_SIMD);

  for cfg in resolve::CFGS {
    println!("cargo::rustc-check-cfg=cfg({cfg})");
  }

  let inputs: Inputs = inputs();

  for (name, value) in [
    (resolve::ENV_BASE_SIMD, &inputs.base_simd),
    (resolve::ENV_EXTENDED_SIMD, &inputs.extended_simd),
  ] {
    if let Some(value) = value.as_deref().filter(|value| !value.trim().is_empty()) {
      println!("cargo::warning=SIMD override in effect: {name}={value}");
    }
  }

  let resolved: Resolved = match resolve::resolve(&inputs) {
    Ok(resolved) => resolved,
    Err(error) => fail(&error),
  };

  for cfg in resolved.cfgs() {
    println!("cargo::rustc-cfg={cfg}");
  }
}

fn fail(error: &ConfigError) -> ! {
  panic!("{error}");
}
