//! Build-time capability resolution.
//!
//! Shared between `build.rs` and the crate's unit tests. Everything here is a
//! pure function of [`Inputs`]; reading the environment is left to the caller.

use std::ffi::OsStr;
use std::path::Path;

use thiserror::Error;

/// Override for the base SIMD tier (SSE2).
pub const ENV_BASE_SIMD: &str = "SWISS_BASE_SIMD";

/// Override for the extended SIMD tier (SSSE3).
pub const ENV_EXTENDED_SIMD: &str = "SWISS_EXTENDED_SIMD";

pub const CFG_COMPILER_CLANG: &str = "swiss_compiler_clang";
pub const CFG_COMPILER_GCCISH: &str = "swiss_compiler_gccish";
pub const CFG_COMPILER_MSVCISH: &str = "swiss_compiler_msvcish";
pub const CFG_SIMD_BASE: &str = "swiss_simd_base";
pub const CFG_SIMD_EXTENDED: &str = "swiss_simd_extended";
pub const CFG_BUILTIN_EXPECT: &str = "swiss_builtin_expect";
pub const CFG_BUILTIN_PREFETCH: &str = "swiss_builtin_prefetch";
pub const CFG_ATTR_ALWAYS_INLINE: &str = "swiss_attr_always_inline";
pub const CFG_ATTR_NOINLINE: &str = "swiss_attr_noinline";
pub const CFG_ATTR_COLD: &str = "swiss_attr_cold";

/// Every `cfg` the build script may emit.
pub const CFGS: &[&str] = &[
  CFG_COMPILER_CLANG,
  CFG_COMPILER_GCCISH,
  CFG_COMPILER_MSVCISH,
  CFG_SIMD_BASE,
  CFG_SIMD_EXTENDED,
  CFG_BUILTIN_EXPECT,
  CFG_BUILTIN_PREFETCH,
  CFG_ATTR_ALWAYS_INLINE,
  CFG_ATTR_NOINLINE,
  CFG_ATTR_COLD,
];

// -----------------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------------

/// A build configuration that must not produce an artifact.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("invalid value for `{name}`: {value:?} (expected one of 0/1, true/false, on/off, yes/no)")]
  InvalidOverride { name: &'static str, value: String },
  #[error(
    "bad configuration: the extended SIMD tier (SSSE3) implies the base tier (SSE2); \
     set `SWISS_BASE_SIMD=1` or `SWISS_EXTENDED_SIMD=0`"
  )]
  ExtendedWithoutBase,
  #[error("bad configuration: `{name}` forces a SIMD tier on for non-x86 target `{arch}`")]
  UnsupportedArch { name: &'static str, arch: String },
}

// -----------------------------------------------------------------------------
// Inputs
// -----------------------------------------------------------------------------

/// Codegen backend used by rustc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
  Llvm,
  Gcc,
  Unknown,
}

impl Backend {
  /// Detects the backend from the encoded rustc flags.
  ///
  /// No `codegen-backend` flag means the default LLVM backend. Only flags
  /// passed through `RUSTFLAGS` are visible here: a backend selected with the
  /// unstable `codegen-backend` profile setting never reaches build scripts
  /// and is reported as LLVM.
  pub fn from_rustflags<S>(flags: &[S]) -> Self
  where
    S: AsRef<str>,
  {
    flags
      .iter()
      .rev()
      .find_map(|flag| flag.as_ref().split_once("codegen-backend="))
      .map_or(Self::Llvm, |(_, name)| Self::from_name(name))
  }

  /// Classifies a `codegen-backend` value.
  ///
  /// Accepts a bare name (`gcc`) or a path to a backend library
  /// (`/opt/librustc_codegen_gcc.so`); only the file stem is inspected.
  pub fn from_name(name: &str) -> Self {
    let stem: &str = Path::new(name)
      .file_stem()
      .and_then(OsStr::to_str)
      .unwrap_or(name);
    let stem: &str = stem.strip_prefix("lib").unwrap_or(stem);
    let stem: &str = stem.strip_prefix("rustc_codegen_").unwrap_or(stem);

    match stem {
      "llvm" => Self::Llvm,
      "gcc" => Self::Gcc,
      _ => Self::Unknown,
    }
  }
}

/// Ambient build environment as seen by the build script.
#[derive(Clone, Debug, Default)]
pub struct Inputs {
  pub target_arch: String,
  pub target_env: String,
  pub target_features: Vec<String>,
  pub rustflags: Vec<String>,
  pub base_simd: Option<String>,
  pub extended_simd: Option<String>,
}

impl Inputs {
  fn has_feature(&self, name: &str) -> bool {
    self.target_features.iter().any(|feature| feature == name)
  }

  fn is_x86(&self) -> bool {
    matches!(self.target_arch.as_str(), "x86" | "x86_64")
  }
}

// -----------------------------------------------------------------------------
// Resolved Configuration
// -----------------------------------------------------------------------------

/// The fully resolved set of build flags.
#[allow(clippy::struct_excessive_bools, reason = "one field per emitted cfg")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolved {
  pub clang: bool,
  pub gccish: bool,
  pub msvcish: bool,
  pub base_simd: bool,
  pub extended_simd: bool,
  pub builtin_expect: bool,
  pub builtin_prefetch: bool,
  pub attr_always_inline: bool,
  pub attr_noinline: bool,
  pub attr_cold: bool,
}

impl Resolved {
  /// Returns the `cfg` names that are enabled.
  pub fn cfgs(&self) -> Vec<&'static str> {
    let flags: [(bool, &'static str); 10] = [
      (self.clang, CFG_COMPILER_CLANG),
      (self.gccish, CFG_COMPILER_GCCISH),
      (self.msvcish, CFG_COMPILER_MSVCISH),
      (self.base_simd, CFG_SIMD_BASE),
      (self.extended_simd, CFG_SIMD_EXTENDED),
      (self.builtin_expect, CFG_BUILTIN_EXPECT),
      (self.builtin_prefetch, CFG_BUILTIN_PREFETCH),
      (self.attr_always_inline, CFG_ATTR_ALWAYS_INLINE),
      (self.attr_noinline, CFG_ATTR_NOINLINE),
      (self.attr_cold, CFG_ATTR_COLD),
    ];

    flags
      .into_iter()
      .filter_map(|(enabled, name)| enabled.then_some(name))
      .collect()
  }
}

/// Parses a boolean override value.
///
/// Unset and empty values mean "no override".
pub fn parse_override(name: &'static str, value: Option<&str>) -> Result<Option<bool>, ConfigError> {
  let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
    return Ok(None);
  };

  match value.to_ascii_lowercase().as_str() {
    "1" | "true" | "on" | "yes" => Ok(Some(true)),
    "0" | "false" | "off" | "no" => Ok(Some(false)),
    _ => Err(ConfigError::InvalidOverride {
      name,
      value: value.to_owned(),
    }),
  }
}

fn resolve_tier(
  inputs: &Inputs,
  name: &'static str,
  value: Option<&str>,
  feature: &str,
) -> Result<bool, ConfigError> {
  match parse_override(name, value)? {
    Some(true) if !inputs.is_x86() => Err(ConfigError::UnsupportedArch {
      name,
      arch: inputs.target_arch.clone(),
    }),
    Some(forced) => Ok(forced),
    None => Ok(inputs.is_x86() && inputs.has_feature(feature)),
  }
}

/// Resolves every build flag from the given environment.
pub fn resolve(inputs: &Inputs) -> Result<Resolved, ConfigError> {
  let backend: Backend = Backend::from_rustflags(&inputs.rustflags);
  let known: bool = backend != Backend::Unknown;
  let msvc_env: bool = inputs.target_env == "msvc";

  let base_simd: bool = resolve_tier(inputs, ENV_BASE_SIMD, inputs.base_simd.as_deref(), "sse2")?;
  let extended_simd: bool = resolve_tier(
    inputs,
    ENV_EXTENDED_SIMD,
    inputs.extended_simd.as_deref(),
    "ssse3",
  )?;

  if extended_simd && !base_simd {
    return Err(ConfigError::ExtendedWithoutBase);
  }

  let prefetch_arch: bool = match inputs.target_arch.as_str() {
    "x86" | "x86_64" => inputs.has_feature("sse"),
    "aarch64" => true,
    _ => false,
  };

  Ok(Resolved {
    clang: backend == Backend::Llvm,
    gccish: backend == Backend::Gcc || (backend == Backend::Llvm && !msvc_env),
    msvcish: known && msvc_env,
    base_simd,
    extended_simd,
    builtin_expect: known,
    builtin_prefetch: known && prefetch_arch,
    attr_always_inline: known,
    attr_noinline: known,
    attr_cold: known,
  })
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
