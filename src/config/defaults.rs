//! Default configuration values

/// Container image for generated jobs
pub const DEFAULT_IMAGE: &str = "cimg/base:stable";

/// Resource tier for generated jobs
pub const DEFAULT_RESOURCE_CLASS: &str = "medium";

/// Prefix prepended to package job names
pub const DEFAULT_JOB_PREFIX: &str = "build-";

/// Name of the generated workflow
pub const DEFAULT_WORKFLOW_NAME: &str = "build-all";

/// Name of the optional integration job
pub const DEFAULT_INTEGRATION_JOB: &str = "integration-test";

/// Orchestrator configuration format version
pub const PIPELINE_VERSION: f64 = 2.1;

/// Where `generate` writes when no output is given
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/continuation-config.yml";

/// Template file looked up in the config directory
pub const TEMPLATE_FILE_NAME: &str = "template.toml";

/// Bootstrap step installing Nix in a stock image
pub const NIX_INSTALL_COMMAND: &str = r#"curl --proto '=https' --tlsv1.2 -sSf -L https://install.determinate.systems/nix | sh -s -- install linux \
  --extra-conf "experimental-features = nix-command flakes" \
  --no-confirm \
  --init none \
  --no-start-daemon
echo '. /nix/var/nix/profiles/default/etc/profile.d/nix-daemon.sh' >> $BASH_ENV"#;

/// Build command pattern
pub const DEFAULT_BUILD_COMMAND: &str = r#". /nix/var/nix/profiles/default/etc/profile.d/nix-daemon.sh
nix build .#{package} -L
ls -la result*"#;

/// Command of the default integration step
pub const DEFAULT_INTEGRATION_COMMAND: &str = r#". /nix/var/nix/profiles/default/etc/profile.d/nix-daemon.sh
nix build .#default -L"#;
