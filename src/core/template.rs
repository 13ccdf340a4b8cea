//! Job template configuration
//!
//! The template is the shared part of every generated job: execution
//! environment, bootstrap steps and the build command pattern. Package
//! specific values are filled in through the `{package}` and `{job}`
//! placeholders, so swapping the environment never touches graph logic.
//!
//! Templates are TOML files; every field has a default and an empty file
//! yields the built-in template.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::naming;
use crate::error::TemplateError;

/// Placeholder replaced with the raw package name
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Placeholder replaced with the job name
pub const JOB_PLACEHOLDER: &str = "{job}";

/// Full job template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Execution environment shared by all jobs
    pub executor: ExecutorConfig,

    /// Job naming
    pub naming: NamingConfig,

    /// Workflow settings
    pub workflow: WorkflowConfig,

    /// Check out the repository as the first step
    pub checkout: bool,

    /// Environment bootstrap steps run before the build
    pub bootstrap: Vec<RunStep>,

    /// The package build step
    pub build: BuildStepConfig,

    /// Artifact publishing after the build
    pub publish: PublishConfig,

    /// Optional final job depending on every terminal package
    pub integration: Option<IntegrationConfig>,
}

/// Execution environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Container image
    pub image: String,

    /// Resource tier hint
    pub resource_class: String,

    /// Shell used for run steps
    pub shell: Option<String>,
}

/// Job naming settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Prefix prepended to every package job name
    pub prefix: String,
}

/// Workflow settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Name of the generated workflow
    pub name: String,
}

/// The build step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildStepConfig {
    /// Step display name
    pub name: String,

    /// Build command, must contain `{package}`
    pub command: String,

    /// Timeout without output, e.g. `20m`
    pub no_output_timeout: Option<String>,
}

/// Artifact publishing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Emit the publish step
    pub enabled: bool,

    /// Path of the build output
    pub path: String,

    /// Artifact destination
    pub destination: String,
}

/// Final integration job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationConfig {
    /// Job name, used verbatim
    pub name: String,

    /// Resource tier override
    pub resource_class: Option<String>,

    /// Steps run after checkout and bootstrap
    pub steps: Vec<RunStep>,
}

/// A shell command step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunStep {
    /// Step display name
    pub name: String,

    /// Command to run
    pub command: String,

    /// Shell override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Timeout without output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_output_timeout: Option<String>,
}

/// An artifact upload step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactStep {
    /// Path to upload
    pub path: String,

    /// Destination prefix
    pub destination: String,
}

/// A job step as the orchestrator understands it
///
/// `Checkout` serializes as the bare string `checkout`, the others as
/// single-key maps (`run: {...}`, `store_artifacts: {...}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Check out the repository
    Checkout,
    /// Run a command
    Run(RunStep),
    /// Upload build artifacts
    StoreArtifacts(ArtifactStep),
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            executor: ExecutorConfig::default(),
            naming: NamingConfig::default(),
            workflow: WorkflowConfig::default(),
            checkout: true,
            bootstrap: vec![RunStep {
                name: "Install Nix".to_string(),
                command: defaults::NIX_INSTALL_COMMAND.to_string(),
                shell: None,
                no_output_timeout: None,
            }],
            build: BuildStepConfig::default(),
            publish: PublishConfig::default(),
            integration: None,
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            image: defaults::DEFAULT_IMAGE.to_string(),
            resource_class: defaults::DEFAULT_RESOURCE_CLASS.to_string(),
            shell: None,
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: defaults::DEFAULT_JOB_PREFIX.to_string(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            name: defaults::DEFAULT_WORKFLOW_NAME.to_string(),
        }
    }
}

impl Default for BuildStepConfig {
    fn default() -> Self {
        Self {
            name: "Build {package}".to_string(),
            command: defaults::DEFAULT_BUILD_COMMAND.to_string(),
            no_output_timeout: None,
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "result".to_string(),
            destination: "{package}-artifacts".to_string(),
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            name: defaults::DEFAULT_INTEGRATION_JOB.to_string(),
            resource_class: Some("small".to_string()),
            steps: vec![RunStep {
                name: "Run integration tests".to_string(),
                command: defaults::DEFAULT_INTEGRATION_COMMAND.to_string(),
                shell: None,
                no_output_timeout: None,
            }],
        }
    }
}

impl TemplateConfig {
    /// Parse and validate a template from TOML
    pub fn from_toml(content: &str) -> Result<Self, TemplateError> {
        let template: Self = toml::from_str(content).map_err(|e| TemplateError::Parse(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check the template is usable
    pub fn validate(&self) -> Result<(), TemplateError> {
        require_non_empty("executor.image", &self.executor.image)?;
        require_non_empty("executor.resource_class", &self.executor.resource_class)?;
        require_non_empty("workflow.name", &self.workflow.name)?;
        require_non_empty("build.name", &self.build.name)?;
        require_non_empty("build.command", &self.build.command)?;

        if !self.build.command.contains(PACKAGE_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder);
        }

        if !naming::is_valid_job_name(&self.naming.prefix) {
            return Err(TemplateError::InvalidPrefix {
                prefix: self.naming.prefix.clone(),
            });
        }

        for step in &self.bootstrap {
            require_non_empty("bootstrap.name", &step.name)?;
            require_non_empty("bootstrap.command", &step.command)?;
        }

        if self.publish.enabled {
            require_non_empty("publish.path", &self.publish.path)?;
            require_non_empty("publish.destination", &self.publish.destination)?;
        }

        if let Some(integration) = &self.integration {
            require_non_empty("integration.name", &integration.name)?;
            if !naming::is_valid_job_name(&integration.name) {
                return Err(TemplateError::InvalidJobName {
                    name: integration.name.clone(),
                });
            }
            if integration.steps.is_empty() {
                return Err(TemplateError::EmptyField {
                    field: "integration.steps".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Name of the integration job, if one is configured
    pub fn integration_job_name(&self) -> Option<&str> {
        self.integration.as_ref().map(|i| i.name.as_str())
    }

    /// Steps of the job building `package` as `job`
    pub fn package_steps(&self, package: &str, job: &str) -> Vec<Step> {
        let mut steps = self.preamble();

        steps.push(Step::Run(RunStep {
            name: substitute(&self.build.name, package, job),
            command: substitute(&self.build.command, package, job),
            shell: None,
            no_output_timeout: self.build.no_output_timeout.clone(),
        }));

        if self.publish.enabled {
            steps.push(Step::StoreArtifacts(ArtifactStep {
                path: substitute(&self.publish.path, package, job),
                destination: substitute(&self.publish.destination, package, job),
            }));
        }

        steps
    }

    /// Steps of the integration job, if one is configured
    pub fn integration_steps(&self) -> Option<Vec<Step>> {
        let integration = self.integration.as_ref()?;
        let mut steps = self.preamble();
        steps.extend(integration.steps.iter().cloned().map(Step::Run));
        Some(steps)
    }

    /// Checkout and bootstrap, shared by every job
    fn preamble(&self) -> Vec<Step> {
        let mut steps = Vec::with_capacity(self.bootstrap.len() + 3);
        if self.checkout {
            steps.push(Step::Checkout);
        }
        steps.extend(self.bootstrap.iter().cloned().map(Step::Run));
        steps
    }
}

/// Fill in `{package}` and `{job}`
pub fn substitute(pattern: &str, package: &str, job: &str) -> String {
    pattern
        .replace(PACKAGE_PLACEHOLDER, package)
        .replace(JOB_PLACEHOLDER, job)
}

fn require_non_empty(field: &str, value: &str) -> Result<(), TemplateError> {
    if value.trim().is_empty() {
        return Err(TemplateError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let template = TemplateConfig::from_toml("").unwrap();
        assert_eq!(template, TemplateConfig::default());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(TemplateConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let template = TemplateConfig::from_toml(
            r#"
[executor]
image = "nixos/nix:latest"
resource_class = "large"

[build]
command = "nix-store --realize {package}"
no_output_timeout = "20m"
"#,
        )
        .unwrap();

        assert_eq!(template.executor.image, "nixos/nix:latest");
        assert_eq!(template.build.name, "Build {package}");
        assert_eq!(template.build.no_output_timeout.as_deref(), Some("20m"));
        assert_eq!(template.naming.prefix, defaults::DEFAULT_JOB_PREFIX);
    }

    #[test]
    fn test_missing_placeholder() {
        let err = TemplateConfig::from_toml("[build]\ncommand = \"make\"\n").unwrap_err();
        assert!(matches!(err, TemplateError::MissingPlaceholder));
    }

    #[test]
    fn test_empty_image() {
        let err = TemplateConfig::from_toml("[executor]\nimage = \"\"\n").unwrap_err();
        assert!(matches!(err, TemplateError::EmptyField { field } if field == "executor.image"));
    }

    #[test]
    fn test_invalid_prefix() {
        let err = TemplateConfig::from_toml("[naming]\nprefix = \"Build \"\n").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPrefix { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = TemplateConfig::from_toml("colour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }

    #[test]
    fn test_package_steps_substitute_placeholders() {
        let mut template = TemplateConfig::default();
        template.bootstrap.clear();
        let steps = template.package_steps("packageA", "build-packagea");

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], Step::Checkout);
        let Step::Run(run) = &steps[1] else {
            panic!("expected run step");
        };
        assert_eq!(run.name, "Build packageA");
        assert!(run.command.contains(".#packageA"));
        assert_eq!(
            steps[2],
            Step::StoreArtifacts(ArtifactStep {
                path: "result".into(),
                destination: "packageA-artifacts".into(),
            })
        );
    }

    #[test]
    fn test_publish_can_be_disabled() {
        let template = TemplateConfig::from_toml("checkout = false\nbootstrap = []\n[publish]\nenabled = false\n").unwrap();
        let steps = template.package_steps("x", "build-x");
        assert_eq!(steps.len(), 1);
        assert!(matches!(steps[0], Step::Run(_)));
    }

    #[test]
    fn test_steps_from_toml_array() {
        let template = TemplateConfig::from_toml(
            r#"
[[bootstrap]]
name = "Setup nix"
command = "echo setup"
shell = "/bin/sh"
"#,
        )
        .unwrap();
        assert_eq!(template.bootstrap.len(), 1);
        assert_eq!(template.bootstrap[0].shell.as_deref(), Some("/bin/sh"));
    }

    #[test]
    fn test_integration_section() {
        let template = TemplateConfig::from_toml("[integration]\nname = \"final\"\n").unwrap();
        assert_eq!(template.integration_job_name(), Some("final"));
        let steps = template.integration_steps().unwrap();
        assert_eq!(steps.first(), Some(&Step::Checkout));
        assert!(matches!(steps.last(), Some(Step::Run(run)) if run.name == "Run integration tests"));
    }

    #[test]
    fn test_integration_name_validated() {
        let err = TemplateConfig::from_toml("[integration]\nname = \"Final Job\"\n").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidJobName { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut template = TemplateConfig::default();
        template.integration = Some(IntegrationConfig::default());
        let text = template.to_toml().unwrap();
        assert_eq!(TemplateConfig::from_toml(&text).unwrap(), template);
    }

    #[test]
    fn test_substitute_both_placeholders() {
        assert_eq!(substitute("{job}: {package}/{package}", "a.b", "build-a_b"), "build-a_b: a.b/a.b");
    }
}
