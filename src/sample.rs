use std::fmt;

use serde_yaml::Value;
use tracing::{debug, instrument, trace};

use crate::document;
use crate::resources::{AntreaInstall, AntreaInstallSpec};

pub const SAMPLE_NAME: &str = "antrea-install";
pub const SAMPLE_NAMESPACE: &str = "antrea-operator";

pub const CONFIG_MAP_NAME: &str = "antrea-config";
pub const AGENT_CONFIG_KEY: &str = "antrea-agent.conf";
pub const CNI_CONFIG_KEY: &str = "antrea-cni.conflist";
pub const CONTROLLER_CONFIG_KEY: &str = "antrea-controller.conf";

const DEVELOPMENT_VERSION: &str = "main";

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Kubernetes,
    Openshift,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Kubernetes => "kubernetes",
            Platform::Openshift => "openshift",
        }
    }

    pub fn image_name(self) -> &'static str {
        match self {
            Platform::Kubernetes => "antrea-ubuntu",
            Platform::Openshift => "antrea-ubi",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Development builds are published as `latest`, releases as `v<version>`.
pub fn image_tag(version: Option<&str>) -> String {
    match version {
        None | Some("") | Some(DEVELOPMENT_VERSION) => "latest".into(),
        Some(version) => format!("v{version}"),
    }
}

pub fn image_reference(platform: Platform, version: Option<&str>) -> String {
    format!("antrea/{}:{}", platform.image_name(), image_tag(version))
}

/// The three configuration files shipped in the `antrea-config` ConfigMap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AntreaConfig {
    pub agent: String,
    pub cni: String,
    pub controller: String,
}

impl AntreaConfig {
    fn from_config_map(config_map: &Value) -> Self {
        let data = |key: &str| {
            document::str_at(config_map, &["data", key])
                .unwrap_or_default()
                .to_owned()
        };

        Self {
            agent: data(AGENT_CONFIG_KEY),
            cni: data(CNI_CONFIG_KEY),
            controller: data(CONTROLLER_CONFIG_KEY),
        }
    }

    pub fn apply(self, spec: &mut AntreaInstallSpec) {
        spec.antrea_agent_config = self.agent;
        spec.antrea_cni_config = self.cni;
        spec.antrea_controller_config = self.controller;
    }
}

fn is_antrea_config(doc: &Value) -> bool {
    document::kind(doc) == Some("ConfigMap") && document::name(doc) == Some(CONFIG_MAP_NAME)
}

/// Find the first `antrea-config` ConfigMap among `docs`.
///
/// Later ConfigMaps with the same name are ignored.
pub fn find_antrea_config<'a, I>(docs: I) -> Option<AntreaConfig>
where
    I: IntoIterator<Item = &'a Value>,
{
    let config_map = docs.into_iter().find(|doc| is_antrea_config(doc))?;
    trace!("Found {CONFIG_MAP_NAME} ConfigMap");

    Some(AntreaConfig::from_config_map(config_map))
}

#[instrument(skip(docs))]
pub fn build_sample(platform: Platform, version: Option<&str>, docs: &[Value]) -> AntreaInstall {
    let mut spec = AntreaInstallSpec {
        antrea_image: Some(image_reference(platform, version)),
        antrea_platform: platform.as_str().into(),
        ..Default::default()
    };

    match find_antrea_config(docs) {
        Some(config) => config.apply(&mut spec),
        None => debug!("No {CONFIG_MAP_NAME} ConfigMap in input, leaving configuration empty"),
    }

    let mut sample = AntreaInstall::new(SAMPLE_NAME, spec);
    sample.metadata.namespace = Some(SAMPLE_NAMESPACE.into());

    sample
}
