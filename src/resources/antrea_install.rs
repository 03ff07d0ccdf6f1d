use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    kind = "AntreaInstall",
    group = "operator.antrea.vmware.com",
    version = "v1",
    namespaced,
    status = "AntreaInstallStatus"
)]
#[kube(
    doc = "Custom resource describing an Antrea installation managed by the operator",
    printcolumn = r#"{"name":"Platform", "type":"string", "jsonPath":".spec.antreaPlatform"}"#,
    printcolumn = r#"{"name":"Image", "type":"string", "jsonPath":".spec.antreaImage"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AntreaInstallSpec {
    /// Configuration of antrea-agent.
    pub antrea_agent_config: String,
    /// Configuration of the CNI plugin.
    #[serde(rename = "antreaCNIConfig")]
    pub antrea_cni_config: String,
    /// Configuration of antrea-controller.
    pub antrea_controller_config: String,
    /// Image used by antrea-agent and antrea-controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antrea_image: Option<String>,
    /// Platform Antrea is deployed on.
    pub antrea_platform: String,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AntreaInstallStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<InstallCondition>,
}

/// Same shape as the conditions of an OpenShift ClusterOperator.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    pub last_transition_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
