//! Merge the rules of many `ClusterRole` manifests into a single `ClusterRole`.
//!
//! Rules are keyed by `(apiGroup, resource)` or by non-resource URL and their
//! verbs are unioned, so the result does not depend on the order or number of
//! times a rule is seen.

use std::collections::{BTreeMap, BTreeSet};

use k8s_openapi::api::rbac::v1::{ClusterRole, PolicyRule};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_yaml::Value;
use tracing::{debug, instrument, trace};

use crate::document;

pub const ROLE_NAME: &str = "antrea-operator";

/// Applying manifests requires `patch` on everything the operator manages.
pub const REQUIRED_VERB: &str = "patch";

type Verbs = BTreeSet<String>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleAggregator {
    resource_rules: BTreeMap<String, BTreeMap<String, Verbs>>,
    non_resource_rules: BTreeMap<String, Verbs>,
}

impl RuleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the rules of `doc` if it is a `ClusterRole`, ignore it otherwise.
    pub fn add_document(&mut self, doc: &Value) {
        if document::kind(doc) != Some("ClusterRole") {
            return;
        }

        let rules = document::list(doc, "rules");
        debug!(
            name = document::name(doc).unwrap_or_default(),
            rules = rules.len(),
            "Merging ClusterRole"
        );

        for rule in rules {
            self.add_rule(rule);
        }
    }

    pub fn add_rule(&mut self, rule: &Value) {
        let verbs = document::str_list(rule, "verbs");
        let urls = document::str_list(rule, "nonResourceURLs");

        if !urls.is_empty() {
            for url in urls {
                trace!(url, ?verbs, "Non-resource rule");
                self.non_resource_rules
                    .entry(url.to_owned())
                    .or_default()
                    .extend(verbs.iter().copied().map(str::to_owned));
            }

            return;
        }

        let resources = document::str_list(rule, "resources");
        if resources.is_empty() {
            return;
        }

        for group in document::str_list(rule, "apiGroups") {
            let group_rules = self.resource_rules.entry(group.to_owned()).or_default();

            for &resource in &resources {
                trace!(group, resource, ?verbs, "Resource rule");
                let entry = group_rules.entry(resource.to_owned()).or_default();
                entry.extend(verbs.iter().copied().map(str::to_owned));
                entry.insert(REQUIRED_VERB.to_owned());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resource_rules.is_empty() && self.non_resource_rules.is_empty()
    }

    /// Render one rule per `(apiGroup, resource)` pair followed by one rule per URL.
    pub fn into_cluster_role(self) -> ClusterRole {
        let resource_rules = self
            .resource_rules
            .into_iter()
            .flat_map(|(group, resources)| {
                resources.into_iter().map(move |(resource, verbs)| PolicyRule {
                    api_groups: Some(vec![group.clone()]),
                    resources: Some(vec![resource]),
                    verbs: verbs.into_iter().collect(),
                    ..Default::default()
                })
            });

        let non_resource_rules = self
            .non_resource_rules
            .into_iter()
            .map(|(url, verbs)| PolicyRule {
                non_resource_urls: Some(vec![url]),
                verbs: verbs.into_iter().collect(),
                ..Default::default()
            });

        ClusterRole {
            metadata: ObjectMeta {
                name: Some(ROLE_NAME.into()),
                ..Default::default()
            },
            rules: Some(resource_rules.chain(non_resource_rules).collect()),
            ..Default::default()
        }
    }
}

#[instrument(skip_all, fields(documents = docs.len()))]
pub fn aggregate(docs: &[Value]) -> ClusterRole {
    let mut aggregator = RuleAggregator::new();
    for doc in docs {
        aggregator.add_document(doc);
    }

    aggregator.into_cluster_role()
}
