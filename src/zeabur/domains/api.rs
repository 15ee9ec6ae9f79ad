//! Domain API operations

use serde::Deserialize;
use serde_json::json;

use crate::error::{CliError, Result};
use crate::zeabur::ZeaburClient;

use super::models::{Domain, DomainAvailability};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddDomainData {
    add_domain: AddedDomain,
}

#[derive(Deserialize)]
struct AddedDomain {
    domain: String,
}

#[derive(Deserialize)]
struct ServiceDomainsData {
    service: Option<ServiceDomains>,
}

#[derive(Deserialize)]
struct ServiceDomains {
    #[serde(default)]
    domains: Vec<Domain>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveDomainData {
    remove_domain: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckDomainData {
    check_domain_available: DomainAvailability,
}

impl ZeaburClient {
    /// Bind a domain to a service, returning the domain actually assigned
    pub async fn add_domain(
        &self,
        service_id: &str,
        environment_id: &str,
        is_generated: bool,
        domain: &str,
        redirect_to: Option<&str>,
    ) -> Result<String> {
        let data: AddDomainData = self
            .graphql(
                "mutation AddDomain($serviceID: ObjectID!, $environmentID: ObjectID!, \
                 $isGenerated: Boolean!, $domain: String!, $redirectTo: String) { \
                 addDomain(serviceID: $serviceID, environmentID: $environmentID, \
                 isGenerated: $isGenerated, domain: $domain, redirectTo: $redirectTo) { domain } }",
                json!({
                    "serviceID": service_id,
                    "environmentID": environment_id,
                    "isGenerated": is_generated,
                    "domain": domain,
                    "redirectTo": redirect_to,
                }),
                &format!("domain '{}'", domain),
            )
            .await?;
        Ok(data.add_domain.domain)
    }

    pub async fn list_domains(&self, service_id: &str, environment_id: &str) -> Result<Vec<Domain>> {
        let data: ServiceDomainsData = self
            .graphql(
                "query ListDomains($id: ObjectID!, $environmentID: ObjectID!) { service(_id: $id) { \
                 domains(environmentID: $environmentID) { _id domain status isGenerated redirectTo \
                 serviceID environmentID createdAt } } }",
                json!({ "id": service_id, "environmentID": environment_id }),
                &format!("domains of service '{}'", service_id),
            )
            .await?;
        data.service
            .map(|s| s.domains)
            .ok_or_else(|| CliError::NotFound(format!("service <{}> not found", service_id)))
    }

    pub async fn remove_domain(&self, domain: &str) -> Result<bool> {
        let data: RemoveDomainData = self
            .graphql(
                "mutation RemoveDomain($domain: String!) { removeDomain(domain: $domain) }",
                json!({ "domain": domain }),
                &format!("removal of domain '{}'", domain),
            )
            .await?;
        Ok(data.remove_domain)
    }

    /// Whether `domain` can be bound; `region` is the project's region ID
    pub async fn check_domain_available(
        &self,
        domain: &str,
        is_generated: bool,
        region: &str,
    ) -> Result<DomainAvailability> {
        let data: CheckDomainData = self
            .graphql(
                "mutation CheckDomain($domain: String!, $isGenerated: Boolean!, $region: String!) { \
                 checkDomainAvailable(domain: $domain, isGenerated: $isGenerated, region: $region) \
                 { isAvailable reason } }",
                json!({ "domain": domain, "isGenerated": is_generated, "region": region }),
                &format!("availability of domain '{}'", domain),
            )
            .await?;
        Ok(data.check_domain_available)
    }
}
