//! Work list construction.
//!
//! Crosses each request's expanded addresses with its ports. Addresses form
//! the outer loop and ports the inner loop, so units come out in the order
//! a reader would scan the input.

use crate::error::{ExpandError, ExpandResult};
use crate::types::{expand, ProbeUnit, ScanRequest};
use tracing::{debug, warn};

/// Default cap on how many addresses a single request may expand to.
pub const DEFAULT_MAX_ADDRESSES: u64 = 65536;

/// Build the probe units for one target specification.
pub fn build(spec: &str, ports: &[String], metadata: &[String]) -> ExpandResult<Vec<ProbeUnit>> {
    build_limited(spec, ports, metadata, u64::MAX)
}

fn build_limited(
    spec: &str,
    ports: &[String],
    metadata: &[String],
    limit: u64,
) -> ExpandResult<Vec<ProbeUnit>> {
    let addresses = expand(spec)?;
    let count = addresses.address_count();
    if count > limit {
        return Err(ExpandError::TooManyAddresses { count, limit });
    }

    let capacity = usize::try_from(count)
        .unwrap_or(0)
        .saturating_mul(ports.len());
    let mut units = Vec::with_capacity(capacity);

    for address in addresses {
        for port in ports {
            units.push(ProbeUnit::new(spec, address.clone(), port.clone(), metadata.to_vec()));
        }
    }

    Ok(units)
}

/// A request that could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub request: String,
    pub error: ExpandError,
}

/// The combined work list for a whole input.
#[derive(Debug, Clone, Default)]
pub struct WorkPlan {
    /// Units in input order.
    pub units: Vec<ProbeUnit>,
    /// Requests skipped because they failed to expand.
    pub rejected: Vec<Rejected>,
}

impl WorkPlan {
    /// Check if there is nothing to probe.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Expand every request independently.
///
/// A request that fails to expand, or expands to more than `limit`
/// addresses, is recorded in [`WorkPlan::rejected`] and the rest still run.
pub fn plan(requests: &[ScanRequest], limit: u64) -> WorkPlan {
    let mut plan = WorkPlan::default();

    for request in requests {
        match build_limited(&request.request, &request.ports, &request.metadata, limit) {
            Ok(units) => {
                debug!(request = %request.request, units = units.len(), "expanded request");
                plan.units.extend(units);
            }
            Err(error) => {
                warn!(request = %request.request, %error, "skipping request");
                plan.rejected.push(Rejected {
                    request: request.request.clone(),
                    error,
                });
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_range_cross_product() {
        let units = build("192.168.1.1-192.168.1.3", &strings(&["22", "80"]), &[]).unwrap();
        assert_eq!(units.len(), 6);

        let pairs: Vec<(&str, &str)> = units
            .iter()
            .map(|u| (u.address.as_str(), u.port.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("192.168.1.1", "22"),
                ("192.168.1.1", "80"),
                ("192.168.1.2", "22"),
                ("192.168.1.2", "80"),
                ("192.168.1.3", "22"),
                ("192.168.1.3", "80"),
            ]
        );
        assert!(units.iter().all(|u| u.request == "192.168.1.1-192.168.1.3"));
    }

    #[test]
    fn test_build_carries_metadata_unchanged() {
        let meta = strings(&["ssh", "42", "R-7", "jump host, primary"]);
        let units = build("10.0.0.0/31", &strings(&["22", "2222", "x"]), &meta).unwrap();
        assert_eq!(units.len(), 2 * 3);
        assert!(units.iter().all(|u| u.metadata == meta && u.request == "10.0.0.0/31"));
    }

    #[test]
    fn test_build_single_host_keeps_port_order() {
        let units = build("db.internal", &strings(&["5432", "22", "5432"]), &[]).unwrap();
        let ports: Vec<&str> = units.iter().map(|u| u.port.as_str()).collect();
        assert_eq!(ports, vec!["5432", "22", "5432"]);
        assert!(units.iter().all(|u| u.address == "db.internal"));
    }

    #[test]
    fn test_build_without_ports_is_empty() {
        assert!(build("10.0.0.0/30", &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_build_propagates_parse_errors() {
        assert!(build("10.0.0.1-10.0.0.x", &strings(&["80"]), &[]).is_err());
    }

    #[test]
    fn test_plan_skips_bad_requests() {
        let requests = vec![
            ScanRequest::new("10.0.0.1-10.0.0.2", ["80"]),
            ScanRequest::new("10.0.0.0/40", ["80"]),
            ScanRequest::new("gateway", ["22", "443"]),
        ];

        let plan = plan(&requests, DEFAULT_MAX_ADDRESSES);
        assert_eq!(plan.units.len(), 4);
        assert_eq!(plan.rejected.len(), 1);
        assert_eq!(plan.rejected[0].request, "10.0.0.0/40");
        assert!(matches!(plan.rejected[0].error, ExpandError::InvalidCidr(_)));
        assert_eq!(plan.units[0].address, "10.0.0.1");
        assert_eq!(plan.units[3].address, "gateway");
    }

    #[test]
    fn test_plan_enforces_address_limit() {
        let requests = vec![ScanRequest::new("10.0.0.0/16", ["80"])];
        let plan = plan(&requests, 256);
        assert!(plan.is_empty());
        assert_eq!(
            plan.rejected[0].error,
            ExpandError::TooManyAddresses {
                count: 65536,
                limit: 256
            }
        );
    }
}
