//! Placeholder device-activity source.

use async_trait::async_trait;

use bridge_traits::error::CapabilityResult;
use bridge_traits::usage::{DeviceActivitySource, InstalledApplication, UsageReport};

/// Activity source for hosts without a real aggregation pipeline.
///
/// Returns the structurally valid zero aggregate for any window, and an
/// empty application list — full enumeration requires a user-driven picker
/// on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderActivitySource;

#[async_trait]
impl DeviceActivitySource for PlaceholderActivitySource {
    async fn collect_report(
        &self,
        start_date: i64,
        end_date: i64,
    ) -> CapabilityResult<UsageReport> {
        Ok(UsageReport::empty(start_date, end_date))
    }

    async fn installed_applications(&self) -> CapabilityResult<Vec<InstalledApplication>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_report_is_zeroed() {
        let source = PlaceholderActivitySource;
        let report = source.collect_report(10, 20).await.unwrap();
        assert_eq!(report, UsageReport::empty(10, 20));
    }

    #[tokio::test]
    async fn test_placeholder_application_list_is_empty() {
        let source = PlaceholderActivitySource;
        assert!(source.installed_applications().await.unwrap().is_empty());
    }
}
