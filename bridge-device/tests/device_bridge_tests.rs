//! Behavioral tests for the device bridge: authorization gating, blocked-set
//! laws, limit semantics, consent scenarios, error mapping, and bounded
//! suspends.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeZone;
use mockall::mock;

use bridge_device::{
    ConsentDecision, DeviceBridgeConfig, DeviceScreenTimeBridge, InMemorySettingsStore,
    SimulatedAuthorization,
};
use bridge_traits::authorization::AuthorizationStatus;
use bridge_traits::availability::Availability;
use bridge_traits::bridge::ScreenTimeBridge;
use bridge_traits::error::{CapabilityError, CapabilityResult};
use bridge_traits::settings::{ApplicationToken, BundleId, ManagedSettingsStore, TimeLimit};
use bridge_traits::time::{local_day_start, FixedClock};
use bridge_traits::usage::{DeviceActivitySource, InstalledApplication, UsageReport};

mock! {
    pub ActivitySource {}

    #[async_trait]
    impl DeviceActivitySource for ActivitySource {
        async fn collect_report(
            &self,
            start_date: i64,
            end_date: i64,
        ) -> CapabilityResult<UsageReport>;

        async fn installed_applications(&self) -> CapabilityResult<Vec<InstalledApplication>>;
    }
}

/// Settings store that counts host calls, for no-call assertions.
struct CountingStore {
    inner: InMemorySettingsStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        Self {
            inner: InMemorySettingsStore::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManagedSettingsStore for CountingStore {
    async fn application_token(&self, bundle_id: &BundleId) -> CapabilityResult<ApplicationToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.application_token(bundle_id).await
    }

    async fn blocked_applications(&self) -> CapabilityResult<HashSet<ApplicationToken>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.blocked_applications().await
    }

    async fn set_blocked_applications(
        &self,
        blocked: HashSet<ApplicationToken>,
    ) -> CapabilityResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_blocked_applications(blocked).await
    }

    async fn application_limits(&self) -> CapabilityResult<HashMap<ApplicationToken, Duration>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.application_limits().await
    }

    async fn set_application_limits(
        &self,
        limits: HashMap<ApplicationToken, Duration>,
    ) -> CapabilityResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_application_limits(limits).await
    }
}

/// Settings store whose writes are rejected by the host.
struct ReadOnlyStore {
    inner: InMemorySettingsStore,
}

#[async_trait]
impl ManagedSettingsStore for ReadOnlyStore {
    async fn application_token(&self, bundle_id: &BundleId) -> CapabilityResult<ApplicationToken> {
        self.inner.application_token(bundle_id).await
    }

    async fn blocked_applications(&self) -> CapabilityResult<HashSet<ApplicationToken>> {
        self.inner.blocked_applications().await
    }

    async fn set_blocked_applications(
        &self,
        _blocked: HashSet<ApplicationToken>,
    ) -> CapabilityResult<()> {
        Err(CapabilityError::OperationFailed("store write rejected".into()))
    }

    async fn application_limits(&self) -> CapabilityResult<HashMap<ApplicationToken, Duration>> {
        self.inner.application_limits().await
    }

    async fn set_application_limits(
        &self,
        _limits: HashMap<ApplicationToken, Duration>,
    ) -> CapabilityResult<()> {
        Err(CapabilityError::OperationFailed("store write rejected".into()))
    }
}

/// Activity source whose host call never completes.
struct StalledActivitySource;

#[async_trait]
impl DeviceActivitySource for StalledActivitySource {
    async fn collect_report(
        &self,
        _start_date: i64,
        _end_date: i64,
    ) -> CapabilityResult<UsageReport> {
        std::future::pending().await
    }

    async fn installed_applications(&self) -> CapabilityResult<Vec<InstalledApplication>> {
        std::future::pending().await
    }
}

fn approved_bridge_with_store(
    store: Arc<dyn ManagedSettingsStore>,
) -> DeviceScreenTimeBridge {
    let config = DeviceBridgeConfig::builder()
        .authorization(Arc::new(SimulatedAuthorization::approved()))
        .settings_store(store)
        .build()
        .unwrap();
    DeviceScreenTimeBridge::connect(config).unwrap()
}

#[tokio::test]
async fn test_block_is_idempotent() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = approved_bridge_with_store(store.clone());
    let bundle = BundleId::from("com.test.app");

    bridge.block_application(&bundle).await.unwrap();
    bridge.block_application(&bundle).await.unwrap();

    let blocked = store.blocked_snapshot();
    assert_eq!(blocked.len(), 1);
    assert!(blocked.contains(&InMemorySettingsStore::token_for(&bundle)));
}

#[tokio::test]
async fn test_unblock_inverts_block() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = approved_bridge_with_store(store.clone());
    let other = BundleId::from("com.other.app");
    let bundle = BundleId::from("com.test.app");

    bridge.block_application(&other).await.unwrap();
    let before = store.blocked_snapshot();

    bridge.block_application(&bundle).await.unwrap();
    bridge.unblock_application(&bundle).await.unwrap();

    assert_eq!(store.blocked_snapshot(), before);
}

#[tokio::test]
async fn test_unblock_never_blocked_is_noop() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = approved_bridge_with_store(store.clone());

    bridge
        .unblock_application(&BundleId::from("com.never.blocked"))
        .await
        .unwrap();

    assert!(store.blocked_snapshot().is_empty());
}

#[tokio::test]
async fn test_privileged_operations_are_gated() {
    for status in [
        AuthorizationStatus::Denied,
        AuthorizationStatus::NotDetermined,
        AuthorizationStatus::Unknown,
    ] {
        let store = Arc::new(CountingStore::new());
        let mut activity = MockActivitySource::new();
        activity.expect_collect_report().times(0);
        activity.expect_installed_applications().times(0);

        let config = DeviceBridgeConfig::builder()
            .authorization(Arc::new(SimulatedAuthorization::new(status)))
            .settings_store(store.clone())
            .activity_source(Arc::new(activity))
            .build()
            .unwrap();
        let bridge = DeviceScreenTimeBridge::connect(config).unwrap();
        let bundle = BundleId::from("com.test.app");

        let results = vec![
            bridge.screen_time_report(0, 1).await.map(|_| ()),
            bridge.today_screen_time().await.map(|_| ()),
            bridge
                .set_app_time_limit(&bundle, TimeLimit::minutes(30))
                .await,
            bridge.remove_app_time_limit(&bundle).await,
            bridge.block_application(&bundle).await,
            bridge.unblock_application(&bundle).await,
            bridge.installed_applications().await.map(|_| ()),
        ];
        for result in results {
            let error = result.expect_err("operation must be gated");
            assert_eq!(error.code(), "NOT_AUTHORIZED", "status {status} must gate");
        }
        assert_eq!(store.call_count(), 0, "no host call may happen pre-approval");
        assert!(store.inner.blocked_snapshot().is_empty());
    }
}

#[tokio::test]
async fn test_set_time_limit_writes_limit_not_block() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = approved_bridge_with_store(store.clone());
    let bundle = BundleId::from("com.test.app");

    bridge
        .set_app_time_limit(&bundle, TimeLimit::minutes(45))
        .await
        .unwrap();

    let token = InMemorySettingsStore::token_for(&bundle);
    assert_eq!(
        store.limits_snapshot().get(&token),
        Some(&Duration::from_secs(45 * 60))
    );
    assert!(
        store.blocked_snapshot().is_empty(),
        "a time budget must not block the application outright"
    );
}

#[tokio::test]
async fn test_remove_time_limit_clears_limit_and_block() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = approved_bridge_with_store(store.clone());
    let bundle = BundleId::from("com.test.app");

    bridge
        .set_app_time_limit(&bundle, TimeLimit::minutes(45))
        .await
        .unwrap();
    bridge.block_application(&bundle).await.unwrap();
    bridge.remove_app_time_limit(&bundle).await.unwrap();

    assert!(store.limits_snapshot().is_empty());
    assert!(store.blocked_snapshot().is_empty());
}

#[tokio::test]
async fn test_remove_absent_time_limit_is_noop() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = approved_bridge_with_store(store.clone());

    bridge
        .remove_app_time_limit(&BundleId::from("com.never.limited"))
        .await
        .unwrap();

    assert!(store.limits_snapshot().is_empty());
    assert!(store.blocked_snapshot().is_empty());
}

#[tokio::test]
async fn test_denied_consent_flow() {
    let auth = Arc::new(SimulatedAuthorization::undetermined());
    auth.set_decision(ConsentDecision::Deny);
    let config = DeviceBridgeConfig::builder()
        .authorization(auth)
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .build()
        .unwrap();
    let bridge = DeviceScreenTimeBridge::connect(config).unwrap();

    assert_eq!(
        bridge.authorization_status(),
        AuthorizationStatus::NotDetermined
    );
    let error = bridge.request_authorization().await.unwrap_err();
    assert_eq!(error.code(), "AUTHORIZATION_DENIED");
    assert_eq!(bridge.authorization_status(), AuthorizationStatus::Denied);
}

#[tokio::test]
async fn test_approved_consent_flow() {
    let config = DeviceBridgeConfig::builder()
        .authorization(Arc::new(SimulatedAuthorization::undetermined()))
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .build()
        .unwrap();
    let bridge = DeviceScreenTimeBridge::connect(config).unwrap();

    bridge.request_authorization().await.unwrap();
    assert_eq!(bridge.authorization_status(), AuthorizationStatus::Approved);
}

#[tokio::test]
async fn test_failed_consent_flow_keeps_reason() {
    let auth = Arc::new(SimulatedAuthorization::undetermined());
    auth.set_decision(ConsentDecision::Fail("dialog crashed".into()));
    let config = DeviceBridgeConfig::builder()
        .authorization(auth)
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .build()
        .unwrap();
    let bridge = DeviceScreenTimeBridge::connect(config).unwrap();

    let error = bridge.request_authorization().await.unwrap_err();
    assert_eq!(error.code(), "AUTHORIZATION_ERROR");
    assert!(error.to_string().contains("dialog crashed"));
}

#[tokio::test]
async fn test_host_failure_maps_to_operation_kind() {
    let bridge = approved_bridge_with_store(Arc::new(ReadOnlyStore {
        inner: InMemorySettingsStore::new(),
    }));
    let bundle = BundleId::from("com.test.app");

    let error = bridge.block_application(&bundle).await.unwrap_err();
    assert_eq!(error.code(), "BLOCK_APP_ERROR");
    assert!(error.to_string().contains("store write rejected"));

    let error = bridge
        .set_app_time_limit(&bundle, TimeLimit::minutes(5))
        .await
        .unwrap_err();
    assert_eq!(error.code(), "TIME_LIMIT_ERROR");
}

#[tokio::test]
async fn test_stalled_host_call_times_out() {
    let config = DeviceBridgeConfig::builder()
        .authorization(Arc::new(SimulatedAuthorization::approved()))
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .activity_source(Arc::new(StalledActivitySource))
        .operation_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let bridge = DeviceScreenTimeBridge::connect(config).unwrap();

    let error = bridge.screen_time_report(0, 1).await.unwrap_err();
    assert_eq!(error.code(), "SCREEN_TIME_ERROR");
    assert!(error.to_string().contains("timed out"));

    let error = bridge.installed_applications().await.unwrap_err();
    assert_eq!(error.code(), "GET_APPS_ERROR");
}

#[tokio::test]
async fn test_report_passes_window_through() {
    let mut activity = MockActivitySource::new();
    activity
        .expect_collect_report()
        .withf(|start, end| *start == 100 && *end == 200)
        .returning(|start, end| Ok(UsageReport::empty(start, end)));

    let config = DeviceBridgeConfig::builder()
        .authorization(Arc::new(SimulatedAuthorization::approved()))
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .activity_source(Arc::new(activity))
        .build()
        .unwrap();
    let bridge = DeviceScreenTimeBridge::connect(config).unwrap();

    let report = bridge.screen_time_report(100, 200).await.unwrap();
    assert_eq!(report.start_date, 100);
    assert_eq!(report.end_date, 200);
    assert_eq!(report.total_screen_time, 0);
}

#[tokio::test]
async fn test_today_report_scopes_to_local_day() {
    let now = chrono::Utc.with_ymd_and_hms(2024, 5, 17, 13, 45, 12).unwrap();
    let day_start = local_day_start(now).timestamp();
    let now_ts = now.timestamp();

    let mut activity = MockActivitySource::new();
    activity
        .expect_collect_report()
        .withf(move |start, end| *start == day_start && *end == now_ts)
        .returning(|start, end| Ok(UsageReport::empty(start, end)));

    let config = DeviceBridgeConfig::builder()
        .authorization(Arc::new(SimulatedAuthorization::approved()))
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .activity_source(Arc::new(activity))
        .clock(Arc::new(FixedClock(now)))
        .build()
        .unwrap();
    let bridge = DeviceScreenTimeBridge::connect(config).unwrap();

    let report = bridge.today_screen_time().await.unwrap();
    assert_eq!(report.date, day_start);
    assert_eq!(report.total_screen_time, 0);
    assert!(report.apps.is_empty());
}

/// Activity source linked against a host OS that predates usage reporting.
struct PartiallyLinkedActivity;

#[async_trait]
impl DeviceActivitySource for PartiallyLinkedActivity {
    fn availability(&self) -> Availability {
        Availability::operations_missing(["collect_report"], "host OS predates usage reporting")
    }

    async fn collect_report(
        &self,
        _start_date: i64,
        _end_date: i64,
    ) -> CapabilityResult<UsageReport> {
        Err(CapabilityError::Unsupported("collect_report".into()))
    }

    async fn installed_applications(&self) -> CapabilityResult<Vec<InstalledApplication>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_connect_rejects_partially_linked_handle() {
    let config = DeviceBridgeConfig::builder()
        .authorization(Arc::new(SimulatedAuthorization::approved()))
        .settings_store(Arc::new(InMemorySettingsStore::new()))
        .activity_source(Arc::new(PartiallyLinkedActivity))
        .build()
        .unwrap();

    let error = DeviceScreenTimeBridge::connect(config).expect_err("negotiation must fail");
    assert_eq!(error.code(), "METHOD_UNAVAILABLE");
    assert!(error.to_string().contains("collect_report"));
    assert!(error.to_string().contains("device-activity source"));
}

#[tokio::test]
async fn test_placeholder_installed_applications_is_empty() {
    let bridge = approved_bridge_with_store(Arc::new(InMemorySettingsStore::new()));
    assert!(bridge.installed_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_mutations_do_not_clobber() {
    let store = Arc::new(InMemorySettingsStore::new());
    let bridge = Arc::new(approved_bridge_with_store(store.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let bridge = Arc::clone(&bridge);
        handles.push(tokio::spawn(async move {
            bridge
                .block_application(&BundleId::new(format!("com.test.app{i}")))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.blocked_snapshot().len(), 8);
}
