use async_trait::async_trait;

/// Seam to the surrounding lifecycle host.
///
/// The host delivers install/activate/fetch events to the worker; the worker
/// uses this trait in the other direction, to influence how the host manages
/// version handover and already-open client contexts.
#[async_trait]
pub trait LifecycleHost: Send + Sync {
    /// Request immediate takeover eligibility, skipping the usual wait for
    /// the previous version to finish. Signaled once install has succeeded.
    async fn skip_waiting(&self);

    /// Claim every already-open client context for the current version, so
    /// subsequent requests are intercepted without a reload. Signaled after
    /// activation cleanup has completed.
    async fn claim_clients(&self);
}

/// Host for embeddings without a waiting/claim protocol.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

#[async_trait]
impl LifecycleHost for NoopHost {
    async fn skip_waiting(&self) {}
    async fn claim_clients(&self) {}
}
