//! The resource client trait.

use crate::error::ClientResult;
use async_trait::async_trait;
use medley_api::{
    DeletionCandidates, DuplicateGroups, DuplicateStats, FileStatistics, GroupingMethod,
    HealthStatus, LibraryPath, LibraryPathUpdate, Message, NewLibraryPath, ScanStatus, StartScan,
    SystemStatus,
};

/// One operation per backend endpoint, grouped by resource family.
///
/// Implementations issue exactly one network call per operation and
/// normalize failures into [`crate::ClientError`]. The trait exists so
/// the synchronization layer can be driven by a scripted mock in tests
/// (the HTTP implementation is [`crate::HttpResourceClient`]).
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// `GET /api/v1/system/status`
    async fn system_status(&self) -> ClientResult<SystemStatus>;

    /// `GET /health` (no version prefix)
    async fn health(&self) -> ClientResult<HealthStatus>;

    /// `GET /api/v1/libraries`
    async fn libraries(&self) -> ClientResult<Vec<LibraryPath>>;

    /// `POST /api/v1/libraries`
    async fn create_library(&self, library: &NewLibraryPath) -> ClientResult<Message>;

    /// `PUT /api/v1/libraries/{id}`
    async fn update_library(&self, id: u64, update: &LibraryPathUpdate) -> ClientResult<Message>;

    /// `DELETE /api/v1/libraries/{id}`
    async fn delete_library(&self, id: u64) -> ClientResult<Message>;

    /// `GET /api/v1/scan/status`
    async fn scan_status(&self) -> ClientResult<ScanStatus>;

    /// `POST /api/v1/scan/start`
    async fn start_scan(&self, request: &StartScan) -> ClientResult<Message>;

    /// `POST /api/v1/scan/stop`
    async fn stop_scan(&self) -> ClientResult<Message>;

    /// `GET /api/v1/stats`
    async fn file_stats(&self) -> ClientResult<FileStatistics>;

    /// `GET /api/v1/duplicates/stats`
    async fn duplicate_stats(&self) -> ClientResult<DuplicateStats>;

    /// `POST /api/v1/duplicates/detect?auto_mark={bool}`
    async fn detect_duplicates(&self, auto_mark: bool) -> ClientResult<Message>;

    /// `GET /api/v1/duplicates/candidates?limit={n}`
    async fn deletion_candidates(&self, limit: u32) -> ClientResult<DeletionCandidates>;

    /// `GET /api/v1/duplicates/groups?method={m}&limit={n}`
    async fn duplicate_groups(
        &self,
        method: GroupingMethod,
        limit: u32,
    ) -> ClientResult<DuplicateGroups>;
}

// A shared client can drive the sync layer and direct calls at once.
#[async_trait]
impl<T: ResourceClient + ?Sized> ResourceClient for std::sync::Arc<T> {
    async fn system_status(&self) -> ClientResult<SystemStatus> {
        (**self).system_status().await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        (**self).health().await
    }

    async fn libraries(&self) -> ClientResult<Vec<LibraryPath>> {
        (**self).libraries().await
    }

    async fn create_library(&self, library: &NewLibraryPath) -> ClientResult<Message> {
        (**self).create_library(library).await
    }

    async fn update_library(&self, id: u64, update: &LibraryPathUpdate) -> ClientResult<Message> {
        (**self).update_library(id, update).await
    }

    async fn delete_library(&self, id: u64) -> ClientResult<Message> {
        (**self).delete_library(id).await
    }

    async fn scan_status(&self) -> ClientResult<ScanStatus> {
        (**self).scan_status().await
    }

    async fn start_scan(&self, request: &StartScan) -> ClientResult<Message> {
        (**self).start_scan(request).await
    }

    async fn stop_scan(&self) -> ClientResult<Message> {
        (**self).stop_scan().await
    }

    async fn file_stats(&self) -> ClientResult<FileStatistics> {
        (**self).file_stats().await
    }

    async fn duplicate_stats(&self) -> ClientResult<DuplicateStats> {
        (**self).duplicate_stats().await
    }

    async fn detect_duplicates(&self, auto_mark: bool) -> ClientResult<Message> {
        (**self).detect_duplicates(auto_mark).await
    }

    async fn deletion_candidates(&self, limit: u32) -> ClientResult<DeletionCandidates> {
        (**self).deletion_candidates(limit).await
    }

    async fn duplicate_groups(
        &self,
        method: GroupingMethod,
        limit: u32,
    ) -> ClientResult<DuplicateGroups> {
        (**self).duplicate_groups(method, limit).await
    }
}
