use crate::config::{Settings, SourceSettings};
use crate::store::{FetchError, FirestoreSource, RecordSource, SnapshotSource};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no credentials were supplied; every render then fails
    /// before touching the network.
    pub source: Option<Arc<dyn RecordSource>>,
}

impl AppState {
    pub fn new(source: Option<Arc<dyn RecordSource>>) -> Self {
        Self { source }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let source: Option<Arc<dyn RecordSource>> = match &settings.source {
            SourceSettings::Firestore(firestore) => {
                Some(Arc::new(FirestoreSource::new(firestore.clone())?))
            }
            SourceSettings::Snapshot(path) => Some(Arc::new(SnapshotSource::new(path.clone()))),
            SourceSettings::Missing => None,
        };
        Ok(Self::new(source))
    }
}
