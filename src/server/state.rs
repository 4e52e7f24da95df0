// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logs::LogSink;
use crate::store::RecordStore;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: RecordStore,
    log_path: PathBuf,
    sink: LogSink,
}

impl AppState {
    pub fn new(store: RecordStore, log_path: impl Into<PathBuf>) -> Self {
        let log_path = log_path.into();
        Self {
            inner: Arc::new(AppStateInner {
                store,
                sink: LogSink::new(log_path.clone()),
                log_path,
            }),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.inner.store
    }

    pub fn log_path(&self) -> &Path {
        &self.inner.log_path
    }

    pub fn sink(&self) -> &LogSink {
        &self.inner.sink
    }
}
