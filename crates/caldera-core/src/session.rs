use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::AppError;
use crate::traits::HeatingApi;

/// Lazily opened, self-refreshing session around a [`HeatingApi`].
///
/// The first caller logs in; every caller refreshes the token once it has
/// expired. Login and refresh run under one lock so concurrent requests
/// never open two sessions. The active flag is published separately so
/// readers never wait on a login in progress.
pub struct Session<A> {
    api: A,
    initialized: Mutex<bool>,
    active: AtomicBool,
}

impl<A: HeatingApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            initialized: Mutex::new(false),
            active: AtomicBool::new(false),
        }
    }

    /// Returns the client once it holds a valid session.
    pub async fn ensure_authenticated(&self) -> Result<&A, AppError> {
        let mut initialized = self.initialized.lock().await;

        if !*initialized {
            info!("Initializing API...");
            self.api.login().await?;
            *initialized = true;
            self.active.store(true, Ordering::Release);
            info!("API initialized.");
        }

        let expired = self
            .api
            .session_expires()
            .is_none_or(|expires| expires <= Utc::now());
        if expired {
            info!("Token expired. Refreshing...");
            self.api.refresh_token().await?;
            info!("Token refreshed.");
        }

        Ok(&self.api)
    }

    /// True once a login has succeeded and until [`close`](Self::close).
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Closes the client session. The next request logs in again.
    pub async fn close(&self) -> Result<(), AppError> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            self.api.close().await?;
            *initialized = false;
            self.active.store(false, Ordering::Release);
        }
        Ok(())
    }

    /// The wrapped client, without any session check.
    pub fn api(&self) -> &A {
        &self.api
    }
}
