use log::debug;

use crate::client::LandroidClient;
use crate::error::Result;
use crate::models::{Mower, MowerStatus};
use crate::ratelimit::RateLimiter;

/// The mowers registered to an account, as of the last fetch.
#[derive(Debug, Clone)]
pub struct MowerList {
    pub mowers: Vec<Mower>,
}

impl MowerList {
    pub async fn fetch(client: &mut LandroidClient) -> Result<Self> {
        let mowers = client.list_mowers().await?;
        Ok(Self { mowers })
    }

    pub async fn refresh(&mut self, client: &mut LandroidClient) -> Result<()> {
        self.mowers = client.list_mowers().await?;
        Ok(())
    }

    pub fn find(&self, serial_number: &str) -> Option<&Mower> {
        self.mowers
            .iter()
            .find(|mower| mower.serial_number == serial_number)
    }
}

/// Metadata of a single mower.
#[derive(Debug, Clone)]
pub struct MowerInfo {
    pub mower: Mower,
}

impl MowerInfo {
    pub async fn fetch(client: &mut LandroidClient, serial_number: &str) -> Result<Self> {
        let mower = client.get_mower(serial_number).await?;
        Ok(Self { mower })
    }

    pub async fn refresh(&mut self, client: &mut LandroidClient) -> Result<()> {
        self.mower = client.get_mower(&self.mower.serial_number).await?;
        Ok(())
    }
}

/// Status poller for one mower.
///
/// [`update`](Self::update) goes through the rate limiter and waits when the
/// budget is used up; [`update_force`](Self::update_force) does not.
#[derive(Debug, Clone)]
pub struct MowerState {
    serial_number: String,
    limiter: RateLimiter,
    state: Option<MowerStatus>,
}

impl MowerState {
    /// Create a poller with its own limiter, fetching the status right away
    /// when `update_on_init` is set.
    pub async fn new(
        client: &mut LandroidClient,
        serial_number: &str,
        update_on_init: bool,
    ) -> Result<Self> {
        Self::new_with_limiter(client, serial_number, RateLimiter::default(), update_on_init)
            .await
    }

    /// Like [`new`](Self::new), but drawing from `limiter`. The initial
    /// update counts against its budget.
    pub async fn new_with_limiter(
        client: &mut LandroidClient,
        serial_number: &str,
        limiter: RateLimiter,
        update_on_init: bool,
    ) -> Result<Self> {
        let mut state = Self::with_limiter(serial_number, limiter);
        if update_on_init {
            state.update(client).await?;
        }
        Ok(state)
    }

    /// Create a poller without fetching anything, drawing from `limiter`.
    pub fn with_limiter(serial_number: &str, limiter: RateLimiter) -> Self {
        Self {
            serial_number: serial_number.to_string(),
            limiter,
            state: None,
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Latest status, `None` until the first successful update.
    pub fn state(&self) -> Option<&MowerStatus> {
        self.state.as_ref()
    }

    pub async fn update(&mut self, client: &mut LandroidClient) -> Result<&MowerStatus> {
        self.limiter.acquire().await;
        self.update_force(client).await
    }

    pub async fn update_force(&mut self, client: &mut LandroidClient) -> Result<&MowerStatus> {
        let status = client.fetch_status(&self.serial_number).await?;
        debug!(
            "Mower {} status: {} ({})",
            self.serial_number, status.status_code, status.error_code
        );
        Ok(&*self.state.insert(status))
    }
}
