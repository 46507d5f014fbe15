// ── Adapter ──
//
// Drives the read-reconcile-publish loop against one gateway and
// translates set-input commands into gateway writes followed by a
// confirmation poll. Cheaply cloneable; background tasks share the
// same inner state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use isylink_api::GatewayClient;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::command::CommandOutcome;
use crate::config::AdapterConfig;
use crate::discovery;
use crate::error::CoreError;
use crate::model::{
    InputDiscoveryMessage, InputType, NodeAttrs, OnOff, OutputType, OutputUpdate, SetInputMessage,
};
use crate::publisher::Publisher;
use crate::reconcile::reconcile;
use crate::store::{GatewaySnapshot, SnapshotStore};

/// The main entry point for consumers.
#[derive(Clone)]
pub struct Adapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    config: AdapterConfig,
    client: GatewayClient,
    publisher: Arc<dyn Publisher>,
    snapshot: SnapshotStore,
    /// Held for the whole of a poll so timer and command polls never overlap.
    poll_lock: Mutex<()>,
    /// Re-fetch the gateway configuration on the next poll.
    refresh_configuration: AtomicBool,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Adapter {
    /// Create an adapter and its gateway client. Does not poll; call
    /// [`start()`](Self::start) or [`poll()`](Self::poll).
    pub fn new(config: AdapterConfig, publisher: Arc<dyn Publisher>) -> Result<Self, CoreError> {
        let client = GatewayClient::new(
            config.gateway.clone(),
            config.credentials.clone(),
            &config.transport(),
        )?;
        Ok(Self::with_client(config, client, publisher))
    }

    /// Create an adapter around an existing gateway client.
    pub fn with_client(
        config: AdapterConfig,
        client: GatewayClient,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            inner: Arc::new(AdapterInner {
                config,
                client,
                publisher,
                snapshot: SnapshotStore::new(),
                poll_lock: Mutex::new(()),
                refresh_configuration: AtomicBool::new(false),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &GatewayClient {
        &self.inner.client
    }

    pub fn publisher(&self) -> &Arc<dyn Publisher> {
        &self.inner.publisher
    }

    /// State fetched by the last successful poll.
    pub fn snapshot(&self) -> Arc<GatewaySnapshot> {
        self.inner.snapshot.load()
    }

    /// Fetch the gateway configuration again on the next poll.
    pub fn request_configuration_refresh(&self) {
        self.inner.refresh_configuration.store(true, Ordering::Release);
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Start periodic polling and run the initial poll.
    ///
    /// The background task is spawned even when the initial poll fails, so
    /// a gateway that is briefly unreachable is picked up on a later tick.
    pub async fn start(&self) -> Result<Vec<OutputUpdate>, CoreError> {
        let interval = self.inner.config.poll_interval;
        {
            let mut handles = self.inner.task_handles.lock().await;
            if handles.is_empty() && !interval.is_zero() {
                let adapter = self.clone();
                let cancel = self.inner.cancel.clone();
                handles.push(tokio::spawn(poll_task(adapter, cancel)));
            }
        }

        info!(gateway = %self.inner.config.gateway, ?interval, "adapter started");
        self.poll().await
    }

    /// Cancel background polling and pending confirmation delays, then
    /// wait for the polling task to finish.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("adapter stopped");
    }

    // ── Polling ──────────────────────────────────────────────────

    /// Fetch gateway state, register discovered nodes, and publish every
    /// output that changed.
    ///
    /// Configuration is fetched on the first poll and on request; nodes
    /// and status every time. If any fetch fails the previous snapshot is
    /// kept, nothing is published, and the error is returned.
    pub async fn poll(&self) -> Result<Vec<OutputUpdate>, CoreError> {
        let _guard = self.inner.poll_lock.lock().await;
        if self.inner.cancel.is_cancelled() {
            return Err(CoreError::Shutdown);
        }

        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "poll failed, keeping previous gateway state");
                return Err(e);
            }
        };

        let updates = self.publish(&snapshot);
        debug!(
            nodes = snapshot.nodes.len(),
            updates = updates.len(),
            "poll complete"
        );
        self.inner.snapshot.replace(snapshot);
        Ok(updates)
    }

    /// Fetch every document for one cycle. Nothing is registered or kept
    /// unless all of them succeed.
    async fn fetch_snapshot(&self) -> Result<GatewaySnapshot, CoreError> {
        let client = &self.inner.client;
        let previous = self.inner.snapshot.load();

        let refresh = self.inner.refresh_configuration.swap(false, Ordering::AcqRel);
        let current = previous
            .configuration
            .as_ref()
            .filter(|_| !refresh)
            .map(Arc::clone);
        let configuration = async {
            match current {
                Some(configuration) => Ok(configuration),
                None => client.fetch_configuration().await.map(Arc::new),
            }
        };

        let (configuration, nodes, status) =
            tokio::join!(configuration, client.fetch_nodes(), client.fetch_status());
        let fetched = configuration
            .and_then(|configuration| Ok((configuration, nodes?, status?)))
            .map_err(CoreError::from);

        match fetched {
            Ok((configuration, nodes, status)) => {
                Ok(GatewaySnapshot::new(Some(configuration), nodes, status))
            }
            Err(e) => {
                if refresh {
                    self.request_configuration_refresh();
                }
                Err(e)
            }
        }
    }

    fn register_gateway(&self, configuration: &isylink_api::GatewayConfiguration) {
        let config = &self.inner.config;
        let node = discovery::gateway_node(&config.addressing, &config.gateway_id, configuration);
        if self.inner.publisher.register_node(node) {
            info!(
                version = %configuration.app_version,
                model = configuration.model().unwrap_or("unknown"),
                "gateway registered"
            );
        }
    }

    /// Register the gateway and classified nodes, then reconcile and publish.
    fn publish(&self, snapshot: &GatewaySnapshot) -> Vec<OutputUpdate> {
        let publisher = self.inner.publisher.as_ref();
        let addressing = &self.inner.config.addressing;

        if let Some(configuration) = &snapshot.configuration {
            self.register_gateway(configuration);
        }

        for (node_id, node) in snapshot.nodes.iter() {
            let status = snapshot.status.status_property(node_id);
            if let Some(discovered) = discovery::device_node(addressing, node, status) {
                if publisher.register_node(discovered) {
                    info!(node = %node_id, name = %node.name, "switch discovered");
                }
            }
        }

        let updates = reconcile(&snapshot.nodes, &snapshot.status, publisher);
        for update in &updates {
            let published = publisher.publish_output_value(update);
            debug!(address = %published.address, value = %published.value, "output published");
        }
        updates
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Apply a set-input command.
    ///
    /// Switch inputs are written to the gateway, then after the
    /// propagation delay a poll runs to observe the result. A failed write
    /// is still followed by that poll before the write error is returned.
    /// Inputs of other types are logged and ignored.
    pub async fn handle_input_command(
        &self,
        input: &InputDiscoveryMessage,
        command: &SetInputMessage,
    ) -> Result<CommandOutcome, CoreError> {
        if let InputType::Other(input_type) = &input.input_type {
            warn!(%input_type, address = %input.address, "unsupported input type, command ignored");
            return Ok(CommandOutcome::Ignored);
        }

        let state = OnOff::from_command(&command.value);
        let Some(node) = self.inner.publisher.node_by_address(&input.address) else {
            warn!(address = %input.address, "no node registered for input");
            return Err(CoreError::NodeNotFound {
                address: input.address.clone(),
            });
        };

        let previous = node
            .output(&OutputType::Switch, &input.instance)
            .and_then(|output| self.inner.publisher.output_value_by_address(&output.address))
            .map(|v| v.value);
        info!(
            node = %node.node_id,
            value = %command.value,
            %state,
            previous = previous.as_deref().unwrap_or("n/a"),
            "switching node"
        );
        let written = self
            .inner
            .client
            .write_on_off(&node.node_id, state.is_on())
            .await
            .map_err(CoreError::from);
        if let Err(e) = &written {
            error!(node = %node.node_id, error = %e, "gateway write failed");
        }

        let outcome = self.confirm(&node.node_id, &input.instance, state).await;
        written?;
        outcome
    }

    /// Resolve an input address through the publisher, then apply the
    /// command to it.
    pub async fn set_input(
        &self,
        input_address: &str,
        value: &str,
    ) -> Result<CommandOutcome, CoreError> {
        let input = self
            .inner
            .publisher
            .input_by_address(input_address)
            .ok_or_else(|| CoreError::NodeNotFound {
                address: input_address.to_owned(),
            })?;
        let command = SetInputMessage {
            address: input_address.to_owned(),
            value: value.to_owned(),
        };
        self.handle_input_command(&input, &command).await
    }

    /// Handle a command on its own task so its propagation delay does not
    /// hold up other commands.
    pub fn spawn_input_command(
        &self,
        input: InputDiscoveryMessage,
        command: SetInputMessage,
    ) -> JoinHandle<Result<CommandOutcome, CoreError>> {
        let adapter = self.clone();
        tokio::spawn(async move { adapter.handle_input_command(&input, &command).await })
    }

    /// Node configuration requests are declined.
    pub fn handle_config_command(&self, address: &str, attrs: &NodeAttrs) -> NodeAttrs {
        info!(%address, requested = attrs.len(), "node configuration is not supported");
        NodeAttrs::new()
    }

    /// Wait out the propagation delay, poll, then check whether the
    /// published switch value matches the commanded state. Shutdown skips
    /// the poll.
    async fn confirm(
        &self,
        node_id: &str,
        instance: &str,
        expected: OnOff,
    ) -> Result<CommandOutcome, CoreError> {
        let delay = self.inner.config.propagation_delay;
        tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => {
                debug!(node = %node_id, "shutdown during propagation delay, skipping poll");
                return Ok(CommandOutcome::Cancelled);
            }
            () = tokio::time::sleep(delay) => {}
        }

        let updates = self.poll().await?;
        let published = self
            .inner
            .publisher
            .output_value(node_id, &OutputType::Switch, instance)
            .map(|v| v.value);
        let confirmed = published.as_deref() == Some(expected.as_value());
        if !confirmed {
            debug!(
                node = %node_id,
                expected = %expected,
                published = published.as_deref().unwrap_or("n/a"),
                "node has not reached the commanded state"
            );
        }
        Ok(CommandOutcome::from_poll(confirmed, updates))
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Poll on a fixed interval until cancelled.
async fn poll_task(adapter: Adapter, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(adapter.inner.config.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // the initial poll is run by `start`

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                // Failures are logged by `poll`.
                let _ = adapter.poll().await;
            }
        }
    }
}
