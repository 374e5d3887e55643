//! Interaction collectors: a filtered event stream bound to one message.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

/// Longest window a collector waits. Larger timeouts are clamped to it.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Predicate deciding whether a collected interaction reaches the engine.
///
/// Implementations read what they need from the interaction synchronously and
/// return an owned future.
pub type CollectorFilter<I> = Arc<dyn Fn(&I) -> BoxFuture<'static, bool> + Send + Sync>;

/// Why a collector stopped delivering events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The timeout window elapsed.
    Time,
    /// `stop` was called with this reason.
    Stopped(String),
    /// The upstream event source went away.
    Closed,
}

impl EndReason {
    pub fn is_timeout(&self) -> bool {
        matches!(self, EndReason::Time)
    }
}

/// One item of a collector's stream. `End` is terminal.
#[derive(Debug)]
pub enum CollectorEvent<I> {
    Collect(I),
    End(EndReason),
}

/// Stream of interactions bound to one message and one timeout window.
pub trait InteractionCollector: Send + 'static {
    type Interaction: Send + 'static;

    /// Wait for the next accepted interaction or the end of the stream.
    ///
    /// Once `End` has been returned every later call returns `End` again.
    fn next_event(&mut self) -> impl Future<Output = CollectorEvent<Self::Interaction>> + Send;

    /// End the stream early. Later calls are no-ops.
    fn stop(&mut self, reason: &str);
}

/// Collector fed through an unbounded channel.
///
/// Adapters push raw interactions for one message into the sender half; the
/// collector applies the filter and enforces the timeout.
pub struct ChannelCollector<I> {
    receiver: mpsc::UnboundedReceiver<I>,
    filter: CollectorFilter<I>,
    deadline: Instant,
    ended: Option<EndReason>,
    on_end: Option<Box<dyn FnOnce() + Send>>,
    collected: usize,
}

fn deadline_after(timeout: Duration) -> Instant {
    Instant::now() + timeout.min(FAR_FUTURE)
}

impl<I: Send + 'static> ChannelCollector<I> {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<I>,
        filter: CollectorFilter<I>,
        timeout: Duration,
    ) -> Self {
        Self {
            receiver,
            filter,
            deadline: deadline_after(timeout),
            ended: None,
            on_end: None,
            collected: 0,
        }
    }

    /// Run `hook` exactly once when the collector ends or is dropped.
    pub fn on_end(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_end = Some(Box::new(hook));
        self
    }

    /// Number of interactions that passed the filter.
    pub fn collected(&self) -> usize {
        self.collected
    }

    fn finish(&mut self, reason: EndReason) -> CollectorEvent<I> {
        if self.ended.is_none() {
            self.receiver.close();
            if let Some(hook) = self.on_end.take() {
                hook();
            }
            self.ended = Some(reason.clone());
        }
        CollectorEvent::End(self.ended.clone().unwrap_or(reason))
    }
}

impl<I: Send + 'static> InteractionCollector for ChannelCollector<I> {
    type Interaction = I;

    async fn next_event(&mut self) -> CollectorEvent<I> {
        loop {
            if let Some(reason) = &self.ended {
                return CollectorEvent::End(reason.clone());
            }

            tokio::select! {
                _ = tokio::time::sleep_until(self.deadline) => {
                    return self.finish(EndReason::Time);
                }
                received = self.receiver.recv() => {
                    let Some(interaction) = received else {
                        return self.finish(EndReason::Closed);
                    };

                    let accepted = (self.filter)(&interaction);
                    if accepted.await {
                        self.collected += 1;
                        return CollectorEvent::Collect(interaction);
                    }

                    trace!("interaction rejected by collector filter");
                }
            }
        }
    }

    fn stop(&mut self, reason: &str) {
        let _ = self.finish(EndReason::Stopped(reason.to_owned()));
    }
}

impl<I> Drop for ChannelCollector<I> {
    fn drop(&mut self) {
        if let Some(hook) = self.on_end.take() {
            hook();
        }
    }
}
