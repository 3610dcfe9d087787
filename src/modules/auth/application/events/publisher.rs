use async_trait::async_trait;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::email::application::errors::MailSendError;

#[async_trait]
pub trait ApplicationListener<E>: Send + Sync {
    async fn on_application_event(&self, event: &E) -> Result<(), MailSendError>;
}

/// Delivers events of one type to every registered listener.
///
/// Each listener runs on its own tokio task, so `publish` returns as soon as
/// the tasks are spawned. Listeners are not ordered relative to each other,
/// and a failing listener is logged without affecting the others or the
/// publisher.
pub struct ApplicationEventPublisher<E> {
    listeners: Vec<Arc<dyn ApplicationListener<E>>>,
}

impl<E> Clone for ApplicationEventPublisher<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E> Default for ApplicationEventPublisher<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for ApplicationEventPublisher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationEventPublisher")
            .field("event", &type_name::<E>())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> ApplicationEventPublisher<E>
where
    E: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(mut self, listener: Arc<dyn ApplicationListener<E>>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn publish(&self, event: E) -> Vec<JoinHandle<()>> {
        let event = Arc::new(event);

        self.listeners
            .iter()
            .map(|listener| {
                let listener = Arc::clone(listener);
                let event = Arc::clone(&event);

                tokio::spawn(async move {
                    if let Err(e) = listener.on_application_event(&event).await {
                        tracing::error!(
                            event = type_name::<E>(),
                            recipient = %e.recipient,
                            error = %e,
                            "Event listener failed"
                        );
                    }
                })
            })
            .collect()
    }
}
