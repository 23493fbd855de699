use futures::future::select_all;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::trace;

/// Type-erased handle used to wire properties together
pub trait PropertyLike: Send + Sync {
    fn subscribe(&self) -> PropertySubscriber;
    fn name(&self) -> &str;
    fn debug_value(&self) -> String;
}

/// Change notifications for one property.
///
/// Not `Clone`: call `subscribe()` again for another independent subscriber.
pub struct PropertySubscriber {
    receiver: broadcast::Receiver<()>,
}

impl PropertySubscriber {
    /// Wait for the next change. Returns false once the property is gone.
    pub async fn wait_for_change(&mut self) -> bool {
        match self.receiver.recv().await {
            // Lagging still means "something changed"
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => true,
            Err(broadcast::error::RecvError::Closed) => false,
        }
    }

    /// Drain pending notifications without waiting; true if any were queued
    pub fn try_recv(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => changed = true,
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return changed,
            }
        }
    }
}

/// Observable value shared between the view model and the view layer
pub struct Property<T: Clone + Send + Sync> {
    value: Arc<watch::Sender<T>>,
    notify: broadcast::Sender<()>,
    name: Arc<str>,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let name: String = name.into();
        let (notify, _) = broadcast::channel(64);
        Self {
            value: Arc::new(watch::Sender::new(initial_value)),
            notify,
            name: Arc::from(name),
        }
    }

    pub async fn get(&self) -> T {
        self.get_sync()
    }

    /// The value lives in memory, so reading never waits
    pub fn get_sync(&self) -> T {
        self.value.borrow().clone()
    }

    pub async fn set(&self, new_value: T) {
        self.value.send_replace(new_value);
        self.notify_changed();
    }

    pub async fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.value.send_modify(updater);
        self.notify_changed();
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        PropertySubscriber {
            receiver: self.notify.subscribe(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscriber_count(&self) -> usize {
        self.notify.receiver_count()
    }

    fn notify_changed(&self) {
        // No subscribers is fine
        let _ = self.notify.send(());
    }
}

impl<T: Clone + Send + Sync + PartialEq> Property<T> {
    /// Store and notify only when the value differs. Returns whether it did.
    pub async fn set_if_changed(&self, new_value: T) -> bool {
        let changed = self.value.send_if_modified(|current| {
            if *current == new_value {
                false
            } else {
                *current = new_value;
                true
            }
        });
        if changed {
            self.notify_changed();
        }
        changed
    }
}

impl<T: Clone + Send + Sync> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            notify: self.notify.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.name)
    }
}

impl<T: Clone + Send + Sync + Debug> PropertyLike for Property<T> {
    fn subscribe(&self) -> PropertySubscriber {
        Property::subscribe(self)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn debug_value(&self) -> String {
        format!("{:?}", self.get_sync())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Property<T> {
    /// Derived property that applies `f` to every new value
    pub fn map<U, F>(&self, f: F) -> ComputedProperty<U>
    where
        U: Clone + Send + Sync + PartialEq + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        ComputedProperty::new(
            format!("{}.map", self.name()),
            vec![Arc::new(self.clone())],
            move || f(source.get_sync()),
        )
    }
}

/// Property recomputed from its dependencies whenever any of them changes.
///
/// Recomputation runs on a tokio task, so construction with dependencies needs
/// a running runtime. Notifications that arrive together are coalesced, and an
/// unchanged result does not notify downstream subscribers.
pub struct ComputedProperty<T: Clone + Send + Sync> {
    property: Property<T>,
    task: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + Sync + PartialEq + 'static> ComputedProperty<T> {
    pub fn new<F>(
        name: impl Into<String>,
        dependencies: Vec<Arc<dyn PropertyLike>>,
        compute: F,
    ) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let property = Property::new(compute(), name);

        if dependencies.is_empty() {
            return Self {
                property,
                task: None,
            };
        }

        let mut subscribers: Vec<PropertySubscriber> =
            dependencies.iter().map(|dep| dep.subscribe()).collect();
        let target = property.clone();

        let task = tokio::spawn(async move {
            loop {
                let waits = subscribers
                    .iter_mut()
                    .map(|subscriber| Box::pin(subscriber.wait_for_change()));
                let (changed, _, pending) = select_all(waits).await;
                drop(pending);

                if !changed {
                    break;
                }

                for subscriber in &mut subscribers {
                    subscriber.try_recv();
                }

                if target.set_if_changed(compute()).await {
                    trace!(property = target.name(), "Recomputed");
                }
            }
        });

        Self {
            property,
            task: Some(task),
        }
    }
}

impl<T: Clone + Send + Sync> ComputedProperty<T> {
    pub async fn get(&self) -> T {
        self.property.get_sync()
    }

    pub fn get_sync(&self) -> T {
        self.property.get_sync()
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        self.property.subscribe()
    }

    pub fn name(&self) -> &str {
        self.property.name()
    }

    /// Read-only handle on the current value, usable as another property's dependency
    pub fn property(&self) -> Property<T> {
        self.property.clone()
    }

    /// Whether the recompute task is alive; false for dependency-free properties
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl<T: Clone + Send + Sync> Drop for ComputedProperty<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for ComputedProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComputedProperty({})", self.property.name)
    }
}

impl<T: Clone + Send + Sync + Debug> PropertyLike for ComputedProperty<T> {
    fn subscribe(&self) -> PropertySubscriber {
        self.property.subscribe()
    }

    fn name(&self) -> &str {
        self.property.name()
    }

    fn debug_value(&self) -> String {
        format!("{:?}", self.get_sync())
    }
}
