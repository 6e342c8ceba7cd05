use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct CellInner<T> {
    value: RwLock<T>,
    listeners: RwLock<BTreeMap<u64, Listener<T>>>,
    next_listener_id: AtomicU64,
}

pub struct ObservableCell<T> {
    inner: Arc<CellInner<T>>,
}

impl<T> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> ObservableCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: RwLock::new(value),
                listeners: RwLock::new(BTreeMap::new()),
                next_listener_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        recover_read(&self.inner.value).clone()
    }

    pub fn set(&self, value: T) {
        {
            let mut slot = recover_write(&self.inner.value);
            *slot = value;
        }
        self.notify();
    }

    pub fn update(&self, apply: impl FnOnce(&mut T)) {
        {
            let mut slot = recover_write(&self.inner.value);
            apply(&mut slot);
        }
        self.notify();
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::SeqCst);
        recover_write(&self.inner.listeners).insert(id, Arc::new(listener));
        let weak = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    recover_write(&inner.listeners).remove(&id);
                }
            })),
        }
    }

    pub fn read_view(&self) -> ReadView<T> {
        ReadView { cell: self.clone() }
    }

    fn notify(&self) {
        let value = self.get();
        let listeners: Vec<Listener<T>> = recover_read(&self.inner.listeners)
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(&value);
        }
    }
}

pub struct ReadView<T> {
    cell: ObservableCell<T>,
}

impl<T> Clone for ReadView<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T> ReadView<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn get(&self) -> T {
        self.cell.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.cell.subscribe(listener)
    }
}

pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn detach(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

fn recover_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn recover_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
