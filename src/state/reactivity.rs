// ============================================================================
// REACTIVITY - Valor compartido con notificación a subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Subscriber = Rc<dyn Fn()>;

/// Estado reactivo: los clones comparten valor y subscribers
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    // Copia de la lista: un subscriber puede leer o suscribir sin conflicto de borrow
    fn notify(&self) {
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: PartialEq> ReactiveState<T> {
    /// Igual que `set`, pero sin notificar si el valor no cambia
    pub fn set_if_changed(&self, new_value: T) -> bool {
        if *self.value.borrow() == new_value {
            return false;
        }
        self.set(new_value);
        true
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}
