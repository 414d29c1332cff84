//! Live value bindings — the optional indirection that lets an entry's
//! effective value track an external source instead of the cached field.
//!
//! A binding may hold a shared value cell, a get accessor, and a set
//! accessor, each independently settable. Precedence on live get is
//! accessor first, then cell; live set is symmetric with the set
//! accessor. The registry holds only a `Weak` to the cell — the caller's
//! `Arc` owns it, and a dropped cell degrades to [`AccessError::Unbound`]
//! instead of dangling.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use crate::error::AccessError;
use crate::types::value::Value;

/// Callback returning the current live value, or `None` on failure.
pub type GetAccessor = Box<dyn FnMut() -> Option<Value> + Send>;

/// Callback consuming a new live value, returning `false` on failure.
pub type SetAccessor = Box<dyn FnMut(Value) -> bool + Send>;


/// Optional live sources for one entry. Default is fully unbound.
#[derive(Default)]
pub struct Binding {
    cell: Option<Weak<Mutex<Value>>>,
    get: Option<GetAccessor>,
    set: Option<SetAccessor>,
}

impl Binding {
    /// Bind (or re-bind) the shared value cell. Other kinds are untouched.
    pub fn bind_cell(&mut self, cell: &Arc<Mutex<Value>>) {
        self.cell = Some(Arc::downgrade(cell));
    }

    /// Bind (or re-bind) the get accessor. Other kinds are untouched.
    pub fn bind_get(&mut self, accessor: GetAccessor) {
        self.get = Some(accessor);
    }

    /// Bind (or re-bind) the set accessor. Other kinds are untouched.
    pub fn bind_set(&mut self, accessor: SetAccessor) {
        self.set = Some(accessor);
    }

    /// Remove the cell and both accessors.
    pub fn clear(&mut self) {
        self.cell = None;
        self.get = None;
        self.set = None;
    }

    pub fn is_bound(&self) -> bool {
        self.cell.is_some() || self.get.is_some() || self.set.is_some()
    }

    /// Live read: get accessor first, then the value cell, else unbound.
    pub fn live_get(&mut self, id: u32) -> Result<Value, AccessError> {
        if let Some(get) = self.get.as_mut() {
            return get().ok_or(AccessError::Accessor(id));
        }
        if let Some(weak) = self.cell.as_ref() {
            let Some(cell) = weak.upgrade() else {
                return Err(AccessError::Unbound(id));
            };
            // A poisoned cell counts as a failed source.
            let guard = cell.lock().map_err(|_| AccessError::Accessor(id))?;
            return Ok(guard.clone());
        }
        Err(AccessError::Unbound(id))
    }

    /// Live write: set accessor first, then the value cell, else unbound.
    pub fn live_set(&mut self, id: u32, value: Value) -> Result<(), AccessError> {
        if let Some(set) = self.set.as_mut() {
            return if set(value) {
                Ok(())
            } else {
                Err(AccessError::Accessor(id))
            };
        }
        if let Some(weak) = self.cell.as_ref() {
            let Some(cell) = weak.upgrade() else {
                return Err(AccessError::Unbound(id));
            };
            let mut guard = cell.lock().map_err(|_| AccessError::Accessor(id))?;
            *guard = value;
            return Ok(());
        }
        Err(AccessError::Unbound(id))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("cell", &self.cell.is_some())
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_get_and_set_fail_distinctly() {
        let mut b = Binding::default();
        assert_eq!(b.live_get(3), Err(AccessError::Unbound(3)));
        assert_eq!(b.live_set(3, Value::Int(1)), Err(AccessError::Unbound(3)));
    }

    #[test]
    fn cell_get_and_set() {
        let cell = Arc::new(Mutex::new(Value::Int(10)));
        let mut b = Binding::default();
        b.bind_cell(&cell);
        assert_eq!(b.live_get(1), Ok(Value::Int(10)));
        b.live_set(1, Value::Int(20)).unwrap();
        assert_eq!(*cell.lock().unwrap(), Value::Int(20));
    }

    #[test]
    fn accessor_takes_precedence_over_cell() {
        let cell = Arc::new(Mutex::new(Value::Int(10)));
        let mut b = Binding::default();
        b.bind_cell(&cell);
        b.bind_get(Box::new(|| Some(Value::Int(99))));
        // Accessor wins; the cell is never read.
        assert_eq!(b.live_get(1), Ok(Value::Int(99)));

        b.bind_set(Box::new(|_| true));
        b.live_set(1, Value::Int(5)).unwrap();
        // The set accessor consumed the write; the cell is untouched.
        assert_eq!(*cell.lock().unwrap(), Value::Int(10));
    }

    #[test]
    fn accessor_failure_is_not_unbound() {
        let mut b = Binding::default();
        b.bind_get(Box::new(|| None));
        b.bind_set(Box::new(|_| false));
        assert_eq!(b.live_get(2), Err(AccessError::Accessor(2)));
        assert_eq!(b.live_set(2, Value::Int(0)), Err(AccessError::Accessor(2)));
    }

    #[test]
    fn dropped_cell_degrades_to_unbound() {
        let cell = Arc::new(Mutex::new(Value::Int(1)));
        let mut b = Binding::default();
        b.bind_cell(&cell);
        drop(cell);
        assert_eq!(b.live_get(4), Err(AccessError::Unbound(4)));
    }

    #[test]
    fn kinds_are_independent_and_rebindable() {
        let mut b = Binding::default();
        b.bind_get(Box::new(|| Some(Value::Int(1))));
        // Re-binding get leaves set absent.
        b.bind_get(Box::new(|| Some(Value::Int(2))));
        assert_eq!(b.live_get(1), Ok(Value::Int(2)));
        assert_eq!(b.live_set(1, Value::Int(0)), Err(AccessError::Unbound(1)));
    }

    #[test]
    fn clear_removes_everything() {
        let cell = Arc::new(Mutex::new(Value::Int(1)));
        let mut b = Binding::default();
        b.bind_cell(&cell);
        b.bind_get(Box::new(|| Some(Value::Int(1))));
        b.bind_set(Box::new(|_| true));
        assert!(b.is_bound());
        b.clear();
        assert!(!b.is_bound());
        assert_eq!(b.live_get(1), Err(AccessError::Unbound(1)));
    }
}
