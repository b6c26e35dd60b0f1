use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::auth::Subscription;
use crate::models::Session;

type Listener = Rc<dyn Fn(Option<Session>)>;

#[derive(Default)]
struct Slots {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Registry of session-change listeners.
///
/// Listeners run in registration order on the notifying thread. A listener may
/// unsubscribe itself (or others) while being notified; the current round still
/// delivers to the snapshot taken when it started.
#[derive(Clone, Default)]
pub struct SessionListeners {
    slots: Rc<RefCell<Slots>>,
}

impl SessionListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(Option<Session>) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.listeners.insert(id, Rc::new(listener));
            id
        };

        let slots: Weak<RefCell<Slots>> = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = slots.upgrade() {
                slots.borrow_mut().listeners.remove(&id);
            }
        })
    }

    pub fn notify(&self, session: Option<&Session>) {
        let snapshot: Vec<Listener> = self.slots.borrow().listeners.values().cloned().collect();
        tracing::debug!(
            listeners = snapshot.len(),
            signed_in = session.is_some(),
            "Session changed"
        );
        for listener in snapshot {
            listener(session.cloned());
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SessionListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionListeners")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(id: &str) -> Session {
        Session {
            access_token: format!("token-{id}"),
            refresh_token: "refresh".to_string(),
            expires_at: None,
            user: User {
                id: id.to_string(),
                email: None,
                last_sign_in_at: None,
            },
        }
    }

    #[test]
    fn test_notify_reaches_all_listeners_in_order() {
        let listeners = SessionListeners::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = seen.clone();
        let _first = listeners.subscribe(move |s| a.borrow_mut().push(("a", s.map(|s| s.user.id))));
        let b = seen.clone();
        let _second = listeners.subscribe(move |s| b.borrow_mut().push(("b", s.map(|s| s.user.id))));

        listeners.notify(Some(&session("u-1")));
        listeners.notify(None);

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a", Some("u-1".to_string())),
                ("b", Some("u-1".to_string())),
                ("a", None),
                ("b", None),
            ]
        );
    }

    #[test]
    fn test_unsubscribed_listener_is_not_called() {
        let listeners = SessionListeners::new();
        let calls = Rc::new(RefCell::new(0));

        let counter = calls.clone();
        let mut sub = listeners.subscribe(move |_| *counter.borrow_mut() += 1);
        assert_eq!(listeners.len(), 1);

        sub.unsubscribe();
        assert!(listeners.is_empty());

        listeners.notify(None);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let listeners = SessionListeners::new();
        let mut sub = listeners.subscribe(|_| {});
        drop(listeners);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
