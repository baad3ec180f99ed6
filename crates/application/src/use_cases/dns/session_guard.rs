use crate::ports::UdpSession;
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// Owns a [`UdpSession`] and closes it exactly once: either on an explicit
/// [`SessionGuard::release`] or when the guard is dropped, unwinding included.
pub struct SessionGuard<S: UdpSession> {
    session: S,
    released: bool,
}

impl<S: UdpSession> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            released: false,
        }
    }

    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.session.close();
            trace!("UDP session released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<S: UdpSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: UdpSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: UdpSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}
