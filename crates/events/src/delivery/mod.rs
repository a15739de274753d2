//! External delivery channels for outbound notifications.

pub mod email;
