//! Named signals with ordered synchronous dispatch
//!
//! A [`SignalHub`] owns a set of registered signal names. Listeners connect
//! to a registered name and are called, in connection order, every time the
//! signal is emitted.
//!
//! ```
//! use hostkv_signals::SignalHub;
//!
//! let hub: SignalHub<String> = SignalHub::with_signals(&["ConfigChanged"]);
//! let id = hub.connect("ConfigChanged", |key: &String| println!("{key} changed")).unwrap();
//! assert_eq!(hub.emit("ConfigChanged", &"volume".to_string()).unwrap(), 1);
//! assert!(hub.disconnect("ConfigChanged", id).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hub;

pub use hub::{Listener, ListenerId, SignalError, SignalHub};
