//! Application core
//!
//! ## Architecture
//!
//! - **messages**: Typed input events and output UI updates
//! - **context**: The `Dashboard` context that owns all state and handles events
//! - **event_loop**: The queue that feeds events to the context one at a time
//!
//! ## Data Flow
//!
//! ```text
//! front end → AppEvent → queue → Dashboard::handle → UiUpdate → front end
//! ```

mod context;
mod event_loop;
mod messages;

pub use context::{Dashboard, API_DEPENDENT_CONTROLS};
pub use event_loop::{event_queue, run, EventReceiver, EventSender};
pub use messages::{AppEvent, UiUpdate};
