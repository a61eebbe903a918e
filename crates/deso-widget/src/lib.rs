//! Interaction session for the DeSO address lookup.
//!
//! A [`Session`] owns the form state (query text, suggestion list, highlight,
//! result or error, loading flag) and is mutated only through `&mut self`
//! event handlers. Network work runs in spawned tasks that report back over a
//! channel; every completion carries a sequence [`Ticket`] and is applied only
//! if it is still the latest one issued, so superseded work can never
//! overwrite fresh state.

pub mod backend;
pub mod debounce;
pub mod keyboard;
pub mod pipeline;
pub mod present;
pub mod sequence;
pub mod session;
pub mod state;
pub mod widget;

pub use backend::AddressBackend;
pub use keyboard::{Key, KeyOutcome};
pub use pipeline::run_lookup;
pub use present::{AreaView, AttributeRow, DebugView, ResultView, NO_POLYGON_TEXT};
pub use sequence::{SequenceGate, Ticket};
pub use session::{Applied, Event, Session, SubmitError, DEFAULT_DEBOUNCE, MIN_QUERY_CHARS};
pub use state::{FormState, Outcome};
pub use widget::{Widget, WidgetError};
