//! Screen view models folding repository envelopes into observable state.

mod home;
mod notification;
mod scope;
mod sprint;
mod state;

pub use home::{HomeError, HomeViewModel, HomeViewState};
pub use notification::ErrorNotifier;
pub use scope::{ScreenScope, SlotTicket};
pub use sprint::{SprintError, SprintViewModel, SprintViewState};
pub use state::{ScreenState, StateHolder, ViewStatus, fold_status};
pub(crate) use state::drive;
