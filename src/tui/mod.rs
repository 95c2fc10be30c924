// Interactive clipboard history browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;

use crate::clipboard::ClipboardAccess;
use crate::engine::{HistoryEngine, Poller};
use crate::store::KeyValueStore;

/// Run the interactive TUI until the user quits. The poller is stopped on return.
pub fn run_interactive<S, C>(engine: HistoryEngine<S, C>, poller: Poller) -> Result<()>
where
    S: KeyValueStore,
    C: ClipboardAccess,
{
    let mut app = App::new(engine, poller)?;

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
