//! Command and query interface for the layout editor.
//!
//! Commands describe input and edits the way a host window or a script
//! would issue them; queries read back selection, geometry and view state.
//! Both serialize as tagged JSON, which makes sessions recordable and
//! replayable.
//!
//! # Example
//! ```ignore
//! use api::{Command, Session};
//!
//! let mut session = Session::from_document(&document, EditorSettings::default())?;
//! let result = session.execute(Command::SetGrid { size: 8 });
//! ```

mod command;
mod error;
mod executor;
mod query;
mod session;
mod target;

pub use command::*;
pub use error::ApiError;
pub use executor::{execute_command, execute_query};
pub use query::*;
pub use session::{parse_script, Session, Step};
pub use target::*;
