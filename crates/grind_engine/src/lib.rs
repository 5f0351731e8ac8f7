#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
//! Map document model for the Grindfest map editor: the character grid,
//! trigger annotations and the `.map` text format.

mod error;
pub use error::*;

mod position;
pub use position::*;

mod trigger;
pub use trigger::*;

mod document;
pub use document::*;

pub mod formats;
pub use formats::{FormatWarning, ParseReport, load_map, parse, parse_with_report, save_map, serialize};

pub mod limits;

pub type EngineResult<T> = Result<T>;
