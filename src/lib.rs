//! # Rastro
//!
//! Op-level code tracing for ML pipelines.
//!
//! Rastro (Spanish: "trail, trace") records every primitive numerical
//! operation dispatched inside a traced region of a host runtime,
//! together with the user call stack that produced it, and renders a
//! compact, stack-diffed, dim-colorized trace as operations occur.
//! Consecutive operations reached through the same call path print that
//! path once; only the divergent tail of each stack is shown, indented
//! to its true depth.
//!
//! ## Architecture
//!
//! The host runtime supplies three things and keeps owning all of them:
//!
//! - a **dispatch hook**: it invokes the session (a [`DispatchHandler`])
//!   once per primitive operation, and the session calls the operation
//!   through unchanged;
//! - a **stack introspection facility** ([`StackProvider`]): frames with
//!   file, line, function, and best-effort source text;
//! - a **dtype abbreviation table** ([`DtypeAbbrevs`]): short codes for
//!   every element kind the runtime can produce.
//!
//! Rastro never touches tensor data: an array-like argument contributes
//! only its element kind and shape, displayed as a token like
//! `f32[2, 3]`.
//!
//! ## Example
//!
//! ```
//! use rastro::{
//!     ArgValue, DispatchHandler, Dtype, OpCall, OpIdent, RawFrame, StackProvider, TensorMeta,
//!     TraceConfig, TracingSession,
//! };
//!
//! struct OneFrame;
//!
//! impl StackProvider for OneFrame {
//!     fn capture(&self) -> Vec<RawFrame> {
//!         vec![RawFrame {
//!             file: "model.rs".to_string(),
//!             line: 42,
//!             function: "forward".to_string(),
//!             source_line: Some("let y = x.add(&b)?;".to_string()),
//!         }]
//!     }
//! }
//!
//! let mut session = TracingSession::with_config(TraceConfig::quiet(), Box::new(OneFrame));
//!
//! let op = OpIdent::Qualified("ops::add".to_string());
//! let x = ArgValue::Tensor(TensorMeta::new(Dtype::F32, vec![2, 3]));
//! let call = OpCall { op: &op, types: &[Dtype::F32], args: &[x.clone(), x], kwargs: &[] };
//!
//! // The host executes the real operation inside the closure.
//! let sum = session.dispatch(call, || 6.0_f32).unwrap();
//! assert_eq!(sum, 6.0);
//!
//! let block = session.render_trace(0).unwrap();
//! assert_eq!(
//!     block,
//!     "let y = x.add(&b)?;  # model.rs:42 in forward: add(f32[2, 3], f32[2, 3]);"
//! );
//! ```
//!
//! ## Scope
//!
//! Rastro observes; it never modifies, retries, or suppresses an
//! intercepted operation, keeps no timing data, and persists nothing.
//! Capture is single-threaded and synchronous by contract: hosts that
//! dispatch from several threads must serialize access to a session.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)] // usize -> isize for replay indices is safe
#![allow(clippy::cast_sign_loss)] // isize -> usize after the range check
#![allow(clippy::uninlined_format_args)] // Prefer explicit format args

pub mod dtype;
pub mod error;
pub mod op;
pub mod session;
pub mod stack;
pub mod trace;
pub mod value;

pub use dtype::{Dtype, DtypeAbbrevs};
pub use error::{RastroError, Result};
pub use op::{format_call, OpIdent, NATIVE_OP_PREFIX};
pub use session::{DispatchHandler, OpCall, TraceConfig, TracingSession};
pub use stack::{capture_context, FrameDescriptor, RawFrame, StackProvider};
pub use trace::{colorize, render, TraceRecord, NO_TRACES};
pub use value::{ArgValue, TensorMeta};
